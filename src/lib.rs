pub mod client;
mod constants;
pub mod types;
pub mod util;

// Re-exporting these dependencies since they might be helpful for building a client or
// parsing the raw responses.
pub use reqwest;
pub use serde;
pub use serde_json;
