use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The generic type is the return value. Otherwise, regardless of request type,
/// we're just returning the error if there is one.
pub type Result<T, E = GymError> = std::result::Result<T, E>;

/// The email and password used to sign into the booking site.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Credentials {
    /// The account email.
    pub email: String,
    /// The account password.
    pub password: String,
}

impl Credentials {
    /// Creates a new set of credentials.
    ///
    /// # Parameters
    /// - `email`: The account email.
    /// - `password`: The account password.
    ///
    /// # Returns
    /// The credentials.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

// Hand-written so that passwords never end up in logs.
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// A class (lesson) that can be booked. This is usually taken from the timetable.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    /// The booking ID, as used by the site. For example, `8291734`.
    pub id: String,
    /// The name of the class. For example, `Muay Thai`.
    pub class_name: String,
    /// When the class starts. For example, `18:30`.
    pub time: String,
}

impl Lesson {
    /// Creates a new lesson.
    ///
    /// # Parameters
    /// - `id`: The booking ID.
    /// - `class_name`: The name of the class.
    /// - `time`: When the class starts.
    ///
    /// # Returns
    /// The lesson.
    pub fn new(
        id: impl Into<String>,
        class_name: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            class_name: class_name.into(),
            time: time.into(),
        }
    }
}

impl Display for Lesson {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {} at {}", self.id, self.class_name, self.time)
    }
}

/// The body returned after adding a booking to the basket.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
pub struct BookingResponse {
    /// Whether the class was added to the basket. A missing or `null` field counts as `false`.
    #[serde(rename = "Success", default, deserialize_with = "deserialize_truthy")]
    pub success: bool,
    /// A message from the site, usually only present when something went wrong.
    #[serde(rename = "Message", default)]
    pub message: Option<Value>,
}

/// Reads any JSON value as a boolean the way the site's own scripts would: `null`, `false`,
/// `0`, `NaN` and `""` are false, everything else is true.
fn deserialize_truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

#[derive(Error, Debug)]
pub enum GymError {
    /// Occurs if there was an error encountered by the reqwest library.
    #[error("Request error occurred: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Occurs when there was an error parsing the URL.
    #[error("Malformed url: {0}")]
    UrlParseError(#[from] url::ParseError),

    /// Occurs when a response body could not be decoded. This will most likely occur
    /// if your session isn't valid and the site returned an HTML page instead.
    #[error("Serde error occurred: {0}")]
    SerdeError(#[from] serde_json::Error),

    /// Occurs when the site rejected the credentials.
    #[error("Login failed")]
    LoginFailed,

    /// Occurs when the site understood the booking request but didn't add the class
    /// to the basket (e.g., the class is full). Contains the raw response body.
    #[error("Booking rejected: {0}")]
    BookingRejected(String),

    /// Occurs when the site responds with a status code that isn't accepted for that
    /// request. The context, if any, is not cleaned so it may be very large (e.g., raw HTML).
    #[error("Unsuccessful status code: {0} (context: {1:?})")]
    BadStatusCode(u16, Option<String>),
}
