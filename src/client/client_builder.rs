use std::time::Duration;

use reqwest::redirect::Policy;
use reqwest::Client;
use url::Url;

use crate::client::request_data::GymClientData;
use crate::client::GymClient;
use crate::constants::{DEFAULT_BASE_URL, MY_USER_AGENT};
use crate::types;

/// A builder for the `GymClient`. This should be used to construct a new client.
///
/// # Example
/// ```rust
/// use std::time::Duration;
/// use gymweg::client::GymClient;
///
/// let client = GymClient::builder()
///     .with_base_url("https://gymbox.legendonlineservices.co.uk/enterprise")
///     .with_timeout(Duration::from_secs(10))
///     .try_build();
///
/// assert!(client.is_ok());
/// ```
pub struct GymClientBuilder {
    cookies: String,
    client: Option<Client>,
    base_url: String,
    user_agent: String,
    timeout: Option<Duration>,
}

impl GymClientBuilder {
    /// Constructs a `GymClientBuilder` with the default base URL and user agent, no
    /// timeout, and no cookies.
    ///
    /// # Returns
    /// A `GymClientBuilder`.
    pub fn new() -> Self {
        Self {
            cookies: String::new(),
            client: None,
            base_url: DEFAULT_BASE_URL.to_owned(),
            user_agent: MY_USER_AGENT.to_owned(),
            timeout: None,
        }
    }

    /// Sets the cookies to the specified cookies. Use this to resume a session that was
    /// started elsewhere.
    ///
    /// # Parameters
    /// - `cookies`: The session cookies, formatted as a `Cookie` header value.
    ///
    /// # Returns
    /// The builder.
    pub fn with_cookies(mut self, cookies: impl Into<String>) -> Self {
        self.cookies = cookies.into();
        self
    }

    /// Sets the client to the specified client.
    ///
    /// The site answers logins, logouts and payments with redirects, and those status
    /// codes are checked. Make sure the client does _not_ follow redirects.
    ///
    /// # Parameters
    /// - `client`: The client to use.
    ///
    /// # Returns
    /// The builder.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Sets the base URL that every endpoint is relative to.
    ///
    /// # Parameters
    /// - `base_url`: The base URL. A trailing `/` is added if it's missing.
    ///
    /// # Returns
    /// The builder.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the user agent to the specified user agent.
    ///
    /// # Parameters
    /// - `user_agent`: The user agent to use.
    ///
    /// # Returns
    /// The builder.
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Sets the timeout for every request. Without one, the client's own timeout (if
    /// any) applies.
    ///
    /// # Parameters
    /// - `timeout`: The timeout to use.
    ///
    /// # Returns
    /// The builder.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Attempts to build the client.
    ///
    /// # Returns
    /// The `GymClient`, or an error if the base URL is malformed or the default
    /// HTTP client could not be created.
    pub fn try_build(self) -> types::Result<GymClient> {
        let client = match self.client {
            Some(client) => client,
            None => default_client()?,
        };

        Ok(GymClient {
            data: GymClientData {
                #[cfg(feature = "multi")]
                cookies: parking_lot::Mutex::new(self.cookies),
                #[cfg(not(feature = "multi"))]
                cookies: self.cookies,
                client,
                base_url: parse_base_url(&self.base_url)?,
                user_agent: self.user_agent,
                timeout: self.timeout,
            },
        })
    }
}

impl Default for GymClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Creates a client that leaves redirects alone, so that a `302` can be seen.
///
/// # Returns
/// The client.
pub(crate) fn default_client() -> reqwest::Result<Client> {
    Client::builder().redirect(Policy::none()).build()
}

/// Parses the base URL, making sure it ends with `/` so that endpoints are joined onto
/// it instead of replacing its last segment.
///
/// # Parameters
/// - `base_url`: The base URL.
///
/// # Returns
/// The parsed URL.
pub(crate) fn parse_base_url(base_url: &str) -> types::Result<Url> {
    let mut url = Url::parse(base_url)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}
