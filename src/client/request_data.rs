#[cfg(feature = "multi")]
use parking_lot::Mutex;
use std::time::Duration;

use reqwest::header::{COOKIE, USER_AGENT};
use reqwest::{Client, IntoUrl, RequestBuilder};
use url::Url;

use crate::types;

pub(crate) enum ReqType<U: IntoUrl> {
    Post(U),
    Get(U),
}

pub(crate) struct GymClientData {
    #[cfg(feature = "multi")]
    pub cookies: Mutex<String>,
    #[cfg(not(feature = "multi"))]
    pub cookies: String,
    pub client: Client,
    pub base_url: Url,
    pub user_agent: String,
    pub timeout: Option<Duration>,
}

impl GymClientData {
    /// A snapshot of the current session cookies.
    ///
    /// # Returns
    /// The cookies.
    pub fn cookies(&self) -> String {
        #[cfg(feature = "multi")]
        {
            self.cookies.lock().clone()
        }
        #[cfg(not(feature = "multi"))]
        {
            self.cookies.clone()
        }
    }

    /// Resolves an endpoint against the base URL.
    ///
    /// # Parameters
    /// - `path`: The endpoint, relative to the base URL.
    ///
    /// # Returns
    /// The full URL.
    pub fn endpoint(&self, path: &str) -> types::Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Makes a request with the desired request type, attaching the session cookies.
    ///
    /// # Parameters
    /// - `req_type`: The request type.
    ///
    /// # Returns
    /// A request builder that can further be built on top of, if needed.
    pub fn req<U: IntoUrl>(&self, req_type: ReqType<U>) -> RequestBuilder {
        let cookies = self.cookies();
        let req = self.req_without_cookies(req_type);
        if cookies.is_empty() {
            req
        } else {
            req.header(COOKIE, cookies)
        }
    }

    /// Makes a request with the desired request type, without any cookies. This is only
    /// useful for getting a fresh set of session cookies.
    ///
    /// # Parameters
    /// - `req_type`: The request type.
    ///
    /// # Returns
    /// A request builder that can further be built on top of, if needed.
    pub fn req_without_cookies<U: IntoUrl>(&self, req_type: ReqType<U>) -> RequestBuilder {
        let mut req = match req_type {
            ReqType::Post(u) => self.client.post(u),
            ReqType::Get(u) => self.client.get(u),
        }
        .header(USER_AGENT, self.user_agent.as_str());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        req
    }
}
