use reqwest::header::{
    ACCEPT, ACCEPT_ENCODING, ACCEPT_LANGUAGE, CACHE_CONTROL, CONNECTION, DNT, HOST, PRAGMA,
    REFERER, SET_COOKIE,
};
use reqwest::multipart::Form;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::client::client_builder::GymClientBuilder;
use crate::client::gym_helper::{check_booking, check_login, expect_status, extract_text};
use crate::client::request_data::{GymClientData, ReqType};
use crate::constants::*;
use crate::types::{Credentials, Lesson};
use crate::{types, util};

pub mod client_builder;
mod gym_helper;
mod request_data;

/// A client for the [Gymbox booking site](https://gymbox.legendonlineservices.co.uk/enterprise/).
///
/// The client owns the session cookies. A session is started by priming the cookies
/// (see [`GymClient::prime_session`]) and then logging in; every other request reuses
/// those cookies. Nothing stops you from calling the other methods first, but the site
/// will treat you as logged out.
pub struct GymClient {
    data: GymClientData,
}

impl GymClient {
    /// Creates a new instance of the `GymClient` with the specified `Client`, the default
    /// base URL, and the default user agent. To override these, use [`GymClientBuilder`].
    ///
    /// The client should not follow redirects; see [`GymClientBuilder::with_client`].
    ///
    /// # Parameters
    /// - `client`: The `reqwest` client.
    ///
    /// # Returns
    /// The new instance of the `GymClient`.
    ///
    /// # Example
    /// ```rust
    /// use gymweg::client::GymClient;
    /// use gymweg::reqwest::{redirect::Policy, Client};
    ///
    /// let client = Client::builder().redirect(Policy::none()).build().unwrap();
    /// let gym = GymClient::new(client);
    /// assert!(gym.is_ok());
    /// ```
    pub fn new(client: Client) -> types::Result<Self> {
        Self::builder().with_client(client).try_build()
    }

    /// Creates a new builder that can be used to construct a `GymClient`. This is the
    /// preferred method for creating a client.
    ///
    /// # Returns
    /// The builder.
    pub fn builder() -> GymClientBuilder {
        GymClientBuilder::new()
    }

    /// Gets the current session cookies, formatted as a `Cookie` header value.
    ///
    /// # Returns
    /// The cookies. This is empty if no session has been started.
    pub fn session_cookies(&self) -> String {
        self.data.cookies()
    }

    /// Sets the cookies to the new, specified cookies, replacing the current session.
    ///
    /// # Parameters
    /// - `new_cookies`: The new cookies.
    #[cfg(not(feature = "multi"))]
    pub fn set_cookies(&mut self, new_cookies: impl Into<String>) {
        self.data.cookies = new_cookies.into();
    }

    /// Sets the cookies to the new, specified cookies, replacing the current session.
    ///
    /// Note that a mutex is internally used to store the cookies.
    ///
    /// # Parameters
    /// - `new_cookies`: The new cookies.
    #[cfg(feature = "multi")]
    pub fn set_cookies(&self, new_cookies: impl Into<String>) {
        let mut cookies = self.data.cookies.lock();
        *cookies = new_cookies.into();
    }

    /// Logs into the site.
    ///
    /// This is used in two ways:
    /// - With `capture_cookies` set, no cookies are sent and whatever session cookies the
    ///   site hands back replace the current ones. The status code doesn't matter; this is
    ///   how a session is primed before the real login.
    /// - Otherwise, the current cookies are sent along with the credentials. The login
    ///   succeeds on a `200` or `302`, as long as the site didn't say the login failed.
    ///
    /// # Parameters
    /// - `credentials`: The credentials, if any. These are sent as form data.
    /// - `capture_cookies`: Whether to replace the session cookies with the response's.
    ///
    /// # Returns
    /// Nothing if everything went well, and [`crate::types::GymError::LoginFailed`] if
    /// the site rejected the credentials.
    ///
    /// # Example
    /// ```rust,no_run
    /// use gymweg::client::GymClient;
    /// use gymweg::types::Credentials;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let mut gym = GymClient::builder().try_build().unwrap();
    /// let credentials = Credentials::new("me@example.com", "hunter2");
    /// gym.login(None, true).await.unwrap();
    /// assert!(gym.login(Some(&credentials), false).await.is_ok());
    /// # }
    /// ```
    #[cfg(not(feature = "multi"))]
    pub async fn login(
        &mut self,
        credentials: Option<&Credentials>,
        capture_cookies: bool,
    ) -> types::Result<()> {
        if let Some(cookies) = self.send_login(credentials, capture_cookies).await? {
            self.set_cookies(cookies);
        }

        Ok(())
    }

    /// Logs into the site.
    ///
    /// This is used in two ways:
    /// - With `capture_cookies` set, no cookies are sent and whatever session cookies the
    ///   site hands back replace the current ones. The status code doesn't matter; this is
    ///   how a session is primed before the real login.
    /// - Otherwise, the current cookies are sent along with the credentials. The login
    ///   succeeds on a `200` or `302`, as long as the site didn't say the login failed.
    ///
    /// # Parameters
    /// - `credentials`: The credentials, if any. These are sent as form data.
    /// - `capture_cookies`: Whether to replace the session cookies with the response's.
    ///
    /// # Returns
    /// Nothing if everything went well, and [`crate::types::GymError::LoginFailed`] if
    /// the site rejected the credentials.
    #[cfg(feature = "multi")]
    pub async fn login(
        &self,
        credentials: Option<&Credentials>,
        capture_cookies: bool,
    ) -> types::Result<()> {
        if let Some(cookies) = self.send_login(credentials, capture_cookies).await? {
            self.set_cookies(cookies);
        }

        Ok(())
    }

    /// Starts a fresh session by capturing the cookies from the login page. This is
    /// equivalent to `login(None, true)`.
    ///
    /// # Returns
    /// Nothing if the cookies were captured, and an error if the site couldn't be reached.
    #[cfg(not(feature = "multi"))]
    pub async fn prime_session(&mut self) -> types::Result<()> {
        self.login(None, true).await
    }

    /// Starts a fresh session by capturing the cookies from the login page. This is
    /// equivalent to `login(None, true)`.
    ///
    /// # Returns
    /// Nothing if the cookies were captured, and an error if the site couldn't be reached.
    #[cfg(feature = "multi")]
    pub async fn prime_session(&self) -> types::Result<()> {
        self.login(None, true).await
    }

    /// Books and pays for a class from start to finish: primes a session, logs in, adds the
    /// class to the basket, pays, confirms the payment and logs out.
    ///
    /// If anything fails after logging in, the client still tries to log out. A failed
    /// logout at that point is only logged; the original error is returned.
    ///
    /// # Parameters
    /// - `credentials`: The credentials to log in with.
    /// - `lesson`: The class to book.
    ///
    /// # Returns
    /// The booking response body if the class was booked and paid for.
    ///
    /// # Example
    /// ```rust,no_run
    /// use gymweg::client::GymClient;
    /// use gymweg::types::{Credentials, Lesson};
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// let mut gym = GymClient::builder().try_build().unwrap();
    /// let credentials = Credentials::new("me@example.com", "hunter2");
    /// let lesson = Lesson::new("8291734", "Muay Thai", "18:30");
    /// assert!(gym.book_class(&credentials, &lesson).await.is_ok());
    /// # }
    /// ```
    #[cfg(not(feature = "multi"))]
    pub async fn book_class(
        &mut self,
        credentials: &Credentials,
        lesson: &Lesson,
    ) -> types::Result<String> {
        self.prime_session().await?;
        self.login(Some(credentials), false).await?;
        self.finish_booking(lesson).await
    }

    /// Books and pays for a class from start to finish: primes a session, logs in, adds the
    /// class to the basket, pays, confirms the payment and logs out.
    ///
    /// If anything fails after logging in, the client still tries to log out. A failed
    /// logout at that point is only logged; the original error is returned.
    ///
    /// # Parameters
    /// - `credentials`: The credentials to log in with.
    /// - `lesson`: The class to book.
    ///
    /// # Returns
    /// The booking response body if the class was booked and paid for.
    #[cfg(feature = "multi")]
    pub async fn book_class(
        &self,
        credentials: &Credentials,
        lesson: &Lesson,
    ) -> types::Result<String> {
        self.prime_session().await?;
        self.login(Some(credentials), false).await?;
        self.finish_booking(lesson).await
    }

    /// Logs out of the site. The site answers a successful logout with a redirect.
    ///
    /// # Returns
    /// Nothing if the site responded with a `302`, and an error otherwise.
    pub async fn logout(&self) -> types::Result<()> {
        let url = self.data.endpoint(LOGOUT)?;
        let (status, body) = extract_text(self.data.req(ReqType::Post(url)).send().await).await?;
        expect_status(status, &[302], Some(body))?;
        info!(status, "Logout succeeded");
        Ok(())
    }

    /// Gets all clubs (facilities) that classes can be booked at. The status code is not
    /// checked.
    ///
    /// # Returns
    /// The club list, as returned by the site.
    pub async fn list_clubs(&self) -> types::Result<String> {
        let url = self.data.endpoint(FACILITIES)?;
        let (_, body) = extract_text(self.data.req(ReqType::Get(url)).send().await).await?;
        info!("Fetched bookable clubs");
        Ok(body)
    }

    /// Gets the member timetable. The status code is not checked.
    ///
    /// # Parameters
    /// - `club_id`: The club to get the timetable for. If `None` is given, the site picks
    /// (usually the member's home club).
    ///
    /// # Returns
    /// The timetable page, as returned by the site.
    pub async fn get_timetable(&self, club_id: Option<&str>) -> types::Result<String> {
        let mut url = self.data.endpoint(TIMETABLE)?;
        if let Some(id) = club_id {
            url.query_pairs_mut().append_pair("clubId", id);
        }

        debug!(%url, "Fetching timetable");
        let (_, body) = extract_text(self.data.req(ReqType::Get(url)).send().await).await?;
        match club_id {
            Some(id) => info!(club_id = id, "Fetched timetable"),
            None => info!("Fetched timetable"),
        }

        Ok(body)
    }

    /// Adds a class to the basket. The class still has to be paid for; see
    /// [`GymClient::complete_basket`].
    ///
    /// # Parameters
    /// - `lesson`: The class to add.
    ///
    /// # Returns
    /// The booking response body if the site said the class was added. Otherwise, either
    /// [`crate::types::GymError::BookingRejected`] with the body, or
    /// [`crate::types::GymError::SerdeError`] if the body wasn't a booking response at all.
    pub async fn post_booking(&self, lesson: &Lesson) -> types::Result<String> {
        let mut url = self.data.endpoint(ADD_BOOKING)?;
        url.query_pairs_mut()
            .append_pair("booking", &lesson.id)
            .append_pair("ajax", &util::get_cache_buster());

        debug!(%url, "Adding booking");
        let (_, body) = extract_text(self.data.req(ReqType::Get(url)).send().await).await?;
        match check_booking(body) {
            Ok(body) => {
                info!(
                    class = %lesson.class_name,
                    time = %lesson.time,
                    "Class added to basket"
                );
                Ok(body)
            }
            Err(e) => {
                warn!(lesson = %lesson, error = %e, "Class was not added to basket");
                Err(e)
            }
        }
    }

    /// Gets the active notices. The booking pages load these before the basket can be
    /// paid for, with the page that asked for them as the referer.
    ///
    /// # Parameters
    /// - `referer`: The page to send as the `Referer`.
    ///
    /// # Returns
    /// The notices, as returned by the site. The body has to be valid JSON, but the
    /// status code is not checked.
    pub async fn get_active_notices(&self, referer: impl AsRef<str>) -> types::Result<String> {
        let url = self.data.endpoint(ACTIVE_NOTICES)?;
        let (status, body) = extract_text(
            self.data
                .req(ReqType::Get(url))
                .header(REFERER, referer.as_ref())
                .send()
                .await,
        )
        .await?;

        if let Err(e) = serde_json::from_str::<Value>(&body) {
            warn!(status, "Active notices failed");
            return Err(e.into());
        }

        info!(status, "Fetched active notices");
        Ok(body)
    }

    /// Pays for everything in the basket. This request looks like it came from a browser,
    /// since the payment page is normally only reached that way.
    ///
    /// # Returns
    /// Nothing if the site responded with a `200` or `302`, and an error otherwise.
    pub async fn complete_basket(&self) -> types::Result<()> {
        let url = self.data.endpoint(BASKET_PAY)?;
        let referer = self.data.endpoint(BASKET)?;
        let mut req = self
            .data
            .req(ReqType::Get(url))
            .header(REFERER, referer.as_str())
            .header("Upgrade-Insecure-Requests", "1")
            .header(ACCEPT, BASKET_ACCEPT)
            .header(PRAGMA, "no-cache")
            .header(CACHE_CONTROL, "no-cache")
            .header(CONNECTION, "keep-alive")
            .header(ACCEPT_ENCODING, BASKET_ACCEPT_ENCODING)
            .header(ACCEPT_LANGUAGE, BASKET_ACCEPT_LANGUAGE);

        if let Some(host) = self.host() {
            req = req.header(HOST, host);
        }

        let res = req.send().await?;
        let status = res.status().as_u16();
        if let Err(e) = expect_status(status, &[200, 302], None) {
            warn!(status, headers = ?res.headers(), "Payment rejected");
            return Err(e);
        }

        info!(status, "Payment succeeded");
        Ok(())
    }

    /// Confirms the payment made by [`GymClient::complete_basket`].
    ///
    /// Unlike paying, a redirect here is _not_ a success.
    ///
    /// # Returns
    /// Nothing if the site responded with a `200`, and an error otherwise.
    pub async fn confirm_payment(&self) -> types::Result<()> {
        let url = self.data.endpoint(PAYMENT_CONFIRMED)?;
        let res = self.data.req(ReqType::Get(url)).send().await?;
        let status = res.status().as_u16();
        if let Err(e) = expect_status(status, &[200], None) {
            warn!(status, "Payment confirmation rejected");
            return Err(e);
        }

        info!(status, "Payment confirmed");
        Ok(())
    }

    /// Sends the login request.
    ///
    /// # Parameters
    /// - `credentials`: The credentials, if any.
    /// - `capture_cookies`: Whether to capture the response's session cookies.
    ///
    /// # Returns
    /// The captured cookies, if `capture_cookies` is set.
    async fn send_login(
        &self,
        credentials: Option<&Credentials>,
        capture_cookies: bool,
    ) -> types::Result<Option<String>> {
        let url = self.data.endpoint(LOGIN)?;
        let req_type = ReqType::Post(url);
        let req = if capture_cookies {
            self.data.req_without_cookies(req_type)
        } else {
            self.data.req(req_type)
        };

        let mut req = req
            .header(ACCEPT_LANGUAGE, LOGIN_ACCEPT_LANGUAGE)
            .header(DNT, "1");

        if let Some(credentials) = credentials {
            req = req.multipart(
                Form::new()
                    .text(LOGIN_EMAIL_FIELD, credentials.email.clone())
                    .text(LOGIN_PASSWORD_FIELD, credentials.password.clone()),
            );
        }

        let res = req.send().await?;
        if capture_cookies {
            let set_cookies = res
                .headers()
                .get_all(SET_COOKIE)
                .iter()
                .filter_map(|value| value.to_str().ok())
                .collect::<Vec<_>>();

            let cookies = util::extract_session_cookies(&set_cookies);
            info!(status = res.status().as_u16(), "Captured session cookies");
            return Ok(Some(cookies));
        }

        let (status, body) = extract_text(Ok(res)).await?;
        match check_login(status, body) {
            Ok(()) => {
                info!(status, "Login succeeded");
                Ok(None)
            }
            Err(e) => {
                warn!(status, "Couldn't log in");
                Err(e)
            }
        }
    }

    /// Everything in `book_class` that happens once logged in.
    ///
    /// # Parameters
    /// - `lesson`: The class to book.
    ///
    /// # Returns
    /// The booking response body if the class was booked and paid for.
    async fn finish_booking(&self, lesson: &Lesson) -> types::Result<String> {
        let booked = self.pay_for(lesson).await;
        let logged_out = self.logout().await;

        match (booked, logged_out) {
            (Ok(body), Ok(())) => Ok(body),
            (Ok(_), Err(e)) => Err(e),
            (Err(e), Ok(())) => Err(e),
            (Err(e), Err(logout_err)) => {
                warn!(error = %logout_err, "Couldn't log out after a failed booking");
                Err(e)
            }
        }
    }

    /// Adds the class to the basket, pays and confirms the payment.
    ///
    /// # Parameters
    /// - `lesson`: The class to book.
    ///
    /// # Returns
    /// The booking response body.
    async fn pay_for(&self, lesson: &Lesson) -> types::Result<String> {
        let body = self.post_booking(lesson).await?;
        self.complete_basket().await?;
        self.confirm_payment().await?;
        Ok(body)
    }

    /// The `Host` header for the base URL, including the port if it isn't the default.
    ///
    /// # Returns
    /// The host, or `None` if the base URL has no host.
    fn host(&self) -> Option<String> {
        let host = self.data.base_url.host_str()?;
        Some(match self.data.base_url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        })
    }
}
