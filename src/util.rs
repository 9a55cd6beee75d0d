use rand::Rng;

use crate::constants::{COOKIE_TEST_FLAG, SESSION_COOKIES};

/// Builds the `Cookie` header value for a session out of the `Set-Cookie` headers the
/// site sent back.
///
/// Only the cookies the site needs to recognize a session are kept, and only their
/// `name=value` part (attributes like `path` or `HttpOnly` are dropped). The
/// `APP_LGD_COOKIE_TEST=true` flag is always appended last.
///
/// # Parameters
/// - `set_cookies`: The raw `Set-Cookie` header values, in the order they were received.
///
/// # Returns
/// The cookies, joined by `; `.
///
/// # Example
/// ```rust
/// use gymweg::util::extract_session_cookies;
///
/// let cookies = extract_session_cookies(&[
///     "ASP.NET_SessionId=abc123; path=/; HttpOnly",
///     "__cfduid=xyz; path=/",
/// ]);
/// assert_eq!("ASP.NET_SessionId=abc123; APP_LGD_COOKIE_TEST=true", cookies);
/// ```
pub fn extract_session_cookies<S: AsRef<str>>(set_cookies: &[S]) -> String {
    set_cookies
        .iter()
        .filter_map(|raw| raw.as_ref().split(';').next())
        .map(str::trim)
        .filter(|pair| is_session_cookie(pair))
        .chain(std::iter::once(COOKIE_TEST_FLAG))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Checks whether a `name=value` pair is one of the session cookies.
///
/// # Parameters
/// - `pair`: The cookie pair.
///
/// # Returns
/// `true` if the name is allow-listed and `false` otherwise.
#[inline]
fn is_session_cookie(pair: &str) -> bool {
    let name = pair.split_once('=').map_or(pair, |(name, _)| name).trim();
    SESSION_COOKIES.contains(&name)
}

/// Gets a random value in `[0, 1)` that the site's booking endpoint expects, so that
/// intermediate caches never serve an old response.
///
/// # Returns
/// The value, as a string.
pub fn get_cache_buster() -> String {
    rand::thread_rng().gen::<f64>().to_string()
}
