use reqwest::{Error, Response};

use crate::constants::LOGIN_FAILED_MARKER;
use crate::types;
use crate::types::{BookingResponse, GymError};

/// Extracts the status code and text from the given response. No status code is
/// rejected here; that is left to the caller.
///
/// # Parameters
/// - `res`: The initial response.
///
/// # Returns
/// The status code and the body.
pub(crate) async fn extract_text(res: Result<Response, Error>) -> types::Result<(u16, String)> {
    let r = res?;
    let status = r.status().as_u16();
    Ok((status, r.text().await?))
}

/// Ensures that the status code is one of the accepted status codes.
///
/// # Parameters
/// - `status`: The status code.
/// - `accepted`: The status codes that count as a success.
/// - `context`: Anything that might explain the failure, like the body.
///
/// # Returns
/// Nothing if the status code is accepted, and an error otherwise.
pub(crate) fn expect_status(
    status: u16,
    accepted: &[u16],
    context: Option<String>,
) -> types::Result<()> {
    if accepted.contains(&status) {
        Ok(())
    } else {
        Err(GymError::BadStatusCode(status, context))
    }
}

/// Checks the result of a login attempt. The site returns the login page again, with a
/// 200, when the credentials are wrong, so the body has to be checked before the status.
///
/// # Parameters
/// - `status`: The status code.
/// - `body`: The body.
///
/// # Returns
/// Nothing if the login went through, and an error otherwise.
pub(crate) fn check_login(status: u16, body: String) -> types::Result<()> {
    if body.contains(LOGIN_FAILED_MARKER) {
        return Err(GymError::LoginFailed);
    }

    expect_status(status, &[200, 302], Some(body))
}

/// Checks the result of adding a booking to the basket.
///
/// # Parameters
/// - `body`: The body, which should be a JSON booking response.
///
/// # Returns
/// The body, unchanged, if the class was added to the basket. If the site said no, the
/// body is returned as part of the error.
pub(crate) fn check_booking(body: String) -> types::Result<String> {
    let parsed: BookingResponse = serde_json::from_str(&body)?;
    if parsed.success {
        Ok(body)
    } else {
        Err(GymError::BookingRejected(body))
    }
}
