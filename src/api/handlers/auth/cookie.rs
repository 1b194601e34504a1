//! Session cookie construction.

use axum::http::{header::InvalidHeaderValue, HeaderValue};
use chrono::{DateTime, Utc};

pub const SESSION_COOKIE_NAME: &str = "Authentication";

// RFC 7231 IMF-fixdate, the format Expires requires.
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Build the `Set-Cookie` value carrying the session token.
///
/// `expires` must be the token's own signed expiry so the two cannot drift.
/// # Errors
/// Returns an error if the token contains characters invalid in a header.
pub fn session_cookie(
    token: &str,
    expires: DateTime<Utc>,
) -> Result<HeaderValue, InvalidHeaderValue> {
    let expires = expires.format(HTTP_DATE_FORMAT);
    HeaderValue::from_str(&format!(
        "{SESSION_COOKIE_NAME}={token}; Path=/; HttpOnly; Secure; Expires={expires}"
    ))
}
