//! Authenticated principal extraction.
//!
//! Flow Overview: read the session token from the `Authentication` cookie,
//! falling back to an `Authorization: Bearer` header, verify it, and return
//! the decoded claims for downstream handlers to use as a plain parameter.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use tracing::debug;

use super::cookie::SESSION_COOKIE_NAME;
use super::state::AuthState;
use super::token::TokenPayload;
use crate::api::error::ApiError;

/// Resolve the request's session token into claims, or fail with 401.
///
/// Verification failures are rejected before any handler logic runs; the
/// response never says whether the token was missing, malformed, or expired.
pub fn require_auth(headers: &HeaderMap, auth_state: &AuthState) -> Result<TokenPayload, ApiError> {
    let Some(token) = extract_session_token(headers) else {
        return Err(ApiError::Unauthorized);
    };

    auth_state.issuer().verify(&token).map_err(|err| {
        debug!("Token rejected: {err}");
        ApiError::Unauthorized
    })
}

fn extract_session_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie_token(headers) {
        return Some(token);
    }
    extract_bearer_token(headers)
}

fn extract_cookie_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(axum::http::header::COOKIE)?;
    let value = header.to_str().ok()?;
    for pair in value.split(';') {
        let trimmed = pair.trim();
        let mut parts = trimmed.splitn(2, '=');
        let key = parts.next()?.trim();
        let val = parts.next()?.trim();
        if key == SESSION_COOKIE_NAME && !val.is_empty() {
            return Some(val.to_string());
        }
    }
    None
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let header = headers.get(AUTHORIZATION)?;
    let value = header.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
