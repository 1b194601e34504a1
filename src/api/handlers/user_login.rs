//! Login endpoint: verify credentials, issue a session token, set the cookie.

use axum::{
    extract::Extension,
    http::{header::SET_COOKIE, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{debug, error};
use utoipa::ToSchema;
use uuid::Uuid;

use super::auth::{
    cookie::session_cookie, password::verify_password, storage, token::TokenPayload, AuthState,
};
use super::normalize_email;
use crate::api::error::{ApiError, ErrorResponse};

#[derive(ToSchema, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token_payload: TokenPayload,
}

#[utoipa::path(
    post,
    path= "/auth/login",
    request_body = LoginRequest,
    responses (
        (status = 200, description = "Login successful; the session cookie is attached", body = LoginResponse),
        (status = 400, description = "Missing payload", body = ErrorResponse),
        (status = 401, description = "Credentials are not valid", body = ErrorResponse),
    ),
    tag= "auth"
)]
// axum handler for login
pub async fn login(
    pool: Extension<PgPool>,
    auth_state: Extension<Arc<AuthState>>,
    payload: Option<Json<LoginRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::BadRequest("Missing payload".to_string()));
    };

    let email = normalize_email(&request.email);
    let user_id = verify_credentials(&pool, &email, &request.password).await?;

    let issued = auth_state
        .issuer()
        .issue(user_id, auth_state.config().token_lifetime())?;

    // The cookie is attached exactly once, and only on success.
    let cookie = session_cookie(&issued.token, issued.expires)
        .map_err(|err| ApiError::Internal(err.into()))?;
    let mut headers = HeaderMap::new();
    headers.insert(SET_COOKIE, cookie);

    Ok((
        StatusCode::OK,
        headers,
        Json(LoginResponse {
            token_payload: issued.payload,
        }),
    ))
}

/// Verify an email/password pair against the credential store.
///
/// Every failure collapses to the same `InvalidCredentials` outcome: the
/// response must not reveal whether the email exists. The internal cause is
/// logged for diagnostics only.
async fn verify_credentials(
    pool: &PgPool,
    email: &str,
    password: &str,
) -> Result<Uuid, ApiError> {
    let record = match storage::lookup_credentials(pool, email).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            debug!("Login rejected: unknown email");
            return Err(ApiError::InvalidCredentials);
        }
        Err(err) => {
            error!("Credential lookup failed: {err}");
            return Err(ApiError::InvalidCredentials);
        }
    };

    if !verify_password(password, &record.password_hash) {
        debug!("Login rejected: password mismatch");
        return Err(ApiError::InvalidCredentials);
    }

    Ok(record.user_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_debug_redacts_password() {
        let request = LoginRequest {
            email: "a@x.com".to_string(),
            password: "secret123".to_string(),
        };
        let debug = format!("{request:?}");
        assert!(!debug.contains("secret123"));
    }

    #[test]
    fn response_wraps_token_payload() {
        let response = LoginResponse {
            token_payload: TokenPayload {
                user_id: Uuid::nil(),
                iat: 1,
                exp: 2,
            },
        };
        let value = serde_json::to_value(&response).unwrap();
        let payload = value.get("tokenPayload").expect("tokenPayload envelope");
        assert!(payload.get("userId").is_some());
    }
}
