//! Authenticated "current user" endpoint.

use axum::{extract::Extension, http::HeaderMap, response::IntoResponse, Json};
use std::sync::Arc;

use super::auth::{principal::require_auth, AuthState, TokenPayload};
use crate::api::error::{ApiError, ErrorResponse};

#[utoipa::path(
    get,
    path = "/users/me",
    responses(
        (status = 200, description = "Decoded claims of the presented session token", body = TokenPayload),
        (status = 401, description = "Missing or invalid session token", body = ErrorResponse),
    ),
    tag = "users"
)]
pub async fn get_me(
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
) -> Result<impl IntoResponse, ApiError> {
    let claims = require_auth(&headers, &auth_state)?;

    Ok(Json(claims))
}
