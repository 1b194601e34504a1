//! Checkout session creation: authenticate, then relay to the provider.

use axum::{extract::Extension, http::HeaderMap, response::IntoResponse, Json};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

use super::CheckoutState;
use crate::api::error::{ApiError, ErrorResponse};
use crate::api::handlers::auth::{principal::require_auth, AuthState};
use crate::stripe::CheckoutSession;

#[derive(ToSchema, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    pub product_id: String,
}

#[utoipa::path(
    post,
    path= "/checkout/session",
    request_body = CreateSessionRequest,
    responses (
        (status = 200, description = "Checkout session created at the provider", body = CheckoutSession),
        (status = 400, description = "Missing payload or product id", body = ErrorResponse),
        (status = 401, description = "Missing or invalid session token", body = ErrorResponse),
        (status = 502, description = "Provider rejected or failed the request", body = ErrorResponse),
    ),
    tag= "checkout"
)]
// axum handler for checkout session creation
pub async fn create_session(
    headers: HeaderMap,
    auth_state: Extension<Arc<AuthState>>,
    checkout_state: Extension<Arc<CheckoutState>>,
    payload: Option<Json<CreateSessionRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let claims = require_auth(&headers, &auth_state)?;

    let Some(Json(request)) = payload else {
        return Err(ApiError::BadRequest("Missing payload".to_string()));
    };

    let product_id = request.product_id.trim();
    if product_id.is_empty() {
        return Err(ApiError::BadRequest("Missing product id".to_string()));
    }

    let session = checkout_state
        .client()
        .create_checkout_session(product_id, claims.user_id)
        .await?;

    Ok(Json(session))
}
