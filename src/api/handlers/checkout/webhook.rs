//! Provider webhook endpoint.
//!
//! The handler receives the raw body so the signature can be verified over
//! the exact bytes the provider signed. Only verified events are parsed and
//! dispatched.

use axum::{body::Bytes, extract::Extension, http::HeaderMap, response::IntoResponse};
use chrono::Utc;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

use super::fulfillment::CompletedCheckout;
use super::CheckoutState;
use crate::api::error::{ApiError, ErrorResponse};
use crate::stripe::webhook::{EventType, WebhookError, SIGNATURE_HEADER};

#[derive(Deserialize)]
struct SessionObject {
    id: String,
    client_reference_id: Option<String>,
    #[serde(default)]
    metadata: HashMap<String, String>,
}

#[derive(Deserialize)]
struct SessionEventData {
    object: SessionObject,
}

#[utoipa::path(
    post,
    path= "/checkout/webhook",
    request_body = String,
    responses (
        (status = 200, description = "Event processed or acknowledged"),
        (status = 401, description = "Missing or invalid signature", body = ErrorResponse),
        (status = 400, description = "Verified payload is not a valid event", body = ErrorResponse),
    ),
    tag= "checkout"
)]
// axum handler for the provider webhook
pub async fn webhook(
    checkout_state: Extension<Arc<CheckoutState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    let event = checkout_state
        .verifier()
        .verify_and_parse(&body, signature, Utc::now().timestamp())
        .map_err(|err| match err {
            WebhookError::MalformedPayload(detail) => {
                debug!("Webhook payload rejected: {detail}");
                ApiError::BadRequest("Malformed event payload".to_string())
            }
            other => {
                debug!("Webhook signature rejected: {other}");
                ApiError::Unauthorized
            }
        })?;

    match event.event_type {
        EventType::CheckoutSessionCompleted => {
            let data: SessionEventData = serde_json::from_value(event.data)
                .map_err(|_| ApiError::BadRequest("Malformed event payload".to_string()))?;

            let checkout = CompletedCheckout {
                session_id: data.object.id,
                client_reference_id: data.object.client_reference_id,
                product_id: data.object.metadata.get("product_id").cloned(),
            };

            checkout_state
                .fulfillment()
                .fulfill(&checkout)
                .await
                .map_err(|err| {
                    error!("Fulfillment failed for event {}: {err}", event.id);
                    ApiError::Internal(err)
                })?;
        }
        EventType::Unknown(ref kind) => {
            // Acknowledge so the provider stops redelivering.
            debug!(event_id = %event.id, kind = %kind, "Ignoring unhandled event type");
        }
    }

    Ok(())
}
