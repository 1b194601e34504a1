//! Error type for the API boundary.
//!
//! Internal error kinds stay distinguishable for diagnostics; all
//! authentication-path failures collapse to an opaque 401 here so responses
//! never reveal which check failed.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::stripe::ProviderError;

/// API error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Login failed; the message never distinguishes unknown email from bad password.
    #[error("Credentials are not valid")]
    InvalidCredentials,

    /// Missing, invalid, or expired token; invalid webhook signature.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("{0}")]
    BadRequest(String),

    #[error("Payment provider error")]
    UpstreamProvider(#[from] ProviderError),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials | Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::EmailAlreadyExists => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::UpstreamProvider(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCredentials | Self::Unauthorized => "UNAUTHORIZED",
            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::BadRequest(_) => "BAD_REQUEST",
            Self::UpstreamProvider(_) => "UPSTREAM_PROVIDER",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Detail for 5xx-class errors goes to the log, never to the client.
        match &self {
            Self::Internal(err) => error!("Internal error: {err:?}"),
            Self::UpstreamProvider(err) => error!("Provider error: {err}"),
            _ => {}
        }

        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}
