//! User registration endpoint.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use super::auth::{password::hash_password, storage};
use super::{normalize_email, valid_email};
use crate::api::error::{ApiError, ErrorResponse};

#[derive(ToSchema, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
}

// Never derive Debug here: the plaintext password must not reach any log.
impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

#[derive(ToSchema, Serialize, Debug)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
}

#[utoipa::path(
    post,
    path= "/users",
    request_body = CreateUserRequest,
    responses (
        (status = 201, description = "Registration successful", body = UserResponse),
        (status = 400, description = "Missing or invalid payload", body = ErrorResponse),
        (status = 422, description = "A user with this email already exists", body = ErrorResponse),
    ),
    tag= "users"
)]
// axum handler for user registration
pub async fn register(
    pool: Extension<PgPool>,
    payload: Option<Json<CreateUserRequest>>,
) -> Result<impl IntoResponse, ApiError> {
    let Some(Json(request)) = payload else {
        return Err(ApiError::BadRequest("Missing payload".to_string()));
    };

    let email = normalize_email(&request.email);
    if !valid_email(&email) {
        return Err(ApiError::BadRequest("Invalid email".to_string()));
    }
    if request.password.is_empty() {
        return Err(ApiError::BadRequest("Missing password".to_string()));
    }

    let password_hash = hash_password(&request.password)?;

    match storage::insert_user(&pool, &email, &password_hash).await? {
        storage::SignupOutcome::Created(user) => Ok((
            StatusCode::CREATED,
            Json(UserResponse {
                id: user.id,
                email: user.email,
            }),
        )),
        storage::SignupOutcome::Conflict => Err(ApiError::EmailAlreadyExists),
    }
}
