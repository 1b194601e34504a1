use utoipa::OpenApi;

use crate::api::error::{ErrorDetail, ErrorResponse};
use crate::api::handlers::{auth, checkout, health, me, user_login, user_register};
use crate::stripe;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        user_register::register,
        user_login::login,
        me::get_me,
        checkout::session::create_session,
        checkout::webhook::webhook,
    ),
    components(schemas(
        health::Health,
        user_register::CreateUserRequest,
        user_register::UserResponse,
        user_login::LoginRequest,
        user_login::LoginResponse,
        auth::TokenPayload,
        checkout::session::CreateSessionRequest,
        stripe::CheckoutSession,
        ErrorResponse,
        ErrorDetail,
    )),
    tags(
        (name = "health", description = "Service and database health"),
        (name = "auth", description = "Login and session tokens"),
        (name = "users", description = "Registration and the current user"),
        (name = "checkout", description = "Checkout sessions and the provider webhook")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use utoipa::OpenApi as _;

    #[test]
    fn openapi_lists_all_routes() {
        let spec = ApiDoc::openapi();
        for path in [
            "/health",
            "/users",
            "/users/me",
            "/auth/login",
            "/checkout/session",
            "/checkout/webhook",
        ] {
            assert!(spec.paths.paths.contains_key(path), "missing {path}");
        }
    }

    #[test]
    fn openapi_tags_present() {
        let spec = ApiDoc::openapi();
        let tags = spec.tags.clone().unwrap_or_default();
        assert!(tags.iter().any(|tag| tag.name == "health"));
        assert!(tags.iter().any(|tag| tag.name == "auth"));
        assert!(tags.iter().any(|tag| tag.name == "users"));
        assert!(tags.iter().any(|tag| tag.name == "checkout"));
    }
}
