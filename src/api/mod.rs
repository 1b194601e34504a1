use crate::{
    api::handlers::{auth, checkout, health, me, root, user_login, user_register},
    cli::globals::GlobalArgs,
    stripe,
};
use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    routing::{get, post},
    Extension, Router,
};
use sqlx::postgres::PgPoolOptions;
use std::{sync::Arc, time::Duration};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer, trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa::OpenApi as _;
use utoipa_swagger_ui::SwaggerUi;

pub mod error;
pub mod handlers;
mod openapi;

pub use error::ApiError;
pub use openapi::ApiDoc;

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn new(port: u16, dsn: String, globals: &GlobalArgs) -> Result<()> {
    // Connect to database
    let pool = PgPoolOptions::new()
        .min_connections(1)
        .max_connections(5)
        .max_lifetime(Duration::from_secs(60 * 2))
        .test_before_acquire(true)
        .connect(&dsn)
        .await
        .context("Failed to connect to database")?;

    let token_lifetime = auth::state::parse_lifetime(&globals.jwt_expiration)
        .context("Invalid token lifetime")?;
    let auth_state = Arc::new(auth::AuthState::new(
        auth::AuthConfig::new().with_token_lifetime(token_lifetime),
        auth::TokenIssuer::new(&globals.jwt_secret),
    ));

    let provider = stripe::Client::new(
        globals.stripe_secret_key.clone(),
        globals.checkout_success_url.clone(),
        globals.checkout_cancel_url.clone(),
    )
    .context("Failed to build payment provider client")?;
    let verifier = stripe::webhook::WebhookVerifier::new(globals.stripe_webhook_secret.clone());
    // Entitlement updates are an external collaborator; the default sink logs them.
    let checkout_state = Arc::new(checkout::CheckoutState::new(
        provider,
        verifier,
        Arc::new(checkout::fulfillment::LogFulfillment),
    ));

    let app = Router::new()
        .route("/", get(root::root))
        .route("/health", get(health::health))
        .route("/users", post(user_register::register))
        .route("/users/me", get(me::get_me))
        .route("/auth/login", post(user_login::login))
        .route("/checkout/session", post(checkout::session::create_session))
        .route("/checkout/webhook", post(checkout::webhook::webhook))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(Extension(auth_state))
                .layer(Extension(checkout_state))
                .layer(Extension(pool)),
        );

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
