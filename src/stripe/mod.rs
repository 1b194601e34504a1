//! Payment provider client.
//!
//! The provider is an opaque external collaborator: checkout-session
//! creation is a pure relay and provider errors propagate as-is, never
//! retried here.

pub mod webhook;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::APP_USER_AGENT;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

// Provider calls are the only I/O-bound suspension point; bound them.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider request failed: {0}")]
    Request(String),
    #[error("provider returned status {0}")]
    Api(StatusCode),
    #[error("failed to decode provider response: {0}")]
    Decode(String),
}

/// Opaque session handle issued by the provider; passed through, never stored.
#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct CheckoutSession {
    pub id: String,
    pub url: Option<String>,
}

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    secret_key: SecretString,
    success_url: String,
    cancel_url: String,
}

impl Client {
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(
        secret_key: SecretString,
        success_url: String,
        cancel_url: String,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(PROVIDER_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            secret_key,
            success_url,
            cancel_url,
        })
    }

    /// Create a checkout session for `product_id` on behalf of `user_id`.
    ///
    /// The user id rides along as the client reference so the completion
    /// webhook can attribute the purchase without local state.
    #[instrument(skip(self))]
    pub async fn create_checkout_session(
        &self,
        product_id: &str,
        user_id: Uuid,
    ) -> Result<CheckoutSession, ProviderError> {
        debug!(product_id = %product_id, "Creating checkout session");

        let user_id = user_id.to_string();
        let form: Vec<(&str, &str)> = vec![
            ("mode", "payment"),
            ("client_reference_id", &user_id),
            ("success_url", &self.success_url),
            ("cancel_url", &self.cancel_url),
            ("line_items[0][price]", product_id),
            ("line_items[0][quantity]", "1"),
            ("metadata[product_id]", product_id),
        ];

        let response = self
            .http
            .post(format!("{STRIPE_API_BASE}/checkout/sessions"))
            .basic_auth(self.secret_key.expose_secret(), Option::<&str>::None)
            .form(&form)
            .send()
            .await
            .map_err(|err| {
                error!("Provider request failed: {err}");
                ProviderError::Request(err.to_string())
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "Provider API error");
            return Err(ProviderError::Api(status));
        }

        response
            .json::<CheckoutSession>()
            .await
            .map_err(|err| ProviderError::Decode(err.to_string()))
    }
}
