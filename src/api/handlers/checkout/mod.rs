//! Checkout: session creation relay and the provider webhook.

pub mod fulfillment;
pub mod session;
pub mod webhook;

use std::sync::Arc;

use crate::stripe::{webhook::WebhookVerifier, Client};
use self::fulfillment::Fulfillment;

/// Shared state for the checkout endpoints.
pub struct CheckoutState {
    client: Client,
    verifier: WebhookVerifier,
    fulfillment: Arc<dyn Fulfillment>,
}

impl CheckoutState {
    #[must_use]
    pub fn new(client: Client, verifier: WebhookVerifier, fulfillment: Arc<dyn Fulfillment>) -> Self {
        Self {
            client,
            verifier,
            fulfillment,
        }
    }

    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    #[must_use]
    pub const fn verifier(&self) -> &WebhookVerifier {
        &self.verifier
    }

    #[must_use]
    pub fn fulfillment(&self) -> &dyn Fulfillment {
        self.fulfillment.as_ref()
    }
}
