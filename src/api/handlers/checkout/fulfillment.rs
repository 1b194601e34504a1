//! Order fulfillment hook.
//!
//! Fulfillment sits behind a trait so the webhook handler does not care
//! whether completion grants an entitlement, sends an email, or just logs.
//! The default implementation records the purchase in the logs.

use async_trait::async_trait;
use tracing::info;

/// A completed checkout, as extracted from the provider's event payload.
#[derive(Debug)]
pub struct CompletedCheckout {
    pub session_id: String,
    /// User id the session was created for, when the provider echoes it back.
    pub client_reference_id: Option<String>,
    pub product_id: Option<String>,
}

#[async_trait]
pub trait Fulfillment: Send + Sync {
    async fn fulfill(&self, checkout: &CompletedCheckout) -> anyhow::Result<()>;
}

/// Log-only fulfillment.
pub struct LogFulfillment;

#[async_trait]
impl Fulfillment for LogFulfillment {
    async fn fulfill(&self, checkout: &CompletedCheckout) -> anyhow::Result<()> {
        info!(
            session_id = %checkout.session_id,
            user_id = checkout.client_reference_id.as_deref().unwrap_or("unknown"),
            product_id = checkout.product_id.as_deref().unwrap_or("unknown"),
            "Checkout completed"
        );
        Ok(())
    }
}
