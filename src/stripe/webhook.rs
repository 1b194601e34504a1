//! Webhook signature verification and event parsing.
//!
//! The raw body bytes are authenticated before any JSON parsing happens:
//! an unverified payload never reaches the deserializer.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::debug;

type HmacSha256 = Hmac<Sha256>;

pub const SIGNATURE_HEADER: &str = "stripe-signature";

// Replay window for the signed timestamp, in seconds.
const TIMESTAMP_TOLERANCE: i64 = 300;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("malformed signature header")]
    MalformedHeader,
    #[error("signature mismatch")]
    SignatureMismatch,
    #[error("timestamp outside tolerance")]
    TimestampOutOfTolerance,
    #[error("malformed event payload: {0}")]
    MalformedPayload(String),
}

/// Provider event types this service reacts to. Everything else is
/// acknowledged and ignored so the provider stops redelivering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    CheckoutSessionCompleted,
    Unknown(String),
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        match value {
            "checkout.session.completed" => Self::CheckoutSessionCompleted,
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// A verified provider event. The `data` payload stays untyped until the
/// handler for the specific event type picks it apart.
#[derive(Debug)]
pub struct Event {
    pub id: String,
    pub event_type: EventType,
    pub created: i64,
    pub data: serde_json::Value,
}

#[derive(Deserialize)]
struct RawEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    created: i64,
    data: serde_json::Value,
}

#[derive(Clone)]
pub struct WebhookVerifier {
    secret: SecretString,
}

impl WebhookVerifier {
    #[must_use]
    pub const fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Verify the `stripe-signature` header against the raw body and parse
    /// the event. Verification failures are returned before the body is
    /// inspected at all.
    ///
    /// # Errors
    /// Returns a `WebhookError` when the header is malformed, the signature
    /// does not match, the timestamp is stale, or the payload is not a valid
    /// event.
    pub fn verify_and_parse(
        &self,
        body: &[u8],
        signature_header: &str,
        now: i64,
    ) -> Result<Event, WebhookError> {
        let (timestamp, signature) = parse_signature_header(signature_header)?;

        let expected = self.compute_signature(timestamp, body);
        if expected.ct_eq(signature.as_bytes()).unwrap_u8() != 1 {
            return Err(WebhookError::SignatureMismatch);
        }

        if (now - timestamp).abs() > TIMESTAMP_TOLERANCE {
            debug!(timestamp, now, "Webhook timestamp outside tolerance");
            return Err(WebhookError::TimestampOutOfTolerance);
        }

        let raw: RawEvent = serde_json::from_slice(body)
            .map_err(|err| WebhookError::MalformedPayload(err.to_string()))?;

        Ok(Event {
            id: raw.id,
            event_type: EventType::from(raw.event_type.as_str()),
            created: raw.created,
            data: raw.data,
        })
    }

    fn compute_signature(&self, timestamp: i64, body: &[u8]) -> Vec<u8> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .unwrap_or_else(|_| unreachable!("HMAC accepts keys of any length"));
        mac.update(timestamp.to_string().as_bytes());
        mac.update(b".");
        mac.update(body);
        hex::encode(mac.finalize().into_bytes()).into_bytes()
    }
}

/// Split a `t=<unix>,v1=<hex>,...` header into its timestamp and the first
/// `v1` signature.
fn parse_signature_header(header: &str) -> Result<(i64, &str), WebhookError> {
    let mut timestamp = None;
    let mut signature = None;

    for part in header.split(',') {
        match part.trim().split_once('=') {
            Some(("t", value)) => {
                timestamp = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| WebhookError::MalformedHeader)?,
                );
            }
            Some(("v1", value)) if signature.is_none() => signature = Some(value),
            _ => {}
        }
    }

    match (timestamp, signature) {
        (Some(timestamp), Some(signature)) => Ok((timestamp, signature)),
        _ => Err(WebhookError::MalformedHeader),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";

    fn verifier() -> WebhookVerifier {
        WebhookVerifier::new(SecretString::from(SECRET))
    }

    fn sign(secret: &str, timestamp: i64, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(format!("{timestamp}.").as_bytes());
        mac.update(body);
        format!("t={timestamp},v1={}", hex::encode(mac.finalize().into_bytes()))
    }

    fn event_body() -> Vec<u8> {
        serde_json::json!({
            "id": "evt_1",
            "type": "checkout.session.completed",
            "created": 1_700_000_000,
            "data": {
                "object": {
                    "id": "cs_test_123",
                    "client_reference_id": "0191d8a0-0000-7000-8000-000000000000",
                    "metadata": {"product_id": "price_123"}
                }
            }
        })
        .to_string()
        .into_bytes()
    }

    #[test]
    fn accepts_valid_signature() {
        let body = event_body();
        let now = 1_700_000_000;
        let header = sign(SECRET, now, &body);

        let event = verifier().verify_and_parse(&body, &header, now).unwrap();
        assert_eq!(event.id, "evt_1");
        assert_eq!(event.event_type, EventType::CheckoutSessionCompleted);
    }

    #[test]
    fn rejects_wrong_secret() {
        let body = event_body();
        let now = 1_700_000_000;
        let header = sign("whsec_other", now, &body);

        assert_eq!(
            verifier().verify_and_parse(&body, &header, now).unwrap_err(),
            WebhookError::SignatureMismatch
        );
    }

    #[test]
    fn rejects_modified_body() {
        let body = event_body();
        let now = 1_700_000_000;
        let header = sign(SECRET, now, &body);

        let mut tampered = body.clone();
        tampered[10] ^= 1;

        assert_eq!(
            verifier()
                .verify_and_parse(&tampered, &header, now)
                .unwrap_err(),
            WebhookError::SignatureMismatch
        );
    }

    #[test]
    fn rejects_stale_timestamp() {
        let body = event_body();
        let signed_at = 1_700_000_000;
        let header = sign(SECRET, signed_at, &body);

        assert_eq!(
            verifier()
                .verify_and_parse(&body, &header, signed_at + TIMESTAMP_TOLERANCE + 1)
                .unwrap_err(),
            WebhookError::TimestampOutOfTolerance
        );
    }

    #[test]
    fn accepts_timestamp_at_tolerance_boundary() {
        let body = event_body();
        let signed_at = 1_700_000_000;
        let header = sign(SECRET, signed_at, &body);

        assert!(verifier()
            .verify_and_parse(&body, &header, signed_at + TIMESTAMP_TOLERANCE)
            .is_ok());
    }

    #[test]
    fn rejects_header_without_signature() {
        let body = event_body();
        assert_eq!(
            verifier()
                .verify_and_parse(&body, "t=1700000000", 1_700_000_000)
                .unwrap_err(),
            WebhookError::MalformedHeader
        );
    }

    #[test]
    fn rejects_header_without_timestamp() {
        let body = event_body();
        assert_eq!(
            verifier()
                .verify_and_parse(&body, "v1=deadbeef", 1_700_000_000)
                .unwrap_err(),
            WebhookError::MalformedHeader
        );
    }

    #[test]
    fn signature_is_checked_before_payload_parsing() {
        // Garbage body with a bad signature must fail on the signature, not
        // on JSON parsing.
        let body = b"not json at all";
        let header = sign("whsec_other", 1_700_000_000, body);

        assert_eq!(
            verifier()
                .verify_and_parse(body, &header, 1_700_000_000)
                .unwrap_err(),
            WebhookError::SignatureMismatch
        );
    }

    #[test]
    fn correctly_signed_garbage_fails_on_payload() {
        let body = b"not json at all";
        let header = sign(SECRET, 1_700_000_000, body);

        assert!(matches!(
            verifier()
                .verify_and_parse(body, &header, 1_700_000_000)
                .unwrap_err(),
            WebhookError::MalformedPayload(_)
        ));
    }

    #[test]
    fn unknown_event_type_is_preserved() {
        let body = serde_json::json!({
            "id": "evt_2",
            "type": "invoice.paid",
            "created": 1_700_000_000,
            "data": {"object": {}}
        })
        .to_string()
        .into_bytes();
        let header = sign(SECRET, 1_700_000_000, &body);

        let event = verifier()
            .verify_and_parse(&body, &header, 1_700_000_000)
            .unwrap();
        assert_eq!(
            event.event_type,
            EventType::Unknown("invoice.paid".to_string())
        );
    }

    #[test]
    fn uses_first_v1_signature_when_multiple_present() {
        let body = event_body();
        let now = 1_700_000_000;
        let header = format!("{},v1=deadbeef", sign(SECRET, now, &body));

        assert!(verifier().verify_and_parse(&body, &header, now).is_ok());
    }
}
