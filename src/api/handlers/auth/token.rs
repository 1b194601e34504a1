//! Session token issuance and verification.

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{
    errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::ToSchema;
use uuid::Uuid;

/// Claims embedded in every session token.
///
/// The claim set is deliberately minimal: only an opaque user id plus the
/// framework timestamps. Profile data would go stale inside a token that
/// cannot be corrected before expiry.
#[derive(ToSchema, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub user_id: Uuid,
    /// Issued-at (seconds since epoch).
    pub iat: i64,
    /// Expiry (seconds since epoch), enforced at verification time.
    pub exp: i64,
}

/// A freshly issued token together with its decoded claims and absolute
/// expiry, so the cookie expiry cannot drift from the signed one.
pub struct IssuedToken {
    pub token: String,
    pub payload: TokenPayload,
    pub expires: DateTime<Utc>,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
}

/// Issues and verifies HS256 session tokens with a process-wide secret.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is a hard boundary, no clock-skew allowance.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.expose_secret().as_bytes()),
            decoding: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }

    /// Sign a token for `user_id` expiring `lifetime` from now.
    /// # Errors
    /// Returns an error if the lifetime overflows or signing fails.
    pub fn issue(&self, user_id: Uuid, lifetime: Duration) -> Result<IssuedToken> {
        let issued_at = Utc::now();
        let lifetime = chrono::Duration::from_std(lifetime).context("token lifetime overflow")?;
        let expires = issued_at + lifetime;

        let payload = TokenPayload {
            user_id,
            iat: issued_at.timestamp(),
            exp: expires.timestamp(),
        };

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &payload, &self.encoding)
            .context("failed to sign session token")?;

        // Cookie expiry mirrors the signed claim exactly.
        let expires = Utc
            .timestamp_opt(payload.exp, 0)
            .single()
            .context("token expiry out of range")?;

        Ok(IssuedToken {
            token,
            payload,
            expires,
        })
    }

    /// Verify signature and expiry, returning the decoded claims.
    ///
    /// The two failure kinds stay distinguishable here for diagnostics; the
    /// API boundary collapses both to a single unauthorized outcome.
    pub fn verify(&self, token: &str) -> Result<TokenPayload, TokenError> {
        jsonwebtoken::decode::<TokenPayload>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}
