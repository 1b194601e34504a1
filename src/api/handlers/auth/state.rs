//! Auth configuration and shared state.

use anyhow::{anyhow, Result};
use std::time::Duration;

use super::token::TokenIssuer;

const DEFAULT_TOKEN_LIFETIME_SECONDS: u64 = 10 * 60 * 60;

/// Parse a token lifetime string such as `10h`, `30m`, `45s`, `2d`.
///
/// A bare integer is taken as seconds.
/// # Errors
/// Returns an error for empty input, unknown suffixes, or zero durations.
pub fn parse_lifetime(value: &str) -> Result<Duration> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("empty token lifetime"));
    }

    let (digits, unit) = match trimmed.find(|c: char| !c.is_ascii_digit()) {
        Some(index) => trimmed.split_at(index),
        None => (trimmed, "s"),
    };

    let amount: u64 = digits
        .parse()
        .map_err(|_| anyhow!("invalid token lifetime: {trimmed}"))?;

    let seconds = match unit {
        "s" => amount,
        "m" => amount * 60,
        "h" => amount * 60 * 60,
        "d" => amount * 60 * 60 * 24,
        other => return Err(anyhow!("unknown lifetime unit: {other}")),
    };

    if seconds == 0 {
        return Err(anyhow!("token lifetime must be positive"));
    }

    Ok(Duration::from_secs(seconds))
}

#[derive(Clone, Debug)]
pub struct AuthConfig {
    token_lifetime: Duration,
}

impl AuthConfig {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            token_lifetime: Duration::from_secs(DEFAULT_TOKEN_LIFETIME_SECONDS),
        }
    }

    #[must_use]
    pub const fn with_token_lifetime(mut self, lifetime: Duration) -> Self {
        self.token_lifetime = lifetime;
        self
    }

    /// Lifetime shared by the signed expiry claim and the cookie expiry.
    #[must_use]
    pub const fn token_lifetime(&self) -> Duration {
        self.token_lifetime
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AuthState {
    config: AuthConfig,
    issuer: TokenIssuer,
}

impl AuthState {
    #[must_use]
    pub const fn new(config: AuthConfig, issuer: TokenIssuer) -> Self {
        Self { config, issuer }
    }

    #[must_use]
    pub const fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub const fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lifetime_supports_suffixes() -> Result<()> {
        assert_eq!(parse_lifetime("10h")?, Duration::from_secs(36_000));
        assert_eq!(parse_lifetime("30m")?, Duration::from_secs(1_800));
        assert_eq!(parse_lifetime("45s")?, Duration::from_secs(45));
        assert_eq!(parse_lifetime("2d")?, Duration::from_secs(172_800));
        Ok(())
    }

    #[test]
    fn parse_lifetime_bare_integer_is_seconds() -> Result<()> {
        assert_eq!(parse_lifetime("86400")?, Duration::from_secs(86_400));
        Ok(())
    }

    #[test]
    fn parse_lifetime_rejects_garbage() {
        assert!(parse_lifetime("").is_err());
        assert!(parse_lifetime("h10").is_err());
        assert!(parse_lifetime("10w").is_err());
        assert!(parse_lifetime("0h").is_err());
        assert!(parse_lifetime("ten hours").is_err());
    }

    #[test]
    fn default_lifetime_is_ten_hours() {
        let config = AuthConfig::new();
        assert_eq!(config.token_lifetime(), Duration::from_secs(36_000));
    }
}
