//! # Cassa (Authentication & Checkout Sessions)
//!
//! `cassa` is a small HTTP backend providing user registration,
//! password-based login, cookie-carried session tokens, and payment
//! checkout-session creation confirmed asynchronously by provider webhooks.
//!
//! ## Sessions
//!
//! A successful login issues a signed, time-limited JWT carrying only the
//! user id. The token travels in the `Authentication` cookie
//! (`Secure; HttpOnly`) or, alternatively, in an `Authorization: Bearer`
//! header. Tokens are never revoked server-side; they simply expire.
//!
//! ## Checkout
//!
//! Checkout-session creation is a pure relay to the external payment
//! provider. Completion arrives on the webhook endpoint, authenticated by
//! the provider's HMAC signature scheme, never by a session cookie.

pub mod api;
pub mod cli;
pub mod stripe;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }

        assert!(GIT_COMMIT_HASH.len() >= 7);
        assert!(GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_app_user_agent() {
        assert!(APP_USER_AGENT.starts_with("cassa/"));
    }
}
