//! API handlers and shared utilities.

pub mod auth;
pub mod checkout;
pub mod health;
pub mod me;
pub mod root;
pub mod user_login;
pub mod user_register;

use regex::Regex;

/// Normalize an email for lookup/uniqueness checks.
///
/// Emails are stored case-sensitive; only surrounding whitespace is removed.
pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_string()
}

/// Basic email format check on already-normalized input.
pub(crate) fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|regex| regex.is_match(email))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_email_trims_but_preserves_case() {
        assert_eq!(normalize_email(" Alice@Example.COM "), "Alice@Example.COM");
    }

    #[test]
    fn valid_email_accepts_basic_format() {
        assert!(valid_email("a@example.com"));
        assert!(valid_email("name.surname@example.co"));
    }

    #[test]
    fn valid_email_rejects_missing_parts() {
        assert!(!valid_email("not-an-email"));
        assert!(!valid_email("missing-at.example.com"));
        assert!(!valid_email("missing-domain@"));
    }
}
