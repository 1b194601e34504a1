//! Password hashing and verification.

use anyhow::{Context, Result};
use tracing::error;

// Work factor fixed to keep hashes comparable across deployments.
const BCRYPT_COST: u32 = 10;

/// Hash a plaintext password with a per-hash random salt.
/// # Errors
/// Hashing failure is an internal error; it never reaches the client.
pub fn hash_password(plain: &str) -> Result<String> {
    bcrypt::hash(plain, BCRYPT_COST).context("failed to hash password")
}

/// Verify a plaintext password against a stored hash.
///
/// Any failure, including an unparsable hash, counts as a mismatch; the
/// caller decides how to surface it.
#[must_use]
pub fn verify_password(plain: &str, hash: &str) -> bool {
    bcrypt::verify(plain, hash).unwrap_or_else(|err| {
        error!("Password verification error: {err}");
        false
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() -> Result<()> {
        let hash = hash_password("secret123")?;

        assert!(verify_password("secret123", &hash));
        assert!(!verify_password("secret124", &hash));
        Ok(())
    }

    #[test]
    fn hash_is_salted() -> Result<()> {
        let first = hash_password("secret123")?;
        let second = hash_password("secret123")?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn hash_never_contains_plaintext() -> Result<()> {
        let hash = hash_password("secret123")?;
        assert!(!hash.contains("secret123"));
        Ok(())
    }

    #[test]
    fn unparsable_hash_is_a_mismatch() {
        assert!(!verify_password("secret123", "not-a-bcrypt-hash"));
    }
}
