use secrecy::SecretString;

/// Process-wide configuration loaded once at startup, immutable thereafter.
#[derive(Clone)]
pub struct GlobalArgs {
    pub jwt_secret: SecretString,
    pub jwt_expiration: String,
    pub stripe_secret_key: SecretString,
    pub stripe_webhook_secret: SecretString,
    pub checkout_success_url: String,
    pub checkout_cancel_url: String,
}

impl std::fmt::Debug for GlobalArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GlobalArgs")
            .field("jwt_secret", &"***")
            .field("jwt_expiration", &self.jwt_expiration)
            .field("stripe_secret_key", &"***")
            .field("stripe_webhook_secret", &"***")
            .field("checkout_success_url", &self.checkout_success_url)
            .field("checkout_cancel_url", &self.checkout_cancel_url)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_global_args_debug_redacts_secrets() {
        let args = GlobalArgs {
            jwt_secret: SecretString::from("sup3rs3cr3t"),
            jwt_expiration: "10h".to_string(),
            stripe_secret_key: SecretString::from("sk_test_xxx"),
            stripe_webhook_secret: SecretString::from("whsec_xxx"),
            checkout_success_url: "https://shop.tld/success".to_string(),
            checkout_cancel_url: "https://shop.tld/cancel".to_string(),
        };

        let debug = format!("{args:?}");
        assert!(!debug.contains("sup3rs3cr3t"));
        assert!(!debug.contains("sk_test_xxx"));
        assert!(!debug.contains("whsec_xxx"));
        assert!(debug.contains("10h"));

        assert_eq!(args.jwt_secret.expose_secret(), "sup3rs3cr3t");
    }
}
