//! Client-credentials domain types

use secrecy::SecretString;

/// Realm used when none has been configured
pub const DEFAULT_REALM: &str = "stackspot-freemium";

/// Configuration keys understood by the runner
pub mod keys {
    pub const CLIENT_ID: &str = "clientId";
    pub const CLIENT_SECRET: &str = "clientSecret";
    pub const REALM: &str = "realm";
    pub const ACCESS_TOKEN: &str = "accessToken";
    pub const TOKEN_EXPIRES_AT: &str = "tokenExpiresAt";

    /// Prefix of the keys that map a feature name to a quick-command slug
    pub const SLUG_PREFIX: &str = "slug.";

    /// Key under which the slug for `feature` is stored
    pub fn slug(feature: &str) -> String {
        format!("{}{}", SLUG_PREFIX, feature)
    }
}

/// Client credentials used for the token exchange
///
/// Read-only to the runner; owned by whatever store persisted them.
#[derive(Debug)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: SecretString,
    pub realm: String,
}

impl Credentials {
    /// Builds credentials, falling back to [`DEFAULT_REALM`] when the realm is
    /// missing or blank
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        realm: Option<String>,
    ) -> Self {
        let realm = realm
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REALM.to_string());

        Self {
            client_id: client_id.into(),
            client_secret: SecretString::from(client_secret.into()),
            realm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_realm_defaults_when_absent() {
        let creds = Credentials::new("id", "secret", None);
        assert_eq!(creds.realm, DEFAULT_REALM);
        assert_eq!(creds.client_secret.expose_secret(), "secret");
    }

    #[test]
    fn test_realm_defaults_when_blank() {
        let creds = Credentials::new("id", "secret", Some("  ".to_string()));
        assert_eq!(creds.realm, DEFAULT_REALM);
    }

    #[test]
    fn test_explicit_realm_is_kept() {
        let creds = Credentials::new("id", "secret", Some("acme".to_string()));
        assert_eq!(creds.realm, "acme");
    }

    #[test]
    fn test_secret_is_redacted_in_debug() {
        let creds = Credentials::new("id", "super-secret", None);
        assert!(!format!("{:?}", creds).contains("super-secret"));
    }

    #[test]
    fn test_slug_key() {
        assert_eq!(keys::slug("generate-tests"), "slug.generate-tests");
    }
}
