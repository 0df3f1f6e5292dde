//! Access token domain type

use chrono::{DateTime, Duration, Utc};
use secrecy::SecretString;

/// Bearer token obtained from the client-credentials grant
///
/// Created per orchestration run and never shared between runs.
#[derive(Debug)]
pub struct AccessToken {
    pub value: SecretString,
    pub expires_at: DateTime<Utc>,
}

impl AccessToken {
    /// Creates a token that expires `expires_in_secs` seconds after `issued_at`
    pub fn new(value: impl Into<String>, issued_at: DateTime<Utc>, expires_in_secs: u64) -> Self {
        let expires_at = i64::try_from(expires_in_secs)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Self {
            value: SecretString::from(value.into()),
            expires_at,
        }
    }

    /// Whether the token has expired at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Whether the token has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        let issued = Utc::now();
        let token = AccessToken::new("abc", issued, 60);

        assert_eq!(token.expires_at, issued + Duration::seconds(60));
        assert!(!token.is_expired_at(issued + Duration::seconds(59)));
        assert!(token.is_expired_at(issued + Duration::seconds(60)));
    }

    #[test]
    fn test_zero_lifetime_is_expired() {
        let issued = Utc::now();
        let token = AccessToken::new("abc", issued, 0);
        assert!(token.is_expired_at(issued));
    }
}
