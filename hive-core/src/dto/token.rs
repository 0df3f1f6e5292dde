//! Token endpoint DTOs

use serde::{Deserialize, Serialize};

/// Form body of the client-credentials grant
#[derive(Debug, Serialize)]
pub struct TokenRequest<'a> {
    pub client_id: &'a str,
    pub client_secret: &'a str,
    pub grant_type: &'static str,
}

impl<'a> TokenRequest<'a> {
    pub const GRANT_TYPE: &'static str = "client_credentials";

    pub fn client_credentials(client_id: &'a str, client_secret: &'a str) -> Self {
        Self {
            client_id,
            client_secret,
            grant_type: Self::GRANT_TYPE,
        }
    }
}

/// Successful token response
///
/// `access_token` is optional here so a 2xx body without it can be reported
/// as an authentication failure rather than a parse error.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// OAuth error body returned on a failed exchange
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OAuthErrorBody {
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl OAuthErrorBody {
    /// Best human-readable message: `error_description`, then `error`
    pub fn message(&self) -> Option<&str> {
        fn non_blank(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|m| !m.trim().is_empty())
        }

        non_blank(&self.error_description).or_else(|| non_blank(&self.error))
    }
}
