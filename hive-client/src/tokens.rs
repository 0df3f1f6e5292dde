//! Client-credentials token exchange

use chrono::Utc;
use hive_core::domain::credentials::Credentials;
use hive_core::domain::token::AccessToken;
use hive_core::dto::token::{OAuthErrorBody, TokenRequest, TokenResponse};
use secrecy::ExposeSecret;
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{StackSpotClient, endpoint, error_body};

impl StackSpotClient {
    // =============================================================================
    // Authentication
    // =============================================================================

    /// Exchange client credentials for a bearer token
    ///
    /// Performs a single form-encoded POST to
    /// `{auth}/{realm}/oidc/oauth/token`. There is no retry: a rejected
    /// exchange is returned to the caller as [`ClientError::Auth`].
    ///
    /// # Arguments
    /// * `credentials` - Client id, secret and realm
    ///
    /// # Returns
    /// The access token and its expiry
    pub async fn fetch_token(&self, credentials: &Credentials) -> Result<AccessToken> {
        let url = endpoint(
            &self.auth_base_url,
            &[credentials.realm.as_str(), "oidc", "oauth", "token"],
        )?;
        debug!("Requesting access token for realm '{}'", credentials.realm);

        let form = TokenRequest::client_credentials(
            &credentials.client_id,
            credentials.client_secret.expose_secret(),
        );
        let response = self.client.post(url).form(&form).send().await?;

        if !response.status().is_success() {
            let (status, body) = error_body(response).await;
            let parsed: OAuthErrorBody = serde_json::from_str(&body).unwrap_or_default();
            let message = parsed
                .message()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status));

            return Err(ClientError::Auth {
                status: Some(status),
                message,
            });
        }

        let issued_at = Utc::now();
        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Invalid token response: {}", e)))?;

        let access_token = body
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::Auth {
                status: None,
                message: "token response did not include an access token".to_string(),
            })?;

        let token = AccessToken::new(access_token, issued_at, body.expires_in.unwrap_or(0));
        debug!("Access token obtained, expires at {}", token.expires_at);

        Ok(token)
    }
}
