//! Hive HTTP Client
//!
//! A small, type-safe HTTP client for the StackSpot identity and quick-command
//! APIs.
//!
//! The client covers the three calls a quick-command run needs: the
//! client-credentials token exchange, creating an execution and polling its
//! callback. The [`QuickCommandApi`] trait exposes the same calls so the
//! runner can be driven by a stub in tests.
//!
//! # Example
//!
//! ```no_run
//! use hive_client::StackSpotClient;
//! use hive_core::domain::credentials::Credentials;
//! use hive_core::domain::execution::ExecutionRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = StackSpotClient::new(
//!         "https://idm.stackspot.com",
//!         "https://genai-code-buddy-api.stackspot.com",
//!     );
//!
//!     let credentials = Credentials::new("my-client-id", "my-client-secret", None);
//!     let token = client.fetch_token(&credentials).await?;
//!
//!     let request = ExecutionRequest::new("generate-tests", serde_json::json!({"code": "..."}));
//!     let handle = client.submit(&request, &token).await?;
//!     let result = client.poll_once(&handle.execution_id, &token).await?;
//!
//!     println!("Execution {} is {}", handle, result.status);
//!     Ok(())
//! }
//! ```

mod api;
pub mod error;
mod executions;
mod tokens;

// Re-export commonly used types
pub use api::QuickCommandApi;
pub use error::{ClientError, Result};

use reqwest::{Client, Url};

/// Default identity provider base URL
pub const DEFAULT_AUTH_URL: &str = "https://idm.stackspot.com";

/// Default quick-command API base URL
pub const DEFAULT_API_URL: &str = "https://genai-code-buddy-api.stackspot.com";

/// HTTP client for the StackSpot APIs
///
/// Endpoints are grouped by concern:
/// - Token exchange against the realm-scoped identity endpoint
/// - Quick-command execution creation and callback polling
#[derive(Debug, Clone)]
pub struct StackSpotClient {
    /// Base URL of the identity provider (e.g., "https://idm.stackspot.com")
    auth_base_url: String,
    /// Base URL of the quick-command API
    api_base_url: String,
    /// HTTP client instance
    client: Client,
}

impl StackSpotClient {
    /// Create a new client
    ///
    /// # Arguments
    /// * `auth_base_url` - Base URL of the identity provider
    /// * `api_base_url` - Base URL of the quick-command API
    ///
    /// # Example
    /// ```
    /// use hive_client::StackSpotClient;
    ///
    /// let client = StackSpotClient::new("https://idm.stackspot.com", "http://localhost:8080/");
    /// assert_eq!(client.api_base_url(), "http://localhost:8080");
    /// ```
    pub fn new(auth_base_url: impl Into<String>, api_base_url: impl Into<String>) -> Self {
        Self::with_client(auth_base_url, api_base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        auth_base_url: impl Into<String>,
        api_base_url: impl Into<String>,
        client: Client,
    ) -> Self {
        Self {
            auth_base_url: auth_base_url.into().trim_end_matches('/').to_string(),
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the identity provider
    pub fn auth_base_url(&self) -> &str {
        &self.auth_base_url
    }

    /// Get the base URL of the quick-command API
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }
}

impl Default for StackSpotClient {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_URL, DEFAULT_API_URL)
    }
}

/// Joins `segments` onto `base`, percent-encoding each one
///
/// Slugs, realms and execution ids come from user configuration or the
/// remote service and may contain `/`, `?` or `#`.
fn endpoint(base: &str, segments: &[&str]) -> Result<Url> {
    let mut url =
        Url::parse(base).map_err(|e| ClientError::InvalidUrl(format!("{}: {}", base, e)))?;

    url.path_segments_mut()
        .map_err(|_| ClientError::InvalidUrl(format!("{}: cannot be a base URL", base)))?
        .pop_if_empty()
        .extend(segments);

    Ok(url)
}

/// Reads the body of a failed response for error reporting
async fn error_body(response: reqwest::Response) -> (u16, String) {
    let status = response.status().as_u16();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    (status, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = StackSpotClient::new("http://localhost:9000", "http://localhost:8080");
        assert_eq!(client.auth_base_url(), "http://localhost:9000");
        assert_eq!(client.api_base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = StackSpotClient::new("http://localhost:9000/", "http://localhost:8080/");
        assert_eq!(client.auth_base_url(), "http://localhost:9000");
        assert_eq!(client.api_base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let url = endpoint(
            "http://localhost:8080",
            &["v1", "quick-commands", "create-execution", "team/gen tests?x#y"],
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/v1/quick-commands/create-execution/team%2Fgen%20tests%3Fx%23y"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let url = endpoint("http://localhost:8080/api", &["v1", "callback", "abc"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/callback/abc");
    }

    #[test]
    fn test_endpoint_rejects_invalid_base() {
        let err = endpoint("not a url", &["v1"]).unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_default_urls() {
        let client = StackSpotClient::default();
        assert_eq!(client.auth_base_url(), DEFAULT_AUTH_URL);
        assert_eq!(client.api_base_url(), DEFAULT_API_URL);
    }
}
