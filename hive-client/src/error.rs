//! Error types for the StackSpot client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the StackSpot API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The token exchange was rejected or returned no token
    #[error("Authentication failed{}: {message}", status_suffix(.status))]
    Auth {
        /// HTTP status code, if the server answered
        status: Option<u16>,
        /// Error message from the identity provider
        message: String,
    },

    /// The create-execution call was not successful
    #[error("Failed to create execution for quick command '{slug}' (status {status}): {body}")]
    Submission {
        slug: String,
        status: u16,
        body: String,
    },

    /// A callback poll was not successful
    #[error("Failed to poll execution {execution_id} (status {status}): {body}")]
    Poll {
        execution_id: String,
        status: u16,
        body: String,
    },

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// A base URL could not be turned into an endpoint
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

fn status_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (status {})", s)).unwrap_or_default()
}

impl ClientError {
    /// HTTP status code carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } => *status,
            Self::Submission { status, .. } | Self::Poll { status, .. } => Some(*status),
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            Self::ParseError(_) | Self::InvalidUrl(_) => None,
        }
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(status) if (400..500).contains(&status))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_message_with_status() {
        let err = ClientError::Auth {
            status: Some(401),
            message: "Invalid client credentials".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Authentication failed (status 401): Invalid client credentials"
        );
        assert!(err.is_client_error());
    }

    #[test]
    fn test_auth_message_without_status() {
        let err = ClientError::Auth {
            status: None,
            message: "no token".to_string(),
        };
        assert_eq!(err.to_string(), "Authentication failed: no token");
        assert!(!err.is_client_error());
        assert!(!err.is_server_error());
    }

    #[test]
    fn test_poll_error_is_server_error() {
        let err = ClientError::Poll {
            execution_id: "abc".to_string(),
            status: 503,
            body: "unavailable".to_string(),
        };
        assert!(err.is_server_error());
        assert!(err.to_string().contains("abc"));
    }
}
