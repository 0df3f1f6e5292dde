//! Error types for quick-command runs

use std::time::Duration;

use hive_client::ClientError;
use hive_core::domain::execution::ExecutionStatus;
use thiserror::Error;

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required credential '{0}'; save client id and secret first")]
    MissingCredential(&'static str),

    #[error("No quick-command slug configured for feature '{0}'")]
    MissingSlug(String),

    #[error("Config store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config store: {0}")]
    Parse(String),
}

/// Errors that abort a quick-command run
///
/// Each variant names the stage that failed; none are retried except poll
/// errors before the last attempt, which never reach the caller.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Could not obtain an access token: {0}")]
    Auth(#[source] ClientError),

    #[error("Submission failed: {0}")]
    Submission(#[source] ClientError),

    #[error("Polling {slug} execution {execution_id} failed on attempt {attempt}: {source}")]
    Poll {
        slug: String,
        execution_id: String,
        attempt: u32,
        #[source]
        source: ClientError,
    },

    #[error("{slug} execution {execution_id} finished with status {status}")]
    ExecutionFailed {
        slug: String,
        execution_id: String,
        status: ExecutionStatus,
        payload: Option<serde_json::Value>,
    },

    #[error(
        "{slug} execution {execution_id} did not finish after {attempts} attempt(s) ({:.1}s elapsed)",
        .elapsed.as_secs_f64()
    )]
    Timeout {
        slug: String,
        execution_id: String,
        attempts: u32,
        elapsed: Duration,
    },
}

impl RunError {
    /// Execution id the error relates to, once one has been assigned
    pub fn execution_id(&self) -> Option<&str> {
        match self {
            Self::Poll { execution_id, .. }
            | Self::ExecutionFailed { execution_id, .. }
            | Self::Timeout { execution_id, .. } => Some(execution_id),
            _ => None,
        }
    }
}
