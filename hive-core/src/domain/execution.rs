//! Quick-command execution domain types

use serde::{Deserialize, Serialize};
use std::fmt;

/// Request to run a quick command
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionRequest {
    /// Identifier of the remote quick command
    pub slug: String,
    /// Arbitrary JSON sent as the command's `input_data`
    pub input: serde_json::Value,
    /// Optional correlation id linking the run to a prior conversation
    pub conversation_id: Option<String>,
}

impl ExecutionRequest {
    pub fn new(slug: impl Into<String>, input: serde_json::Value) -> Self {
        Self {
            slug: slug.into(),
            input,
            conversation_id: None,
        }
    }

    pub fn with_conversation_id(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }
}

/// Opaque identifier of a submitted execution, used only as the poll key
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ExecutionHandle {
    pub execution_id: String,
}

impl ExecutionHandle {
    /// Parses the plain-text body returned by the create-execution endpoint
    ///
    /// The backend sometimes wraps the id in quotes, so surrounding whitespace
    /// and quote characters are stripped. Returns `None` if nothing is left.
    pub fn from_response_body(body: &str) -> Option<Self> {
        let id = body
            .trim()
            .trim_matches(|c| c == '"' || c == '\'')
            .trim();

        if id.is_empty() {
            None
        } else {
            Some(Self {
                execution_id: id.to_string(),
            })
        }
    }
}

impl fmt::Display for ExecutionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.execution_id)
    }
}

/// Status reported by the callback endpoint
///
/// Anything the runner does not recognise deserializes to `Unknown` and is
/// treated like a pending execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStatus {
    Pending,
    Running,
    Completed,
    Failed,
    Error,
    #[default]
    #[serde(other)]
    Unknown,
}

impl ExecutionStatus {
    /// `COMPLETED`, `FAILED` and `ERROR` end the poll loop
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Error)
    }

    pub fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Error => "ERROR",
            Self::Unknown => "UNKNOWN",
        };
        f.write_str(s)
    }
}

/// Snapshot of an execution as seen by one poll
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    pub progress_percent: Option<f64>,
    pub payload: Option<serde_json::Value>,
}

impl ExecutionResult {
    pub fn new(status: ExecutionStatus) -> Self {
        Self {
            status,
            progress_percent: None,
            payload: None,
        }
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    pub fn with_progress(mut self, percent: f64) -> Self {
        self.progress_percent = Some(percent);
        self
    }
}
