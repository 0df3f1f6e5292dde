//! Quick-command execution DTOs

use serde::{Deserialize, Serialize};

use crate::domain::execution::{ExecutionResult, ExecutionStatus};

/// Header carrying the optional conversation id on create-execution
pub const CONVERSATION_ID_HEADER: &str = "conversation_id";

/// Body of the create-execution call
#[derive(Debug, Clone, Serialize)]
pub struct CreateExecution<'a> {
    pub input_data: &'a serde_json::Value,
}

/// Body returned by the callback endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackResponse {
    #[serde(default)]
    pub progress: Option<Progress>,
    #[serde(default)]
    pub result: Option<serde_json::Value>,
}

/// `progress` object of a callback response
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Progress {
    #[serde(default)]
    pub status: Option<ExecutionStatus>,
    #[serde(default)]
    pub execution_percentage: Option<f64>,
}

impl From<CallbackResponse> for ExecutionResult {
    fn from(response: CallbackResponse) -> Self {
        let progress = response.progress.unwrap_or_default();
        ExecutionResult {
            status: progress.status.unwrap_or_default(),
            progress_percent: progress.execution_percentage,
            payload: response.result.filter(|v| !v.is_null()),
        }
    }
}
