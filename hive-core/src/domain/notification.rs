//! Notifications emitted towards whatever front-end hosts the runner

use serde::{Deserialize, Serialize};

/// Kind of event reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Testing,
    Generating,
    Success,
    Error,
    Result,
}

/// Event sent over the notification channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub data: serde_json::Value,
}

impl Notification {
    pub fn new(kind: NotificationKind, data: serde_json::Value) -> Self {
        Self { kind, data }
    }

    pub fn testing(message: impl Into<String>) -> Self {
        Self::message(NotificationKind::Testing, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::message(NotificationKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::message(NotificationKind::Error, message)
    }

    fn message(kind: NotificationKind, message: impl Into<String>) -> Self {
        Self::new(kind, serde_json::json!({ "message": message.into() }))
    }
}
