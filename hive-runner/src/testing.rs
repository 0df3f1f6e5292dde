//! Test doubles shared by the runner's unit tests

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use hive_client::{ClientError, QuickCommandApi};
use hive_core::domain::credentials::Credentials;
use hive_core::domain::execution::{
    ExecutionHandle, ExecutionRequest, ExecutionResult, ExecutionStatus,
};
use hive_core::domain::token::AccessToken;

use crate::service::Sleeper;

pub fn test_token() -> AccessToken {
    AccessToken::new("test-token", Utc::now(), 600)
}

pub fn status(status: ExecutionStatus) -> Result<ExecutionResult, ClientError> {
    Ok(ExecutionResult::new(status))
}

pub fn completed(payload: &str) -> Result<ExecutionResult, ClientError> {
    Ok(ExecutionResult::new(ExecutionStatus::Completed).with_payload(serde_json::json!(payload)))
}

pub fn transient() -> Result<ExecutionResult, ClientError> {
    Err(ClientError::ParseError("connection reset".to_string()))
}

/// QuickCommandApi stub that replays scripted poll results and counts calls
#[derive(Default)]
pub struct ScriptedApi {
    polls: Mutex<VecDeque<Result<ExecutionResult, ClientError>>>,
    token_error: Mutex<Option<ClientError>>,
    submit_error: Mutex<Option<ClientError>>,
    token_calls: AtomicUsize,
    submit_calls: AtomicUsize,
    poll_calls: AtomicUsize,
    submitted: Mutex<Vec<ExecutionRequest>>,
    realms: Mutex<Vec<String>>,
}

impl ScriptedApi {
    pub fn with_polls(polls: Vec<Result<ExecutionResult, ClientError>>) -> Self {
        Self {
            polls: Mutex::new(polls.into()),
            ..Self::default()
        }
    }

    pub fn failing_token(self, error: ClientError) -> Self {
        *self.token_error.lock().unwrap() = Some(error);
        self
    }

    pub fn failing_submit(self, error: ClientError) -> Self {
        *self.submit_error.lock().unwrap() = Some(error);
        self
    }

    pub fn token_calls(&self) -> usize {
        self.token_calls.load(Ordering::SeqCst)
    }

    pub fn submit_calls(&self) -> usize {
        self.submit_calls.load(Ordering::SeqCst)
    }

    pub fn poll_calls(&self) -> usize {
        self.poll_calls.load(Ordering::SeqCst)
    }

    pub fn network_calls(&self) -> usize {
        self.token_calls() + self.submit_calls() + self.poll_calls()
    }

    pub fn submitted(&self) -> Vec<ExecutionRequest> {
        self.submitted.lock().unwrap().clone()
    }

    pub fn realms(&self) -> Vec<String> {
        self.realms.lock().unwrap().clone()
    }
}

#[async_trait]
impl QuickCommandApi for ScriptedApi {
    async fn fetch_token(&self, credentials: &Credentials) -> Result<AccessToken, ClientError> {
        self.token_calls.fetch_add(1, Ordering::SeqCst);
        self.realms.lock().unwrap().push(credentials.realm.clone());
        match self.token_error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(test_token()),
        }
    }

    async fn submit(
        &self,
        request: &ExecutionRequest,
        _token: &AccessToken,
    ) -> Result<ExecutionHandle, ClientError> {
        self.submit_calls.fetch_add(1, Ordering::SeqCst);
        self.submitted.lock().unwrap().push(request.clone());
        match self.submit_error.lock().unwrap().take() {
            Some(e) => Err(e),
            None => Ok(ExecutionHandle {
                execution_id: "exec-1".to_string(),
            }),
        }
    }

    async fn poll_once(
        &self,
        _execution_id: &str,
        _token: &AccessToken,
    ) -> Result<ExecutionResult, ClientError> {
        self.poll_calls.fetch_add(1, Ordering::SeqCst);
        self.polls
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::ParseError("poll script exhausted".to_string())))
    }
}

/// Sleeper that returns immediately and records each requested delay
#[derive(Default)]
pub struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl RecordingSleeper {
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sleeper for RecordingSleeper {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}
