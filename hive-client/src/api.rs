//! Trait seam over the quick-command API

use async_trait::async_trait;
use hive_core::domain::credentials::Credentials;
use hive_core::domain::execution::{ExecutionHandle, ExecutionRequest, ExecutionResult};
use hive_core::domain::token::AccessToken;

use crate::StackSpotClient;
use crate::error::Result;

/// The three remote operations a quick-command run is made of
///
/// Implemented by [`StackSpotClient`]; the runner only depends on this trait
/// so it can be exercised against scripted stubs.
#[async_trait]
pub trait QuickCommandApi: Send + Sync {
    /// Exchanges credentials for a bearer token
    async fn fetch_token(&self, credentials: &Credentials) -> Result<AccessToken>;

    /// Creates a remote execution and returns its handle
    async fn submit(&self, request: &ExecutionRequest, token: &AccessToken)
    -> Result<ExecutionHandle>;

    /// Reads the current state of an execution
    async fn poll_once(&self, execution_id: &str, token: &AccessToken) -> Result<ExecutionResult>;
}

#[async_trait]
impl QuickCommandApi for StackSpotClient {
    async fn fetch_token(&self, credentials: &Credentials) -> Result<AccessToken> {
        StackSpotClient::fetch_token(self, credentials).await
    }

    async fn submit(
        &self,
        request: &ExecutionRequest,
        token: &AccessToken,
    ) -> Result<ExecutionHandle> {
        StackSpotClient::submit(self, request, token).await
    }

    async fn poll_once(&self, execution_id: &str, token: &AccessToken) -> Result<ExecutionResult> {
        StackSpotClient::poll_once(self, execution_id, token).await
    }
}
