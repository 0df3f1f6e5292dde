//! Quick-command orchestrator
//!
//! Composes the token exchange, submission and polling into a single
//! run-to-completion call, and hosts the credential and feature helpers the
//! front-end uses.
//!
//! Every run reads credentials, authenticates and submits on its own; runs
//! share no mutable state and can execute concurrently.

use std::sync::Arc;

use hive_client::QuickCommandApi;
use hive_core::domain::credentials::{Credentials, keys};
use hive_core::domain::execution::{ExecutionRequest, ExecutionResult};
use hive_core::domain::notification::{Notification, NotificationKind};
use hive_core::domain::token::AccessToken;
use secrecy::ExposeSecret;
use serde_json::json;
use tracing::{error, info};

use crate::config::RunnerConfig;
use crate::error::{ConfigError, RunError};
use crate::scheduler::ExecutionPoller;
use crate::service::{ConfigStore, Notifier, Sleeper, TokioSleeper};

/// Runs quick commands against the remote API
pub struct Orchestrator {
    config: RunnerConfig,
    api: Arc<dyn QuickCommandApi>,
    store: Arc<dyn ConfigStore>,
    notifier: Arc<dyn Notifier>,
    sleeper: Arc<dyn Sleeper>,
}

impl Orchestrator {
    /// Creates an orchestrator that waits between polls on the tokio timer
    pub fn new(
        config: RunnerConfig,
        api: Arc<dyn QuickCommandApi>,
        store: Arc<dyn ConfigStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            config,
            api,
            store,
            notifier,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Replaces the sleeper used between polls
    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    // =============================================================================
    // Credentials
    // =============================================================================

    /// Reads credentials from the store
    ///
    /// Fails with [`ConfigError::MissingCredential`] when the client id or
    /// secret is absent or blank. A missing realm falls back to the default.
    pub fn load_credentials(&self) -> Result<Credentials, ConfigError> {
        let client_id = self.required(keys::CLIENT_ID)?;
        let client_secret = self.required(keys::CLIENT_SECRET)?;
        let realm = self.store.get(keys::REALM);

        Ok(Credentials::new(client_id, client_secret, realm))
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.store
            .get(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingCredential(key))
    }

    /// Stores trimmed credentials; the realm is only written when given
    pub fn save_credentials(
        &self,
        client_id: &str,
        client_secret: &str,
        realm: Option<&str>,
    ) -> Result<(), RunError> {
        let client_id = client_id.trim();
        let client_secret = client_secret.trim();

        if client_id.is_empty() {
            return Err(ConfigError::MissingCredential(keys::CLIENT_ID).into());
        }
        if client_secret.is_empty() {
            return Err(ConfigError::MissingCredential(keys::CLIENT_SECRET).into());
        }

        self.store.set(keys::CLIENT_ID, client_id)?;
        self.store.set(keys::CLIENT_SECRET, client_secret)?;
        if let Some(realm) = realm.map(str::trim).filter(|r| !r.is_empty()) {
            self.store.set(keys::REALM, realm)?;
        }

        info!("Saved credentials for client '{}'", client_id);
        Ok(())
    }

    /// Checks the stored credentials by fetching a token
    ///
    /// On success the token and its expiry are written back to the store.
    /// Progress is reported as `testing` followed by `success` or `error`.
    pub async fn test_connection(&self) -> Result<AccessToken, RunError> {
        self.notifier
            .notify(Notification::testing("Testing connection to StackSpot..."));

        let result = self.authenticate().await.and_then(|token| {
            self.store
                .set(keys::ACCESS_TOKEN, token.value.expose_secret())?;
            self.store
                .set(keys::TOKEN_EXPIRES_AT, &token.expires_at.to_rfc3339())?;
            Ok(token)
        });

        match &result {
            Ok(token) => self.notifier.notify(Notification::new(
                NotificationKind::Success,
                json!({
                    "message": "Connection established, token obtained",
                    "expiresAt": token.expires_at.to_rfc3339(),
                }),
            )),
            Err(e) => {
                error!("Connection test failed: {}", e);
                self.notifier.notify(Notification::error(e.to_string()));
            }
        }

        result
    }

    async fn authenticate(&self) -> Result<AccessToken, RunError> {
        let credentials = self.load_credentials()?;
        info!("Authenticating client '{}'", credentials.client_id);

        self.api
            .fetch_token(&credentials)
            .await
            .map_err(RunError::Auth)
    }

    // =============================================================================
    // Runs
    // =============================================================================

    /// Runs the quick command `slug` to completion
    ///
    /// Waits at most `max_wait_minutes` worth of polls at the configured
    /// cadence. Any stage failure aborts the run with that stage's error.
    pub async fn run(
        &self,
        slug: &str,
        input: serde_json::Value,
        conversation_id: Option<&str>,
        max_wait_minutes: u32,
    ) -> Result<ExecutionResult, RunError> {
        let mut request = ExecutionRequest::new(slug, input);
        request.conversation_id = conversation_id.map(str::to_string);

        self.run_request(&request, max_wait_minutes).await
    }

    /// Runs a prepared [`ExecutionRequest`] to completion
    pub async fn run_request(
        &self,
        request: &ExecutionRequest,
        max_wait_minutes: u32,
    ) -> Result<ExecutionResult, RunError> {
        let token = self.authenticate().await?;

        info!("Submitting quick command '{}'", request.slug);
        let handle = self
            .api
            .submit(request, &token)
            .await
            .map_err(RunError::Submission)?;
        info!("Quick command '{}' submitted as {}", request.slug, handle);

        let poller = ExecutionPoller::new(
            Arc::clone(&self.api),
            Arc::clone(&self.sleeper),
            Arc::clone(&self.notifier),
        )
        .with_interval(self.config.poll_interval);

        poller
            .wait_for_completion(
                &request.slug,
                &handle.execution_id,
                &token,
                self.config.max_attempts(max_wait_minutes),
            )
            .await
    }

    // =============================================================================
    // Features
    // =============================================================================

    /// Slug configured for `feature`
    pub fn slug_for(&self, feature: &str) -> Result<String, ConfigError> {
        self.store
            .get(&keys::slug(feature))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingSlug(feature.to_string()))
    }

    /// Runs the quick command configured for a named feature
    ///
    /// Reports `generating` when the run starts, then `result` with the
    /// payload or `error` with the failure message.
    pub async fn run_feature(
        &self,
        feature: &str,
        input: serde_json::Value,
        conversation_id: Option<&str>,
        max_wait_minutes: u32,
    ) -> Result<ExecutionResult, RunError> {
        let slug = match self.slug_for(feature) {
            Ok(slug) => slug,
            Err(e) => {
                self.notifier.notify(Notification::error(e.to_string()));
                return Err(e.into());
            }
        };

        self.notifier.notify(Notification::new(
            NotificationKind::Generating,
            json!({ "feature": feature, "slug": slug }),
        ));

        let result = self
            .run(&slug, input, conversation_id, max_wait_minutes)
            .await;

        match &result {
            Ok(execution) => self.notifier.notify(Notification::new(
                NotificationKind::Result,
                json!({
                    "feature": feature,
                    "slug": slug,
                    "status": execution.status,
                    "payload": execution.payload,
                }),
            )),
            Err(e) => {
                error!("Feature '{}' failed: {}", feature, e);
                self.notifier.notify(Notification::error(e.to_string()));
            }
        }

        result
    }
}
