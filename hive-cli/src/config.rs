//! Configuration module
//!
//! Handles CLI configuration: where the config store lives and which
//! endpoints to talk to.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use hive_client::StackSpotClient;
use hive_runner::service::{JsonFileConfigStore, Notifier};
use hive_runner::{Orchestrator, RunnerConfig};

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the JSON config store
    pub store_path: PathBuf,
    /// URL of the identity provider
    pub auth_url: String,
    /// URL of the quick-command API
    pub api_url: String,
}

impl Config {
    /// Opens the config store at `store_path`
    pub fn open_store(&self) -> Result<JsonFileConfigStore> {
        JsonFileConfigStore::open(&self.store_path).with_context(|| {
            format!("Failed to open config store {}", self.store_path.display())
        })
    }

    /// Applies the endpoint flags on top of `base`
    ///
    /// Polling settings keep whatever `base` carries.
    pub fn runner_config(&self, base: RunnerConfig) -> Result<RunnerConfig> {
        let runner_config = RunnerConfig {
            auth_base_url: self.auth_url.clone(),
            api_base_url: self.api_url.clone(),
            ..base
        };
        runner_config.validate()?;
        Ok(runner_config)
    }

    /// Builds an orchestrator over the config store and the HTTP client
    ///
    /// Polling settings come from the environment (see
    /// [`RunnerConfig::from_env`]); endpoints come from the flags.
    pub fn orchestrator(&self, notifier: Arc<dyn Notifier>) -> Result<Orchestrator> {
        let runner_config = self.runner_config(RunnerConfig::from_env()?)?;

        let client = StackSpotClient::new(&self.auth_url, &self.api_url);
        Ok(Orchestrator::new(
            runner_config,
            Arc::new(client),
            Arc::new(self.open_store()?),
            notifier,
        ))
    }
}

/// `$HOME/.config/aicodehive/config.json`, or `./aicodehive.json` without a home
pub fn default_store_path() -> PathBuf {
    match std::env::var_os("HOME") {
        Some(home) => PathBuf::from(home)
            .join(".config")
            .join("aicodehive")
            .join("config.json"),
        None => PathBuf::from("aicodehive.json"),
    }
}
