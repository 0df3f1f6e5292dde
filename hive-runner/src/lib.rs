//! Hive Runner
//!
//! Runs StackSpot quick commands to completion.
//!
//! Architecture:
//! - Configuration: endpoints and polling cadence
//! - Services: host capabilities (config store, notifier, sleeper)
//! - Scheduler: the callback poll loop
//! - Orchestrator: token -> submit -> poll, plus credential and feature helpers
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use hive_client::StackSpotClient;
//! use hive_runner::{Orchestrator, RunnerConfig};
//! use hive_runner::service::{InMemoryConfigStore, TracingNotifier};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = RunnerConfig::default();
//!     let client = StackSpotClient::new(&config.auth_base_url, &config.api_base_url);
//!     let orchestrator = Orchestrator::new(
//!         config,
//!         Arc::new(client),
//!         Arc::new(InMemoryConfigStore::new()),
//!         Arc::new(TracingNotifier),
//!     );
//!
//!     orchestrator.save_credentials("client-id", "client-secret", None)?;
//!     let result = orchestrator
//!         .run("generate-tests", serde_json::json!({"code": "..."}), None, 5)
//!         .await?;
//!     println!("{:?}", result.payload);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod scheduler;
pub mod service;

#[cfg(test)]
mod testing;

pub use config::RunnerConfig;
pub use error::{ConfigError, RunError};
pub use orchestrator::Orchestrator;
pub use scheduler::ExecutionPoller;
