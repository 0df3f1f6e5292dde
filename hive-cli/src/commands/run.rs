//! Quick-command run handlers

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use hive_runner::RunnerConfig;
use tracing::debug;

use crate::config::Config;
use crate::output::{ConsoleNotifier, print_result};

/// Arguments shared by `hive run` and `hive feature`
#[derive(Args)]
pub struct RunArgs {
    /// JSON input (a bare string is sent as a JSON string)
    #[arg(long, conflicts_with = "input_file")]
    input: Option<String>,

    /// Read the input from a file; its contents are sent as a JSON string
    #[arg(long)]
    input_file: Option<PathBuf>,

    /// Correlate the run with an earlier conversation
    #[arg(long)]
    conversation_id: Option<String>,

    /// Minutes to wait for a terminal status (default: HIVE_MAX_WAIT_MINUTES, or 5)
    #[arg(long)]
    max_wait_minutes: Option<u32>,
}

impl RunArgs {
    /// Builds the JSON payload from `--input` or `--input-file`
    fn payload(&self) -> Result<serde_json::Value> {
        if let Some(path) = &self.input_file {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            return Ok(serde_json::Value::String(contents));
        }

        Ok(match &self.input {
            Some(raw) => parse_input(raw),
            None => serde_json::Value::Object(Default::default()),
        })
    }

    /// `--max-wait-minutes`, or the configured wait budget
    fn wait_minutes(&self, config: &RunnerConfig) -> u32 {
        self.max_wait_minutes.unwrap_or(config.max_wait_minutes)
    }
}

/// Parses `raw` as JSON, falling back to a JSON string
fn parse_input(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_string()))
}

pub async fn run_slug(slug: &str, args: RunArgs, config: &Config) -> Result<()> {
    let orchestrator = config.orchestrator(Arc::new(ConsoleNotifier))?;
    let payload = args.payload()?;
    let max_wait_minutes = args.wait_minutes(orchestrator.config());
    debug!("Running '{}' with payload {}", slug, payload);

    println!("{} Running {}...", "▸".cyan(), slug.bold());
    let result = orchestrator
        .run(
            slug,
            payload,
            args.conversation_id.as_deref(),
            max_wait_minutes,
        )
        .await?;

    print_result(&result);
    Ok(())
}

pub async fn run_feature(feature: &str, args: RunArgs, config: &Config) -> Result<()> {
    let orchestrator = config.orchestrator(Arc::new(ConsoleNotifier))?;
    let payload = args.payload()?;
    let max_wait_minutes = args.wait_minutes(orchestrator.config());

    let result = orchestrator
        .run_feature(
            feature,
            payload,
            args.conversation_id.as_deref(),
            max_wait_minutes,
        )
        .await?;

    print_result(&result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_json() {
        assert_eq!(parse_input(r#"{"a": 1}"#), serde_json::json!({"a": 1}));
    }

    #[test]
    fn test_parse_input_plain_text() {
        assert_eq!(parse_input("fn main() {}"), serde_json::json!("fn main() {}"));
    }

    #[test]
    fn test_payload_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.rs");
        std::fs::write(&path, "fn main() {}").unwrap();

        let args = RunArgs {
            input: None,
            input_file: Some(path),
            conversation_id: None,
            max_wait_minutes: None,
        };

        assert_eq!(args.payload().unwrap(), serde_json::json!("fn main() {}"));
    }

    #[test]
    fn test_payload_defaults_to_empty_object() {
        let args = RunArgs {
            input: None,
            input_file: None,
            conversation_id: None,
            max_wait_minutes: None,
        };

        assert_eq!(args.payload().unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_wait_minutes_falls_back_to_config() {
        let mut config = RunnerConfig::default();
        config.max_wait_minutes = 2;

        let mut args = RunArgs {
            input: None,
            input_file: None,
            conversation_id: None,
            max_wait_minutes: None,
        };
        assert_eq!(args.wait_minutes(&config), 2);

        args.max_wait_minutes = Some(10);
        assert_eq!(args.wait_minutes(&config), 10);
    }
}
