//! Credential command handlers

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use crate::config::Config;
use crate::output::ConsoleNotifier;

/// Arguments of `hive login`
#[derive(Args)]
pub struct AuthArgs {
    /// StackSpot client id
    #[arg(long, env = "HIVE_CLIENT_ID")]
    client_id: String,

    /// StackSpot client secret
    #[arg(long, env = "HIVE_CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,

    /// Realm of the identity provider (defaults to stackspot-freemium)
    #[arg(long)]
    realm: Option<String>,
}

/// Save credentials, then check them against the identity provider
pub async fn login(args: AuthArgs, config: &Config) -> Result<()> {
    let orchestrator = config.orchestrator(Arc::new(ConsoleNotifier))?;

    orchestrator
        .save_credentials(&args.client_id, &args.client_secret, args.realm.as_deref())
        .context("Failed to save credentials")?;

    orchestrator.test_connection().await?;
    Ok(())
}

/// Fetch a token with the stored credentials
pub async fn test_connection(config: &Config) -> Result<()> {
    let orchestrator = config.orchestrator(Arc::new(ConsoleNotifier))?;
    orchestrator.test_connection().await?;
    Ok(())
}
