//! Hive CLI
//!
//! Command-line interface for running StackSpot quick commands.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hive")]
#[command(about = "AI Code Hive - StackSpot quick-command CLI", long_about = None)]
struct Cli {
    /// Path of the JSON config store (credentials, token, feature slugs)
    #[arg(long, env = "HIVE_CONFIG")]
    config: Option<std::path::PathBuf>,

    /// Identity provider URL
    #[arg(long, env = "HIVE_AUTH_URL", default_value = hive_client::DEFAULT_AUTH_URL)]
    auth_url: String,

    /// Quick-command API URL
    #[arg(long, env = "HIVE_API_URL", default_value = hive_client::DEFAULT_API_URL)]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hive_cli=info,hive_runner=info,hive_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        store_path: cli.config.unwrap_or_else(config::default_store_path),
        auth_url: cli.auth_url,
        api_url: cli.api_url,
    };

    handle_command(cli.command, &config).await
}
