//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod auth;
mod config;
mod run;

pub use auth::AuthArgs;
pub use config::ConfigCommands;
pub use run::RunArgs;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Read or write config store entries
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Save credentials and test them
    Login(AuthArgs),
    /// Fetch a token with the stored credentials
    TestConnection,
    /// Run a quick command by slug
    Run {
        /// Quick-command slug
        slug: String,

        #[command(flatten)]
        args: RunArgs,
    },
    /// Run the quick command configured for a feature (`slug.<feature>`)
    Feature {
        /// Feature name
        name: String,

        #[command(flatten)]
        args: RunArgs,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Config { command } => config::handle_config_command(command, config),
        Commands::Login(args) => auth::login(args, config).await,
        Commands::TestConnection => auth::test_connection(config).await,
        Commands::Run { slug, args } => run::run_slug(&slug, args, config).await,
        Commands::Feature { name, args } => run::run_feature(&name, args, config).await,
    }
}
