//! Config command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use hive_core::domain::credentials::keys;
use hive_runner::service::ConfigStore;

use crate::config::Config;

/// Config subcommands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Set a value (e.g. `slug.tests generate-unit-tests`)
    Set { key: String, value: String },
    /// Print a value
    Get { key: String },
    /// Print where the config store lives
    Path,
}

pub fn handle_config_command(command: ConfigCommands, config: &Config) -> Result<()> {
    match command {
        ConfigCommands::Set { key, value } => {
            let store = config.open_store()?;
            store.set(&key, &value)?;
            println!("{} {}", "Saved".green(), key.cyan());
        }
        ConfigCommands::Get { key } => {
            let store = config.open_store()?;
            match store.get(&key) {
                Some(_) if is_secret(&key) => println!("{}", "********".dimmed()),
                Some(value) => println!("{}", value),
                None => println!("{}", format!("{} is not set", key).yellow()),
            }
        }
        ConfigCommands::Path => println!("{}", config.store_path.display()),
    }

    Ok(())
}

fn is_secret(key: &str) -> bool {
    key == keys::CLIENT_SECRET || key == keys::ACCESS_TOKEN
}
