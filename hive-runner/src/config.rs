//! Runner configuration
//!
//! Defines the endpoints the runner talks to and the polling cadence.

use std::time::Duration;

use hive_client::{DEFAULT_API_URL, DEFAULT_AUTH_URL};

/// Interval between two callback polls
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// How long a run waits for a terminal status by default
pub const DEFAULT_MAX_WAIT_MINUTES: u32 = 5;

/// Runner configuration
///
/// Credentials are not part of this; they live in the
/// [`ConfigStore`](crate::service::ConfigStore).
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Identity provider base URL (e.g., "https://idm.stackspot.com")
    pub auth_base_url: String,

    /// Quick-command API base URL
    pub api_base_url: String,

    /// How often to poll the callback endpoint
    pub poll_interval: Duration,

    /// Default wait budget of a run, in minutes
    pub max_wait_minutes: u32,
}

impl RunnerConfig {
    /// Creates a new configuration with default polling settings
    pub fn new(auth_base_url: String, api_base_url: String) -> Self {
        Self {
            auth_base_url,
            api_base_url,
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_wait_minutes: DEFAULT_MAX_WAIT_MINUTES,
        }
    }

    /// Creates configuration from environment variables
    ///
    /// Every variable is optional:
    /// - HIVE_AUTH_URL (default: https://idm.stackspot.com)
    /// - HIVE_API_URL (default: https://genai-code-buddy-api.stackspot.com)
    /// - HIVE_POLL_INTERVAL (seconds, default: 5)
    /// - HIVE_MAX_WAIT_MINUTES (default: 5)
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`RunnerConfig::from_env`], reading variables through `lookup`
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let auth_base_url = lookup("HIVE_AUTH_URL").unwrap_or_else(|| DEFAULT_AUTH_URL.to_string());

        let api_base_url = lookup("HIVE_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let poll_interval = match lookup("HIVE_POLL_INTERVAL") {
            Some(s) => Duration::from_secs(
                s.trim()
                    .parse::<u64>()
                    .map_err(|_| anyhow::anyhow!("HIVE_POLL_INTERVAL must be a number of seconds"))?,
            ),
            None => DEFAULT_POLL_INTERVAL,
        };

        let max_wait_minutes = match lookup("HIVE_MAX_WAIT_MINUTES") {
            Some(s) => s
                .trim()
                .parse::<u32>()
                .map_err(|_| anyhow::anyhow!("HIVE_MAX_WAIT_MINUTES must be a number of minutes"))?,
            None => DEFAULT_MAX_WAIT_MINUTES,
        };

        let config = Self {
            auth_base_url,
            api_base_url,
            poll_interval,
            max_wait_minutes,
        };
        config.validate()?;
        Ok(config)
    }

    /// Number of polls that fit in `max_wait_minutes` at the configured cadence
    ///
    /// At the default 5 second interval this is `max_wait_minutes * 12`.
    pub fn max_attempts(&self, max_wait_minutes: u32) -> u32 {
        let interval = self.poll_interval.as_secs().max(1);
        let attempts = u64::from(max_wait_minutes) * 60 / interval;
        u32::try_from(attempts).unwrap_or(u32::MAX)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, url) in [
            ("auth_base_url", &self.auth_base_url),
            ("api_base_url", &self.api_base_url),
        ] {
            if url.is_empty() {
                anyhow::bail!("{} cannot be empty", name);
            }

            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", name);
            }
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll_interval must be greater than 0");
        }

        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_URL.to_string(), DEFAULT_API_URL.to_string())
    }
}
