//! Service layer
//!
//! Capabilities the runner needs from its host: a key/value store for
//! credentials and slugs, a channel for user-facing notifications and a way to
//! wait between polls.
//!
//! All services are trait-based to enable testing and dependency injection.

mod config_store;
mod notifier;
mod sleeper;

// Re-export traits
pub use config_store::ConfigStore;
pub use notifier::Notifier;
pub use sleeper::Sleeper;

// Re-export implementations
pub use config_store::{InMemoryConfigStore, JsonFileConfigStore};
pub use notifier::{ChannelNotifier, TracingNotifier};
pub use sleeper::TokioSleeper;
