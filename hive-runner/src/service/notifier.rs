//! Notifier service
//!
//! Outbound channel for progress, results and errors.

use hive_core::domain::notification::{Notification, NotificationKind};
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, error, info};

/// Receives user-facing events emitted during a run
pub trait Notifier: Send + Sync {
    fn notify(&self, event: Notification);
}

/// Notifier that writes every event to the tracing log
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, event: Notification) {
        match event.kind {
            NotificationKind::Error => error!(data = %event.data, "notification: error"),
            NotificationKind::Generating => debug!(data = %event.data, "notification: generating"),
            kind => info!(data = %event.data, "notification: {:?}", kind),
        }
    }
}

/// Notifier that forwards events over an unbounded channel
///
/// Events sent after the receiver is dropped are discarded.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: UnboundedSender<Notification>,
}

impl ChannelNotifier {
    pub fn new(sender: UnboundedSender<Notification>) -> Self {
        Self { sender }
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, event: Notification) {
        if self.sender.send(event).is_err() {
            debug!("Notification receiver dropped");
        }
    }
}
