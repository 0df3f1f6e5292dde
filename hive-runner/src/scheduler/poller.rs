//! Execution poller
//!
//! Polls the callback endpoint of one execution until it completes, fails or
//! runs out of attempts.
//!
//! ```text
//! SUBMITTED -> POLLING -> COMPLETED
//!                 |  \--> FAILED      (FAILED / ERROR status)
//!                 \-----> TIMED_OUT   (attempts exhausted)
//! ```
//!
//! Transport or parse errors from a single poll are logged and retried on the
//! next attempt, except on the last attempt where they end the run.

use std::sync::Arc;
use std::time::{Duration, Instant};

use hive_client::QuickCommandApi;
use hive_core::domain::execution::ExecutionResult;
use hive_core::domain::notification::{Notification, NotificationKind};
use hive_core::domain::token::AccessToken;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_POLL_INTERVAL;
use crate::error::RunError;
use crate::service::{Notifier, Sleeper};

/// Polls a single execution to completion
pub struct ExecutionPoller {
    api: Arc<dyn QuickCommandApi>,
    sleeper: Arc<dyn Sleeper>,
    notifier: Arc<dyn Notifier>,
    interval: Duration,
}

impl ExecutionPoller {
    /// Creates a poller with the default 5 second interval
    pub fn new(
        api: Arc<dyn QuickCommandApi>,
        sleeper: Arc<dyn Sleeper>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            api,
            sleeper,
            notifier,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Overrides the delay between two polls
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Polls `execution_id` (created for `slug`) up to `max_attempts` times
    ///
    /// Returns the first `COMPLETED` result. A `FAILED` or `ERROR` status ends
    /// the loop immediately with [`RunError::ExecutionFailed`]; any other
    /// status sleeps for the interval and polls again. Exhausting the attempts
    /// yields [`RunError::Timeout`].
    pub async fn wait_for_completion(
        &self,
        slug: &str,
        execution_id: &str,
        token: &AccessToken,
        max_attempts: u32,
    ) -> Result<ExecutionResult, RunError> {
        let started = Instant::now();
        info!(
            "Polling {} execution {} (max {} attempts, interval {:?})",
            slug, execution_id, max_attempts, self.interval
        );

        for attempt in 1..=max_attempts {
            match self.api.poll_once(execution_id, token).await {
                Ok(result) if result.status.is_failure() => {
                    warn!(
                        "Execution {} finished with status {} on attempt {}",
                        execution_id, result.status, attempt
                    );
                    return Err(RunError::ExecutionFailed {
                        slug: slug.to_string(),
                        execution_id: execution_id.to_string(),
                        status: result.status,
                        payload: result.payload,
                    });
                }
                Ok(result) if result.status.is_terminal() => {
                    info!(
                        "Execution {} completed after {} attempt(s) in {:?}",
                        execution_id,
                        attempt,
                        started.elapsed()
                    );
                    return Ok(result);
                }
                Ok(result) => {
                    debug!(
                        "Execution {} is {} (attempt {}/{}, progress {:?})",
                        execution_id, result.status, attempt, max_attempts, result.progress_percent
                    );
                    if let Some(progress) = result.progress_percent {
                        self.notifier.notify(Notification::new(
                            NotificationKind::Generating,
                            json!({
                                "executionId": execution_id,
                                "status": result.status,
                                "progress": progress,
                            }),
                        ));
                    }
                }
                Err(source) if attempt == max_attempts => {
                    return Err(RunError::Poll {
                        slug: slug.to_string(),
                        execution_id: execution_id.to_string(),
                        attempt,
                        source,
                    });
                }
                Err(e) => {
                    warn!(
                        "Poll attempt {}/{} for execution {} failed, retrying: {}",
                        attempt, max_attempts, execution_id, e
                    );
                }
            }

            if attempt < max_attempts {
                self.sleeper.sleep(self.interval).await;
            }
        }

        Err(RunError::Timeout {
            slug: slug.to_string(),
            execution_id: execution_id.to_string(),
            attempts: max_attempts,
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{RecordingSleeper, ScriptedApi, completed, status, test_token, transient};
    use hive_core::domain::execution::ExecutionStatus;

    struct Harness {
        api: Arc<ScriptedApi>,
        sleeper: Arc<RecordingSleeper>,
        poller: ExecutionPoller,
        events: tokio::sync::mpsc::UnboundedReceiver<Notification>,
    }

    fn harness(api: ScriptedApi) -> Harness {
        let api = Arc::new(api);
        let sleeper = Arc::new(RecordingSleeper::default());
        let (tx, events) = tokio::sync::mpsc::unbounded_channel();
        let poller = ExecutionPoller::new(
            Arc::clone(&api) as Arc<dyn QuickCommandApi>,
            Arc::clone(&sleeper) as Arc<dyn Sleeper>,
            Arc::new(crate::service::ChannelNotifier::new(tx)),
        );
        Harness {
            api,
            sleeper,
            poller,
            events,
        }
    }

    #[tokio::test]
    async fn test_completes_after_running() {
        let h = harness(ScriptedApi::with_polls(vec![
            status(ExecutionStatus::Running),
            status(ExecutionStatus::Running),
            completed("done"),
        ]));

        let result = h
            .poller
            .wait_for_completion("gen-tests", "exec-1", &test_token(), 5)
            .await
            .unwrap();

        assert_eq!(result.status, ExecutionStatus::Completed);
        assert_eq!(result.payload, Some(serde_json::json!("done")));
        assert_eq!(h.api.poll_calls(), 3);
        assert_eq!(h.sleeper.sleeps(), vec![Duration::from_secs(5); 2]);
    }

    #[tokio::test]
    async fn test_times_out_when_never_terminal() {
        let h = harness(ScriptedApi::with_polls(vec![
            status(ExecutionStatus::Running),
            status(ExecutionStatus::Running),
            status(ExecutionStatus::Running),
        ]));

        let err = h
            .poller
            .wait_for_completion("gen-tests", "exec-1", &test_token(), 3)
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::Timeout { attempts: 3, .. }));
        assert_eq!(h.api.poll_calls(), 3);
        assert_eq!(h.sleeper.sleeps().len(), 2);
    }

    #[tokio::test]
    async fn test_failed_status_stops_immediately() {
        let h = harness(ScriptedApi::with_polls(vec![
            status(ExecutionStatus::Running),
            Ok(ExecutionResult::new(ExecutionStatus::Failed)
                .with_payload(serde_json::json!({"reason": "bad input"}))),
            status(ExecutionStatus::Completed),
        ]));

        let err = h
            .poller
            .wait_for_completion("gen-tests", "exec-1", &test_token(), 5)
            .await
            .unwrap_err();

        match err {
            RunError::ExecutionFailed {
                slug,
                execution_id,
                status,
                payload,
            } => {
                assert_eq!(slug, "gen-tests");
                assert_eq!(execution_id, "exec-1");
                assert_eq!(status, ExecutionStatus::Failed);
                assert_eq!(payload, Some(serde_json::json!({"reason": "bad input"})));
            }
            other => panic!("expected ExecutionFailed, got {:?}", other),
        }
        assert_eq!(h.api.poll_calls(), 2);
        assert_eq!(h.sleeper.sleeps().len(), 1);
    }

    #[tokio::test]
    async fn test_error_status_is_failure() {
        let h = harness(ScriptedApi::with_polls(vec![status(ExecutionStatus::Error)]));

        let err = h
            .poller
            .wait_for_completion("gen-tests", "exec-1", &test_token(), 5)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            RunError::ExecutionFailed {
                status: ExecutionStatus::Error,
                ..
            }
        ));
        assert_eq!(h.api.poll_calls(), 1);
    }

    #[tokio::test]
    async fn test_transient_error_is_swallowed() {
        let h = harness(ScriptedApi::with_polls(vec![transient(), completed("ok")]));

        let result = h
            .poller
            .wait_for_completion("gen-tests", "exec-1", &test_token(), 3)
            .await
            .unwrap();

        assert_eq!(result.status, ExecutionStatus::Completed);
        assert_eq!(h.api.poll_calls(), 2);
    }

    #[tokio::test]
    async fn test_error_on_last_attempt_propagates() {
        let h = harness(ScriptedApi::with_polls(vec![
            status(ExecutionStatus::Running),
            status(ExecutionStatus::Running),
            transient(),
        ]));

        let err = h
            .poller
            .wait_for_completion("gen-tests", "exec-1", &test_token(), 3)
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::Poll { attempt: 3, .. }));
        assert_eq!(h.api.poll_calls(), 3);
    }

    #[tokio::test]
    async fn test_unknown_status_keeps_polling() {
        let h = harness(ScriptedApi::with_polls(vec![
            status(ExecutionStatus::Unknown),
            status(ExecutionStatus::Pending),
            completed("ok"),
        ]));

        let result = h
            .poller
            .wait_for_completion("gen-tests", "exec-1", &test_token(), 3)
            .await
            .unwrap();

        assert_eq!(result.status, ExecutionStatus::Completed);
    }

    #[tokio::test]
    async fn test_zero_attempts_times_out_without_polling() {
        let h = harness(ScriptedApi::with_polls(vec![]));

        let err = h
            .poller
            .wait_for_completion("gen-tests", "exec-1", &test_token(), 0)
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::Timeout { attempts: 0, .. }));
        assert_eq!(h.api.poll_calls(), 0);
    }

    #[tokio::test]
    async fn test_progress_is_notified() {
        let mut h = harness(ScriptedApi::with_polls(vec![
            Ok(ExecutionResult::new(ExecutionStatus::Running).with_progress(0.5)),
            completed("ok"),
        ]));

        h.poller
            .wait_for_completion("gen-tests", "exec-1", &test_token(), 3)
            .await
            .unwrap();

        let event = h.events.try_recv().unwrap();
        assert_eq!(event.kind, NotificationKind::Generating);
        assert_eq!(event.data["progress"], 0.5);
        assert_eq!(event.data["executionId"], "exec-1");
        assert!(h.events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_custom_interval() {
        let h = harness(ScriptedApi::with_polls(vec![
            status(ExecutionStatus::Running),
            completed("ok"),
        ]));
        let poller = h.poller.with_interval(Duration::from_secs(1));

        poller
            .wait_for_completion("gen-tests", "exec-1", &test_token(), 3)
            .await
            .unwrap();

        assert_eq!(h.sleeper.sleeps(), vec![Duration::from_secs(1)]);
    }
}
