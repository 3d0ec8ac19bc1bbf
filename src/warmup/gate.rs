use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::{Backoff, JitterSource};

/// What the warm-up screen shows while waiting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GateStatus {
  /// A probe request is in flight
  pub fetching: bool,
  /// Failed probes so far
  pub failure_count: u32,
  /// Message from the most recent failure; cleared on success
  pub last_error: Option<String>,
  /// Terminal: once set, no further probes are made
  pub healthy: bool,
}

/// Background task that probes the backend until it answers once.
///
/// There is no failure-terminal state: the probe is retried until it
/// succeeds or the gate is dropped. Dropping the gate aborts the task.
pub struct HealthGate {
  status: watch::Receiver<GateStatus>,
  task: JoinHandle<()>,
}

impl HealthGate {
  pub fn spawn<P, Fut, E>(probe: P, backoff: Backoff, jitter: Arc<dyn JitterSource>) -> Self
  where
    P: FnMut() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
    E: Display + 'static,
  {
    let (tx, status) = watch::channel(GateStatus::default());
    let task = tokio::spawn(run(probe, backoff, jitter, tx));
    Self { status, task }
  }

  pub fn status(&self) -> GateStatus {
    self.status.borrow().clone()
  }

  pub fn is_healthy(&self) -> bool {
    self.status.borrow().healthy
  }

  #[cfg(test)]
  pub async fn wait_healthy(&mut self) {
    while !self.status.borrow().healthy {
      if self.status.changed().await.is_err() {
        break;
      }
    }
  }
}

impl Drop for HealthGate {
  fn drop(&mut self) {
    self.task.abort();
  }
}

async fn run<P, Fut, E>(
  mut probe: P,
  backoff: Backoff,
  jitter: Arc<dyn JitterSource>,
  tx: watch::Sender<GateStatus>,
) where
  P: FnMut() -> Fut,
  Fut: Future<Output = Result<(), E>>,
  E: Display,
{
  let mut attempt: u32 = 0;
  loop {
    tx.send_modify(|s| s.fetching = true);

    // Keep only the message across the retry sleep
    let outcome = probe().await.map_err(|e| e.to_string());

    match outcome {
      Ok(()) => {
        tx.send_modify(|s| {
          s.fetching = false;
          s.healthy = true;
          s.last_error = None;
        });
        tracing::info!(failures = attempt, "backend is healthy");
        return;
      }
      Err(message) => {
        let delay = backoff.delay(attempt, jitter.as_ref());
        tracing::debug!(attempt, ?delay, error = %message, "health check failed, retrying");

        tx.send_modify(|s| {
          s.fetching = false;
          s.failure_count = s.failure_count.saturating_add(1);
          s.last_error = Some(message);
        });

        tokio::time::sleep(delay).await;
        attempt = attempt.saturating_add(1);
      }
    }
  }
}
