//! Write-side counterpart to `Query`.
//!
//! A `Mutation<T>` runs one future at a time and exposes its pending state so
//! the UI can disable the controls that would submit again. Once sent, a
//! mutation runs to completion even if the `Mutation` is dropped.

use std::future::Future;
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationState<T> {
  Idle,
  Pending,
  Success(T),
  Error(String),
}

pub struct Mutation<T> {
  state: MutationState<T>,
  receiver: Option<oneshot::Receiver<Result<T, String>>>,
}

impl<T> Default for Mutation<T> {
  fn default() -> Self {
    Self {
      state: MutationState::Idle,
      receiver: None,
    }
  }
}

impl<T: Send + 'static> Mutation<T> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn is_pending(&self) -> bool {
    matches!(self.state, MutationState::Pending)
  }

  pub fn error(&self) -> Option<&str> {
    match &self.state {
      MutationState::Error(e) => Some(e),
      _ => None,
    }
  }

  /// Send the mutation. Returns false (and drops `future` unstarted) if
  /// another one is still pending.
  pub fn mutate<Fut>(&mut self, future: Fut) -> bool
  where
    Fut: Future<Output = Result<T, String>> + Send + 'static,
  {
    if self.is_pending() {
      tracing::debug!("mutation already pending, ignoring submit");
      return false;
    }

    let (tx, rx) = oneshot::channel();
    self.receiver = Some(rx);
    self.state = MutationState::Pending;

    // Detached: mutations are not cancellable once sent
    tokio::spawn(async move {
      let _ = tx.send(future.await);
    });
    true
  }

  /// Poll for completion. Returns the settled state exactly once, on the
  /// tick it arrives.
  pub fn poll(&mut self) -> Option<&MutationState<T>> {
    let receiver = self.receiver.as_mut()?;

    let settled = match receiver.try_recv() {
      Ok(Ok(value)) => MutationState::Success(value),
      Ok(Err(error)) => {
        tracing::warn!(%error, "mutation failed");
        MutationState::Error(error)
      }
      Err(oneshot::error::TryRecvError::Empty) => return None,
      Err(oneshot::error::TryRecvError::Closed) => {
        MutationState::Error("Mutation was cancelled".to_string())
      }
    };

    self.receiver = None;
    self.state = settled;
    Some(&self.state)
  }

  /// Clear a settled result (e.g. when an error notice is dismissed).
  pub fn reset(&mut self) {
    if !self.is_pending() {
      self.state = MutationState::Idle;
    }
  }

  #[cfg(test)]
  pub async fn settle(&mut self) -> &MutationState<T> {
    while self.is_pending() {
      if self.poll().is_none() {
        tokio::time::sleep(std::time::Duration::from_millis(1)).await;
      }
    }
    &self.state
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::atomic::{AtomicU32, Ordering};
  use std::sync::Arc;
  use std::time::Duration;

  #[tokio::test]
  async fn test_mutation_success() {
    let mut mutation = Mutation::new();
    assert!(mutation.mutate(async { Ok::<_, String>(7) }));
    assert!(mutation.is_pending());

    assert_eq!(mutation.settle().await, &MutationState::Success(7));
    assert!(!mutation.is_pending());
    // Result is only reported once
    assert!(mutation.poll().is_none());
  }

  #[tokio::test]
  async fn test_mutation_error_and_reset() {
    let mut mutation: Mutation<()> = Mutation::new();
    mutation.mutate(async { Err("Request failed (500)".to_string()) });

    mutation.settle().await;
    assert_eq!(mutation.error(), Some("Request failed (500)"));

    mutation.reset();
    assert_eq!(mutation.error(), None);
    assert!(mutation.poll().is_none());
  }

  #[tokio::test]
  async fn test_second_submit_while_pending_is_rejected() {
    let calls = Arc::new(AtomicU32::new(0));
    let mut mutation = Mutation::new();

    let first = calls.clone();
    assert!(mutation.mutate(async move {
      first.fetch_add(1, Ordering::SeqCst);
      tokio::time::sleep(Duration::from_millis(20)).await;
      Ok::<_, String>(())
    }));

    let second = calls.clone();
    assert!(!mutation.mutate(async move {
      second.fetch_add(1, Ordering::SeqCst);
      Ok::<_, String>(())
    }));

    mutation.settle().await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
  }

  #[tokio::test]
  async fn test_dropped_mutation_still_completes() {
    let done = Arc::new(AtomicU32::new(0));
    let done_clone = done.clone();
    let mut mutation = Mutation::new();
    mutation.mutate(async move {
      tokio::time::sleep(Duration::from_millis(10)).await;
      done_clone.fetch_add(1, Ordering::SeqCst);
      Ok::<_, String>(())
    });
    drop(mutation);

    tokio::time::sleep(Duration::from_millis(40)).await;
    assert_eq!(done.load(Ordering::SeqCst), 1);
  }
}
