use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;

use super::QueryKey;

/// Invalidation registry shared by the synchronization layer and its queries.
///
/// Each key owns a generation counter. `invalidate` bumps it; every
/// `Invalidations` handle subscribed to that key observes the bump once.
#[derive(Clone, Default)]
pub struct QueryCache {
  keys: Arc<Mutex<HashMap<QueryKey, watch::Sender<u64>>>>,
}

impl QueryCache {
  pub fn new() -> Self {
    Self::default()
  }

  fn lock(&self) -> MutexGuard<'_, HashMap<QueryKey, watch::Sender<u64>>> {
    // The map is never left half-updated, so a poisoned lock is still usable
    self.keys.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Watch a key for invalidations made after this call.
  pub fn subscribe(&self, key: &QueryKey) -> Invalidations {
    let rx = self
      .lock()
      .entry(key.clone())
      .or_insert_with(|| watch::channel(0).0)
      .subscribe();
    Invalidations { rx }
  }

  /// Mark a key stale; subscribed queries refetch on their next poll.
  pub fn invalidate(&self, key: &QueryKey) {
    let mut keys = self.lock();
    let sender = keys
      .entry(key.clone())
      .or_insert_with(|| watch::channel(0).0);
    sender.send_modify(|generation| *generation += 1);
    tracing::debug!(%key, generation = *sender.borrow(), "invalidated query");
  }

  /// Number of invalidations seen for a key so far.
  #[cfg(test)]
  pub fn generation(&self, key: &QueryKey) -> u64 {
    self.lock().get(key).map(|tx| *tx.borrow()).unwrap_or(0)
  }
}

/// Subscription to one key's invalidations.
#[derive(Debug)]
pub struct Invalidations {
  rx: watch::Receiver<u64>,
}

impl Invalidations {
  /// Returns true once per batch of invalidations since the last call.
  pub fn take(&mut self) -> bool {
    match self.rx.has_changed() {
      Ok(true) => {
        self.rx.borrow_and_update();
        true
      }
      _ => false,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_invalidate_notifies_subscriber_once() {
    let cache = QueryCache::new();
    let mut subscription = cache.subscribe(&QueryKey::AllApplications);

    assert!(!subscription.take());
    cache.invalidate(&QueryKey::AllApplications);
    assert!(subscription.take());
    assert!(!subscription.take());
  }

  #[test]
  fn test_invalidations_are_per_key() {
    let cache = QueryCache::new();
    let mut all = cache.subscribe(&QueryKey::AllApplications);
    let mut one = cache.subscribe(&QueryKey::application("1"));
    let mut two = cache.subscribe(&QueryKey::application("2"));

    cache.invalidate(&QueryKey::application("1"));

    assert!(!all.take());
    assert!(one.take());
    assert!(!two.take());
  }

  #[test]
  fn test_generation_counts_invalidations() {
    let cache = QueryCache::new();
    assert_eq!(cache.generation(&QueryKey::AllApplications), 0);

    cache.invalidate(&QueryKey::AllApplications);
    cache.invalidate(&QueryKey::AllApplications);
    assert_eq!(cache.generation(&QueryKey::AllApplications), 2);
  }

  #[test]
  fn test_invalidate_before_subscribe_is_not_replayed() {
    let cache = QueryCache::new();
    cache.invalidate(&QueryKey::AllApplications);

    let mut subscription = cache.subscribe(&QueryKey::AllApplications);
    assert!(!subscription.take());
  }

  #[test]
  fn test_clones_share_state() {
    let cache = QueryCache::new();
    let mut subscription = cache.subscribe(&QueryKey::AllApplications);

    cache.clone().invalidate(&QueryKey::AllApplications);
    assert!(subscription.take());
  }
}
