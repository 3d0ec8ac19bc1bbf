//! Query cache bookkeeping.
//!
//! Cached data lives inside each `Query`; this module only tracks which keys
//! have been invalidated so that subscribed queries know to refetch. Nothing
//! outside the synchronization layer calls `invalidate`.

mod keys;
mod store;

pub use keys::QueryKey;
pub use store::{Invalidations, QueryCache};
