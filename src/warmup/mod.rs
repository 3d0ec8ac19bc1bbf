//! Backend warm-up gate.
//!
//! The backend may be cold-starting when the app opens, so the UI waits on a
//! health probe retried with capped exponential backoff plus jitter.

mod backoff;
mod gate;

pub use backoff::{Backoff, JitterSource, RandomJitter};
pub use gate::{GateStatus, HealthGate};

#[cfg(test)]
pub use backoff::FixedJitter;
