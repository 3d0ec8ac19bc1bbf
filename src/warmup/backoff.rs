use rand::Rng;
use std::time::Duration;

/// Source of the random part of a retry delay.
pub trait JitterSource: Send + Sync {
  /// A duration in `[0, max)`; zero when `max` is zero.
  fn jitter(&self, max: Duration) -> Duration;
}

/// Uniform jitter from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomJitter;

impl JitterSource for RandomJitter {
  fn jitter(&self, max: Duration) -> Duration {
    let max_ms = max.as_millis() as u64;
    if max_ms == 0 {
      return Duration::ZERO;
    }
    Duration::from_millis(rand::thread_rng().gen_range(0..max_ms))
  }
}

/// Always returns the same jitter, clamped below `max`.
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedJitter(pub Duration);

#[cfg(test)]
impl JitterSource for FixedJitter {
  fn jitter(&self, max: Duration) -> Duration {
    self.0.min(max.saturating_sub(Duration::from_millis(1)))
  }
}

/// `delay(n) = min(cap, base * rate^n) + jitter`, `n` counting failed attempts from 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backoff {
  pub base: Duration,
  pub rate: f64,
  pub cap: Duration,
  pub max_jitter: Duration,
}

impl Default for Backoff {
  fn default() -> Self {
    Self {
      base: Duration::from_millis(500),
      rate: 1.35,
      cap: Duration::from_millis(4000),
      max_jitter: Duration::from_millis(250),
    }
  }
}

impl Backoff {
  /// Delay before the retry following failed attempt `attempt`, without jitter.
  pub fn base_delay(&self, attempt: u32) -> Duration {
    let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
    let scaled = self.base.as_secs_f64() * self.rate.powi(exponent);
    let capped = scaled.min(self.cap.as_secs_f64());
    if capped.is_finite() && capped >= 0.0 {
      Duration::from_secs_f64(capped)
    } else {
      self.cap
    }
  }

  pub fn delay(&self, attempt: u32, jitter: &dyn JitterSource) -> Duration {
    self.base_delay(attempt) + jitter.jitter(self.max_jitter)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ms(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
  }

  #[test]
  fn test_base_delay_grows_then_caps() {
    let backoff = Backoff::default();
    assert!((ms(backoff.base_delay(0)) - 500.0).abs() < 0.01);
    assert!((ms(backoff.base_delay(1)) - 675.0).abs() < 0.01);
    assert!((ms(backoff.base_delay(2)) - 911.25).abs() < 0.01);
    // 500 * 1.35^5 = 2242.0167
    assert!((ms(backoff.base_delay(5)) - 2242.02).abs() < 0.1);
    assert_eq!(backoff.base_delay(10), Duration::from_millis(4000));
    assert_eq!(backoff.base_delay(u32::MAX), Duration::from_millis(4000));
  }

  #[test]
  fn test_base_delay_is_monotonic() {
    let backoff = Backoff::default();
    for n in 0..40 {
      assert!(backoff.base_delay(n) <= backoff.base_delay(n + 1));
    }
  }

  #[test]
  fn test_delay_within_jitter_bounds() {
    let backoff = Backoff::default();
    for n in 0..20 {
      let floor = backoff.base_delay(n);
      for _ in 0..50 {
        let d = backoff.delay(n, &RandomJitter);
        assert!(d >= floor);
        assert!(d < floor + Duration::from_millis(250));
      }
    }
  }

  #[test]
  fn test_fixed_jitter_is_added() {
    let backoff = Backoff::default();
    let d = backoff.delay(0, &FixedJitter(Duration::from_millis(100)));
    assert_eq!(d, Duration::from_millis(600));
  }

  #[test]
  fn test_zero_jitter_range() {
    assert_eq!(RandomJitter.jitter(Duration::ZERO), Duration::ZERO);
  }
}
