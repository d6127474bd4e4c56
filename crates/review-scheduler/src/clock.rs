//! Injectable time source.

use chrono::{DateTime, Duration, Utc};
use std::sync::{Arc, RwLock};

pub trait Clock: Send + Sync {
  fn now(&self) -> DateTime<Utc>;
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
  fn now(&self) -> DateTime<Utc> {
    (**self).now()
  }
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct FixedClock {
  at: RwLock<DateTime<Utc>>,
}

impl FixedClock {
  pub fn new(at: DateTime<Utc>) -> Self {
    Self { at: RwLock::new(at) }
  }

  pub fn set(&self, at: DateTime<Utc>) {
    match self.at.write() {
      Ok(mut guard) => *guard = at,
      Err(poisoned) => *poisoned.into_inner() = at,
    }
  }

  pub fn advance(&self, by: Duration) {
    let next = self.now() + by;
    self.set(next);
  }
}

impl Clock for FixedClock {
  fn now(&self) -> DateTime<Utc> {
    match self.at.read() {
      Ok(guard) => *guard,
      Err(poisoned) => *poisoned.into_inner(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_fixed_clock_stays_put() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let clock = FixedClock::new(at);
    assert_eq!(clock.now(), at);
    assert_eq!(clock.now(), at);
  }

  #[test]
  fn test_fixed_clock_advance_and_set() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let clock = FixedClock::new(at);
    clock.advance(Duration::days(3));
    assert_eq!(clock.now(), at + Duration::days(3));
    clock.set(at);
    assert_eq!(clock.now(), at);
  }

  #[test]
  fn test_shared_clock() {
    let at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::new(at));
    assert_eq!(clock.now(), at);
  }

  #[test]
  fn test_system_clock_moves_forward() {
    let clock = SystemClock;
    let a = clock.now();
    let b = clock.now();
    assert!(b >= a);
  }
}
