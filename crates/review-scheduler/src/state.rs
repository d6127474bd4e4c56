use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_EASINESS_FACTOR: f64 = 2.5;
pub const MIN_EASINESS_FACTOR: f64 = 1.3;

/// Scheduling phase of a card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardPhase {
  /// Never reviewed: due immediately
  New,
  /// Has a next review date
  Scheduled,
}

/// Per-card spaced repetition state.
///
/// Missing fields deserialize to the defaults of a freshly created card, so
/// `{}` is a valid new-card state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewState {
  pub repetitions: u32,
  pub easiness_factor: f64,
  pub interval_days: f64,
  pub next_review_date: Option<DateTime<Utc>>,
  pub last_reviewed_at: Option<DateTime<Utc>>,
  pub times_correct: u32,
  pub times_incorrect: u32,
}

impl Default for ReviewState {
  fn default() -> Self {
    Self {
      repetitions: 0,
      easiness_factor: DEFAULT_EASINESS_FACTOR,
      interval_days: 0.0,
      next_review_date: None,
      last_reviewed_at: None,
      times_correct: 0,
      times_incorrect: 0,
    }
  }
}

impl ReviewState {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn phase(&self) -> CardPhase {
    if self.repetitions == 0 && self.next_review_date.is_none() {
      CardPhase::New
    } else {
      CardPhase::Scheduled
    }
  }
}
