use chrono::{DateTime, Utc};
use review_scheduler::{boolean_to_quality, Quality, SchedulerError};
use serde::{Deserialize, Serialize};

/// What the learner reported for one review.
///
/// Graded callers send `{"quality": 0..5}`; binary "got it / missed"
/// callers send `{"correct": true}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewOutcome {
  Graded { quality: f64 },
  Binary { correct: bool },
}

impl ReviewOutcome {
  pub fn to_quality(&self) -> Result<Quality, SchedulerError> {
    match *self {
      Self::Graded { quality } => Quality::from_score(quality),
      Self::Binary { correct } => Ok(boolean_to_quality(correct)),
    }
  }
}

/// One row per review event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewLog {
  pub id: i64,
  pub card_id: i64,
  pub quality: u8,
  pub is_correct: bool,
  pub reviewed_at: DateTime<Utc>,
  /// Interval scheduled by this review
  pub interval_days: f64,
  pub easiness_factor: f64,
}

impl ReviewLog {
  pub fn new(
    card_id: i64,
    quality: Quality,
    reviewed_at: DateTime<Utc>,
    interval_days: f64,
    easiness_factor: f64,
  ) -> Self {
    Self {
      id: 0,
      card_id,
      quality: quality.value(),
      is_correct: quality.is_success(),
      reviewed_at,
      interval_days,
      easiness_factor,
    }
  }
}

/// A finished study session for a deck
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
  pub id: i64,
  pub deck_id: i64,
  pub started_at: DateTime<Utc>,
  pub finished_at: DateTime<Utc>,
  pub cards_studied: u32,
  pub cards_correct: u32,
}

impl StudySession {
  pub fn new(
    deck_id: i64,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    cards_studied: u32,
    cards_correct: u32,
  ) -> Self {
    Self {
      id: 0,
      deck_id,
      started_at,
      finished_at,
      cards_studied,
      cards_correct,
    }
  }

  /// Share of correct answers as a whole percentage
  pub fn accuracy(&self) -> u32 {
    if self.cards_studied > 0 {
      (u64::from(self.cards_correct) * 100 / u64::from(self.cards_studied)) as u32
    } else {
      0
    }
  }

  pub fn duration_secs(&self) -> i64 {
    (self.finished_at - self.started_at).num_seconds().max(0)
  }
}
