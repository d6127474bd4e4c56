use serde::{Deserialize, Serialize};

use crate::error::SchedulerError;

/// Quality awarded to a "got it" answer when only a binary signal exists
pub const CORRECT_QUALITY: u8 = 5;

/// Quality awarded to a "missed" answer when only a binary signal exists
pub const INCORRECT_QUALITY: u8 = 2;

/// Lowest quality that counts as a successful recall
pub const PASSING_QUALITY: u8 = 3;

/// Recall strength for a single review, 0 (blackout) to 5 (perfect).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Quality(u8);

impl Quality {
  pub const MIN: Quality = Quality(0);
  pub const MAX: Quality = Quality(5);

  /// Build a quality from an integer, clamping anything above 5.
  pub fn new(value: u8) -> Self {
    Self(value.min(Self::MAX.0))
  }

  /// Build a quality from a raw numeric score.
  ///
  /// NaN and infinities are rejected. Finite values are clamped to [0, 5]
  /// and rounded to the nearest grade.
  pub fn from_score(score: f64) -> Result<Self, SchedulerError> {
    if !score.is_finite() {
      return Err(SchedulerError::InvalidQuality(score));
    }
    let clamped = score.clamp(f64::from(Self::MIN.0), f64::from(Self::MAX.0));
    Ok(Self(clamped.round() as u8))
  }

  pub fn value(&self) -> u8 {
    self.0
  }

  pub fn is_success(&self) -> bool {
    self.0 >= PASSING_QUALITY
  }
}

impl From<u8> for Quality {
  fn from(value: u8) -> Self {
    Self::new(value)
  }
}

impl From<Quality> for u8 {
  fn from(quality: Quality) -> Self {
    quality.0
  }
}

/// Map a binary "got it / missed" outcome onto the 0-5 scale.
pub fn boolean_to_quality(correct: bool) -> Quality {
  if correct {
    Quality(CORRECT_QUALITY)
  } else {
    Quality(INCORRECT_QUALITY)
  }
}
