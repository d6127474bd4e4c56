//! Applies review outcomes to stored card state.

use review_scheduler::{compute_next_review, preview_intervals, Clock, Quality, ReviewState};

use crate::domain::{ReviewLog, ReviewOutcome};
use crate::error::Result;
use crate::repository::ReviewStateRepository;

/// Result of recording one review
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedReview {
  pub quality: Quality,
  pub state: ReviewState,
}

pub struct ReviewService<R, C> {
  repository: R,
  clock: C,
}

impl<R: ReviewStateRepository, C: Clock> ReviewService<R, C> {
  pub fn new(repository: R, clock: C) -> Self {
    Self { repository, clock }
  }

  /// Score one review of `card_id` and persist the new state.
  ///
  /// Cards without stored state are scheduled from the new-card defaults.
  /// An invalid quality is returned before anything is read or written.
  /// The new state and its review log entry are stored together.
  pub fn record_review(&self, card_id: i64, outcome: ReviewOutcome) -> Result<RecordedReview> {
    let quality = outcome.to_quality()?;
    let now = self.clock.now();
    let previous = self.repository.get(card_id)?.unwrap_or_default();
    let state = compute_next_review(quality, &previous, now);

    let log = ReviewLog::new(card_id, quality, now, state.interval_days, state.easiness_factor);
    self.repository.record(card_id, &state, &log)?;

    tracing::debug!(
      "Card {} reviewed with quality {}: reps {} -> {}, interval {}d, EF {:.2}",
      card_id,
      quality.value(),
      previous.repetitions,
      state.repetitions,
      state.interval_days,
      state.easiness_factor
    );

    Ok(RecordedReview { quality, state })
  }

  /// Interval each quality would produce for the card's current state
  pub fn preview(&self, card_id: i64) -> Result<[f64; 6]> {
    let current = self.repository.get(card_id)?.unwrap_or_default();
    Ok(preview_intervals(&current))
  }
}
