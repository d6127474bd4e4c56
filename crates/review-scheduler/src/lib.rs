//! SM-2 spaced repetition scheduling.
//!
//! Everything in this crate is a pure function of its arguments: the
//! previous [`ReviewState`] of a card, the [`Quality`] of the current review,
//! and the moment the review happened. Callers that need "now" hold a
//! [`Clock`] and pass its reading in explicitly.
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use review_scheduler::{boolean_to_quality, compute_next_review, ReviewState};
//!
//! let now = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
//! let state = compute_next_review(boolean_to_quality(true), &ReviewState::new(), now);
//! assert_eq!(state.repetitions, 1);
//! assert_eq!(state.interval_days, 1.0);
//! ```

pub mod clock;
pub mod due;
pub mod error;
pub mod quality;
pub mod sm2;
pub mod state;

pub use clock::{Clock, FixedClock, SystemClock};
pub use due::{into_due_cards, is_due, select_due_cards, HasReviewState};
pub use error::SchedulerError;
pub use quality::{boolean_to_quality, Quality};
pub use sm2::{
  compute_next_review, compute_next_review_from_score, format_interval, preview_intervals,
  MAX_INTERVAL_DAYS,
};
pub use state::{CardPhase, ReviewState, DEFAULT_EASINESS_FACTOR, MIN_EASINESS_FACTOR};
