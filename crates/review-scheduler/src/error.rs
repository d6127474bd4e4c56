use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SchedulerError {
  /// Quality score was NaN or infinite. Finite out-of-range scores are
  /// clamped instead.
  #[error("Invalid review quality: {0}")]
  InvalidQuality(f64),
}
