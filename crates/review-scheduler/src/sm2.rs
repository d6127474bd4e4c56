use chrono::{DateTime, Duration, Utc};

use crate::error::SchedulerError;
use crate::quality::Quality;
use crate::state::{ReviewState, MIN_EASINESS_FACTOR};

/// Upper bound on a scheduled interval (100 years)
pub const MAX_INTERVAL_DAYS: f64 = 36_500.0;

struct Schedule {
  easiness_factor: f64,
  repetitions: u32,
  interval_days: f64,
}

fn next_schedule(quality: Quality, previous: &ReviewState) -> Schedule {
  let q = f64::from(quality.value());

  // EF' = EF + (0.1 - (5 - q) * (0.08 + (5 - q) * 0.02))
  let ease_delta = 0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02);
  let easiness_factor = (previous.easiness_factor + ease_delta).max(MIN_EASINESS_FACTOR);

  let (interval_days, repetitions) = if quality.is_success() {
    let repetitions = previous.repetitions.saturating_add(1);
    let interval = match repetitions {
      1 => 1.0,
      2 => 6.0,
      _ => (previous.interval_days * easiness_factor).round().max(1.0),
    };
    (interval.min(MAX_INTERVAL_DAYS), repetitions)
  } else {
    // Lapse: restart the growth curve
    (1.0, 0)
  };

  Schedule {
    easiness_factor,
    repetitions,
    interval_days,
  }
}

/// Compute the state of a card after one review at `now`.
pub fn compute_next_review(quality: Quality, previous: &ReviewState, now: DateTime<Utc>) -> ReviewState {
  let schedule = next_schedule(quality, previous);
  let next_review_date = now + Duration::days(schedule.interval_days as i64);

  let (times_correct, times_incorrect) = if quality.is_success() {
    (previous.times_correct.saturating_add(1), previous.times_incorrect)
  } else {
    (previous.times_correct, previous.times_incorrect.saturating_add(1))
  };

  ReviewState {
    repetitions: schedule.repetitions,
    easiness_factor: schedule.easiness_factor,
    interval_days: schedule.interval_days,
    next_review_date: Some(next_review_date),
    last_reviewed_at: Some(now),
    times_correct,
    times_incorrect,
  }
}

/// Like [`compute_next_review`], taking an unvalidated numeric score.
pub fn compute_next_review_from_score(
  score: f64,
  previous: &ReviewState,
  now: DateTime<Utc>,
) -> Result<ReviewState, SchedulerError> {
  let quality = Quality::from_score(score)?;
  Ok(compute_next_review(quality, previous, now))
}

/// Interval each quality 0..=5 would schedule, indexed by quality
pub fn preview_intervals(previous: &ReviewState) -> [f64; 6] {
  let mut intervals = [0.0; 6];
  for (q, slot) in intervals.iter_mut().enumerate() {
    *slot = next_schedule(Quality::new(q as u8), previous).interval_days;
  }
  intervals
}

/// Format an interval in days as a short label
pub fn format_interval(days: f64) -> String {
  let days = days.round() as i64;
  if days <= 0 {
    "now".to_string()
  } else if days < 7 {
    format!("{}d", days)
  } else if days < 30 {
    format!("{}w", days / 7)
  } else if days < 365 {
    format!("{}mo", days / 30)
  } else {
    format!("{}y", days / 365)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::quality::boolean_to_quality;
  use chrono::TimeZone;

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
  }

  fn state(ef: f64, interval: f64, reps: u32) -> ReviewState {
    ReviewState {
      repetitions: reps,
      easiness_factor: ef,
      interval_days: interval,
      next_review_date: Some(now()),
      last_reviewed_at: Some(now() - Duration::days(interval as i64)),
      ..ReviewState::default()
    }
  }

  #[test]
  fn test_first_review_good() {
    let result = compute_next_review(Quality::new(4), &ReviewState::new(), now());
    assert_eq!(result.repetitions, 1);
    assert_eq!(result.interval_days, 1.0);
    assert!((result.easiness_factor - 2.5).abs() < 1e-9);
    assert_eq!(result.next_review_date, Some(now() + Duration::days(1)));
    assert_eq!(result.last_reviewed_at, Some(now()));
  }

  #[test]
  fn test_second_review_good() {
    let result = compute_next_review(Quality::new(4), &state(2.5, 1.0, 1), now());
    assert_eq!(result.repetitions, 2);
    assert_eq!(result.interval_days, 6.0);
  }

  #[test]
  fn test_third_review_good() {
    let result = compute_next_review(Quality::new(4), &state(2.5, 6.0, 2), now());
    assert_eq!(result.repetitions, 3);
    // 6 * 2.5 = 15
    assert_eq!(result.interval_days, 15.0);
    assert_eq!(result.next_review_date, Some(now() + Duration::days(15)));
  }

  #[test]
  fn test_third_review_uses_updated_ease() {
    // EF' = 2.6 after a perfect answer, 6 * 2.6 = 15.6 -> 16
    let result = compute_next_review(Quality::new(5), &state(2.5, 6.0, 2), now());
    assert_eq!(result.interval_days, 16.0);
  }

  #[test]
  fn test_failed_review_resets() {
    let result = compute_next_review(Quality::new(0), &state(2.5, 120.0, 7), now());
    assert_eq!(result.repetitions, 0);
    assert_eq!(result.interval_days, 1.0);
    assert!(result.easiness_factor < 2.5);
    assert_eq!(result.next_review_date, Some(now() + Duration::days(1)));
  }

  #[test]
  fn test_failure_resets_for_every_failing_grade() {
    for q in 0..3 {
      for (interval, reps) in [(0.0, 0), (1.0, 1), (6.0, 2), (400.0, 12)] {
        let result = compute_next_review(Quality::new(q), &state(2.1, interval, reps), now());
        assert_eq!(result.repetitions, 0, "quality {} reps {}", q, reps);
        assert_eq!(result.interval_days, 1.0, "quality {} reps {}", q, reps);
      }
    }
  }

  #[test]
  fn test_counters_follow_outcome() {
    let after_hit = compute_next_review(Quality::new(5), &ReviewState::new(), now());
    assert_eq!((after_hit.times_correct, after_hit.times_incorrect), (1, 0));
    let after_miss = compute_next_review(Quality::new(1), &after_hit, now());
    assert_eq!((after_miss.times_correct, after_miss.times_incorrect), (1, 1));
  }

  #[test]
  fn test_ease_factor_floor() {
    let mut current = state(2.5, 10.0, 5);
    for _ in 0..20 {
      current = compute_next_review(Quality::new(0), &current, now());
      assert!(current.easiness_factor >= MIN_EASINESS_FACTOR);
    }
    assert!((current.easiness_factor - MIN_EASINESS_FACTOR).abs() < 1e-9);
  }

  #[test]
  fn test_ease_floor_holds_for_mixed_sequences() {
    let grades = [3, 0, 3, 1, 4, 2, 3, 3, 0, 5, 3, 1, 3, 3, 3, 0];
    let mut current = ReviewState::new();
    for (i, q) in grades.iter().cycle().take(200).enumerate() {
      current = compute_next_review(Quality::new(*q), &current, now() + Duration::days(i as i64));
      assert!(current.easiness_factor >= MIN_EASINESS_FACTOR);
    }
  }

  #[test]
  fn test_success_streak_never_shrinks_interval() {
    // Lowest passing grade lowers EF every time, intervals must still grow
    for q in 3..=5 {
      let mut current = ReviewState::new();
      let mut last_interval = 0.0;
      for _ in 0..15 {
        current = compute_next_review(Quality::new(q), &current, now());
        assert!(current.interval_days >= last_interval);
        last_interval = current.interval_days;
      }
    }
  }

  #[test]
  fn test_interval_grows_exponentially() {
    let mut current = ReviewState::new();
    for i in 0..5 {
      current = compute_next_review(Quality::new(4), &current, now());
      match i {
        0 => assert_eq!(current.interval_days, 1.0),
        1 => assert_eq!(current.interval_days, 6.0),
        _ => assert!(current.interval_days > 6.0),
      }
    }
    assert!(current.interval_days > 30.0);
  }

  #[test]
  fn test_interval_is_capped() {
    let result = compute_next_review(Quality::new(5), &state(3.0, MAX_INTERVAL_DAYS, 40), now());
    assert_eq!(result.interval_days, MAX_INTERVAL_DAYS);
  }

  #[test]
  fn test_zero_previous_interval_still_schedules_a_day() {
    let result = compute_next_review(Quality::new(4), &state(2.5, 0.0, 4), now());
    assert_eq!(result.interval_days, 1.0);
  }

  #[test]
  fn test_deterministic() {
    let previous = state(2.36, 15.0, 3);
    let a = compute_next_review(Quality::new(3), &previous, now());
    let b = compute_next_review(Quality::new(3), &previous, now());
    assert_eq!(a, b);
    assert_eq!(a.easiness_factor.to_bits(), b.easiness_factor.to_bits());
  }

  #[test]
  fn test_boolean_outcomes_match_direct_grades() {
    let previous = state(2.5, 6.0, 2);
    assert_eq!(
      compute_next_review(boolean_to_quality(true), &previous, now()),
      compute_next_review(Quality::new(5), &previous, now())
    );
    assert_eq!(
      compute_next_review(boolean_to_quality(false), &previous, now()),
      compute_next_review(Quality::new(2), &previous, now())
    );
  }

  #[test]
  fn test_example_scenario() {
    let day = Duration::days(1);

    let r1 = compute_next_review(Quality::new(5), &ReviewState::new(), now());
    assert_eq!(r1.repetitions, 1);
    assert_eq!(r1.interval_days, 1.0);
    assert!((r1.easiness_factor - 2.6).abs() < 1e-9);

    let r2 = compute_next_review(Quality::new(5), &r1, now() + day);
    assert_eq!(r2.repetitions, 2);
    assert_eq!(r2.interval_days, 6.0);
    assert!((r2.easiness_factor - 2.7).abs() < 1e-9);

    let r3 = compute_next_review(Quality::new(2), &r2, now() + day * 7);
    assert_eq!(r3.repetitions, 0);
    assert_eq!(r3.interval_days, 1.0);
    // 2.7 - 0.32
    assert!((r3.easiness_factor - 2.38).abs() < 1e-9);

    let r4 = compute_next_review(Quality::new(5), &r3, now() + day * 8);
    assert_eq!(r4.repetitions, 1);
    assert_eq!(r4.interval_days, 1.0);
    assert_eq!(r4.next_review_date, Some(now() + day * 9));
  }

  #[test]
  fn test_from_score_rejects_nan() {
    let result = compute_next_review_from_score(f64::NAN, &ReviewState::new(), now());
    assert!(matches!(result, Err(SchedulerError::InvalidQuality(_))));
  }

  #[test]
  fn test_from_score_clamps_out_of_range() {
    let previous = state(2.5, 6.0, 2);
    assert_eq!(
      compute_next_review_from_score(11.0, &previous, now()).unwrap(),
      compute_next_review(Quality::new(5), &previous, now())
    );
    assert_eq!(
      compute_next_review_from_score(-4.0, &previous, now()).unwrap(),
      compute_next_review(Quality::new(0), &previous, now())
    );
  }

  #[test]
  fn test_preview_intervals() {
    let intervals = preview_intervals(&state(2.5, 6.0, 2));
    assert_eq!(intervals[0], 1.0);
    assert_eq!(intervals[2], 1.0);
    // q3: EF 2.36, 6 * 2.36 = 14.16
    assert_eq!(intervals[3], 14.0);
    assert_eq!(intervals[4], 15.0);
    assert_eq!(intervals[5], 16.0);
  }

  #[test]
  fn test_format_interval() {
    assert_eq!(format_interval(0.0), "now");
    assert_eq!(format_interval(1.0), "1d");
    assert_eq!(format_interval(6.0), "6d");
    assert_eq!(format_interval(15.0), "2w");
    assert_eq!(format_interval(65.0), "2mo");
    assert_eq!(format_interval(800.0), "2y");
  }
}
