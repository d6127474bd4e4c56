//! Due-card selection for a study session.

use chrono::{DateTime, Utc};

use crate::state::ReviewState;

/// Anything that carries a card's review state
pub trait HasReviewState {
  fn review_state(&self) -> &ReviewState;
}

impl HasReviewState for ReviewState {
  fn review_state(&self) -> &ReviewState {
    self
  }
}

impl<T: HasReviewState> HasReviewState for &T {
  fn review_state(&self) -> &ReviewState {
    (*self).review_state()
  }
}

/// A card is due when it has never been scheduled or its date has passed
pub fn is_due(state: &ReviewState, now: DateTime<Utc>) -> bool {
  state.next_review_date.is_none_or(|date| date <= now)
}

/// Filter `cards` down to the ones due at `now`.
///
/// Never-scheduled cards come first, then ascending by next review date.
/// Cards with equal dates keep their input order.
pub fn select_due_cards<T: HasReviewState>(cards: &[T], now: DateTime<Utc>) -> Vec<&T> {
  let mut due: Vec<&T> = cards
    .iter()
    .filter(|card| is_due(card.review_state(), now))
    .collect();
  // None sorts before Some
  due.sort_by_key(|card| card.review_state().next_review_date);
  due
}

/// Owning variant of [`select_due_cards`]
pub fn into_due_cards<T: HasReviewState>(cards: Vec<T>, now: DateTime<Utc>) -> Vec<T> {
  let mut due: Vec<T> = cards
    .into_iter()
    .filter(|card| is_due(card.review_state(), now))
    .collect();
  due.sort_by_key(|card| card.review_state().next_review_date);
  due
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{Duration, TimeZone};

  #[derive(Debug, PartialEq)]
  struct TestCard {
    name: &'static str,
    state: ReviewState,
  }

  impl HasReviewState for TestCard {
    fn review_state(&self) -> &ReviewState {
      &self.state
    }
  }

  fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
  }

  fn card(name: &'static str, next: Option<DateTime<Utc>>) -> TestCard {
    TestCard {
      name,
      state: ReviewState {
        next_review_date: next,
        ..ReviewState::default()
      },
    }
  }

  fn names(cards: &[&TestCard]) -> Vec<&'static str> {
    cards.iter().map(|c| c.name).collect()
  }

  #[test]
  fn test_due_selection_and_order() {
    let cards = vec![
      card("never", None),
      card("yesterday", Some(now() - Duration::days(1))),
      card("tomorrow", Some(now() + Duration::days(1))),
      card("now", Some(now())),
    ];
    let due = select_due_cards(&cards, now());
    assert_eq!(names(&due), vec!["never", "yesterday", "now"]);
  }

  #[test]
  fn test_never_reviewed_sorted_first() {
    let cards = vec![
      card("old", Some(now() - Duration::days(30))),
      card("new", None),
    ];
    let due = select_due_cards(&cards, now());
    assert_eq!(names(&due), vec!["new", "old"]);
  }

  #[test]
  fn test_ties_keep_input_order() {
    let at = Some(now() - Duration::hours(2));
    let cards = vec![card("a", at), card("b", None), card("c", at), card("d", None)];
    let due = select_due_cards(&cards, now());
    assert_eq!(names(&due), vec!["b", "d", "a", "c"]);
  }

  #[test]
  fn test_nothing_due() {
    let cards = vec![
      card("a", Some(now() + Duration::seconds(1))),
      card("b", Some(now() + Duration::days(3))),
    ];
    assert!(select_due_cards(&cards, now()).is_empty());
  }

  #[test]
  fn test_empty_input() {
    let cards: Vec<TestCard> = Vec::new();
    assert!(select_due_cards(&cards, now()).is_empty());
  }

  #[test]
  fn test_input_untouched() {
    let cards = vec![card("later", Some(now() - Duration::days(1))), card("first", None)];
    let _ = select_due_cards(&cards, now());
    assert_eq!(cards[0].name, "later");
    assert_eq!(cards[1].name, "first");
  }

  #[test]
  fn test_into_due_cards_matches_borrowed() {
    let make = || {
      vec![
        card("tomorrow", Some(now() + Duration::days(1))),
        card("now", Some(now())),
        card("never", None),
      ]
    };
    let borrowed = make();
    let expected = names(&select_due_cards(&borrowed, now()));
    let owned: Vec<&'static str> = into_due_cards(make(), now()).iter().map(|c| c.name).collect();
    assert_eq!(owned, expected);
  }

  #[test]
  fn test_is_due_boundary() {
    let mut state = ReviewState::new();
    assert!(is_due(&state, now()));
    state.next_review_date = Some(now());
    assert!(is_due(&state, now()));
    state.next_review_date = Some(now() + Duration::milliseconds(1));
    assert!(!is_due(&state, now()));
  }
}
