use chrono::{DateTime, Utc};
use review_scheduler::{CardPhase, HasReviewState, ReviewState};
use serde::{Deserialize, Serialize};

/// A named collection of flashcards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deck {
  pub id: i64,
  pub name: String,
  pub description: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl Deck {
  pub fn new(name: String, description: Option<String>, created_at: DateTime<Utc>) -> Self {
    Self {
      id: 0,
      name,
      description,
      created_at,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flashcard {
  pub id: i64,
  pub deck_id: i64,
  pub front: String,
  pub back: String,
  pub created_at: DateTime<Utc>,
  /// SM-2 scheduling state, updated once per review
  pub review: ReviewState,
}

impl Flashcard {
  /// A fresh card: due immediately, default easiness
  pub fn new(deck_id: i64, front: String, back: String, created_at: DateTime<Utc>) -> Self {
    Self {
      id: 0,
      deck_id,
      front,
      back,
      created_at,
      review: ReviewState::new(),
    }
  }

  pub fn phase(&self) -> CardPhase {
    self.review.phase()
  }

  /// Learned once two consecutive reviews have succeeded
  pub fn is_learned(&self) -> bool {
    self.review.repetitions >= 2
  }
}

impl HasReviewState for Flashcard {
  fn review_state(&self) -> &ReviewState {
    &self.review
  }
}
