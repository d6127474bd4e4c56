//! Study workflow over the database: decks, due queues, reviews, sessions.

use chrono::{DateTime, Utc};
use review_scheduler::{into_due_cards, Clock, ReviewState};
use std::sync::Arc;

use crate::config::MAX_DUE_CARD_LIMIT;
use crate::db::{self, DbPool, DeckStats};
use crate::domain::{Deck, Flashcard, ReviewLog, ReviewOutcome, StudySession};
use crate::error::{AppError, Result};
use crate::repository::SqliteReviewStateRepository;
use crate::services::ReviewService;

#[derive(Clone)]
pub struct StudyService {
  db: DbPool,
  clock: Arc<dyn Clock>,
  due_card_limit: usize,
}

impl StudyService {
  pub fn new(db: DbPool, clock: Arc<dyn Clock>, due_card_limit: usize) -> Self {
    Self {
      db,
      clock,
      due_card_limit,
    }
  }

  pub fn now(&self) -> DateTime<Utc> {
    self.clock.now()
  }

  // ==================== Decks ====================

  pub fn create_deck(&self, name: &str, description: Option<String>) -> Result<Deck> {
    let name = name.trim();
    if name.is_empty() {
      return Err(AppError::BadRequest("Deck name must not be empty".into()));
    }
    let description = description.filter(|d| !d.trim().is_empty());

    let mut deck = Deck::new(name.to_string(), description, self.now());
    let conn = db::try_lock(&self.db)?;
    deck.id = db::insert_deck(&conn, &deck)?;
    tracing::info!("Created deck {} ({})", deck.id, deck.name);
    Ok(deck)
  }

  pub fn get_deck(&self, deck_id: i64) -> Result<Deck> {
    let conn = db::try_lock(&self.db)?;
    db::get_deck(&conn, deck_id)?.ok_or_else(|| AppError::deck_not_found(deck_id))
  }

  pub fn list_decks(&self) -> Result<Vec<Deck>> {
    let conn = db::try_lock(&self.db)?;
    Ok(db::list_decks(&conn)?)
  }

  pub fn delete_deck(&self, deck_id: i64) -> Result<()> {
    let conn = db::try_lock(&self.db)?;
    if db::delete_deck(&conn, deck_id)? {
      tracing::info!("Deleted deck {}", deck_id);
      Ok(())
    } else {
      Err(AppError::deck_not_found(deck_id))
    }
  }

  // ==================== Cards ====================

  pub fn add_card(&self, deck_id: i64, front: &str, back: &str) -> Result<Flashcard> {
    let (front, back) = (front.trim(), back.trim());
    if front.is_empty() || back.is_empty() {
      return Err(AppError::BadRequest("Card front and back must not be empty".into()));
    }

    let conn = db::try_lock(&self.db)?;
    if db::get_deck(&conn, deck_id)?.is_none() {
      return Err(AppError::deck_not_found(deck_id));
    }
    let mut card = Flashcard::new(deck_id, front.to_string(), back.to_string(), self.now());
    card.id = db::insert_card(&conn, &card)?;
    Ok(card)
  }

  pub fn list_cards(&self, deck_id: i64) -> Result<Vec<Flashcard>> {
    let conn = db::try_lock(&self.db)?;
    if db::get_deck(&conn, deck_id)?.is_none() {
      return Err(AppError::deck_not_found(deck_id));
    }
    Ok(db::list_cards_in_deck(&conn, deck_id)?)
  }

  pub fn delete_card(&self, card_id: i64) -> Result<()> {
    let conn = db::try_lock(&self.db)?;
    if db::delete_card(&conn, card_id)? {
      Ok(())
    } else {
      Err(AppError::card_not_found(card_id))
    }
  }

  // ==================== Studying ====================

  /// Due cards of a deck in study order, at most `limit` (or the configured
  /// default). Never-reviewed cards come first, then the most overdue.
  pub fn due_cards(&self, deck_id: i64, limit: Option<usize>) -> Result<Vec<Flashcard>> {
    let candidates = {
      let conn = db::try_lock(&self.db)?;
      if db::get_deck(&conn, deck_id)?.is_none() {
        return Err(AppError::deck_not_found(deck_id));
      }
      db::get_cards_with_review_state(&conn, Some(deck_id))?
    };

    let mut due = into_due_cards(candidates, self.now());
    due.truncate(limit.unwrap_or(self.due_card_limit).min(MAX_DUE_CARD_LIMIT));
    Ok(due)
  }

  /// Record one review: reschedule the card and append to its review log.
  ///
  /// An invalid quality is rejected before the card is looked up. The new
  /// state and the log row are committed in one transaction, so a failed
  /// write leaves the card as it was.
  pub fn submit_review(&self, card_id: i64, outcome: ReviewOutcome) -> Result<ReviewState> {
    outcome.to_quality()?;
    {
      let conn = db::try_lock(&self.db)?;
      if db::get_card_by_id(&conn, card_id)?.is_none() {
        return Err(AppError::card_not_found(card_id));
      }
    }

    Ok(self.review_service().record_review(card_id, outcome)?.state)
  }

  pub fn preview(&self, card_id: i64) -> Result<[f64; 6]> {
    {
      let conn = db::try_lock(&self.db)?;
      if db::get_card_by_id(&conn, card_id)?.is_none() {
        return Err(AppError::card_not_found(card_id));
      }
    }
    self.review_service().preview(card_id)
  }

  pub fn review_history(&self, card_id: i64) -> Result<Vec<ReviewLog>> {
    let conn = db::try_lock(&self.db)?;
    if db::get_card_by_id(&conn, card_id)?.is_none() {
      return Err(AppError::card_not_found(card_id));
    }
    Ok(db::get_review_logs(&conn, card_id)?)
  }

  // ==================== Sessions & stats ====================

  /// Save a finished study session ending now
  pub fn finish_session(
    &self,
    deck_id: i64,
    started_at: DateTime<Utc>,
    cards_studied: u32,
    cards_correct: u32,
  ) -> Result<StudySession> {
    let finished_at = self.now();
    if started_at > finished_at {
      return Err(AppError::BadRequest("Session cannot start in the future".into()));
    }
    if cards_correct > cards_studied {
      return Err(AppError::BadRequest(
        "Correct answers cannot exceed cards studied".into(),
      ));
    }

    let conn = db::try_lock(&self.db)?;
    if db::get_deck(&conn, deck_id)?.is_none() {
      return Err(AppError::deck_not_found(deck_id));
    }
    let mut session = StudySession::new(deck_id, started_at, finished_at, cards_studied, cards_correct);
    session.id = db::save_session(&conn, &session)?;
    tracing::info!(
      "Session {} saved for deck {}: {}/{} correct",
      session.id,
      deck_id,
      cards_correct,
      cards_studied
    );
    Ok(session)
  }

  pub fn list_sessions(&self, deck_id: i64) -> Result<Vec<StudySession>> {
    let conn = db::try_lock(&self.db)?;
    if db::get_deck(&conn, deck_id)?.is_none() {
      return Err(AppError::deck_not_found(deck_id));
    }
    Ok(db::list_sessions(&conn, deck_id)?)
  }

  pub fn deck_stats(&self, deck_id: i64) -> Result<DeckStats> {
    let conn = db::try_lock(&self.db)?;
    if db::get_deck(&conn, deck_id)?.is_none() {
      return Err(AppError::deck_not_found(deck_id));
    }
    Ok(db::get_deck_stats(&conn, deck_id, self.now())?)
  }

  fn review_service(&self) -> ReviewService<SqliteReviewStateRepository, Arc<dyn Clock>> {
    ReviewService::new(SqliteReviewStateRepository::new(self.db.clone()), self.clock.clone())
  }
}
