//! Storage seam for per-card review state.
//!
//! Services depend on [`ReviewStateRepository`] instead of reaching into a
//! database directly, so the same scheduling code runs against SQLite in the
//! server and against memory in tests and batch recomputes.

use review_scheduler::ReviewState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::db::{self, DbLockError, DbPool};
use crate::domain::ReviewLog;
use crate::error::{AppError, Result};

pub trait ReviewStateRepository: Send + Sync {
  /// Current state of a card, `None` if the card is unknown
  fn get(&self, card_id: i64) -> Result<Option<ReviewState>>;

  /// Replace a card's state. Last write wins.
  fn put(&self, card_id: i64, state: &ReviewState) -> Result<()>;

  /// Store the state produced by a review together with its log entry.
  /// Either both are written or neither is.
  fn record(&self, card_id: i64, state: &ReviewState, _log: &ReviewLog) -> Result<()> {
    self.put(card_id, state)
  }
}

impl<R: ReviewStateRepository + ?Sized> ReviewStateRepository for Arc<R> {
  fn get(&self, card_id: i64) -> Result<Option<ReviewState>> {
    (**self).get(card_id)
  }

  fn put(&self, card_id: i64, state: &ReviewState) -> Result<()> {
    (**self).put(card_id, state)
  }

  fn record(&self, card_id: i64, state: &ReviewState, log: &ReviewLog) -> Result<()> {
    (**self).record(card_id, state, log)
  }
}

/// Review state stored on the `cards` table
#[derive(Clone)]
pub struct SqliteReviewStateRepository {
  pool: DbPool,
}

impl SqliteReviewStateRepository {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }
}

impl ReviewStateRepository for SqliteReviewStateRepository {
  fn get(&self, card_id: i64) -> Result<Option<ReviewState>> {
    let conn = db::try_lock(&self.pool)?;
    Ok(db::get_review_state(&conn, card_id)?)
  }

  fn put(&self, card_id: i64, state: &ReviewState) -> Result<()> {
    let conn = db::try_lock(&self.pool)?;
    if db::update_card_progress(&conn, card_id, state)? {
      Ok(())
    } else {
      Err(AppError::card_not_found(card_id))
    }
  }

  fn record(&self, card_id: i64, state: &ReviewState, log: &ReviewLog) -> Result<()> {
    let conn = db::try_lock(&self.pool)?;
    let tx = conn.unchecked_transaction()?;
    if !db::update_card_progress(&tx, card_id, state)? {
      return Err(AppError::card_not_found(card_id));
    }
    db::insert_review_log(&tx, log)?;
    tx.commit()?;
    Ok(())
  }
}

/// Review state held in memory, keyed by card id
#[derive(Debug, Default)]
pub struct InMemoryReviewStateRepository {
  states: Mutex<HashMap<i64, ReviewState>>,
}

impl InMemoryReviewStateRepository {
  pub fn new() -> Self {
    Self::default()
  }
}

impl ReviewStateRepository for InMemoryReviewStateRepository {
  fn get(&self, card_id: i64) -> Result<Option<ReviewState>> {
    let states = self.states.lock().map_err(|_| DbLockError)?;
    Ok(states.get(&card_id).cloned())
  }

  fn put(&self, card_id: i64, state: &ReviewState) -> Result<()> {
    let mut states = self.states.lock().map_err(|_| DbLockError)?;
    states.insert(card_id, state.clone());
    Ok(())
  }
}
