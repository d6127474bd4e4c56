//! Shared application state handed to every handler.

use review_scheduler::{Clock, SystemClock};
use std::sync::Arc;

use crate::db::DbPool;
use crate::services::StudyService;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,

    /// Source of "now" for scheduling; swapped for a fixed clock in tests
    pub clock: Arc<dyn Clock>,

    /// Due cards returned when a request does not pass `?limit=`
    pub due_card_limit: usize,
}

impl AppState {
    pub fn new(db: DbPool, due_card_limit: usize) -> Self {
        Self::with_clock(db, Arc::new(SystemClock), due_card_limit)
    }

    pub fn with_clock(db: DbPool, clock: Arc<dyn Clock>, due_card_limit: usize) -> Self {
        Self {
            db,
            clock,
            due_card_limit,
        }
    }

    pub fn study(&self) -> StudyService {
        StudyService::new(self.db.clone(), self.clock.clone(), self.due_card_limit)
    }
}
