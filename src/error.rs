//! Application error type and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use review_scheduler::SchedulerError;
use thiserror::Error;

use crate::db::DbLockError;

#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Scheduler(#[from] SchedulerError),

  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  BadRequest(String),

  #[error("Database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error(transparent)]
  DbLock(#[from] DbLockError),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
  pub fn status(&self) -> StatusCode {
    match self {
      Self::Scheduler(_) => StatusCode::UNPROCESSABLE_ENTITY,
      Self::NotFound(_) => StatusCode::NOT_FOUND,
      Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
      Self::DbLock(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
  }

  pub fn card_not_found(card_id: i64) -> Self {
    Self::NotFound(format!("Card not found: {}", card_id))
  }

  pub fn deck_not_found(deck_id: i64) -> Self {
    Self::NotFound(format!("Deck not found: {}", deck_id))
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!("Request failed: {}", self);
    } else {
      tracing::debug!("Request rejected ({}): {}", status, self);
    }
    let body = Json(serde_json::json!({ "error": self.to_string() }));
    (status, body).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_mapping() {
    assert_eq!(
      AppError::from(SchedulerError::InvalidQuality(f64::NAN)).status(),
      StatusCode::UNPROCESSABLE_ENTITY
    );
    assert_eq!(AppError::card_not_found(3).status(), StatusCode::NOT_FOUND);
    assert_eq!(AppError::BadRequest("x".into()).status(), StatusCode::BAD_REQUEST);
    assert_eq!(
      AppError::from(rusqlite::Error::QueryReturnedNoRows).status(),
      StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(AppError::from(DbLockError).status(), StatusCode::SERVICE_UNAVAILABLE);
  }

  #[test]
  fn test_messages() {
    assert_eq!(AppError::card_not_found(7).to_string(), "Card not found: 7");
    assert_eq!(AppError::deck_not_found(2).to_string(), "Deck not found: 2");
    assert_eq!(
      AppError::from(SchedulerError::InvalidQuality(f64::INFINITY)).to_string(),
      "Invalid review quality: inf"
    );
  }
}
