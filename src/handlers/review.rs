//! Study endpoints: due queue, reviews, previews and sessions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use review_scheduler::{format_interval, ReviewState};
use serde::{Deserialize, Serialize};

use crate::domain::{Flashcard, ReviewLog, ReviewOutcome, StudySession};
use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DueQuery {
  pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct DueCardsResponse {
  pub deck_id: i64,
  pub count: usize,
  pub cards: Vec<Flashcard>,
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse {
  pub card_id: i64,
  pub review: ReviewState,
}

#[derive(Debug, Serialize)]
pub struct IntervalPreview {
  pub quality: u8,
  pub interval_days: f64,
  pub label: String,
}

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
  pub card_id: i64,
  pub intervals: Vec<IntervalPreview>,
}

#[derive(Debug, Deserialize)]
pub struct FinishSessionRequest {
  pub started_at: DateTime<Utc>,
  pub cards_studied: u32,
  pub cards_correct: u32,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
  #[serde(flatten)]
  pub session: StudySession,
  pub accuracy: u32,
  pub duration_secs: i64,
}

impl From<StudySession> for SessionResponse {
  fn from(session: StudySession) -> Self {
    Self {
      accuracy: session.accuracy(),
      duration_secs: session.duration_secs(),
      session,
    }
  }
}

/// GET /decks/{id}/due?limit=N
pub async fn due_cards(
  State(state): State<AppState>,
  Path(deck_id): Path<i64>,
  Query(query): Query<DueQuery>,
) -> Result<Json<DueCardsResponse>> {
  let cards = state.study().due_cards(deck_id, query.limit)?;
  Ok(Json(DueCardsResponse {
    deck_id,
    count: cards.len(),
    cards,
  }))
}

/// POST /cards/{id}/review
///
/// Body is `{"quality": 0..5}` or `{"correct": bool}`.
pub async fn submit_review(
  State(state): State<AppState>,
  Path(card_id): Path<i64>,
  Json(outcome): Json<ReviewOutcome>,
) -> Result<Json<ReviewResponse>> {
  let review = state.study().submit_review(card_id, outcome)?;
  Ok(Json(ReviewResponse { card_id, review }))
}

/// GET /cards/{id}/preview
pub async fn preview(
  State(state): State<AppState>,
  Path(card_id): Path<i64>,
) -> Result<Json<PreviewResponse>> {
  let intervals = state
    .study()
    .preview(card_id)?
    .into_iter()
    .zip(0u8..)
    .map(|(interval_days, quality)| IntervalPreview {
      quality,
      interval_days,
      label: format_interval(interval_days),
    })
    .collect();
  Ok(Json(PreviewResponse { card_id, intervals }))
}

/// GET /cards/{id}/reviews
pub async fn review_history(
  State(state): State<AppState>,
  Path(card_id): Path<i64>,
) -> Result<Json<Vec<ReviewLog>>> {
  Ok(Json(state.study().review_history(card_id)?))
}

/// POST /decks/{id}/sessions
pub async fn finish_session(
  State(state): State<AppState>,
  Path(deck_id): Path<i64>,
  Json(request): Json<FinishSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>)> {
  let session = state.study().finish_session(
    deck_id,
    request.started_at,
    request.cards_studied,
    request.cards_correct,
  )?;
  Ok((StatusCode::CREATED, Json(session.into())))
}

/// GET /decks/{id}/sessions
pub async fn list_sessions(
  State(state): State<AppState>,
  Path(deck_id): Path<i64>,
) -> Result<Json<Vec<SessionResponse>>> {
  let sessions = state.study().list_sessions(deck_id)?;
  Ok(Json(sessions.into_iter().map(SessionResponse::from).collect()))
}
