//! Deck and card management endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::db::DeckStats;
use crate::domain::{Deck, Flashcard};
use crate::error::Result;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateDeckRequest {
  pub name: String,
  #[serde(default)]
  pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCardRequest {
  pub front: String,
  pub back: String,
}

#[derive(Debug, Serialize)]
pub struct DeckStatsResponse {
  pub deck_id: i64,
  #[serde(flatten)]
  pub stats: DeckStats,
  pub learned_percentage: i64,
}

/// GET /decks
pub async fn list_decks(State(state): State<AppState>) -> Result<Json<Vec<Deck>>> {
  Ok(Json(state.study().list_decks()?))
}

/// POST /decks
pub async fn create_deck(
  State(state): State<AppState>,
  Json(request): Json<CreateDeckRequest>,
) -> Result<(StatusCode, Json<Deck>)> {
  let deck = state.study().create_deck(&request.name, request.description)?;
  Ok((StatusCode::CREATED, Json(deck)))
}

/// GET /decks/{id}
pub async fn get_deck(State(state): State<AppState>, Path(deck_id): Path<i64>) -> Result<Json<Deck>> {
  Ok(Json(state.study().get_deck(deck_id)?))
}

/// DELETE /decks/{id}
pub async fn delete_deck(State(state): State<AppState>, Path(deck_id): Path<i64>) -> Result<StatusCode> {
  state.study().delete_deck(deck_id)?;
  Ok(StatusCode::NO_CONTENT)
}

/// GET /decks/{id}/cards
pub async fn list_cards(
  State(state): State<AppState>,
  Path(deck_id): Path<i64>,
) -> Result<Json<Vec<Flashcard>>> {
  Ok(Json(state.study().list_cards(deck_id)?))
}

/// POST /decks/{id}/cards
pub async fn add_card(
  State(state): State<AppState>,
  Path(deck_id): Path<i64>,
  Json(request): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<Flashcard>)> {
  let card = state.study().add_card(deck_id, &request.front, &request.back)?;
  Ok((StatusCode::CREATED, Json(card)))
}

/// DELETE /cards/{id}
pub async fn delete_card(State(state): State<AppState>, Path(card_id): Path<i64>) -> Result<StatusCode> {
  state.study().delete_card(card_id)?;
  Ok(StatusCode::NO_CONTENT)
}

/// GET /decks/{id}/stats
pub async fn deck_stats(
  State(state): State<AppState>,
  Path(deck_id): Path<i64>,
) -> Result<Json<DeckStatsResponse>> {
  let stats = state.study().deck_stats(deck_id)?;
  Ok(Json(DeckStatsResponse {
    deck_id,
    learned_percentage: stats.learned_percentage(),
    stats,
  }))
}
