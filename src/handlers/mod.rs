pub mod decks;
pub mod review;

use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub use decks::{add_card, create_deck, deck_stats, delete_card, delete_deck, get_deck, list_cards, list_decks};
pub use review::{due_cards, finish_session, list_sessions, preview, review_history, submit_review};

/// GET /health
pub async fn health() -> Json<Value> {
  Json(json!({ "status": "ok" }))
}

/// All API routes with request tracing
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/health", get(health))
    .route("/decks", get(list_decks).post(create_deck))
    .route("/decks/{id}", get(get_deck).delete(delete_deck))
    .route("/decks/{id}/cards", get(list_cards).post(add_card))
    .route("/decks/{id}/due", get(due_cards))
    .route("/decks/{id}/stats", get(deck_stats))
    .route("/decks/{id}/sessions", get(list_sessions).post(finish_session))
    .route("/cards/{id}", delete(delete_card))
    .route("/cards/{id}/review", post(submit_review))
    .route("/cards/{id}/preview", get(preview))
    .route("/cards/{id}/reviews", get(review_history))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
