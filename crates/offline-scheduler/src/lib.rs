//! WASM module for offline study mode.
//!
//! Exposes the review scheduler to the browser so a study session can keep
//! scheduling cards without a server round-trip. Every export takes and
//! returns JSON strings; failures come back as `{"error": "..."}`.
//!
//! The crate is a workspace member, so `cargo test` at the repository root
//! runs its native tests. The browser module is built with:
//!
//! ```bash
//! cargo build -p offline-scheduler --target wasm32-unknown-unknown --profile wasm-release
//! wasm-bindgen --target web --out-dir static/wasm \
//!   target/wasm32-unknown-unknown/wasm-release/offline_scheduler.wasm
//! ```

use wasm_bindgen::prelude::*;
use chrono::{DateTime, Utc};
use review_scheduler::{HasReviewState, ReviewState};
use serde::{Deserialize, Serialize};

#[cfg(feature = "console_error_panic_hook")]
pub use console_error_panic_hook::set_once as set_panic_hook;

// ============================================================================
// Scheduling
// ============================================================================

/// A card as the browser holds it: an opaque id plus its review state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OfflineCard {
    pub id: serde_json::Value,
    #[serde(default)]
    pub review_state: ReviewState,
}

impl HasReviewState for OfflineCard {
    fn review_state(&self) -> &ReviewState {
        &self.review_state
    }
}

fn parse_timestamp(now: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(now)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("Invalid timestamp '{}': {}", now, e))
}

fn compute_next_review_internal(
    state_json: &str,
    quality: f64,
    now: &str,
) -> Result<ReviewState, String> {
    let previous: ReviewState = if state_json.trim().is_empty() {
        ReviewState::new()
    } else {
        serde_json::from_str(state_json).map_err(|e| format!("Invalid review state: {}", e))?
    };
    let now = parse_timestamp(now)?;
    review_scheduler::compute_next_review_from_score(quality, &previous, now)
        .map_err(|e| e.to_string())
}

fn select_due_cards_internal(cards_json: &str, now: &str) -> Result<Vec<OfflineCard>, String> {
    let cards: Vec<OfflineCard> =
        serde_json::from_str(cards_json).map_err(|e| format!("Invalid card list: {}", e))?;
    let now = parse_timestamp(now)?;
    Ok(review_scheduler::into_due_cards(cards, now))
}

fn error_json(message: &str) -> String {
    serde_json::json!({ "error": message }).to_string()
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| error_json(&e.to_string()))
}

// ============================================================================
// WASM Exports
// ============================================================================

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    set_panic_hook();
}

/// Calculate the next review state for a card.
///
/// state_json: previous ReviewState (empty string or `{}` for a new card)
/// quality: 0-5 self-assessment, clamped; NaN is rejected
/// now: RFC 3339 timestamp of the review
#[wasm_bindgen]
pub fn compute_next_review(state_json: &str, quality: f64, now: &str) -> String {
    match compute_next_review_internal(state_json, quality, now) {
        Ok(state) => to_json(&state),
        Err(e) => error_json(&e),
    }
}

/// Map a "got it / missed" button onto the 0-5 quality scale
#[wasm_bindgen]
pub fn boolean_to_quality(correct: bool) -> u8 {
    review_scheduler::boolean_to_quality(correct).value()
}

/// Filter a JSON array of `{id, review_state}` down to the due cards, in
/// study order.
#[wasm_bindgen]
pub fn select_due_cards(cards_json: &str, now: &str) -> String {
    match select_due_cards_internal(cards_json, now) {
        Ok(cards) => to_json(&cards),
        Err(e) => error_json(&e),
    }
}

// ============================================================================
// Tests
// ============================================================================
