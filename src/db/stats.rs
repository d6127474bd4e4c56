//! Deck progress statistics

use chrono::{DateTime, Utc};
use review_scheduler::{is_due, CardPhase};
use rusqlite::{Connection, Result};
use serde::Serialize;

use super::{count_deck_reviews, list_cards_in_deck};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeckStats {
    pub total_cards: i64,
    pub new_cards: i64,
    pub due_cards: i64,
    /// Cards with at least two consecutive successful reviews
    pub learned_cards: i64,
    pub total_reviews: i64,
}

impl DeckStats {
    pub fn learned_percentage(&self) -> i64 {
        if self.total_cards > 0 {
            (self.learned_cards * 100) / self.total_cards
        } else {
            0
        }
    }
}

pub fn get_deck_stats(conn: &Connection, deck_id: i64, now: DateTime<Utc>) -> Result<DeckStats> {
    let cards = list_cards_in_deck(conn, deck_id)?;

    let mut stats = DeckStats {
        total_cards: cards.len() as i64,
        total_reviews: count_deck_reviews(conn, deck_id)?,
        ..DeckStats::default()
    };

    for card in &cards {
        if card.phase() == CardPhase::New {
            stats.new_cards += 1;
        }
        if is_due(&card.review, now) {
            stats.due_cards += 1;
        }
        if card.is_learned() {
            stats.learned_cards += 1;
        }
    }

    Ok(stats)
}
