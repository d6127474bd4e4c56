//! Card CRUD and review-state persistence

use review_scheduler::ReviewState;
use rusqlite::{params, Connection, OptionalExtension, Result};

use super::{format_timestamp, parse_optional_timestamp, parse_timestamp};
use crate::domain::Flashcard;

const CARD_COLUMNS: &str = r#"
    id, deck_id, front, back, created_at, repetitions, easiness_factor, interval_days,
    next_review_at, last_reviewed_at, times_correct, times_incorrect
"#;

pub fn insert_card(conn: &Connection, card: &Flashcard) -> Result<i64> {
    let review = &card.review;
    conn.execute(
        r#"
    INSERT INTO cards (deck_id, front, back, created_at, repetitions, easiness_factor, interval_days,
                       next_review_at, last_reviewed_at, times_correct, times_incorrect)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
    "#,
        params![
            card.deck_id,
            card.front,
            card.back,
            format_timestamp(&card.created_at),
            review.repetitions,
            review.easiness_factor,
            review.interval_days,
            review.next_review_date.as_ref().map(format_timestamp),
            review.last_reviewed_at.as_ref().map(format_timestamp),
            review.times_correct,
            review.times_incorrect,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_card_by_id(conn: &Connection, id: i64) -> Result<Option<Flashcard>> {
    conn.query_row(
        &format!("SELECT {} FROM cards WHERE id = ?1", CARD_COLUMNS),
        params![id],
        row_to_card,
    )
    .optional()
}

/// All cards of a deck in creation order
pub fn list_cards_in_deck(conn: &Connection, deck_id: i64) -> Result<Vec<Flashcard>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM cards WHERE deck_id = ?1 ORDER BY id",
        CARD_COLUMNS
    ))?;
    let cards = stmt
        .query_map(params![deck_id], row_to_card)?
        .collect::<Result<Vec<_>>>()?;
    Ok(cards)
}

/// Candidate cards for due selection: one deck, or every deck when `None`.
///
/// Due filtering happens in the scheduler, not in SQL, so text timestamps
/// never need to compare correctly as strings.
pub fn get_cards_with_review_state(conn: &Connection, deck_id: Option<i64>) -> Result<Vec<Flashcard>> {
    match deck_id {
        Some(deck_id) => list_cards_in_deck(conn, deck_id),
        None => {
            let mut stmt = conn.prepare(&format!("SELECT {} FROM cards ORDER BY id", CARD_COLUMNS))?;
            let cards = stmt
                .query_map([], row_to_card)?
                .collect::<Result<Vec<_>>>()?;
            Ok(cards)
        }
    }
}

pub fn delete_card(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM cards WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

pub fn get_review_state(conn: &Connection, card_id: i64) -> Result<Option<ReviewState>> {
    conn.query_row(
        r#"
    SELECT repetitions, easiness_factor, interval_days, next_review_at, last_reviewed_at,
           times_correct, times_incorrect
    FROM cards WHERE id = ?1
    "#,
        params![card_id],
        |row| review_state_from_row(row, 0),
    )
    .optional()
}

/// Overwrite a card's review state. Returns false if the card does not exist.
pub fn update_card_progress(conn: &Connection, card_id: i64, state: &ReviewState) -> Result<bool> {
    let updated = conn.execute(
        r#"
    UPDATE cards
    SET repetitions = ?1, easiness_factor = ?2, interval_days = ?3, next_review_at = ?4,
        last_reviewed_at = ?5, times_correct = ?6, times_incorrect = ?7
    WHERE id = ?8
    "#,
        params![
            state.repetitions,
            state.easiness_factor,
            state.interval_days,
            state.next_review_date.as_ref().map(format_timestamp),
            state.last_reviewed_at.as_ref().map(format_timestamp),
            state.times_correct,
            state.times_incorrect,
            card_id,
        ],
    )?;
    Ok(updated > 0)
}

/// Read the seven review columns starting at `offset`
fn review_state_from_row(row: &rusqlite::Row, offset: usize) -> Result<ReviewState> {
    Ok(ReviewState {
        repetitions: row.get(offset)?,
        easiness_factor: row.get(offset + 1)?,
        interval_days: row.get(offset + 2)?,
        next_review_date: parse_optional_timestamp(offset + 3, row.get(offset + 3)?)?,
        last_reviewed_at: parse_optional_timestamp(offset + 4, row.get(offset + 4)?)?,
        times_correct: row.get(offset + 5)?,
        times_incorrect: row.get(offset + 6)?,
    })
}

fn row_to_card(row: &rusqlite::Row) -> Result<Flashcard> {
    let created_at: String = row.get(4)?;
    Ok(Flashcard {
        id: row.get(0)?,
        deck_id: row.get(1)?,
        front: row.get(2)?,
        back: row.get(3)?,
        created_at: parse_timestamp(4, &created_at)?,
        review: review_state_from_row(row, 5)?,
    })
}
