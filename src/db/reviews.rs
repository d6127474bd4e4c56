//! Review logging

use rusqlite::{params, Connection, Result};

use super::{format_timestamp, parse_timestamp};
use crate::domain::ReviewLog;

pub fn insert_review_log(conn: &Connection, log: &ReviewLog) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO review_logs (card_id, quality, reviewed_at, interval_days, easiness_factor, is_correct)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
    "#,
        params![
            log.card_id,
            log.quality,
            format_timestamp(&log.reviewed_at),
            log.interval_days,
            log.easiness_factor,
            log.is_correct,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Review history of a card, oldest first
pub fn get_review_logs(conn: &Connection, card_id: i64) -> Result<Vec<ReviewLog>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, card_id, quality, reviewed_at, interval_days, easiness_factor, is_correct
    FROM review_logs
    WHERE card_id = ?1
    ORDER BY id ASC
    "#,
    )?;

    let logs = stmt
        .query_map(params![card_id], |row| {
            let quality: u8 = row.get(2)?;
            let reviewed_at: String = row.get(3)?;
            Ok(ReviewLog {
                id: row.get(0)?,
                card_id: row.get(1)?,
                quality,
                is_correct: row.get(6)?,
                reviewed_at: parse_timestamp(3, &reviewed_at)?,
                interval_days: row.get(4)?,
                easiness_factor: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(logs)
}

/// Total number of reviews recorded for a deck
pub fn count_deck_reviews(conn: &Connection, deck_id: i64) -> Result<i64> {
    conn.query_row(
        r#"
    SELECT COUNT(*)
    FROM review_logs r
    JOIN cards c ON r.card_id = c.id
    WHERE c.deck_id = ?1
    "#,
        params![deck_id],
        |row| row.get(0),
    )
}
