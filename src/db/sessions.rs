//! Study session records

use rusqlite::{params, Connection, Result};

use super::{format_timestamp, parse_timestamp};
use crate::domain::StudySession;

pub fn save_session(conn: &Connection, session: &StudySession) -> Result<i64> {
    conn.execute(
        r#"
    INSERT INTO study_sessions (deck_id, started_at, finished_at, cards_studied, cards_correct)
    VALUES (?1, ?2, ?3, ?4, ?5)
    "#,
        params![
            session.deck_id,
            format_timestamp(&session.started_at),
            format_timestamp(&session.finished_at),
            session.cards_studied,
            session.cards_correct,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Sessions of a deck, most recent first
pub fn list_sessions(conn: &Connection, deck_id: i64) -> Result<Vec<StudySession>> {
    let mut stmt = conn.prepare(
        r#"
    SELECT id, deck_id, started_at, finished_at, cards_studied, cards_correct
    FROM study_sessions
    WHERE deck_id = ?1
    ORDER BY id DESC
    "#,
    )?;

    let sessions = stmt
        .query_map(params![deck_id], |row| {
            let started_at: String = row.get(2)?;
            let finished_at: String = row.get(3)?;
            Ok(StudySession {
                id: row.get(0)?,
                deck_id: row.get(1)?,
                started_at: parse_timestamp(2, &started_at)?,
                finished_at: parse_timestamp(3, &finished_at)?,
                cards_studied: row.get(4)?,
                cards_correct: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(sessions)
}
