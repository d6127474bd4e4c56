//! Deck CRUD

use rusqlite::{params, Connection, OptionalExtension, Result};

use super::{format_timestamp, parse_timestamp};
use crate::domain::Deck;

pub fn insert_deck(conn: &Connection, deck: &Deck) -> Result<i64> {
    conn.execute(
        "INSERT INTO decks (name, description, created_at) VALUES (?1, ?2, ?3)",
        params![deck.name, deck.description, format_timestamp(&deck.created_at)],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn get_deck(conn: &Connection, id: i64) -> Result<Option<Deck>> {
    conn.query_row(
        "SELECT id, name, description, created_at FROM decks WHERE id = ?1",
        params![id],
        row_to_deck,
    )
    .optional()
}

pub fn list_decks(conn: &Connection) -> Result<Vec<Deck>> {
    let mut stmt = conn.prepare("SELECT id, name, description, created_at FROM decks ORDER BY name, id")?;
    let decks = stmt
        .query_map([], row_to_deck)?
        .collect::<Result<Vec<_>>>()?;
    Ok(decks)
}

/// Delete a deck with its cards, review logs and sessions.
/// Returns false if the deck did not exist.
pub fn delete_deck(conn: &Connection, id: i64) -> Result<bool> {
    let deleted = conn.execute("DELETE FROM decks WHERE id = ?1", params![id])?;
    Ok(deleted > 0)
}

fn row_to_deck(row: &rusqlite::Row) -> Result<Deck> {
    let created_at: String = row.get(3)?;
    Ok(Deck {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        created_at: parse_timestamp(3, &created_at)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestEnv;
    use chrono::{TimeZone, Utc};

    fn deck(name: &str) -> Deck {
        Deck::new(
            name.to_string(),
            Some(format!("{} deck", name)),
            Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_insert_and_get() {
        let env = TestEnv::new().unwrap();
        let id = insert_deck(&env.conn, &deck("Spanish")).unwrap();

        let loaded = get_deck(&env.conn, id).unwrap().unwrap();
        assert_eq!(loaded.id, id);
        assert_eq!(loaded.name, "Spanish");
        assert_eq!(loaded.description.as_deref(), Some("Spanish deck"));
        assert_eq!(loaded.created_at, deck("x").created_at);
    }

    #[test]
    fn test_get_missing() {
        let env = TestEnv::new().unwrap();
        assert!(get_deck(&env.conn, 99).unwrap().is_none());
    }

    #[test]
    fn test_list_sorted_by_name() {
        let env = TestEnv::new().unwrap();
        insert_deck(&env.conn, &deck("Physics")).unwrap();
        insert_deck(&env.conn, &deck("Chemistry")).unwrap();

        let names: Vec<String> = list_decks(&env.conn).unwrap().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Chemistry", "Physics"]);
    }

    #[test]
    fn test_delete() {
        let env = TestEnv::new().unwrap();
        let id = insert_deck(&env.conn, &deck("Gone")).unwrap();
        assert!(delete_deck(&env.conn, id).unwrap());
        assert!(!delete_deck(&env.conn, id).unwrap());
        assert!(get_deck(&env.conn, id).unwrap().is_none());
    }
}
