//! Test utilities for database setup.
//!
//! Reuses the authoritative schema initialization so test code never
//! duplicates table definitions.

use rusqlite::Connection;
use tempfile::TempDir;

/// Test environment with an on-disk learning database.
///
/// The temporary directory is removed when the environment is dropped.
pub struct TestEnv {
    /// Temporary directory (kept alive for database file persistence)
    pub _temp: TempDir,
    /// Connection with the full schema and foreign keys enabled
    pub conn: Connection,
}

impl TestEnv {
    pub fn new() -> rusqlite::Result<Self> {
        let temp =
            TempDir::new().map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let conn = Connection::open(temp.path().join("studykit.db"))?;
        crate::db::configure(&conn)?;
        crate::db::schema::run_migrations(&conn)?;

        Ok(Self { _temp: temp, conn })
    }
}
