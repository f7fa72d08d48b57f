//! Try-on store bootstrap: connection setup, schema migrations and store
//! health reporting.
//!
//! # Invariants
//! - The `try_ons` schema version lives in `PRAGMA user_version`.
//! - A connection is handed out only after every pending migration applied.
//! - A store written by a newer build is refused, never downgraded.

use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or migrating the try-on store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// One migration step failed; the whole upgrade was rolled back.
    Migration {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
    /// The store was written by a build with a newer schema.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "try-on store error: {err}"),
            Self::Migration {
                version,
                name,
                source,
            } => write!(
                f,
                "try-on store migration v{version} ({name}) failed: {source}"
            ),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "try-on store schema v{db_version} is newer than this build supports (v{latest_supported})"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::UnsupportedSchemaVersion { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Snapshot of the store reported after open and migration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreSummary {
    pub schema_version: u32,
    pub try_on_count: u64,
}

/// Reads the schema version and number of stored try-ons.
pub fn store_summary(conn: &Connection) -> DbResult<StoreSummary> {
    let schema_version = migrations::schema_version(conn)?;
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM try_ons;", [], |row| row.get(0))?;
    Ok(StoreSummary {
        schema_version,
        try_on_count: u64::try_from(count).unwrap_or(0),
    })
}
