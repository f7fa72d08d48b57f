//! TryOn repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/delete APIs over the `try_ons` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `TryOn::validate()` before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Full listings are ordered by `date DESC, id ASC`.

use crate::db::DbError;
use crate::model::try_on::{TryOn, TryOnId, TryOnValidationError};
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TRY_ON_SELECT_SQL: &str = "SELECT
    id,
    name,
    details,
    rating,
    purchased,
    size,
    date,
    color,
    width,
    location
FROM try_ons";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for try-on persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TryOnValidationError),
    Db(DbError),
    NotFound(TryOnId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "try-on not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted try-on data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) => None,
            Self::InvalidData(_) => None,
        }
    }
}

impl From<TryOnValidationError> for RepoError {
    fn from(value: TryOnValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for try-on records.
pub trait TryOnRepository {
    /// Inserts one record and returns its id.
    fn create_try_on(&self, try_on: &TryOn) -> RepoResult<TryOnId>;
    /// Gets one record by id.
    fn get_try_on(&self, id: TryOnId) -> RepoResult<Option<TryOn>>;
    /// Returns every record ordered by `date DESC, id ASC`.
    fn list_try_ons(&self) -> RepoResult<Vec<TryOn>>;
    /// Permanently removes one record.
    fn delete_try_on(&self, id: TryOnId) -> RepoResult<()>;
    /// Returns the number of stored records.
    fn count_try_ons(&self) -> RepoResult<u64>;
}

/// SQLite-backed try-on repository.
pub struct SqliteTryOnRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTryOnRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TryOnRepository for SqliteTryOnRepository<'_> {
    fn create_try_on(&self, try_on: &TryOn) -> RepoResult<TryOnId> {
        try_on.validate()?;

        self.conn.execute(
            "INSERT INTO try_ons (
                id,
                name,
                details,
                rating,
                purchased,
                size,
                date,
                color,
                width,
                location
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10);",
            params![
                try_on.id.to_string(),
                try_on.name.as_str(),
                try_on.details.as_str(),
                try_on.rating,
                bool_to_int(try_on.purchased),
                try_on.size.as_str(),
                try_on.date,
                try_on.color.as_str(),
                try_on.width.as_str(),
                try_on.location.as_str(),
            ],
        )?;

        Ok(try_on.id)
    }

    fn get_try_on(&self, id: TryOnId) -> RepoResult<Option<TryOn>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TRY_ON_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_try_on_row(row)?));
        }

        Ok(None)
    }

    fn list_try_ons(&self) -> RepoResult<Vec<TryOn>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TRY_ON_SELECT_SQL} ORDER BY date DESC, id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut try_ons = Vec::new();

        while let Some(row) = rows.next()? {
            try_ons.push(parse_try_on_row(row)?);
        }

        Ok(try_ons)
    }

    fn delete_try_on(&self, id: TryOnId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM try_ons WHERE id = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn count_try_ons(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM try_ons;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count `{count}`")))
    }
}

fn parse_try_on_row(row: &Row<'_>) -> RepoResult<TryOn> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in try_ons.id"))
    })?;

    let purchased = match row.get::<_, i64>("purchased")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid purchased value `{other}` in try_ons.purchased"
            )));
        }
    };

    let try_on = TryOn {
        id,
        name: row.get("name")?,
        details: row.get("details")?,
        rating: row.get("rating")?,
        purchased,
        size: row.get("size")?,
        date: row.get("date")?,
        color: row.get("color")?,
        width: row.get("width")?,
        location: row.get("location")?,
    };
    try_on.validate()?;
    Ok(try_on)
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
