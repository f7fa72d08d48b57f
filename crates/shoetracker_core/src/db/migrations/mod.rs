//! Forward-only schema upgrades for the try-on store.
//!
//! Steps are listed in ascending `version` order. All pending steps run in one
//! transaction, so a failing step leaves the store at its previous version.

use crate::db::{store_summary, DbError, DbResult};
use log::info;
use rusqlite::{Connection, Transaction};

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "create_try_ons",
    sql: include_str!("0001_init.sql"),
}];

/// Outcome of [`apply_migrations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    pub from_version: u32,
    pub to_version: u32,
    /// Names of the steps applied by this call, in order.
    pub applied: Vec<&'static str>,
}

impl MigrationReport {
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Schema version this build writes.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |migration| migration.version)
}

/// Schema version recorded in the store.
pub fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Upgrades the store to [`latest_version`].
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the store is ahead of this build.
/// - `Migration` naming the step that failed; nothing is committed.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationReport> {
    let from_version = schema_version(conn)?;
    let latest = latest_version();

    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending: Vec<&Migration> = MIGRATIONS
        .iter()
        .filter(|migration| migration.version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(MigrationReport {
            from_version,
            to_version: from_version,
            applied: Vec::new(),
        });
    }

    let tx = conn.transaction()?;
    for migration in &pending {
        run_step(&tx, migration)?;
    }
    tx.commit()?;
    let try_on_count = store_summary(conn)?.try_on_count;

    let report = MigrationReport {
        from_version,
        to_version: latest,
        applied: pending.iter().map(|migration| migration.name).collect(),
    };
    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={} steps={} try_on_count={}",
        report.from_version,
        report.to_version,
        report.applied.join(","),
        try_on_count
    );
    Ok(report)
}

fn run_step(tx: &Transaction<'_>, migration: &Migration) -> DbResult<()> {
    let wrap = |source| DbError::Migration {
        version: migration.version,
        name: migration.name,
        source,
    };
    tx.execute_batch(migration.sql).map_err(wrap)?;
    tx.pragma_update(None, "user_version", migration.version)
        .map_err(wrap)?;
    Ok(())
}
