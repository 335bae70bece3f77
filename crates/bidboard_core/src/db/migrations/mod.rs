//! Schema migrations, tracked in `PRAGMA user_version`.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// Ordered `(version, script)` pairs; versions only ever grow.
const SCRIPTS: &[(u32, &str)] = &[(1, include_str!("0001_kv_store.sql"))];

/// Where a database file stands relative to this build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaState {
    Current,
    Behind { found: u32 },
    Ahead { found: u32 },
}

pub fn latest_version() -> u32 {
    SCRIPTS.last().map_or(0, |(version, _)| *version)
}

pub fn schema_state(conn: &Connection) -> DbResult<SchemaState> {
    let found: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let latest = latest_version();
    Ok(if found == latest {
        SchemaState::Current
    } else if found < latest {
        SchemaState::Behind { found }
    } else {
        SchemaState::Ahead { found }
    })
}

/// Brings the schema up to date in a single transaction.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let found = match schema_state(conn)? {
        SchemaState::Current => return Ok(()),
        SchemaState::Ahead { found } => {
            return Err(DbError::UnsupportedSchemaVersion {
                db_version: found,
                latest_supported: latest_version(),
            })
        }
        SchemaState::Behind { found } => found,
    };

    let tx = conn.transaction()?;
    for &(version, script) in SCRIPTS.iter().skip_while(|(version, _)| *version <= found) {
        tx.execute_batch(script)
            .and_then(|()| tx.pragma_update(None, "user_version", version))
            .map_err(|source| DbError::Migration { version, source })?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={} to_version={}",
        found,
        latest_version()
    );
    Ok(())
}
