//! Key-value storage contracts and implementations.
//!
//! # Responsibility
//! - Provide a minimal string key-value contract for durable snapshots.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Keys are non-blank and stored verbatim.
//! - `put` replaces the whole value for a key; there are no partial writes.

use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for key-value reads and writes.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Key is blank after trimming.
    InvalidKey(String),
    /// Backend cannot serve the request right now.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidKey(key) => write!(f, "invalid storage key `{key}`"),
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidKey(_) | Self::Unavailable(_) => None,
        }
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

/// Durable string key-value storage used by the project store.
pub trait KvStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>>;
    fn put(&self, key: &str, value: &str) -> RepoResult<()>;
    /// Returns whether a value was removed.
    fn remove(&self, key: &str) -> RepoResult<bool>;
}

impl<T: KvStore + ?Sized> KvStore for Box<T> {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        (**self).put(key, value)
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        (**self).remove(key)
    }
}

/// SQLite-backed key-value store over the `kv_store` table.
pub struct SqliteKvStore {
    conn: Connection,
}

impl SqliteKvStore {
    /// Wraps a connection that already has migrations applied.
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Opens the database file at `path`, creating it when missing.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Ok(Self::new(open_db(path)?))
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Ok(Self::new(open_db_in_memory()?))
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KvStore for SqliteKvStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let key = validate_key(key)?;
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        let key = validate_key(key)?;
        self.conn.execute(
            "INSERT INTO kv_store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        let key = validate_key(key)?;
        let changed = self
            .conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(changed > 0)
    }
}

/// Process-local key-value store.
///
/// Backs sessions where no database can be opened; contents die with the
/// process.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RefCell<BTreeMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        let key = validate_key(key)?;
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn put(&self, key: &str, value: &str) -> RepoResult<()> {
        let key = validate_key(key)?;
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        let key = validate_key(key)?;
        Ok(self.entries.borrow_mut().remove(key).is_some())
    }
}

fn validate_key(key: &str) -> RepoResult<&str> {
    if key.trim().is_empty() {
        return Err(RepoError::InvalidKey(key.to_string()));
    }
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::{KvStore, MemoryKvStore, RepoError, SqliteKvStore};

    fn exercise(store: &dyn KvStore) {
        assert_eq!(store.get("projects").unwrap(), None);
        store.put("projects", "[]").unwrap();
        store.put("projects", "[1]").unwrap();
        assert_eq!(store.get("projects").unwrap().as_deref(), Some("[1]"));
        assert!(store.remove("projects").unwrap());
        assert!(!store.remove("projects").unwrap());
        assert!(matches!(
            store.put("  ", "x").unwrap_err(),
            RepoError::InvalidKey(_)
        ));
    }

    #[test]
    fn sqlite_store_upserts_and_removes() {
        exercise(&SqliteKvStore::open_in_memory().unwrap());
    }

    #[test]
    fn memory_store_upserts_and_removes() {
        let store = MemoryKvStore::new();
        exercise(&store);
        assert!(store.is_empty());
    }
}
