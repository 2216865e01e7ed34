//! SQLite store for medications and medical notes.
//!
//! Connections come from an r2d2 pool so lookups can run while an ingestion
//! write is in flight (WAL mode). Writers are serialized by `write_lock`.

pub mod tables;

use crate::error::Result;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::sync::{Mutex, MutexGuard};

pub type DbConn = PooledConnection<SqliteConnectionManager>;

pub struct Database {
    pool: Pool<SqliteConnectionManager>,
    write_lock: Mutex<()>,
}

impl Database {
    /// Open (or create) the store and make sure the schema exists.
    pub fn open(path: &str) -> Result<Self> {
        let pool = if path == ":memory:" {
            // Every in-memory connection is its own database, so keep exactly one
            Pool::builder()
                .max_size(1)
                .build(SqliteConnectionManager::memory())?
        } else {
            let manager = SqliteConnectionManager::file(path).with_init(|conn| {
                conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA busy_timeout=5000;")
            });
            Pool::builder().max_size(8).build(manager)?
        };

        let db = Self {
            pool,
            write_lock: Mutex::new(()),
        };
        db.initialize()?;
        Ok(db)
    }

    /// Create tables and indexes if absent. Safe to call on every start.
    pub fn initialize(&self) -> Result<()> {
        let _guard = self.write_guard();
        let conn = self.conn()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS medications (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                side_effects TEXT NOT NULL,
                dosage TEXT NOT NULL,
                indications TEXT NOT NULL,
                contraindications TEXT NOT NULL,
                pharmacokinetics TEXT NOT NULL,
                interactions TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_medications_name ON medications(name);
            CREATE TABLE IF NOT EXISTS medical_notes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                topic TEXT NOT NULL,
                content TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    pub fn conn(&self) -> Result<DbConn> {
        Ok(self.pool.get()?)
    }

    /// Serializes writers. A poisoned lock only means another writer panicked;
    /// the database itself is still consistent, so keep going.
    fn write_guard(&self) -> MutexGuard<'_, ()> {
        self.write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Build a `LIKE` pattern matching `needle` literally anywhere in the column.
/// Pair with `ESCAPE '\'`.
pub(crate) fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
