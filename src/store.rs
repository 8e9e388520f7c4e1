//! Local key-value persistence for the catalog cache.
//!
//! SQLite-backed store for normal runs; tests and ephemeral runs use the
//! in-memory store.

use anyhow::Result;
use rusqlite::{params, Connection};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Byte-oriented key-value store.
///
/// Writes are last-writer-wins and neither operation is transactional;
/// callers that need stronger coordination add it themselves.
pub trait KvStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn write(&self, key: &str, value: &[u8]) -> Result<()>;
}

impl<K: KvStore + ?Sized> KvStore for Arc<K> {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        (**self).write(key, value)
    }
}

/// SQLite-backed store: a single `kv` table.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        // WAL keeps concurrent readers cheap
        conn.pragma_update(None, "journal_mode", &"WAL")?;
        conn.pragma_update(None, "synchronous", &"NORMAL")?;
        conn.pragma_update(None, "busy_timeout", &250)?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv(
                key   TEXT PRIMARY KEY,
                value BLOB NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

impl KvStore for SqliteStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let conn = self.conn.lock().expect("kv store lock");
        let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        let conn = self.conn.lock().expect("kv store lock");
        conn.execute(
            "INSERT OR REPLACE INTO kv(key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory store for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.map.lock().expect("memory store lock").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KvStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .map
            .lock()
            .expect("memory store lock")
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, value: &[u8]) -> Result<()> {
        self.map
            .lock()
            .expect("memory store lock")
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }
}
