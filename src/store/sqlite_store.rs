//! SQLite backend: the same serialized documents, kept as rows of a
//! single `collections` table. Each write replaces one row inside a
//! statement-level transaction, so a failed write never tears the
//! previous body.

use crate::errors::AppResult;
use crate::store::StoreBackend;
use rusqlite::{Connection, OptionalExtension, params};
use std::fs;
use std::path::{Path, PathBuf};

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> AppResult<Self> {
        let path: PathBuf = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(&path)?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS collections (
                name TEXT PRIMARY KEY,
                body TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self { conn })
    }
}

impl StoreBackend for SqliteStore {
    fn read(&self, collection: &str) -> AppResult<Option<String>> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT body FROM collections WHERE name = ?1")?;
        let body = stmt
            .query_row([collection], |row| row.get::<_, String>(0))
            .optional()?;
        Ok(body)
    }

    fn write(&self, collection: &str, body: &str) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO collections (name, body) VALUES (?1, ?2)
             ON CONFLICT(name) DO UPDATE SET body = excluded.body",
            params![collection, body],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_store(name: &str) -> SqliteStore {
        let path = env::temp_dir().join(format!("{}_rubrohours.sqlite", name));
        fs::remove_file(&path).ok();
        SqliteStore::open(&path).expect("open")
    }

    #[test]
    fn read_absent_returns_none() {
        let store = temp_store("sqlite_absent");
        assert!(store.read("workers").expect("read").is_none());
    }

    #[test]
    fn write_upserts_by_name() {
        let store = temp_store("sqlite_upsert");
        store.write("workers", "v1").expect("write");
        store.write("workers", "v2").expect("rewrite");
        store.write("rubros", "r1").expect("write other");

        assert_eq!(store.read("workers").expect("read").as_deref(), Some("v2"));
        assert_eq!(store.read("rubros").expect("read").as_deref(), Some("r1"));
    }
}
