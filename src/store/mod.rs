//! Record store: generic persistence of named collections.
//!
//! Each collection is one serialized document holding an ordered record
//! list plus a monotonic next-id counter. The document is read wholly and
//! written wholly on every mutation; there is no in-process caching, so
//! the persisted state is always the single source of truth.
//!
//! The physical format sits behind [`StoreBackend`]: a flat JSON file per
//! collection ([`json_store::JsonStore`]) or a single SQLite database
//! ([`sqlite_store::SqliteStore`]), selected once at startup.

pub mod json_store;
pub mod sqlite_store;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::str::FromStr;

pub const COL_WORKERS: &str = "workers";
pub const COL_RUBROS: &str = "rubros";
pub const COL_HOURS: &str = "hour_assignments";
pub const COL_AUDIT: &str = "audit_log";

/// Raw named-collection persistence. Implementations deal in opaque
/// document bodies; parsing and initialization live in [`Collection`].
pub trait StoreBackend {
    /// Read the persisted body of a collection, `None` if absent.
    fn read(&self, collection: &str) -> AppResult<Option<String>>;

    /// Overwrite the persisted body of a collection. Must leave the prior
    /// body intact when the write fails partway.
    fn write(&self, collection: &str, body: &str) -> AppResult<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Json,
    Sqlite,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Json => "json",
            BackendKind::Sqlite => "sqlite",
        }
    }
}

impl FromStr for BackendKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(BackendKind::Json),
            "sqlite" => Ok(BackendKind::Sqlite),
            other => Err(AppError::Config(format!(
                "unknown storage backend '{}': expected 'json' or 'sqlite'",
                other
            ))),
        }
    }
}

/// Open the backend the configuration selects.
pub fn open_backend(cfg: &Config) -> AppResult<Box<dyn StoreBackend>> {
    match cfg.backend {
        BackendKind::Json => Ok(Box::new(json_store::JsonStore::new(cfg.data_dir()))),
        BackendKind::Sqlite => Ok(Box::new(sqlite_store::SqliteStore::open(
            cfg.sqlite_file(),
        )?)),
    }
}

/// In-memory form of one persisted collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document<T> {
    pub records: Vec<T>,
    pub next_id: i64,
}

impl<T> Document<T> {
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Id to assign to the next new record. Bumps the counter; ids are
    /// never reused, even after deletions.
    pub fn next_identifier(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

/// Typed view over one collection of a backend. Owns serialization and
/// the absent-vs-corrupt distinction: an absent collection is initialized
/// empty and persisted, an unparseable one is a fatal
/// [`AppError::StorageCorrupt`] and is never silently reinitialized.
pub struct Collection<'a, T> {
    backend: &'a dyn StoreBackend,
    name: &'static str,
    _marker: PhantomData<T>,
}

impl<'a, T: Serialize + DeserializeOwned> Collection<'a, T> {
    pub fn new(backend: &'a dyn StoreBackend, name: &'static str) -> Self {
        Self {
            backend,
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn load(&self) -> AppResult<Document<T>> {
        match self.backend.read(self.name)? {
            Some(body) => {
                serde_json::from_str(&body).map_err(|e| AppError::StorageCorrupt {
                    collection: self.name.to_string(),
                    detail: e.to_string(),
                })
            }
            None => {
                let doc = Document::empty();
                self.save(&doc)?;
                Ok(doc)
            }
        }
    }

    pub fn save(&self, doc: &Document<T>) -> AppResult<()> {
        let body = serde_json::to_string_pretty(doc)
            .map_err(|e| AppError::Other(format!("serialize '{}': {}", self.name, e)))?;
        self.backend.write(self.name, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("{}_rubrohours_store", name));
        fs::remove_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn load_initializes_absent_collection() {
        let store = json_store::JsonStore::new(temp_dir("init"));
        let col: Collection<i64> = Collection::new(&store, "numbers");

        let doc = col.load().expect("load");
        assert!(doc.records.is_empty());
        assert_eq!(doc.next_id, 1);

        // The initial state must have been persisted.
        assert!(store.read("numbers").expect("read").is_some());
    }

    #[test]
    fn next_identifier_is_monotonic() {
        let mut doc: Document<i64> = Document::empty();
        assert_eq!(doc.next_identifier(), 1);
        assert_eq!(doc.next_identifier(), 2);
        doc.records.clear(); // deletions never roll the counter back
        assert_eq!(doc.next_identifier(), 3);
    }

    #[test]
    fn corrupt_document_fails_loudly() {
        let dir = temp_dir("corrupt");
        let store = json_store::JsonStore::new(dir.clone());
        let col: Collection<i64> = Collection::new(&store, "numbers");
        col.load().expect("init");

        fs::write(dir.join("numbers.json"), "{not json").expect("clobber");

        match col.load() {
            Err(AppError::StorageCorrupt { collection, .. }) => {
                assert_eq!(collection, "numbers");
            }
            other => panic!("expected StorageCorrupt, got {:?}", other.map(|d| d.next_id)),
        }

        // A corrupt collection must not be silently reinitialized.
        let raw = fs::read_to_string(dir.join("numbers.json")).expect("read");
        assert_eq!(raw, "{not json");
    }

    #[test]
    fn backend_kind_parses() {
        assert_eq!("json".parse::<BackendKind>().unwrap(), BackendKind::Json);
        assert_eq!(
            "sqlite".parse::<BackendKind>().unwrap(),
            BackendKind::Sqlite
        );
        assert!("postgres".parse::<BackendKind>().is_err());
    }
}
