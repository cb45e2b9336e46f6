//! Flat-file backend: one UTF-8 JSON document per collection.

use crate::errors::{AppError, AppResult};
use crate::store::StoreBackend;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub struct JsonStore {
    dir: PathBuf,
}

impl JsonStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_path(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{}.json", collection))
    }
}

impl StoreBackend for JsonStore {
    fn read(&self, collection: &str) -> AppResult<Option<String>> {
        let path = self.file_path(collection);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        // Strict UTF-8: a decoding failure must fail loudly, never be
        // substituted or truncated.
        let body = String::from_utf8(bytes).map_err(|e| AppError::StorageCorrupt {
            collection: collection.to_string(),
            detail: format!("invalid UTF-8: {}", e),
        })?;
        Ok(Some(body))
    }

    fn write(&self, collection: &str, body: &str) -> AppResult<()> {
        let wrap = |source: io::Error| AppError::StorageWrite {
            collection: collection.to_string(),
            source,
        };

        fs::create_dir_all(&self.dir).map_err(wrap)?;

        // Write to a sibling temp file, then rename over the target, so a
        // failure mid-write leaves the previous document intact.
        let path = self.file_path(collection);
        let tmp = self.dir.join(format!("{}.json.tmp", collection));
        fs::write(&tmp, body).map_err(wrap)?;
        fs::rename(&tmp, &path).map_err(wrap)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_store(name: &str) -> JsonStore {
        let dir = env::temp_dir().join(format!("{}_rubrohours_json", name));
        fs::remove_dir_all(&dir).ok();
        JsonStore::new(dir)
    }

    #[test]
    fn read_absent_returns_none() {
        let store = temp_store("absent");
        assert!(store.read("workers").expect("read").is_none());
    }

    #[test]
    fn write_then_read_roundtrips() {
        let store = temp_store("roundtrip");
        store.write("workers", "{\"records\":[],\"next_id\":1}").expect("write");
        let body = store.read("workers").expect("read").expect("present");
        assert_eq!(body, "{\"records\":[],\"next_id\":1}");
    }

    #[test]
    fn write_leaves_no_temp_file_behind() {
        let store = temp_store("tmpfile");
        store.write("rubros", "{}").expect("write");
        assert!(!store.dir().join("rubros.json.tmp").exists());
        assert!(store.dir().join("rubros.json").exists());
    }

    #[test]
    fn non_utf8_body_is_corrupt() {
        let store = temp_store("non_utf8");
        store.write("workers", "{}").expect("write");
        fs::write(store.dir().join("workers.json"), [0xff, 0xfe, 0x00]).expect("clobber");

        match store.read("workers") {
            Err(AppError::StorageCorrupt { collection, .. }) => assert_eq!(collection, "workers"),
            other => panic!("expected StorageCorrupt, got {:?}", other),
        }
    }
}
