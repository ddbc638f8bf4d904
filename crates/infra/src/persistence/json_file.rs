//! One pretty-printed JSON array per collection, `<dir>/<collection>.json`.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use super::{Collection, CollectionStore, PersistenceError};

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Open (and create if needed) a data directory.
    pub fn open(dir: impl Into<PathBuf>) -> std::io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.name()))
    }
}

impl CollectionStore for JsonFileStore {
    fn load(&self, collection: Collection) -> Result<Vec<serde_json::Value>, PersistenceError> {
        let bytes = match fs::read(self.path_of(collection)) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(PersistenceError::Io { collection, source }),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| PersistenceError::Corrupt { collection, source })
    }

    /// Write to a sibling temp file, fsync, then rename over the target so a
    /// concurrent reader sees either the old or the new collection.
    fn save(
        &self,
        collection: Collection,
        records: &[serde_json::Value],
    ) -> Result<(), PersistenceError> {
        let io = |source| PersistenceError::Io { collection, source };

        let body = encode(collection, records)?;

        let target = self.path_of(collection);
        let tmp = target.with_extension("json.tmp");

        let mut file = File::create(&tmp).map_err(io)?;
        file.write_all(&body).map_err(io)?;
        file.sync_all().map_err(io)?;
        drop(file);

        fs::rename(&tmp, &target).map_err(io)
    }
}

fn encode<T: serde::Serialize + ?Sized>(
    collection: Collection,
    records: &T,
) -> Result<Vec<u8>, PersistenceError> {
    serde_json::to_vec_pretty(records).map_err(|source| PersistenceError::Encode { collection, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();
        assert!(store.load(Collection::Users).unwrap().is_empty());
    }

    #[test]
    fn save_then_load_from_a_fresh_handle() {
        let dir = tempfile::tempdir().unwrap();
        let records = vec![json!({"id": "a", "name": "Tech Paradise"})];
        JsonFileStore::open(dir.path())
            .unwrap()
            .save(Collection::Stores, &records)
            .unwrap();

        let reopened = JsonFileStore::open(dir.path()).unwrap();
        assert_eq!(reopened.load(Collection::Stores).unwrap(), records);
        assert!(dir.path().join("stores.json").exists());
        assert!(!dir.path().join("stores.json.tmp").exists());
    }

    #[test]
    fn corrupt_file_is_an_error_not_an_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("products.json"), b"{ not json").unwrap();
        let store = JsonFileStore::open(dir.path()).unwrap();

        assert!(matches!(
            store.load(Collection::Products),
            Err(PersistenceError::Corrupt { .. })
        ));
    }

    #[test]
    fn unencodable_records_fail_as_encode_not_corrupt() {
        use std::collections::BTreeMap;

        let mut keyed = BTreeMap::new();
        keyed.insert(vec![1u8], "bytes are not a JSON object key");

        let err = encode(Collection::Products, &keyed).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Encode {
                collection: Collection::Products,
                ..
            }
        ));
        assert!(err.to_string().starts_with("cannot encode collection 'products'"));
    }

    #[test]
    fn open_creates_nested_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/data");
        let store = JsonFileStore::open(&nested).unwrap();
        assert_eq!(store.dir(), nested.as_path());
        assert!(nested.is_dir());
    }
}
