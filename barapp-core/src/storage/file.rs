//! File-backed key-value storage.

use std::io;
use std::path::{Path, PathBuf};

use tokio::fs;

use super::{check_key, KeyValueStore, StorageError};

/// File extension for stored values.
const VALUE_EXTENSION: &str = "json";

/// Stores each key as `<key>.json` in a data directory.
///
/// Writes land in a temporary sibling first and are renamed over the old
/// value, so a crash mid-write leaves the previous value intact.
#[derive(Clone, Debug)]
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `data_dir`. Nothing is touched on disk until
    /// the first write.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Returns the file path for a key.
    pub fn path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{}", key, VALUE_EXTENSION))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!(".{}.{}.tmp", key, VALUE_EXTENSION))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        check_key(key)?;
        let path = self.path(key);

        match fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io { path, source: e }),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        check_key(key)?;

        fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| StorageError::Io {
                path: self.data_dir.clone(),
                source: e,
            })?;

        let temp = self.temp_path(key);
        fs::write(&temp, value)
            .await
            .map_err(|e| StorageError::Io {
                path: temp.clone(),
                source: e,
            })?;

        let path = self.path(key);
        if let Err(e) = fs::rename(&temp, &path).await {
            let _ = fs::remove_file(&temp).await;
            return Err(StorageError::Io { path, source: e });
        }

        Ok(())
    }
}
