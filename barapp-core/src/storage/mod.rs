//! Key-value persistence for collections.
//!
//! Every collection is stored as one text value under its own key:
//! - `drinks`: JSON array of drinks
//! - `ingredients`: JSON array of ingredients
//! - `users`: JSON array of users
//!
//! Values are replaced whole on every write. [`FileStore`] keeps each key in
//! `<key>.json` inside a data directory; [`MemoryStore`] keeps them in
//! process memory.

mod collection_key;
mod file;
mod memory;

pub use collection_key::CollectionKey;
pub use file::FileStore;
pub use memory::MemoryStore;

use std::future::Future;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Asynchronous string key-value storage.
pub trait KeyValueStore: Send + Sync {
    /// Reads the value for `key`, or `None` when nothing was ever written.
    fn get(&self, key: &str)
        -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replaces the value for `key`.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// Errors raised by a storage backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Rejects keys that are empty, hidden or would escape the storage root.
pub(crate) fn check_key(key: &str) -> Result<(), StorageError> {
    let invalid = key.is_empty()
        || key.starts_with('.')
        || key.contains(|c: char| c == '/' || c == '\\')
        || key.chars().any(char::is_control);
    if invalid {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_key() {
        assert!(check_key("drinks").is_ok());
        assert!(check_key("").is_err());
        assert!(check_key(".hidden").is_err());
        assert!(check_key("../escape").is_err());
        assert!(check_key("a\\b").is_err());
        assert!(check_key("line\nbreak").is_err());
    }
}
