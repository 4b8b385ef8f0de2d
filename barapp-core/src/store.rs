//! Moves whole collections between a key-value store and memory.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collection::Collection;
use crate::models::Record;
use crate::storage::{KeyValueStore, StorageError};

/// What a load does when the stored value cannot be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Report the problem to the caller.
    #[default]
    Strict,
    /// Log a warning and carry on with an empty collection.
    Lenient,
}

impl fmt::Display for LoadPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadPolicy::Strict => write!(f, "strict"),
            LoadPolicy::Lenient => write!(f, "lenient"),
        }
    }
}

impl FromStr for LoadPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(LoadPolicy::Strict),
            "lenient" => Ok(LoadPolicy::Lenient),
            _ => Err(format!(
                "Invalid load policy: {}. Use strict or lenient",
                s
            )),
        }
    }
}

/// Errors from loading or saving a collection.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error("Failed to decode collection '{key}': {source}")]
    Decode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode collection '{key}': {source}")]
    Encode {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Collection '{key}' is corrupt: {reason}")]
    Corrupt { key: &'static str, reason: String },
}

impl StoreError {
    /// True when the stored value exists but cannot be used, as opposed to
    /// the backend failing.
    pub fn is_bad_data(&self) -> bool {
        matches!(self, StoreError::Decode { .. } | StoreError::Corrupt { .. })
    }
}

/// Reads and writes collections as JSON arrays, one key per record kind.
pub struct CollectionStore<S> {
    backend: Arc<S>,
    policy: LoadPolicy,
}

impl<S> Clone for CollectionStore<S> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            policy: self.policy,
        }
    }
}

impl<S: KeyValueStore> CollectionStore<S> {
    pub fn new(backend: Arc<S>) -> Self {
        Self {
            backend,
            policy: LoadPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: LoadPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> LoadPolicy {
        self.policy
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    /// Loads the collection for `R`. A key that was never written is an
    /// empty collection.
    ///
    /// Undecodable or inconsistent data is an error under
    /// [`LoadPolicy::Strict`]; under [`LoadPolicy::Lenient`] it is logged
    /// and yields an empty collection. Backend failures are always errors.
    pub async fn load<R: Record>(&self) -> Result<Collection<R>, StoreError> {
        match self.load_strict::<R>().await {
            Err(e) if e.is_bad_data() && self.policy == LoadPolicy::Lenient => {
                tracing::warn!(
                    "Ignoring unreadable collection '{}': {}",
                    R::COLLECTION,
                    e
                );
                Ok(Collection::new())
            }
            result => result,
        }
    }

    async fn load_strict<R: Record>(&self) -> Result<Collection<R>, StoreError> {
        let key = R::COLLECTION.as_str();

        let Some(raw) = self.backend.get(key).await? else {
            tracing::debug!("Collection '{}' not found, starting empty", key);
            return Ok(Collection::new());
        };

        let collection: Collection<R> = serde_json::from_str(&raw)
            .map_err(|source| StoreError::Decode { key, source })?;

        if let Some(reason) = collection.integrity_error() {
            return Err(StoreError::Corrupt { key, reason });
        }

        tracing::debug!("Loaded {} record(s) from '{}'", collection.len(), key);
        Ok(collection)
    }

    /// Overwrites the stored collection for `R` with `collection`.
    pub async fn save<R: Record>(&self, collection: &Collection<R>) -> Result<(), StoreError> {
        let key = R::COLLECTION.as_str();

        let raw = serde_json::to_string(collection)
            .map_err(|source| StoreError::Encode { key, source })?;
        self.backend.set(key, &raw).await?;

        tracing::debug!("Saved {} record(s) to '{}'", collection.len(), key);
        Ok(())
    }
}
