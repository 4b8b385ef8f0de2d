//! Shared services that own the in-memory view of each collection.
//!
//! A [`Repository`] is the only path through which records of one kind are
//! read or changed. Mutations reload the durable collection, apply the
//! change, write the result back and only then publish it as the new
//! snapshot. A failed write leaves the snapshot at its last committed state.

use std::sync::{Arc, PoisonError, RwLock};

use thiserror::Error;
use tokio::sync::Mutex;

use crate::collection::Collection;
use crate::id::IdGenerator;
use crate::models::{Drink, Ingredient, Record, User};
use crate::store::{CollectionStore, StoreError};
use crate::storage::KeyValueStore;
use crate::validation::ValidationError;

/// Errors returned by repository operations.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

/// Service for one record kind over a shared collection store.
pub struct Repository<R, S> {
    store: CollectionStore<S>,
    ids: Arc<dyn IdGenerator>,
    snapshot: RwLock<Collection<R>>,
    write_lock: Mutex<()>,
}

impl<R: Record, S: KeyValueStore> Repository<R, S> {
    pub fn new(store: CollectionStore<S>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            store,
            ids,
            snapshot: RwLock::new(Collection::new()),
            write_lock: Mutex::new(()),
        }
    }

    /// The last collection loaded or committed by this repository.
    pub fn snapshot(&self) -> Collection<R> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn publish(&self, collection: Collection<R>) {
        *self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner) = collection;
    }

    /// Reloads from storage and publishes the result.
    pub async fn refresh(&self) -> Result<Collection<R>, RepositoryError> {
        let collection = self.store.load::<R>().await?;
        self.publish(collection.clone());
        Ok(collection)
    }

    /// Current records, freshly read from storage.
    pub async fn list(&self) -> Result<Collection<R>, RepositoryError> {
        self.refresh().await
    }

    pub async fn get(&self, id: &str) -> Result<Option<R>, RepositoryError> {
        Ok(self.refresh().await?.get(id).cloned())
    }

    /// Looks a record up by id, falling back to a case-insensitive name match.
    pub async fn find(&self, identifier: &str) -> Result<Option<R>, RepositoryError> {
        Ok(self.refresh().await?.find(identifier).cloned())
    }

    /// Stores `record` as a new entry, ignoring any id it carries.
    pub async fn create(&self, mut record: R) -> Result<R, RepositoryError> {
        record.set_id(String::new());
        self.save(record).await
    }

    /// Upserts `record`: replaces the entry with the same id, or appends it
    /// under a new id.
    pub async fn save(&self, record: R) -> Result<R, RepositoryError> {
        let _guard = self.write_lock.lock().await;

        let current = self.store.load::<R>().await?;
        let is_update = !record.id().is_empty() && current.contains(record.id());
        let (next, stored) = current.upsert(record, self.ids.as_ref())?;

        self.commit(next).await?;

        if is_update {
            tracing::info!("Updated {} {}", R::COLLECTION.label(), stored.id());
        } else {
            tracing::info!("Created {} {}", R::COLLECTION.label(), stored.id());
        }
        Ok(stored)
    }

    /// Applies `edit` to the record with `id` and stores the result.
    ///
    /// The id cannot be changed by `edit`.
    pub async fn update<F>(&self, id: &str, edit: F) -> Result<R, RepositoryError>
    where
        F: FnOnce(&mut R),
    {
        let _guard = self.write_lock.lock().await;

        let current = self.store.load::<R>().await?;
        let mut record = current
            .get(id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound {
                entity: R::COLLECTION.label(),
                id: id.to_string(),
            })?;
        edit(&mut record);
        record.set_id(id.to_string());

        let (next, stored) = current.upsert(record, self.ids.as_ref())?;
        self.commit(next).await?;

        tracing::info!("Updated {} {}", R::COLLECTION.label(), id);
        Ok(stored)
    }

    /// Removes the record with `id`, returning it. Unknown ids are a no-op and
    /// return `None` without writing.
    pub async fn delete(&self, id: &str) -> Result<Option<R>, RepositoryError> {
        let _guard = self.write_lock.lock().await;

        let current = self.store.load::<R>().await?;
        let Some(removed) = current.get(id).cloned() else {
            tracing::debug!("{} {} already absent", R::COLLECTION.label(), id);
            self.publish(current);
            return Ok(None);
        };

        self.commit(current.remove(id)).await?;

        tracing::info!("Deleted {} {}", R::COLLECTION.label(), id);
        Ok(Some(removed))
    }

    /// Writes `next` and publishes it once the write has succeeded.
    async fn commit(&self, next: Collection<R>) -> Result<(), RepositoryError> {
        self.store.save(&next).await?;
        self.publish(next);
        Ok(())
    }
}

/// The three repositories of the application over one store.
pub struct Inventory<S> {
    pub drinks: Repository<Drink, S>,
    pub ingredients: Repository<Ingredient, S>,
    pub users: Repository<User, S>,
}

impl<S: KeyValueStore> Inventory<S> {
    pub fn new(store: CollectionStore<S>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            drinks: Repository::new(store.clone(), Arc::clone(&ids)),
            ingredients: Repository::new(store.clone(), Arc::clone(&ids)),
            users: Repository::new(store, ids),
        }
    }
}
