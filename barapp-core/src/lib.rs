//! barapp core library
//!
//! Models and persistence for the bar inventory: drinks, ingredients and
//! users, each kept as one JSON collection in a key-value store.

pub mod collection;
pub mod id;
pub mod models;
pub mod repository;
pub mod storage;
pub mod store;
pub mod validation;

pub use collection::Collection;
pub use id::{IdGenerator, IdScheme, TimestampIds, UuidIds};
pub use models::{Drink, Ingredient, Record, User};
pub use repository::{Inventory, Repository, RepositoryError};
pub use storage::{CollectionKey, FileStore, KeyValueStore, MemoryStore, StorageError};
pub use store::{CollectionStore, LoadPolicy, StoreError};
pub use validation::ValidationError;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
