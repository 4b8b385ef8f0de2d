mod drink;
mod ingredient;
mod user;

pub use drink::Drink;
pub use ingredient::Ingredient;
pub use user::User;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::storage::CollectionKey;
use crate::validation::ValidationError;

/// A flat record stored in one named collection and identified by `id`.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The collection this kind of record lives in.
    const COLLECTION: CollectionKey;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: String);

    /// Display name, also used for case-insensitive lookup.
    fn name(&self) -> &str;

    /// Checks the fields a record needs before it may be stored.
    fn validate(&self) -> Result<(), ValidationError>;
}
