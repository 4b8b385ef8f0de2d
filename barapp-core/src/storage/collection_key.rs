//! Names of the collections kept in the key-value store.

use std::fmt;

/// Collections that can be stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKey {
    Drinks,
    Ingredients,
    Users,
}

impl CollectionKey {
    /// Returns the storage key for this collection.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKey::Drinks => "drinks",
            CollectionKey::Ingredients => "ingredients",
            CollectionKey::Users => "users",
        }
    }

    /// Singular label used in messages.
    pub fn label(&self) -> &'static str {
        match self {
            CollectionKey::Drinks => "Drink",
            CollectionKey::Ingredients => "Ingredient",
            CollectionKey::Users => "User",
        }
    }
}

impl fmt::Display for CollectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
