use serde::{Deserialize, Serialize};
use std::fmt;

use super::Record;
use crate::storage::CollectionKey;
use crate::validation::{require_positive, require_trimmed, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ingredient {
    pub id: String,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "quantidade")]
    pub quantity: f64,
    #[serde(alias = "unidade")]
    pub unit: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: f64, unit: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            quantity,
            unit: unit.into(),
        }
    }
}

impl Record for Ingredient {
    const COLLECTION: CollectionKey = CollectionKey::Ingredients;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self) -> Result<(), ValidationError> {
        require_trimmed("Ingredient", "name", &self.name)?;
        require_positive(self.quantity)?;
        require_trimmed("Ingredient", "unit", &self.unit)
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.quantity, self.unit, self.name)
    }
}
