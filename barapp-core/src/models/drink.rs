use serde::{Deserialize, Serialize};
use std::fmt;

use super::Record;
use crate::storage::CollectionKey;
use crate::validation::{require_trimmed, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Drink {
    pub id: String,
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "descricao")]
    pub description: String,
    #[serde(alias = "preparo", default, skip_serializing_if = "Option::is_none")]
    pub preparation: Option<String>,
}

impl Drink {
    /// Builds a drink without an id; one is assigned when it is first stored.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            description: description.into(),
            preparation: None,
        }
    }

    pub fn with_preparation(mut self, preparation: impl Into<String>) -> Self {
        self.preparation = Some(preparation.into());
        self
    }
}

impl Record for Drink {
    const COLLECTION: CollectionKey = CollectionKey::Drinks;

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
        require_trimmed("Drink", "name", &self.name)?;
        require_trimmed("Drink", "description", &self.description)
    }
}

impl fmt::Display for Drink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count()))?;
        writeln!(f, "ID: {}", self.id)?;

        writeln!(f, "\nDescription:\n{}", self.description)?;

        if let Some(preparation) = &self.preparation {
            if !preparation.is_empty() {
                writeln!(f, "\nPreparation:\n{}", preparation)?;
            }
        }

        Ok(())
    }
}
