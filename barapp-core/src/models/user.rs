use serde::{Deserialize, Serialize};
use std::fmt;

use super::Record;
use crate::storage::CollectionKey;
use crate::validation::{require_present, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: String,
    #[serde(alias = "nome")]
    pub name: String,
    pub email: String,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            email: email.into(),
        }
    }
}

impl Record for User {
    const COLLECTION: CollectionKey = CollectionKey::Users;

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn name(&self) -> &str {
        &self.name
    }

    // No format check on email.
    fn validate(&self) -> Result<(), ValidationError> {
        require_present("User", "name", &self.name)?;
        require_present("User", "email", &self.email)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.email)
    }
}
