//! Ordered, id-keyed sequences of records.

use serde::{Deserialize, Serialize};

use crate::id::IdGenerator;
use crate::models::Record;
use crate::validation::ValidationError;

/// Draws allowed per insert before giving up on the id generator.
const MAX_ID_ATTEMPTS: usize = 64;

/// Every record of one kind, in insertion order.
///
/// Operations return a new collection and leave `self` untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Collection<R> {
    records: Vec<R>,
}

impl<R> Default for Collection<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R> Collection<R> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[R] {
        &self.records
    }
}

impl<R: Record> Collection<R> {
    /// Builds a collection from records that already carry ids.
    pub fn from_records(records: Vec<R>) -> Self {
        Self { records }
    }

    pub fn get(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|r| r.id() == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Looks a record up by exact id, then by case-insensitive name.
    pub fn find(&self, identifier: &str) -> Option<&R> {
        self.get(identifier).or_else(|| {
            let wanted = identifier.to_lowercase();
            self.records
                .iter()
                .find(|r| r.name().to_lowercase() == wanted)
        })
    }

    /// Replaces the record with a matching id, or appends `record` under a
    /// freshly generated id.
    ///
    /// The record is validated first; on failure nothing changes. Returns the
    /// new collection and the record as stored.
    pub fn upsert(
        &self,
        mut record: R,
        ids: &dyn IdGenerator,
    ) -> Result<(Self, R), ValidationError> {
        record.validate()?;

        let mut records = self.records.clone();
        match records.iter().position(|r| r.id() == record.id()) {
            Some(index) if !record.id().is_empty() => {
                records[index] = record.clone();
            }
            _ => {
                record.set_id(self.fresh_id(ids)?);
                records.push(record.clone());
            }
        }

        Ok((Self { records }, record))
    }

    /// Returns the collection without the record whose id matches. Unknown
    /// ids leave it unchanged.
    pub fn remove(&self, id: &str) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|r| r.id() != id)
                .cloned()
                .collect(),
        }
    }

    /// Draws ids until one is non-empty and not already taken in this
    /// collection.
    fn fresh_id(&self, ids: &dyn IdGenerator) -> Result<String, ValidationError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = ids.next_id();
            if !id.is_empty() && !self.contains(&id) {
                return Ok(id);
            }
        }
        Err(ValidationError::IdsExhausted {
            attempts: MAX_ID_ATTEMPTS,
        })
    }

    /// Finds the first problem that makes decoded data unusable: a blank id
    /// or an id used twice.
    pub(crate) fn integrity_error(&self) -> Option<String> {
        let mut seen = std::collections::HashSet::new();
        for (index, record) in self.records.iter().enumerate() {
            if record.id().is_empty() {
                return Some(format!("record {} has an empty id", index));
            }
            if !seen.insert(record.id()) {
                return Some(format!("duplicate id {}", record.id()));
            }
        }
        None
    }
}

impl<'a, R> IntoIterator for &'a Collection<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
