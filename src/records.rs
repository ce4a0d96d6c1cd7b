//! Generic record-set engine.
//!
//! All four entity kinds share the same mechanics (integer identity, CRUD,
//! free-text search); only the field schema differs. `RecordSet` carries the
//! shared mechanics, the `Record` trait supplies the per-entity parts.

use crate::error::{Result, StoreError};
use crate::types::RecordId;
use serde::{Deserialize, Serialize};

/// A record that can live in a [`RecordSet`].
pub trait Record: Clone {
    /// The identifier assigned by the set.
    fn id(&self) -> RecordId;

    /// Overwrite the identifier. Called once, at insert.
    fn set_id(&mut self, id: RecordId);

    /// True if any searchable field contains `needle`.
    ///
    /// `needle` is already lowercased; implementations lowercase their own
    /// fields before matching.
    fn matches(&self, needle: &str) -> bool;
}

/// An ordered collection of records of one kind.
///
/// Records keep insertion order, which is the order `list` and `search`
/// produce. Serializes as a bare array, matching the backing document shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordSet<T> {
    records: Vec<T>,
}

impl<T> Default for RecordSet<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<T: Record> RecordSet<T> {
    /// Next identifier to assign: `max(current ids) + 1`, or 1 when empty.
    ///
    /// This is a scan, not a counter. Deleting the record with the highest
    /// id makes that numeric id available again; callers relying on id
    /// ordering for "most recent" semantics get exactly that behavior.
    pub fn next_id(&self) -> RecordId {
        RecordId(self.records.iter().map(|r| r.id().0).max().unwrap_or(0) + 1)
    }

    /// Insert a record, assigning its id. Returns the assigned id.
    pub fn insert(&mut self, mut record: T) -> RecordId {
        let id = self.next_id();
        record.set_id(id);
        self.records.push(record);
        id
    }

    /// Replace every field of the record with matching id, keeping the id.
    pub fn update(&mut self, id: RecordId, mut record: T) -> Result<()> {
        let slot = self
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        record.set_id(id);
        *slot = record;
        Ok(())
    }

    /// Remove and return the record with matching id.
    pub fn remove(&mut self, id: RecordId) -> Result<T> {
        let position = self
            .records
            .iter()
            .position(|r| r.id() == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.records.remove(position))
    }

    /// Get a record by id.
    pub fn get(&self, id: RecordId) -> Option<&T> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// True if a record with this id exists.
    pub fn contains(&self, id: RecordId) -> bool {
        self.get(id).is_some()
    }

    /// All records, in insertion order.
    pub fn list(&self) -> Vec<T> {
        self.records.clone()
    }

    /// Records whose searchable fields contain `query`, case-insensitively.
    ///
    /// A single free-text token matched whole against each field (OR across
    /// fields, no tokenization). The empty query returns everything.
    pub fn search(&self, query: &str) -> Vec<T> {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return self.list();
        }
        self.records
            .iter()
            .filter(|r| r.matches(&needle))
            .cloned()
            .collect()
    }

    /// Iterate over the records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.records.iter()
    }

    /// Number of records in the set.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if the set holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
