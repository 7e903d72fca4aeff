//! Record Store Module
//! Storage seam used by the admin transfer operations.

use super::entity::EntityKind;
use crate::codec::{Record, Value};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Field holding a record's unique key.
pub const ID_FIELD: &str = "_id";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("duplicate key in {entity}: _id '{id}' already exists")]
    DuplicateKey { entity: EntityKind, id: String },
}

/// Collection storage for the admin tools.
pub trait RecordStore {
    /// Every record of `entity`, in insertion order.
    fn find_all(&self, entity: EntityKind) -> Result<Vec<Record>, StoreError>;

    /// Insert `records` into `entity`, returning how many were inserted.
    fn insert_many(&mut self, entity: EntityKind, records: Vec<Record>)
        -> Result<usize, StoreError>;
}

/// In-memory store keyed by entity.
///
/// Records with a non-empty `_id` must be unique within their collection.
/// A bulk insert containing a duplicate is rejected as a whole.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    collections: HashMap<EntityKind, Vec<Record>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self, entity: EntityKind) -> usize {
        self.collections.get(&entity).map(Vec::len).unwrap_or(0)
    }

    pub fn is_empty(&self, entity: EntityKind) -> bool {
        self.len(entity) == 0
    }
}

fn record_id(record: &Record) -> Option<String> {
    match record.get(ID_FIELD) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.to_string()).filter(|id| !id.is_empty()),
    }
}

impl RecordStore for MemoryStore {
    fn find_all(&self, entity: EntityKind) -> Result<Vec<Record>, StoreError> {
        Ok(self.collections.get(&entity).cloned().unwrap_or_default())
    }

    fn insert_many(
        &mut self,
        entity: EntityKind,
        records: Vec<Record>,
    ) -> Result<usize, StoreError> {
        let collection = self.collections.entry(entity).or_default();
        let mut seen: HashSet<String> = collection.iter().filter_map(record_id).collect();

        for record in &records {
            if let Some(id) = record_id(record) {
                if !seen.insert(id.clone()) {
                    return Err(StoreError::DuplicateKey { entity, id });
                }
            }
        }

        let inserted = records.len();
        collection.extend(records);
        Ok(inserted)
    }
}
