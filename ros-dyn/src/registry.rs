//! Shared cache of resolved message schemas.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::schema::MessageSchema;

/// A cache of resolved schemas keyed by type name.
///
/// Entries are immutable `Arc`s. Insertion is first-write-wins: when two
/// threads race to resolve the same type, both builds are structurally
/// identical and only the first is retained, so the race is benign.
#[derive(Default)]
pub struct SchemaRegistry {
    schemas: Mutex<HashMap<String, Arc<MessageSchema>>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a schema, returning a shared handle on a hit.
    pub fn get(&self, type_name: &str) -> Option<Arc<MessageSchema>> {
        self.schemas.lock().get(type_name).map(Arc::clone)
    }

    /// Insert a schema, returning the retained entry. When an entry for
    /// this type name already exists, it wins and `schema` is dropped.
    pub fn insert(&self, schema: Arc<MessageSchema>) -> Arc<MessageSchema> {
        let mut schemas = self.schemas.lock();
        Arc::clone(schemas.entry(schema.type_name.clone()).or_insert(schema))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.schemas.lock().contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.schemas.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.lock().is_empty()
    }

    /// Snapshot of the cached type names.
    pub fn type_names(&self) -> Vec<String> {
        self.schemas.lock().keys().cloned().collect()
    }

    /// Drop every cached schema.
    pub fn clear(&self) {
        self.schemas.lock().clear();
    }
}
