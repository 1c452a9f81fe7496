//! Definition text providers.

use std::collections::HashMap;

use parking_lot::Mutex;

use crate::error::DynamicError;

/// Source of raw definition text, keyed by type name.
///
/// Implementations may read package resources, files, or a network
/// service; the resolver relies only on this synchronous contract and
/// owns no timeout policy.
pub trait DefinitionProvider: Send + Sync {
    /// Fetch the definition text for a type name.
    ///
    /// Fails with `DefinitionNotFound` when the backing store has no
    /// entry for `type_name`.
    fn lookup(&self, type_name: &str) -> Result<String, DynamicError>;
}

/// An in-memory provider backed by explicitly registered definitions.
#[derive(Default)]
pub struct StaticProvider {
    definitions: Mutex<HashMap<String, String>>,
}

impl StaticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the definition text for a type name.
    pub fn add(&self, type_name: impl Into<String>, source: impl Into<String>) {
        self.definitions
            .lock()
            .insert(type_name.into(), source.into());
    }
}

impl DefinitionProvider for StaticProvider {
    fn lookup(&self, type_name: &str) -> Result<String, DynamicError> {
        self.definitions
            .lock()
            .get(type_name)
            .cloned()
            .ok_or_else(|| DynamicError::DefinitionNotFound(type_name.to_owned()))
    }
}
