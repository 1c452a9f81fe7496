//! Recursive definition resolution.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::error::DynamicError;
use crate::parser::{self, ParsedDefinition, ParsedFieldType};
use crate::provider::DefinitionProvider;
use crate::registry::SchemaRegistry;
use crate::schema::{FieldType, MessageSchema, split_type_name};

/// Resolves type names to immutable shared schemas.
///
/// Definition text comes from the provider; results are memoized in the
/// registry for the lifetime of the resolver, so every container built
/// for a type name shares the identical schema object. A failed
/// resolution leaves nothing behind: partially built schemas are never
/// cached, and a later `resolve` after fixing the provider succeeds.
pub struct DefinitionResolver {
    provider: Arc<dyn DefinitionProvider>,
    registry: SchemaRegistry,
}

impl DefinitionResolver {
    pub fn new(provider: Arc<dyn DefinitionProvider>) -> Self {
        Self {
            provider,
            registry: SchemaRegistry::new(),
        }
    }

    /// The schema cache.
    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Resolve a type name to its schema, parsing and recursively
    /// resolving nested references on a cache miss.
    pub fn resolve(&self, type_name: &str) -> Result<Arc<MessageSchema>, DynamicError> {
        // The in-progress set is scoped to this top-level call, so
        // concurrent resolutions of one type from different threads race
        // benignly instead of reporting a false cycle.
        let mut in_progress = HashSet::new();
        self.resolve_inner(type_name, &mut in_progress)
    }

    fn resolve_inner(
        &self,
        type_name: &str,
        in_progress: &mut HashSet<String>,
    ) -> Result<Arc<MessageSchema>, DynamicError> {
        split_type_name(type_name)?;

        if let Some(schema) = self.registry.get(type_name) {
            debug!("schema cache hit for {}", type_name);
            return Ok(schema);
        }

        // Explicit in-progress tracking turns a self-referential
        // definition chain into a clean error instead of unbounded
        // recursion.
        if !in_progress.insert(type_name.to_owned()) {
            return Err(DynamicError::CyclicDefinition(type_name.to_owned()));
        }

        debug!("resolving definition for {}", type_name);
        let source = self.provider.lookup(type_name)?;
        let ParsedDefinition {
            package, fields, ..
        } = parser::parse(type_name, &source)?;

        let mut builder = MessageSchema::builder(type_name);
        for field in fields {
            let field_type = match field.field_type {
                ParsedFieldType::Primitive(kind) => FieldType::Primitive(kind),
                ParsedFieldType::Reference(reference) => {
                    let nested_name = qualify(&reference, &package);
                    let nested = self.resolve_inner(&nested_name, in_progress)?;
                    FieldType::Message(nested)
                }
            };
            builder = builder.field(field.name, field_type, field.arity);
        }
        let schema = builder.build()?;

        in_progress.remove(type_name);
        Ok(self.registry.insert(schema))
    }
}

/// Qualify a type reference against the package of the enclosing
/// definition. Already-qualified references pass through unchanged.
fn qualify(reference: &str, package: &str) -> String {
    if reference.contains('/') {
        reference.to_owned()
    } else {
        format!("{}/{}", package, reference)
    }
}
