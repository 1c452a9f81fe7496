//! Composition point for creating and decoding dynamic messages.

use std::sync::Arc;

use crate::error::DynamicError;
use crate::message::DynamicMessage;
use crate::provider::DefinitionProvider;
use crate::resolver::DefinitionResolver;
use crate::serialization;

/// Creates empty containers and decodes payloads for named types.
///
/// The factory owns one resolver (and through it one provider); every
/// message it hands out for a given type name is bound to the same
/// shared schema.
pub struct MessageFactory {
    resolver: DefinitionResolver,
}

impl MessageFactory {
    pub fn new(provider: Arc<dyn DefinitionProvider>) -> Self {
        Self {
            resolver: DefinitionResolver::new(provider),
        }
    }

    /// The underlying resolver.
    pub fn resolver(&self) -> &DefinitionResolver {
        &self.resolver
    }

    /// Resolve `type_name` and return an empty container bound to it.
    pub fn new_from_type(&self, type_name: &str) -> Result<DynamicMessage, DynamicError> {
        let schema = self.resolver.resolve(type_name)?;
        Ok(DynamicMessage::new(&schema))
    }

    /// Resolve `type_name` and decode `data` against its schema.
    ///
    /// Trailing bytes after the last field are ignored; see
    /// [`serialization::deserialize`].
    pub fn deserialize(
        &self,
        type_name: &str,
        data: &[u8],
    ) -> Result<DynamicMessage, DynamicError> {
        let schema = self.resolver.resolve(type_name)?;
        serialization::deserialize(data, &schema)
    }
}
