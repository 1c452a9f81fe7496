//! Message schemas: the runtime type system for dynamic messages.
//!
//! A `MessageSchema` is the resolved form of one textual definition: an
//! ordered list of named, typed fields. Schemas are immutable once built
//! and shared behind `Arc`, so every container bound to a type name works
//! against the identical schema object.

use std::sync::Arc;

use crate::error::DynamicError;

/// The closed set of primitive field kinds.
///
/// Definition keywords map onto variants via `FromStr`; the legacy ROS
/// aliases `byte` and `char` parse to `Int8` and `Uint8` and render with
/// their canonical names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
pub enum PrimitiveType {
    #[strum(serialize = "bool")]
    Bool,
    #[strum(to_string = "int8", serialize = "byte")]
    Int8,
    #[strum(serialize = "int16")]
    Int16,
    #[strum(serialize = "int32")]
    Int32,
    #[strum(serialize = "int64")]
    Int64,
    #[strum(to_string = "uint8", serialize = "char")]
    Uint8,
    #[strum(serialize = "uint16")]
    Uint16,
    #[strum(serialize = "uint32")]
    Uint32,
    #[strum(serialize = "uint64")]
    Uint64,
    #[strum(serialize = "float32")]
    Float32,
    #[strum(serialize = "float64")]
    Float64,
    #[strum(serialize = "string")]
    String,
    #[strum(serialize = "time")]
    Time,
    #[strum(serialize = "duration")]
    Duration,
}

impl PrimitiveType {
    /// Fixed encoded width in bytes, or `None` for string.
    ///
    /// Time and duration occupy 8 bytes: two consecutive 4-byte unsigned
    /// fields, seconds then nanoseconds.
    pub fn wire_width(self) -> Option<usize> {
        match self {
            Self::Bool | Self::Int8 | Self::Uint8 => Some(1),
            Self::Int16 | Self::Uint16 => Some(2),
            Self::Int32 | Self::Uint32 | Self::Float32 => Some(4),
            Self::Int64 | Self::Uint64 | Self::Float64 => Some(8),
            Self::Time | Self::Duration => Some(8),
            Self::String => None,
        }
    }
}

/// How many values a field holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Scalar,
    /// Array whose element count travels in the stream.
    Variable,
    /// Array whose element count is fixed by the definition.
    Fixed(usize),
}

/// A field's declared type.
///
/// Nested references hold fully resolved schemas, never placeholders: a
/// schema is only built once every type it mentions has been resolved.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Primitive(PrimitiveType),
    Message(Arc<MessageSchema>),
}

impl FieldType {
    /// Human-readable label used in error messages.
    pub fn label(&self) -> String {
        match self {
            FieldType::Primitive(kind) => kind.to_string(),
            FieldType::Message(schema) => schema.type_name.clone(),
        }
    }
}

/// One field declaration within a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSchema {
    pub name: String,
    pub field_type: FieldType,
    pub arity: Arity,
}

/// The resolved schema for one message type.
///
/// Field order is declaration order and therefore wire order.
#[derive(Debug, PartialEq)]
pub struct MessageSchema {
    /// Package-qualified type name, e.g. `std_msgs/Int32`.
    pub type_name: String,
    pub fields: Vec<FieldSchema>,
}

impl MessageSchema {
    /// Create a schema builder for the given type name.
    pub fn builder(type_name: impl Into<String>) -> MessageSchemaBuilder {
        MessageSchemaBuilder {
            type_name: type_name.into(),
            fields: Vec::new(),
        }
    }

    /// The package part of the type name.
    pub fn package(&self) -> &str {
        self.type_name.split('/').next().unwrap_or("")
    }

    /// The unqualified type name.
    pub fn short_name(&self) -> &str {
        self.type_name.rsplit('/').next().unwrap_or("")
    }

    /// Look up a field declaration by name.
    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Lower bound on the encoded size of an instance, used as a buffer
    /// capacity hint. Strings and variable arrays contribute only their
    /// 4-byte length prefix.
    pub fn encoded_size_hint(&self) -> usize {
        self.fields
            .iter()
            .map(|f| {
                let scalar = match &f.field_type {
                    FieldType::Primitive(kind) => kind.wire_width().unwrap_or(4),
                    FieldType::Message(schema) => schema.encoded_size_hint(),
                };
                match f.arity {
                    Arity::Scalar => scalar,
                    Arity::Variable => 4,
                    Arity::Fixed(n) => n * scalar,
                }
            })
            .sum()
    }
}

/// Split a `package/Type` name, failing when the shape is wrong.
pub fn split_type_name(type_name: &str) -> Result<(&str, &str), DynamicError> {
    match type_name.split_once('/') {
        Some((package, name))
            if !package.is_empty() && !name.is_empty() && !name.contains('/') =>
        {
            Ok((package, name))
        }
        _ => Err(DynamicError::InvalidTypeName(type_name.to_owned())),
    }
}

/// Builder for `MessageSchema`.
pub struct MessageSchemaBuilder {
    type_name: String,
    fields: Vec<FieldSchema>,
}

impl MessageSchemaBuilder {
    /// Append a field declaration. Declaration order is wire order.
    pub fn field(
        mut self,
        name: impl Into<String>,
        field_type: FieldType,
        arity: Arity,
    ) -> Self {
        self.fields.push(FieldSchema {
            name: name.into(),
            field_type,
            arity,
        });
        self
    }

    /// Validate and build the schema.
    pub fn build(self) -> Result<Arc<MessageSchema>, DynamicError> {
        split_type_name(&self.type_name)?;
        Ok(Arc::new(MessageSchema {
            type_name: self.type_name,
            fields: self.fields,
        }))
    }
}
