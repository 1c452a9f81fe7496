//! Error types for dynamic message handling.

use std::fmt;

/// Errors that can occur while parsing, resolving, populating, or
/// round-tripping dynamic messages.
#[derive(Debug)]
pub enum DynamicError {
    /// The provider has no definition text for the requested type name
    DefinitionNotFound(String),

    /// Malformed definition text
    Parse {
        type_name: String,
        line: usize,
        reason: String,
    },

    /// Resolution of a type transitively depends on itself
    CyclicDefinition(String),

    /// Type name does not have the `package/Type` shape
    InvalidTypeName(String),

    /// Field name not declared by the bound schema
    UnknownField { type_name: String, field: String },

    /// Value kind does not match the declared field type
    TypeMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// Scalar/array shape or fixed-array length does not match the declaration
    ArityMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// Field read before any value was stored
    UnsetField { type_name: String, field: String },

    /// Message cannot be encoded
    Serialization(String),

    /// Input ended before the schema was fully decoded
    TruncatedData { needed: usize, remaining: usize },

    /// Input bytes are structurally invalid
    Deserialization(String),
}

impl fmt::Display for DynamicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DynamicError::DefinitionNotFound(name) => {
                write!(f, "no definition found for type '{}'", name)
            }
            DynamicError::Parse {
                type_name,
                line,
                reason,
            } => {
                write!(f, "failed to parse '{}' at line {}: {}", type_name, line, reason)
            }
            DynamicError::CyclicDefinition(name) => {
                write!(f, "definition of '{}' depends on itself", name)
            }
            DynamicError::InvalidTypeName(name) => {
                write!(
                    f,
                    "invalid type name '{}': expected format 'package/Type'",
                    name
                )
            }
            DynamicError::UnknownField { type_name, field } => {
                write!(f, "type '{}' has no field '{}'", type_name, field)
            }
            DynamicError::TypeMismatch {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "type mismatch on field '{}': expected {}, got {}",
                    field, expected, actual
                )
            }
            DynamicError::ArityMismatch {
                field,
                expected,
                actual,
            } => {
                write!(
                    f,
                    "arity mismatch on field '{}': expected {}, got {}",
                    field, expected, actual
                )
            }
            DynamicError::UnsetField { type_name, field } => {
                write!(f, "field '{}' of '{}' has no value set", field, type_name)
            }
            DynamicError::Serialization(msg) => {
                write!(f, "serialization error: {}", msg)
            }
            DynamicError::TruncatedData { needed, remaining } => {
                write!(
                    f,
                    "truncated input: needed {} bytes, {} remaining",
                    needed, remaining
                )
            }
            DynamicError::Deserialization(msg) => {
                write!(f, "deserialization error: {}", msg)
            }
        }
    }
}

impl std::error::Error for DynamicError {}

impl From<ros_dyn_wire::Error> for DynamicError {
    fn from(e: ros_dyn_wire::Error) -> Self {
        match e {
            ros_dyn_wire::Error::UnexpectedEof { needed, remaining } => {
                DynamicError::TruncatedData { needed, remaining }
            }
            other => DynamicError::Deserialization(other.to_string()),
        }
    }
}
