//! Dynamic message support for ROS-style pub/sub messaging.
//!
//! This crate parses textual message definitions, recursively resolves
//! nested type references through a pluggable provider, and round-trips
//! dynamically-typed message instances through the framework's packed
//! little-endian wire format.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌─────────────────┐
//! │ MessageFactory  │────▶│ DefinitionResolver │──▶ DefinitionProvider
//! │ (composition)   │     │ (parse + cache)    │    (definition text)
//! └────────┬────────┘     └────────┬───────────┘
//!          │                       ▼
//!          │              ┌─────────────────┐
//!          │              │  MessageSchema  │ (immutable, Arc-shared)
//!          ▼              └────────┬────────┘
//! ┌─────────────────┐              │
//! │ DynamicMessage  │◀─────────────┘
//! │  (container)    │
//! └────────┬────────┘
//!          ▼
//! ┌─────────────────┐
//! │  serialization  │ (packed little-endian codec)
//! └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ros_dyn::{MessageFactory, StaticProvider, serialization};
//!
//! let provider = Arc::new(StaticProvider::new());
//! provider.add("std_msgs/Int32", "int32 data");
//!
//! let factory = MessageFactory::new(provider);
//! let mut msg = factory.new_from_type("std_msgs/Int32")?;
//! msg.set_int32("data", 42)?;
//!
//! let bytes = serialization::serialize(&msg)?;
//! let decoded = factory.deserialize("std_msgs/Int32", &bytes)?;
//! assert_eq!(decoded, msg);
//! ```

pub mod error;
pub mod factory;
pub mod message;
pub mod parser;
pub mod provider;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod serialization;
pub mod value;

#[cfg(test)]
mod tests;

// Re-export main types
pub use error::DynamicError;
pub use factory::MessageFactory;
pub use message::DynamicMessage;
pub use provider::{DefinitionProvider, StaticProvider};
pub use registry::SchemaRegistry;
pub use resolver::DefinitionResolver;
pub use schema::{
    Arity, FieldSchema, FieldType, MessageSchema, MessageSchemaBuilder, PrimitiveType,
};
pub use serialization::{deserialize, serialize};
pub use value::{Duration, DynamicValue, Time};
