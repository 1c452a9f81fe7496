//! Packed wire-format primitives for dynamic ROS messages.
//!
//! This crate provides the low-level byte encoding used by the message
//! codec in `ros-dyn`: fixed-width little-endian primitives, booleans as a
//! single 0/1 byte, strings as a 4-byte length prefix followed by raw
//! UTF-8 (no terminator), and 4-byte sequence counts. The format is fully
//! packed; there is no alignment padding between fields.

pub mod error;
pub mod reader;
pub mod writer;

// Re-export byteorder types for convenience
pub use byteorder::{BigEndian, ByteOrder, LittleEndian};
pub use error::{Error, Result};
pub use reader::WireReader;
pub use writer::WireWriter;
