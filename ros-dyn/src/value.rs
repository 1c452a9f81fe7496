//! Runtime representation of message field values.

use crate::message::DynamicMessage;
use crate::schema::PrimitiveType;

/// A point in time: seconds and nanoseconds since the epoch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Time {
    pub secs: u32,
    pub nsecs: u32,
}

impl Time {
    pub fn new(secs: u32, nsecs: u32) -> Self {
        Self { secs, nsecs }
    }
}

/// A span of time: seconds and nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Duration {
    pub secs: u32,
    pub nsecs: u32,
}

impl Duration {
    pub fn new(secs: u32, nsecs: u32) -> Self {
        Self { secs, nsecs }
    }
}

/// Runtime representation of any message field value.
#[derive(Debug, Clone, PartialEq)]
pub enum DynamicValue {
    // Primitives
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    String(String),
    Time(Time),
    Duration(Duration),

    /// Nested message
    Message(Box<DynamicMessage>),

    /// Array field contents (homogeneous)
    Array(Vec<DynamicValue>),
}

/// Macro to generate accessor methods for copyable primitive values.
macro_rules! impl_primitive_accessors {
    ($($method:ident -> $variant:ident : $ty:ty),* $(,)?) => {
        impl DynamicValue {
            $(
                #[doc = concat!("Try to extract as ", stringify!($ty), ".")]
                pub fn $method(&self) -> Option<$ty> {
                    match self {
                        DynamicValue::$variant(v) => Some(*v),
                        _ => None,
                    }
                }
            )*
        }
    };
}

impl_primitive_accessors! {
    as_bool -> Bool: bool,
    as_i8 -> Int8: i8,
    as_i16 -> Int16: i16,
    as_i32 -> Int32: i32,
    as_i64 -> Int64: i64,
    as_u8 -> Uint8: u8,
    as_u16 -> Uint16: u16,
    as_u32 -> Uint32: u32,
    as_u64 -> Uint64: u64,
    as_f32 -> Float32: f32,
    as_f64 -> Float64: f64,
    as_time -> Time: Time,
    as_duration -> Duration: Duration,
}

impl DynamicValue {
    /// Try to extract as a string reference.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            DynamicValue::String(v) => Some(v),
            _ => None,
        }
    }

    /// Try to extract as a nested message reference.
    pub fn as_message(&self) -> Option<&DynamicMessage> {
        match self {
            DynamicValue::Message(v) => Some(v),
            _ => None,
        }
    }

    /// Try to extract as an array reference.
    pub fn as_array(&self) -> Option<&[DynamicValue]> {
        match self {
            DynamicValue::Array(v) => Some(v),
            _ => None,
        }
    }

    /// The primitive kind this value inhabits, if any.
    pub fn primitive_type(&self) -> Option<PrimitiveType> {
        match self {
            DynamicValue::Bool(_) => Some(PrimitiveType::Bool),
            DynamicValue::Int8(_) => Some(PrimitiveType::Int8),
            DynamicValue::Int16(_) => Some(PrimitiveType::Int16),
            DynamicValue::Int32(_) => Some(PrimitiveType::Int32),
            DynamicValue::Int64(_) => Some(PrimitiveType::Int64),
            DynamicValue::Uint8(_) => Some(PrimitiveType::Uint8),
            DynamicValue::Uint16(_) => Some(PrimitiveType::Uint16),
            DynamicValue::Uint32(_) => Some(PrimitiveType::Uint32),
            DynamicValue::Uint64(_) => Some(PrimitiveType::Uint64),
            DynamicValue::Float32(_) => Some(PrimitiveType::Float32),
            DynamicValue::Float64(_) => Some(PrimitiveType::Float64),
            DynamicValue::String(_) => Some(PrimitiveType::String),
            DynamicValue::Time(_) => Some(PrimitiveType::Time),
            DynamicValue::Duration(_) => Some(PrimitiveType::Duration),
            DynamicValue::Message(_) | DynamicValue::Array(_) => None,
        }
    }

    /// Short label for error messages.
    pub fn type_label(&self) -> &'static str {
        match self {
            DynamicValue::Bool(_) => "bool",
            DynamicValue::Int8(_) => "int8",
            DynamicValue::Int16(_) => "int16",
            DynamicValue::Int32(_) => "int32",
            DynamicValue::Int64(_) => "int64",
            DynamicValue::Uint8(_) => "uint8",
            DynamicValue::Uint16(_) => "uint16",
            DynamicValue::Uint32(_) => "uint32",
            DynamicValue::Uint64(_) => "uint64",
            DynamicValue::Float32(_) => "float32",
            DynamicValue::Float64(_) => "float64",
            DynamicValue::String(_) => "string",
            DynamicValue::Time(_) => "time",
            DynamicValue::Duration(_) => "duration",
            DynamicValue::Message(_) => "message",
            DynamicValue::Array(_) => "array",
        }
    }
}
