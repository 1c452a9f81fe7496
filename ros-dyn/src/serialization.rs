//! Binary encoding and decoding of dynamic messages.
//!
//! Fields are encoded in schema order, packed back to back with no
//! separators or padding, little-endian throughout. Strings carry a
//! 4-byte byte-length prefix and no terminator; time and duration encode
//! as two 4-byte unsigned fields (seconds, nanoseconds); variable arrays
//! carry a 4-byte element count while fixed arrays carry none; nested
//! messages encode inline with no length or type prefix. The stream has
//! no outer length or type tag, so the decoding side must know the type
//! name out of band.

use std::sync::Arc;

use ros_dyn_wire::{LittleEndian, WireReader, WireWriter};

use crate::error::DynamicError;
use crate::message::DynamicMessage;
use crate::schema::{Arity, FieldSchema, FieldType, MessageSchema, PrimitiveType};
use crate::value::{Duration, DynamicValue, Time};

/// Encode a message. Every field of the bound schema must be set.
pub fn serialize(msg: &DynamicMessage) -> Result<Vec<u8>, DynamicError> {
    let mut buffer = Vec::with_capacity(msg.schema().encoded_size_hint());
    let mut writer = WireWriter::<LittleEndian>::new(&mut buffer);
    serialize_message(msg, &mut writer)?;
    Ok(buffer)
}

/// Decode a message of the given schema from `data`.
///
/// Bytes remaining after the last field are accepted and ignored; the
/// wire format carries no end marker or outer length. Callers needing
/// exact consumption must compare lengths themselves.
pub fn deserialize(
    data: &[u8],
    schema: &Arc<MessageSchema>,
) -> Result<DynamicMessage, DynamicError> {
    let mut reader = WireReader::<LittleEndian>::new(data);
    deserialize_message(schema, &mut reader)
}

impl DynamicMessage {
    /// Encode to the packed wire format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, DynamicError> {
        serialize(self)
    }

    /// Decode from the packed wire format.
    pub fn from_bytes(data: &[u8], schema: &Arc<MessageSchema>) -> Result<Self, DynamicError> {
        deserialize(data, schema)
    }
}

fn serialize_message(
    msg: &DynamicMessage,
    writer: &mut WireWriter<'_, LittleEndian>,
) -> Result<(), DynamicError> {
    for (field, slot) in msg.schema().fields.iter().zip(msg.raw_values()) {
        let value = slot.as_ref().ok_or_else(|| {
            DynamicError::Serialization(format!(
                "field '{}' of '{}' is unset",
                field.name,
                msg.identifier()
            ))
        })?;
        serialize_field(field, value, writer)?;
    }
    Ok(())
}

fn serialize_field(
    field: &FieldSchema,
    value: &DynamicValue,
    writer: &mut WireWriter<'_, LittleEndian>,
) -> Result<(), DynamicError> {
    match (field.arity, value) {
        (Arity::Scalar, v) => serialize_scalar(field, v, writer),
        (Arity::Variable, DynamicValue::Array(items)) => {
            writer.write_sequence_length(items.len());
            for item in items {
                serialize_scalar(field, item, writer)?;
            }
            Ok(())
        }
        (Arity::Fixed(n), DynamicValue::Array(items)) => {
            if items.len() != n {
                return Err(DynamicError::ArityMismatch {
                    field: field.name.clone(),
                    expected: format!("{} elements", n),
                    actual: format!("{} elements", items.len()),
                });
            }
            for item in items {
                serialize_scalar(field, item, writer)?;
            }
            Ok(())
        }
        (_, v) => Err(DynamicError::Serialization(format!(
            "field '{}' holds {} where an array was declared",
            field.name,
            v.type_label()
        ))),
    }
}

fn serialize_scalar(
    field: &FieldSchema,
    value: &DynamicValue,
    writer: &mut WireWriter<'_, LittleEndian>,
) -> Result<(), DynamicError> {
    match (&field.field_type, value) {
        (FieldType::Primitive(PrimitiveType::Bool), DynamicValue::Bool(v)) => {
            writer.write_bool(*v)
        }
        (FieldType::Primitive(PrimitiveType::Int8), DynamicValue::Int8(v)) => writer.write_i8(*v),
        (FieldType::Primitive(PrimitiveType::Int16), DynamicValue::Int16(v)) => {
            writer.write_i16(*v)
        }
        (FieldType::Primitive(PrimitiveType::Int32), DynamicValue::Int32(v)) => {
            writer.write_i32(*v)
        }
        (FieldType::Primitive(PrimitiveType::Int64), DynamicValue::Int64(v)) => {
            writer.write_i64(*v)
        }
        (FieldType::Primitive(PrimitiveType::Uint8), DynamicValue::Uint8(v)) => {
            writer.write_u8(*v)
        }
        (FieldType::Primitive(PrimitiveType::Uint16), DynamicValue::Uint16(v)) => {
            writer.write_u16(*v)
        }
        (FieldType::Primitive(PrimitiveType::Uint32), DynamicValue::Uint32(v)) => {
            writer.write_u32(*v)
        }
        (FieldType::Primitive(PrimitiveType::Uint64), DynamicValue::Uint64(v)) => {
            writer.write_u64(*v)
        }
        (FieldType::Primitive(PrimitiveType::Float32), DynamicValue::Float32(v)) => {
            writer.write_f32(*v)
        }
        (FieldType::Primitive(PrimitiveType::Float64), DynamicValue::Float64(v)) => {
            writer.write_f64(*v)
        }
        (FieldType::Primitive(PrimitiveType::String), DynamicValue::String(v)) => {
            writer.write_string(v)
        }
        (FieldType::Primitive(PrimitiveType::Time), DynamicValue::Time(t)) => {
            writer.write_u32(t.secs);
            writer.write_u32(t.nsecs);
        }
        (FieldType::Primitive(PrimitiveType::Duration), DynamicValue::Duration(d)) => {
            writer.write_u32(d.secs);
            writer.write_u32(d.nsecs);
        }
        // Nested messages encode inline with no length or type prefix;
        // both ends already agree on the nested type via the schema.
        (FieldType::Message(_), DynamicValue::Message(nested)) => {
            serialize_message(nested, writer)?;
        }
        (ty, v) => {
            return Err(DynamicError::Serialization(format!(
                "field '{}' holds {} where {} was declared",
                field.name,
                v.type_label(),
                ty.label()
            )));
        }
    }
    Ok(())
}

fn deserialize_message(
    schema: &Arc<MessageSchema>,
    reader: &mut WireReader<'_, LittleEndian>,
) -> Result<DynamicMessage, DynamicError> {
    let mut values = Vec::with_capacity(schema.fields.len());
    for field in &schema.fields {
        values.push(deserialize_field(field, reader)?);
    }
    Ok(DynamicMessage::from_values(schema, values))
}

fn deserialize_field(
    field: &FieldSchema,
    reader: &mut WireReader<'_, LittleEndian>,
) -> Result<DynamicValue, DynamicError> {
    match field.arity {
        Arity::Scalar => deserialize_scalar(&field.field_type, reader),
        Arity::Variable => {
            let len = reader.read_sequence_length()?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(deserialize_scalar(&field.field_type, reader)?);
            }
            Ok(DynamicValue::Array(items))
        }
        Arity::Fixed(len) => {
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(deserialize_scalar(&field.field_type, reader)?);
            }
            Ok(DynamicValue::Array(items))
        }
    }
}

fn deserialize_scalar(
    field_type: &FieldType,
    reader: &mut WireReader<'_, LittleEndian>,
) -> Result<DynamicValue, DynamicError> {
    let value = match field_type {
        FieldType::Primitive(kind) => match kind {
            PrimitiveType::Bool => DynamicValue::Bool(reader.read_bool()?),
            PrimitiveType::Int8 => DynamicValue::Int8(reader.read_i8()?),
            PrimitiveType::Int16 => DynamicValue::Int16(reader.read_i16()?),
            PrimitiveType::Int32 => DynamicValue::Int32(reader.read_i32()?),
            PrimitiveType::Int64 => DynamicValue::Int64(reader.read_i64()?),
            PrimitiveType::Uint8 => DynamicValue::Uint8(reader.read_u8()?),
            PrimitiveType::Uint16 => DynamicValue::Uint16(reader.read_u16()?),
            PrimitiveType::Uint32 => DynamicValue::Uint32(reader.read_u32()?),
            PrimitiveType::Uint64 => DynamicValue::Uint64(reader.read_u64()?),
            PrimitiveType::Float32 => DynamicValue::Float32(reader.read_f32()?),
            PrimitiveType::Float64 => DynamicValue::Float64(reader.read_f64()?),
            PrimitiveType::String => DynamicValue::String(reader.read_string()?),
            PrimitiveType::Time => {
                let secs = reader.read_u32()?;
                let nsecs = reader.read_u32()?;
                DynamicValue::Time(Time { secs, nsecs })
            }
            PrimitiveType::Duration => {
                let secs = reader.read_u32()?;
                let nsecs = reader.read_u32()?;
                DynamicValue::Duration(Duration { secs, nsecs })
            }
        },
        FieldType::Message(nested) => {
            DynamicValue::Message(Box::new(deserialize_message(nested, reader)?))
        }
    };
    Ok(value)
}
