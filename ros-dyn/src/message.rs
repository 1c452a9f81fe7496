//! Dynamic message container bound to a resolved schema.
//!
//! `DynamicMessage` stores field values positionally, aligned with its
//! schema's declaration order. A slot holds `None` until a setter stores
//! a value, so an unset field is distinguishable from a zero value. Every
//! access is validated against the bound schema; the container can never
//! hold a name absent from it.

use std::sync::Arc;

use crate::error::DynamicError;
use crate::schema::{Arity, FieldSchema, FieldType, MessageSchema, PrimitiveType};
use crate::value::{Duration, DynamicValue, Time};

/// A message instance whose type is determined at runtime.
#[derive(Debug, Clone)]
pub struct DynamicMessage {
    schema: Arc<MessageSchema>,
    values: Vec<Option<DynamicValue>>,
}

impl DynamicMessage {
    /// Create a new message with all fields unset.
    pub fn new(schema: &Arc<MessageSchema>) -> Self {
        Self {
            schema: Arc::clone(schema),
            values: vec![None; schema.fields.len()],
        }
    }

    /// Create a message from pre-computed values (used by the decoder).
    pub(crate) fn from_values(schema: &Arc<MessageSchema>, values: Vec<DynamicValue>) -> Self {
        debug_assert_eq!(values.len(), schema.fields.len());
        Self {
            schema: Arc::clone(schema),
            values: values.into_iter().map(Some).collect(),
        }
    }

    /// The type name this message is bound to.
    pub fn identifier(&self) -> &str {
        &self.schema.type_name
    }

    /// The bound schema.
    pub fn schema(&self) -> &MessageSchema {
        &self.schema
    }

    /// The bound schema as a shared handle.
    pub fn schema_arc(&self) -> Arc<MessageSchema> {
        Arc::clone(&self.schema)
    }

    /// True once every field of the schema has a value.
    pub fn is_fully_set(&self) -> bool {
        self.values.iter().all(|v| v.is_some())
    }

    pub(crate) fn raw_values(&self) -> &[Option<DynamicValue>] {
        &self.values
    }

    fn field_index(&self, name: &str) -> Result<usize, DynamicError> {
        self.schema
            .fields
            .iter()
            .position(|f| f.name == name)
            .ok_or_else(|| DynamicError::UnknownField {
                type_name: self.schema.type_name.clone(),
                field: name.to_owned(),
            })
    }

    /// Borrow the stored value for a field.
    pub fn value(&self, name: &str) -> Result<&DynamicValue, DynamicError> {
        let idx = self.field_index(name)?;
        self.values[idx]
            .as_ref()
            .ok_or_else(|| DynamicError::UnsetField {
                type_name: self.schema.type_name.clone(),
                field: name.to_owned(),
            })
    }

    /// Store a value for a field, validating shape and kind against the
    /// declaration. Overwrites any prior value.
    pub fn set_value(&mut self, name: &str, value: DynamicValue) -> Result<(), DynamicError> {
        let idx = self.field_index(name)?;
        check_value(&self.schema.fields[idx], &value)?;
        self.values[idx] = Some(value);
        Ok(())
    }
}

impl PartialEq for DynamicMessage {
    fn eq(&self, other: &Self) -> bool {
        // Identifier plus stored values; buffer/cursor state never
        // participates.
        self.schema.type_name == other.schema.type_name && self.values == other.values
    }
}

/// Validate a value against a field declaration: shape first, then
/// element kind.
fn check_value(field: &FieldSchema, value: &DynamicValue) -> Result<(), DynamicError> {
    match (field.arity, value) {
        (Arity::Scalar, DynamicValue::Array(_)) => Err(arity_mismatch(field, "scalar", "array")),
        (Arity::Scalar, v) => check_element(field, v),
        (Arity::Variable, DynamicValue::Array(items)) => {
            items.iter().try_for_each(|v| check_element(field, v))
        }
        (Arity::Fixed(n), DynamicValue::Array(items)) => {
            if items.len() != n {
                return Err(arity_mismatch(
                    field,
                    &format!("{} elements", n),
                    &format!("{} elements", items.len()),
                ));
            }
            items.iter().try_for_each(|v| check_element(field, v))
        }
        (Arity::Variable | Arity::Fixed(_), _) => Err(arity_mismatch(field, "array", "scalar")),
    }
}

fn check_element(field: &FieldSchema, value: &DynamicValue) -> Result<(), DynamicError> {
    match &field.field_type {
        FieldType::Primitive(kind) if value.primitive_type() == Some(*kind) => Ok(()),
        FieldType::Primitive(kind) => Err(DynamicError::TypeMismatch {
            field: field.name.clone(),
            expected: kind.to_string(),
            actual: value.type_label().to_owned(),
        }),
        FieldType::Message(schema) => match value {
            DynamicValue::Message(msg) if msg.identifier() == schema.type_name => Ok(()),
            DynamicValue::Message(msg) => Err(DynamicError::TypeMismatch {
                field: field.name.clone(),
                expected: schema.type_name.clone(),
                actual: msg.identifier().to_owned(),
            }),
            v => Err(DynamicError::TypeMismatch {
                field: field.name.clone(),
                expected: schema.type_name.clone(),
                actual: v.type_label().to_owned(),
            }),
        },
    }
}

fn arity_mismatch(field: &FieldSchema, expected: &str, actual: &str) -> DynamicError {
    DynamicError::ArityMismatch {
        field: field.name.clone(),
        expected: expected.to_owned(),
        actual: actual.to_owned(),
    }
}

/// Macro to generate the typed accessor family for one copyable
/// primitive kind.
macro_rules! impl_scalar_accessors {
    ($(($ty:ty, $variant:ident, $set:ident, $get:ident, $set_list:ident, $get_list:ident)),* $(,)?) => {
        impl DynamicMessage {
            $(
                pub fn $set(&mut self, name: &str, value: $ty) -> Result<(), DynamicError> {
                    self.set_value(name, DynamicValue::$variant(value))
                }

                pub fn $set_list(
                    &mut self,
                    name: &str,
                    values: Vec<$ty>,
                ) -> Result<(), DynamicError> {
                    self.set_value(
                        name,
                        DynamicValue::Array(
                            values.into_iter().map(DynamicValue::$variant).collect(),
                        ),
                    )
                }

                pub fn $get(&self, name: &str) -> Result<$ty, DynamicError> {
                    match self.value(name)? {
                        DynamicValue::$variant(v) => Ok(*v),
                        v => Err(DynamicError::TypeMismatch {
                            field: name.to_owned(),
                            expected: PrimitiveType::$variant.to_string(),
                            actual: v.type_label().to_owned(),
                        }),
                    }
                }

                pub fn $get_list(&self, name: &str) -> Result<Vec<$ty>, DynamicError> {
                    let items = match self.value(name)? {
                        DynamicValue::Array(items) => items,
                        v => {
                            return Err(DynamicError::TypeMismatch {
                                field: name.to_owned(),
                                expected: format!("{}[]", PrimitiveType::$variant),
                                actual: v.type_label().to_owned(),
                            });
                        }
                    };
                    items
                        .iter()
                        .map(|item| match item {
                            DynamicValue::$variant(v) => Ok(*v),
                            v => Err(DynamicError::TypeMismatch {
                                field: name.to_owned(),
                                expected: format!("{}[]", PrimitiveType::$variant),
                                actual: v.type_label().to_owned(),
                            }),
                        })
                        .collect()
                }
            )*
        }
    };
}

impl_scalar_accessors! {
    (bool, Bool, set_bool, get_bool, set_bool_list, get_bool_list),
    (i8, Int8, set_int8, get_int8, set_int8_list, get_int8_list),
    (i16, Int16, set_int16, get_int16, set_int16_list, get_int16_list),
    (i32, Int32, set_int32, get_int32, set_int32_list, get_int32_list),
    (i64, Int64, set_int64, get_int64, set_int64_list, get_int64_list),
    (u8, Uint8, set_uint8, get_uint8, set_uint8_list, get_uint8_list),
    (u16, Uint16, set_uint16, get_uint16, set_uint16_list, get_uint16_list),
    (u32, Uint32, set_uint32, get_uint32, set_uint32_list, get_uint32_list),
    (u64, Uint64, set_uint64, get_uint64, set_uint64_list, get_uint64_list),
    (f32, Float32, set_float32, get_float32, set_float32_list, get_float32_list),
    (f64, Float64, set_float64, get_float64, set_float64_list, get_float64_list),
    (Time, Time, set_time, get_time, set_time_list, get_time_list),
    (Duration, Duration, set_duration, get_duration, set_duration_list, get_duration_list),
}

impl DynamicMessage {
    pub fn set_string(
        &mut self,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DynamicError> {
        self.set_value(name, DynamicValue::String(value.into()))
    }

    pub fn set_string_list(
        &mut self,
        name: &str,
        values: Vec<String>,
    ) -> Result<(), DynamicError> {
        self.set_value(
            name,
            DynamicValue::Array(values.into_iter().map(DynamicValue::String).collect()),
        )
    }

    pub fn get_string(&self, name: &str) -> Result<String, DynamicError> {
        match self.value(name)? {
            DynamicValue::String(v) => Ok(v.clone()),
            v => Err(DynamicError::TypeMismatch {
                field: name.to_owned(),
                expected: PrimitiveType::String.to_string(),
                actual: v.type_label().to_owned(),
            }),
        }
    }

    pub fn get_string_list(&self, name: &str) -> Result<Vec<String>, DynamicError> {
        let items = match self.value(name)? {
            DynamicValue::Array(items) => items,
            v => {
                return Err(DynamicError::TypeMismatch {
                    field: name.to_owned(),
                    expected: "string[]".to_owned(),
                    actual: v.type_label().to_owned(),
                });
            }
        };
        items
            .iter()
            .map(|item| match item {
                DynamicValue::String(v) => Ok(v.clone()),
                v => Err(DynamicError::TypeMismatch {
                    field: name.to_owned(),
                    expected: "string[]".to_owned(),
                    actual: v.type_label().to_owned(),
                }),
            })
            .collect()
    }

    pub fn set_message(&mut self, name: &str, value: DynamicMessage) -> Result<(), DynamicError> {
        self.set_value(name, DynamicValue::Message(Box::new(value)))
    }

    pub fn set_message_list(
        &mut self,
        name: &str,
        values: Vec<DynamicMessage>,
    ) -> Result<(), DynamicError> {
        self.set_value(
            name,
            DynamicValue::Array(
                values
                    .into_iter()
                    .map(|m| DynamicValue::Message(Box::new(m)))
                    .collect(),
            ),
        )
    }

    pub fn get_message(&self, name: &str) -> Result<DynamicMessage, DynamicError> {
        match self.value(name)? {
            DynamicValue::Message(v) => Ok((**v).clone()),
            v => Err(DynamicError::TypeMismatch {
                field: name.to_owned(),
                expected: "message".to_owned(),
                actual: v.type_label().to_owned(),
            }),
        }
    }

    pub fn get_message_list(&self, name: &str) -> Result<Vec<DynamicMessage>, DynamicError> {
        let items = match self.value(name)? {
            DynamicValue::Array(items) => items,
            v => {
                return Err(DynamicError::TypeMismatch {
                    field: name.to_owned(),
                    expected: "message[]".to_owned(),
                    actual: v.type_label().to_owned(),
                });
            }
        };
        items
            .iter()
            .map(|item| match item {
                DynamicValue::Message(v) => Ok((**v).clone()),
                v => Err(DynamicError::TypeMismatch {
                    field: name.to_owned(),
                    expected: "message[]".to_owned(),
                    actual: v.type_label().to_owned(),
                }),
            })
            .collect()
    }
}
