//! Field schemas used for safety checks and client code generation.

use std::collections::{BTreeMap, HashMap};

use super::{AllowMessage, DtoMessage};

/// Wire type of a message field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    Number,
    String,
    Boolean,
    Array(Box<FieldType>),
    Record(Box<FieldType>, Box<FieldType>),
    /// Nested message. Its fields are resolved on demand, so a message may
    /// contain itself.
    Message(MessageRef),
}

impl FieldType {
    /// Nested messages reachable from this field type.
    pub fn nested_messages(&self) -> Vec<&MessageRef> {
        match self {
            FieldType::Number | FieldType::String | FieldType::Boolean => Vec::new(),
            FieldType::Array(inner) => inner.nested_messages(),
            FieldType::Record(key, value) => {
                let mut nested = key.nested_messages();
                nested.extend(value.nested_messages());
                nested
            }
            FieldType::Message(message) => vec![message],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageField {
    /// Key on the wire and in the generated interface.
    pub name: &'static str,
    pub ty: FieldType,
}

impl MessageField {
    pub fn new(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }
}

/// Static description of one message type.
#[derive(Debug, Clone, PartialEq)]
pub struct MessageSchema {
    pub package: &'static str,
    pub name: &'static str,
    pub type_id: &'static str,
    pub fields: Vec<MessageField>,
}

impl MessageSchema {
    pub fn allow(&self) -> AllowMessage {
        AllowMessage::new(self.package, self.name)
    }

    pub fn full_name(&self) -> String {
        self.allow().full_name()
    }
}

/// Identity of a nested message plus a way to build its fields.
#[derive(Debug, Clone, Copy)]
pub struct MessageRef {
    pub package: &'static str,
    pub name: &'static str,
    pub type_id: &'static str,
    pub fields: fn() -> Vec<MessageField>,
}

impl MessageRef {
    pub fn new(
        package: &'static str,
        name: &'static str,
        type_id: &'static str,
        fields: fn() -> Vec<MessageField>,
    ) -> Self {
        Self {
            package,
            name,
            type_id,
            fields,
        }
    }

    pub fn of<M: DtoMessage>() -> Self {
        Self::new(M::PACKAGE, M::NAME, M::TYPE_ID, M::fields)
    }

    pub fn allow(&self) -> AllowMessage {
        AllowMessage::new(self.package, self.name)
    }

    pub fn full_name(&self) -> String {
        self.allow().full_name()
    }

    /// Builds the full schema. Nested messages stay references.
    pub fn schema(&self) -> MessageSchema {
        MessageSchema {
            package: self.package,
            name: self.name,
            type_id: self.type_id,
            fields: (self.fields)(),
        }
    }
}

// Two references are equal when they name the same message.
impl PartialEq for MessageRef {
    fn eq(&self, other: &Self) -> bool {
        self.package == other.package && self.name == other.name && self.type_id == other.type_id
    }
}

/// Maps a Rust field type onto its wire type.
pub trait DtoField {
    fn field_type() -> FieldType;
}

macro_rules! number_fields {
    ($($ty:ty),*) => {
        $(
            impl DtoField for $ty {
                fn field_type() -> FieldType {
                    FieldType::Number
                }
            }
        )*
    };
}

number_fields!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl DtoField for String {
    fn field_type() -> FieldType {
        FieldType::String
    }
}

impl DtoField for bool {
    fn field_type() -> FieldType {
        FieldType::Boolean
    }
}

impl<T: DtoField> DtoField for Vec<T> {
    fn field_type() -> FieldType {
        FieldType::Array(Box::new(T::field_type()))
    }
}

impl<K: DtoField, V: DtoField> DtoField for HashMap<K, V> {
    fn field_type() -> FieldType {
        FieldType::Record(Box::new(K::field_type()), Box::new(V::field_type()))
    }
}

impl<K: DtoField, V: DtoField> DtoField for BTreeMap<K, V> {
    fn field_type() -> FieldType {
        FieldType::Record(Box::new(K::field_type()), Box::new(V::field_type()))
    }
}
