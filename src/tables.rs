use std::collections::HashMap;

use crate::error::DecodeError;

/// Logical wire-level type of a field, as declared by the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Int32,
    Int64,
    UInt32,
    UInt64,
    SInt32,
    SInt64,
    Bool,
    Fixed64,
    SFixed64,
    Double,
    Fixed32,
    SFixed32,
    Float,
    String,
    Bytes,
    Enum(String),
    Message(String),
}

impl FieldType {
    /// Packable types: everything except the length-delimited ones.
    pub fn is_primitive(&self) -> bool {
        !matches!(
            self,
            FieldType::String | FieldType::Bytes | FieldType::Message(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Required,
    Optional,
    Repeated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    /// Wire field number.
    pub number: u32,
    /// Position of the field's value inside the message; slot 0 is the
    /// message's type tag, so value slots run 1..=len.
    pub slot: usize,
    pub kind: FieldType,
    pub label: Label,
    /// The only option that affects decoding.
    pub packed: bool,
}

// Field numbers below this bound get a dense decode index; anything above
// falls back to a linear scan.
const DENSE_INDEX_LIMIT: u32 = 2048;

#[derive(Debug, Clone)]
pub struct MessageDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
    by_number: Vec<Option<u16>>,
}

impl MessageDescriptor {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        let max_indexed = fields
            .iter()
            .map(|f| f.number)
            .filter(|&n| n < DENSE_INDEX_LIMIT)
            .max();
        let mut by_number = vec![None; max_indexed.map_or(0, |n| n as usize + 1)];
        for (i, field) in fields.iter().enumerate() {
            if field.number < DENSE_INDEX_LIMIT {
                by_number[field.number as usize] = Some(i as u16);
            }
        }
        MessageDescriptor {
            name: name.into(),
            fields,
            by_number,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn field(&self, number: u32) -> Option<&FieldDescriptor> {
        if (number as usize) < self.by_number.len() {
            self.by_number[number as usize].map(|i| &self.fields[i as usize])
        } else if number >= DENSE_INDEX_LIMIT {
            self.fields.iter().find(|f| f.number == number)
        } else {
            None
        }
    }

    /// Number of value slots; slots are contiguous starting at 1.
    pub fn num_slots(&self) -> usize {
        self.fields.iter().map(|f| f.slot).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone)]
pub struct EnumDescriptor {
    name: String,
    by_value: HashMap<i64, String>,
}

impl EnumDescriptor {
    pub fn new<N: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = (N, i64)>,
    ) -> Self {
        EnumDescriptor {
            name: name.into(),
            by_value: values.into_iter().map(|(n, v)| (v, n.into())).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn enumerator(&self, value: i64) -> Result<&str, DecodeError> {
        self.by_value
            .get(&value)
            .map(String::as_str)
            .ok_or_else(|| DecodeError::UnknownEnumerator {
                enum_name: self.name.clone(),
                value,
            })
    }
}

/// The schema table: message and enum definitions keyed by name.
///
/// Built once, read-only afterwards; share it by reference across decode
/// calls and threads.
#[derive(Debug, Clone, Default)]
pub struct DescriptorPool {
    messages: HashMap<String, MessageDescriptor>,
    enums: HashMap<String, EnumDescriptor>,
}

impl DescriptorPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_message(&mut self, desc: MessageDescriptor) {
        self.messages.insert(desc.name.clone(), desc);
    }

    pub fn add_enum(&mut self, desc: EnumDescriptor) {
        self.enums.insert(desc.name.clone(), desc);
    }

    pub fn message(&self, name: &str) -> Result<&MessageDescriptor, DecodeError> {
        self.messages.get(name).ok_or_else(|| DecodeError::NoSuchKey {
            kind: "message",
            name: name.to_string(),
        })
    }

    pub fn enumeration(&self, name: &str) -> Result<&EnumDescriptor, DecodeError> {
        self.enums.get(name).ok_or_else(|| DecodeError::NoSuchKey {
            kind: "enum",
            name: name.to_string(),
        })
    }
}
