use crate::error::DecodeError;
use crate::tables::{DescriptorPool, FieldType, Label};

/// A decoded field value.
///
/// Narrow integer types widen on decode: `int32`/`sint*`/`sfixed*` land
/// in `Int64`, `uint32`/`fixed32` in `UInt64`. Narrowing back is the
/// caller's concern.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Singular field whose wire bytes were absent.
    Unset,
    Int64(i64),
    UInt64(u64),
    Bool(bool),
    Float(f32),
    Double(f64),
    String(String),
    Bytes(Vec<u8>),
    /// Symbolic enumerator name.
    Enum(String),
    Message(DynamicMessage),
    Repeated(Vec<Value>),
}

impl Value {
    pub fn is_unset(&self) -> bool {
        matches!(self, Value::Unset)
    }
}

/// A positional record: the message-type name plus one value per field
/// slot. Callers read results by the descriptor's `slot`.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicMessage {
    name: String,
    slots: Vec<Value>,
}

impl DynamicMessage {
    /// Constructs the all-unset message for `msg_name`: repeated fields
    /// start as empty sequences, singular sub-messages as recursively
    /// constructed empty messages, everything else as `Unset`.
    ///
    /// A schema cycle through singular message fields would make that
    /// recursion non-terminating; a slot whose message type is already on
    /// the construction path is left `Unset` and built lazily when a
    /// value is first installed into it.
    pub fn empty(pool: &DescriptorPool, msg_name: &str) -> Result<Self, DecodeError> {
        let mut path = Vec::new();
        Self::empty_inner(pool, msg_name, &mut path)
    }

    fn empty_inner(
        pool: &DescriptorPool,
        msg_name: &str,
        path: &mut Vec<String>,
    ) -> Result<Self, DecodeError> {
        let desc = pool.message(msg_name)?;
        path.push(desc.name().to_string());
        let mut slots = vec![Value::Unset; desc.num_slots()];
        for field in desc.fields() {
            let init = match (field.label, &field.kind) {
                (Label::Repeated, _) => Value::Repeated(Vec::new()),
                (_, FieldType::Message(child)) => {
                    if path.iter().any(|seen| seen == child) {
                        Value::Unset
                    } else {
                        Value::Message(Self::empty_inner(pool, child, path)?)
                    }
                }
                _ => Value::Unset,
            };
            slots[field.slot - 1] = init;
        }
        path.pop();
        Ok(DynamicMessage {
            name: desc.name().to_string(),
            slots,
        })
    }

    /// The type tag (slot 0 of the positional record).
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// Value at `slot` (1-based, per the field descriptor).
    ///
    /// Panics if `slot` is 0 or past the last field; slots come from the
    /// message's own descriptor, so an out-of-range slot is a caller bug.
    pub fn slot(&self, slot: usize) -> &Value {
        &self.slots[slot - 1]
    }

    pub fn slot_mut(&mut self, slot: usize) -> &mut Value {
        &mut self.slots[slot - 1]
    }

    /// Moves the value out of `slot`, leaving `Unset`.
    pub(crate) fn take_slot(&mut self, slot: usize) -> Value {
        std::mem::replace(&mut self.slots[slot - 1], Value::Unset)
    }
}
