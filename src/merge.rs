use crate::base::{DynamicMessage, Value};
use crate::error::DecodeError;
use crate::tables::{DescriptorPool, FieldType, Label};

/// Merges two messages of the same type, proto2-style: repeated fields
/// concatenate (`prev` first), singular sub-messages merge recursively,
/// and any other singular field takes `new`'s value unless it is unset.
///
/// Neither input is mutated; the result is a fresh message.
pub fn merge_messages(
    pool: &DescriptorPool,
    prev: &DynamicMessage,
    new: &DynamicMessage,
) -> Result<DynamicMessage, DecodeError> {
    merge_owned(pool, prev.clone(), new.clone())
}

// The decoder routes duplicated singular sub-messages through here too,
// which is what makes the same-stream case equal to decoding each
// occurrence alone and merging afterwards.
pub(crate) fn merge_owned(
    pool: &DescriptorPool,
    prev: DynamicMessage,
    mut new: DynamicMessage,
) -> Result<DynamicMessage, DecodeError> {
    if prev.name() != new.name() {
        return Err(DecodeError::TypeMismatch {
            expected: prev.name().to_string(),
            found: new.name().to_string(),
        });
    }
    let desc = pool.message(prev.name())?;
    let mut merged = prev;
    for field in desc.fields() {
        let incoming = new.take_slot(field.slot);
        let slot = merged.slot_mut(field.slot);
        match field.label {
            Label::Repeated => {
                if let (Value::Repeated(seq), Value::Repeated(tail)) = (slot, incoming) {
                    seq.extend(tail);
                }
            }
            Label::Required | Label::Optional => {
                if let FieldType::Message(_) = field.kind {
                    let combined = match (std::mem::replace(slot, Value::Unset), incoming) {
                        (Value::Message(p), Value::Message(n)) => {
                            Value::Message(merge_owned(pool, p, n)?)
                        }
                        (p, Value::Unset) => p,
                        (_, n) => n,
                    };
                    *slot = combined;
                } else if !incoming.is_unset() {
                    *slot = incoming;
                }
            }
        }
    }
    Ok(merged)
}
