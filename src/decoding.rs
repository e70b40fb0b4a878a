use crate::base::{DynamicMessage, Value};
use crate::error::DecodeError;
use crate::merge;
use crate::tables::{DescriptorPool, FieldDescriptor, FieldType, Label, MessageDescriptor};
use crate::wire::{ReadCursor, WireType, zigzag_decode};

const TRACE_TAGS: bool = false;

/// Decodes a complete serialized message against the pool entry for
/// `msg_name`.
pub fn decode_message(
    pool: &DescriptorPool,
    msg_name: &str,
    buf: &[u8],
) -> Result<DynamicMessage, DecodeError> {
    let desc = pool.message(msg_name)?;
    decode_into(pool, desc, ReadCursor::new(buf))
}

fn decode_into(
    pool: &DescriptorPool,
    desc: &MessageDescriptor,
    mut cursor: ReadCursor<'_>,
) -> Result<DynamicMessage, DecodeError> {
    let mut msg = DynamicMessage::empty(pool, desc.name())?;
    while !cursor.is_empty() {
        let (field_number, code) = cursor.read_tag()?;
        let Some(field) = desc.field(field_number) else {
            skip_field(&mut cursor, field_number, code)?;
            continue;
        };
        let wire = WireType::from_code(field_number, code)?;
        if TRACE_TAGS {
            eprintln!(
                "{} field {} ({}) wire {:?}",
                desc.name(),
                field_number,
                field.name,
                wire
            );
        }
        if field.label == Label::Repeated
            && field.packed
            && field.kind.is_primitive()
            && wire == WireType::LengthDelimited
        {
            let values = decode_packed(pool, field, &mut cursor)?;
            if let Value::Repeated(seq) = msg.slot_mut(field.slot) {
                seq.extend(values);
            }
        } else {
            let value = decode_scalar(pool, &field.kind, &mut cursor)?;
            install(pool, &mut msg, field, value)?;
        }
    }
    Ok(msg)
}

/// Skips over an unknown field's payload, framed by its wire code.
fn skip_field(
    cursor: &mut ReadCursor<'_>,
    field_number: u32,
    code: u8,
) -> Result<(), DecodeError> {
    match WireType::from_code(field_number, code)? {
        WireType::Varint => {
            cursor.read_varint()?;
        }
        WireType::Fixed64 => {
            cursor.read_slice(8)?;
        }
        WireType::LengthDelimited => {
            let len = cursor.read_size()?;
            cursor.read_slice(len)?;
        }
        WireType::Fixed32 => {
            cursor.read_slice(4)?;
        }
    }
    Ok(())
}

/// Decodes one value, framed by the field's logical type.
fn decode_scalar(
    pool: &DescriptorPool,
    kind: &FieldType,
    cursor: &mut ReadCursor<'_>,
) -> Result<Value, DecodeError> {
    let value = match kind {
        // int32 is decoded as int64: proto2 encodes negative values as
        // full 10-byte varints. Narrowing is the caller's concern.
        FieldType::Int32 | FieldType::Int64 => Value::Int64(cursor.read_varint()? as i64),
        FieldType::SInt32 | FieldType::SInt64 => {
            Value::Int64(zigzag_decode(cursor.read_varint()?))
        }
        FieldType::UInt32 | FieldType::UInt64 => Value::UInt64(cursor.read_varint()?),
        FieldType::Bool => Value::Bool(cursor.read_varint()? != 0),
        FieldType::Enum(enum_name) => {
            let raw = cursor.read_varint()? as i64;
            let enumerator = pool.enumeration(enum_name)?.enumerator(raw)?;
            Value::Enum(enumerator.to_string())
        }
        FieldType::Fixed32 => Value::UInt64(cursor.read_fixed32()? as u64),
        FieldType::SFixed32 => Value::Int64(cursor.read_fixed32()? as i32 as i64),
        FieldType::Fixed64 => Value::UInt64(cursor.read_fixed64()?),
        FieldType::SFixed64 => Value::Int64(cursor.read_fixed64()? as i64),
        FieldType::Float => Value::Float(f32::from_bits(cursor.read_fixed32()?)),
        FieldType::Double => Value::Double(f64::from_bits(cursor.read_fixed64()?)),
        FieldType::String => {
            let len = cursor.read_size()?;
            let payload = cursor.read_slice(len)?;
            let text = std::str::from_utf8(payload).map_err(|_| DecodeError::InvalidUtf8)?;
            Value::String(text.to_string())
        }
        FieldType::Bytes => {
            let len = cursor.read_size()?;
            Value::Bytes(cursor.read_slice(len)?.to_vec())
        }
        FieldType::Message(child) => {
            let len = cursor.read_size()?;
            let payload = cursor.read_slice(len)?;
            let child_desc = pool.message(child)?;
            Value::Message(decode_into(pool, child_desc, ReadCursor::new(payload))?)
        }
    };
    Ok(value)
}

/// Decodes a length-delimited frame as a concatenation of primitive
/// values. The frame must end exactly on a value boundary; an empty
/// frame yields zero values.
fn decode_packed(
    pool: &DescriptorPool,
    field: &FieldDescriptor,
    cursor: &mut ReadCursor<'_>,
) -> Result<Vec<Value>, DecodeError> {
    let len = cursor.read_size()?;
    let mut frame = ReadCursor::new(cursor.read_slice(len)?);
    let mut values = Vec::new();
    while !frame.is_empty() {
        values.push(decode_scalar(pool, &field.kind, &mut frame)?);
    }
    Ok(values)
}

/// Places a decoded value into its slot per the field's cardinality.
fn install(
    pool: &DescriptorPool,
    msg: &mut DynamicMessage,
    field: &FieldDescriptor,
    value: Value,
) -> Result<(), DecodeError> {
    if field.label == Label::Repeated {
        if let Value::Repeated(seq) = msg.slot_mut(field.slot) {
            seq.push(value);
        }
        return Ok(());
    }
    if let FieldType::Message(_) = field.kind {
        // A singular sub-message seen twice in one stream merges into
        // whatever the slot already holds; a lazily constructed slot
        // (recursive schema) is still Unset and takes the value as-is.
        let merged = match (msg.take_slot(field.slot), value) {
            (Value::Message(prev), Value::Message(new)) => {
                Value::Message(merge::merge_owned(pool, prev, new)?)
            }
            (_, new) => new,
        };
        *msg.slot_mut(field.slot) = merged;
        return Ok(());
    }
    // Singular scalar, enum, string, bytes: last value wins.
    *msg.slot_mut(field.slot) = value;
    Ok(())
}
