use ::serde::ser::{Error, Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::base::{DynamicMessage, Value};
use crate::tables::DescriptorPool;

/// Serializes a decoded message with field names taken from its
/// descriptor. Unset slots and empty sequences are skipped; enum values
/// serialize as their symbolic names, sub-messages as nested maps.
pub struct SerdeMessage<'a>(pub &'a DynamicMessage, pub &'a DescriptorPool);

impl Serialize for SerdeMessage<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (msg, pool) = (self.0, self.1);
        let desc = pool.message(msg.name()).map_err(S::Error::custom)?;
        let mut map = serializer.serialize_map(Some(desc.fields().len()))?;
        for field in desc.fields() {
            match msg.slot(field.slot) {
                Value::Unset => continue,
                Value::Repeated(seq) if seq.is_empty() => continue,
                value => map.serialize_entry(field.name.as_str(), &SerdeValue(value, pool))?,
            }
        }
        map.end()
    }
}

struct SerdeValue<'a>(&'a Value, &'a DescriptorPool);

impl Serialize for SerdeValue<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (value, pool) = (self.0, self.1);
        match value {
            Value::Unset => serializer.serialize_unit(),
            Value::Int64(v) => serializer.serialize_i64(*v),
            Value::UInt64(v) => serializer.serialize_u64(*v),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Float(v) => serializer.serialize_f32(*v),
            Value::Double(v) => serializer.serialize_f64(*v),
            Value::String(v) => serializer.serialize_str(v),
            Value::Bytes(v) => serializer.serialize_bytes(v),
            Value::Enum(v) => serializer.serialize_str(v),
            Value::Message(v) => SerdeMessage(v, pool).serialize(serializer),
            Value::Repeated(seq) => {
                let mut elements = serializer.serialize_seq(Some(seq.len()))?;
                for element in seq {
                    elements.serialize_element(&SerdeValue(element, pool))?;
                }
                elements.end()
            }
        }
    }
}
