//! Dynamic, schema-driven decoder for the proto2 wire format.
//!
//! The schema is not compiled in: a [`DescriptorPool`] built at runtime
//! maps message and enum names to their definitions, and
//! [`decode_message`] interprets wire bytes against it, producing a
//! slot-addressed [`DynamicMessage`] of tagged [`Value`]s.
//! [`merge_messages`] combines two decoded messages of the same type
//! with proto2 merge semantics; the decoder uses the same engine when a
//! singular sub-message field occurs more than once in one stream.
//!
//! Unknown fields are skipped, not rejected. Wire-format errors abort
//! the decode with a typed [`DecodeError`]; there are no partial
//! results.
//!
//! ```
//! use protodyn::{DescriptorPool, FieldDescriptor, FieldType, Label, MessageDescriptor, Value};
//!
//! let mut pool = DescriptorPool::new();
//! pool.add_message(MessageDescriptor::new(
//!     "m1",
//!     vec![FieldDescriptor {
//!         name: "a".to_string(),
//!         number: 1,
//!         slot: 1,
//!         kind: FieldType::Int32,
//!         label: Label::Required,
//!         packed: false,
//!     }],
//! ));
//!
//! let msg = protodyn::decode_message(&pool, "m1", &[0x08, 0x96, 0x01]).unwrap();
//! assert_eq!(msg.slot(1), &Value::Int64(150));
//! ```

pub mod base;
pub mod decoding;
pub mod error;
pub mod merge;
pub mod serde;
pub mod tables;
pub mod wire;

pub use base::{DynamicMessage, Value};
pub use error::DecodeError;
pub use self::serde::SerdeMessage;
pub use tables::{
    DescriptorPool, EnumDescriptor, FieldDescriptor, FieldType, Label, MessageDescriptor,
};

/// Decodes a complete serialized message (no outer length framing)
/// against the pool's definition of `msg_name`.
pub fn decode_message(
    pool: &DescriptorPool,
    msg_name: &str,
    buf: &[u8],
) -> Result<DynamicMessage, DecodeError> {
    decoding::decode_message(pool, msg_name, buf)
}

/// Merges `new` into `prev` (both of the same message type), returning a
/// fresh message.
pub fn merge_messages(
    pool: &DescriptorPool,
    prev: &DynamicMessage,
    new: &DynamicMessage,
) -> Result<DynamicMessage, DecodeError> {
    merge::merge_messages(pool, prev, new)
}

/// Drains `reader` and decodes the collected bytes.
pub fn decode_from_read(
    pool: &DescriptorPool,
    msg_name: &str,
    reader: &mut impl std::io::Read,
) -> anyhow::Result<DynamicMessage> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    Ok(decode_message(pool, msg_name, &buf)?)
}
