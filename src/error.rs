use thiserror::Error;

/// Everything that can go wrong while decoding or merging.
///
/// Wire-format errors (`Truncated`, `VarintOverflow`,
/// `UnsupportedWireType`, `UnknownEnumerator`, `InvalidUtf8`) abort the
/// decode with no partial result. `NoSuchKey` and `TypeMismatch` indicate
/// a schema or caller bug rather than malformed input; they are surfaced
/// the same way but are never expected on a resolved pool.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("input ended in the middle of a value")]
    Truncated,
    #[error("varint does not fit in 64 bits")]
    VarintOverflow,
    #[error("unsupported wire type {wire_type} on field {field_number}")]
    UnsupportedWireType { field_number: u32, wire_type: u8 },
    #[error("enum `{enum_name}` has no enumerator with value {value}")]
    UnknownEnumerator { enum_name: String, value: i64 },
    #[error("string payload is not valid UTF-8")]
    InvalidUtf8,
    #[error("cannot merge a `{found}` into a `{expected}`")]
    TypeMismatch { expected: String, found: String },
    #[error("no {kind} named `{name}` in the descriptor pool")]
    NoSuchKey { kind: &'static str, name: String },
}
