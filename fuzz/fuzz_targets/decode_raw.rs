#![no_main]

use libfuzzer_sys::fuzz_target;
use protodyn::{
    DescriptorPool, EnumDescriptor, FieldDescriptor, FieldType, Label, MessageDescriptor,
};
use std::sync::OnceLock;

fn field(name: &str, number: u32, slot: usize, kind: FieldType, label: Label) -> FieldDescriptor {
    FieldDescriptor {
        name: name.to_string(),
        number,
        slot,
        kind,
        label,
        packed: false,
    }
}

// One message exercising every logical type, including a recursive
// sub-message field.
fn pool() -> &'static DescriptorPool {
    static POOL: OnceLock<DescriptorPool> = OnceLock::new();
    POOL.get_or_init(|| {
        let mut pool = DescriptorPool::new();
        pool.add_enum(EnumDescriptor::new("mode", [("A", 0), ("B", 1), ("C", 2)]));
        pool.add_message(MessageDescriptor::new(
            "everything",
            vec![
                field("a", 1, 1, FieldType::Int32, Label::Optional),
                field("b", 2, 2, FieldType::SInt64, Label::Optional),
                field("c", 3, 3, FieldType::UInt64, Label::Optional),
                field("d", 4, 4, FieldType::Bool, Label::Optional),
                field("e", 5, 5, FieldType::Fixed32, Label::Optional),
                field("f", 6, 6, FieldType::SFixed64, Label::Optional),
                field("g", 7, 7, FieldType::Float, Label::Optional),
                field("h", 8, 8, FieldType::Double, Label::Optional),
                field("i", 9, 9, FieldType::String, Label::Optional),
                field("j", 10, 10, FieldType::Bytes, Label::Optional),
                field("k", 11, 11, FieldType::Enum("mode".to_string()), Label::Optional),
                FieldDescriptor {
                    name: "l".to_string(),
                    number: 12,
                    slot: 12,
                    kind: FieldType::Int32,
                    label: Label::Repeated,
                    packed: true,
                },
                field(
                    "m",
                    13,
                    13,
                    FieldType::Message("everything".to_string()),
                    Label::Repeated,
                ),
                field(
                    "n",
                    14,
                    14,
                    FieldType::Message("everything".to_string()),
                    Label::Optional,
                ),
            ],
        ));
        pool
    })
}

fuzz_target!(|data: &[u8]| {
    // Malformed input may fail to decode, but must never panic.
    let _ = protodyn::decode_message(pool(), "everything", data);
});
