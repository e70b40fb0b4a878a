#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use protodyn::{DescriptorPool, FieldDescriptor, FieldType, Label, MessageDescriptor};
use std::sync::OnceLock;

#[derive(Arbitrary, Debug)]
struct MergeInput {
    first: Vec<u8>,
    second: Vec<u8>,
}

fn pool() -> &'static DescriptorPool {
    static POOL: OnceLock<DescriptorPool> = OnceLock::new();
    POOL.get_or_init(|| {
        let mut pool = DescriptorPool::new();
        pool.add_message(MessageDescriptor::new(
            "leaf",
            vec![
                FieldDescriptor {
                    name: "id".to_string(),
                    number: 1,
                    slot: 1,
                    kind: FieldType::UInt64,
                    label: Label::Optional,
                    packed: false,
                },
                FieldDescriptor {
                    name: "data".to_string(),
                    number: 2,
                    slot: 2,
                    kind: FieldType::Bytes,
                    label: Label::Repeated,
                    packed: false,
                },
            ],
        ));
        pool.add_message(MessageDescriptor::new(
            "root",
            vec![
                FieldDescriptor {
                    name: "leaf".to_string(),
                    number: 1,
                    slot: 1,
                    kind: FieldType::Message("leaf".to_string()),
                    label: Label::Optional,
                    packed: false,
                },
                FieldDescriptor {
                    name: "values".to_string(),
                    number: 2,
                    slot: 2,
                    kind: FieldType::SInt32,
                    label: Label::Repeated,
                    packed: true,
                },
            ],
        ));
        pool
    })
}

fuzz_target!(|input: MergeInput| {
    let pool = pool();
    let (Ok(first), Ok(second)) = (
        protodyn::decode_message(pool, "root", &input.first),
        protodyn::decode_message(pool, "root", &input.second),
    ) else {
        return;
    };
    // Merging two successfully decoded messages of the same type must
    // always succeed.
    protodyn::merge_messages(pool, &first, &second).unwrap();
});
