use criterion::{
    BenchmarkGroup, Criterion, Throughput, black_box, criterion_group, criterion_main,
    measurement::Measurement,
};

use protodyn::wire::{write_tag, write_varint};
use protodyn::{
    DescriptorPool, FieldDescriptor, FieldType, Label, MessageDescriptor, decode_message,
    merge_messages,
};

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

fn bench_pool() -> DescriptorPool {
    let mut pool = DescriptorPool::new();
    pool.add_message(MessageDescriptor::new(
        "point",
        vec![
            field("x", 1, 1, FieldType::SInt64, Label::Required),
            field("y", 2, 2, FieldType::SInt64, Label::Required),
            field("tag", 3, 3, FieldType::String, Label::Optional),
        ],
    ));
    pool.add_message(MessageDescriptor::new(
        "track",
        vec![
            field("id", 1, 1, FieldType::UInt64, Label::Required),
            field(
                "points",
                2,
                2,
                FieldType::Message("point".to_string()),
                Label::Repeated,
            ),
            FieldDescriptor {
                name: "weights".to_string(),
                number: 3,
                slot: 3,
                kind: FieldType::Int32,
                label: Label::Repeated,
                packed: true,
            },
        ],
    ));
    pool
}

fn make_point(x: i64, y: i64, tag: &str) -> Vec<u8> {
    let mut buf = Vec::new();
    write_tag(&mut buf, 1, 0);
    write_varint(&mut buf, protodyn::wire::zigzag_encode(x));
    write_tag(&mut buf, 2, 0);
    write_varint(&mut buf, protodyn::wire::zigzag_encode(y));
    if !tag.is_empty() {
        write_tag(&mut buf, 3, 2);
        write_varint(&mut buf, tag.len() as u64);
        buf.extend(tag.as_bytes());
    }
    buf
}

fn make_track(num_points: usize, num_weights: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    write_tag(&mut buf, 1, 0);
    write_varint(&mut buf, 42);
    for i in 0..num_points {
        let point = make_point(i as i64, -(i as i64) * 3, "waypoint");
        write_tag(&mut buf, 2, 2);
        write_varint(&mut buf, point.len() as u64);
        buf.extend(point);
    }
    let mut packed = Vec::new();
    for i in 0..num_weights {
        write_varint(&mut packed, (i * 7) as u64);
    }
    write_tag(&mut buf, 3, 2);
    write_varint(&mut buf, packed.len() as u64);
    buf.extend(packed);
    buf
}

fn bench_decoding(
    group: &mut BenchmarkGroup<'_, impl Measurement>,
    bench_function_name: &str,
    data: &[u8],
) {
    let pool = bench_pool();
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.bench_function(bench_function_name, |b| {
        b.iter(|| {
            let msg = decode_message(&pool, "track", black_box(data)).unwrap();
            black_box(msg)
        })
    });
}

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let small_data = make_track(1, 4);
    bench_decoding(&mut group, "small", &small_data);

    let medium_data = make_track(32, 128);
    bench_decoding(&mut group, "medium", &medium_data);

    let large_data = make_track(1024, 4096);
    bench_decoding(&mut group, "large", &large_data);

    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let pool = bench_pool();
    let a = decode_message(&pool, "track", &make_track(32, 128)).unwrap();
    let b = decode_message(&pool, "track", &make_track(32, 128)).unwrap();

    c.bench_function("merge/medium", |bench| {
        bench.iter(|| {
            let merged = merge_messages(&pool, black_box(&a), black_box(&b)).unwrap();
            black_box(merged)
        })
    });
}

criterion_group!(benches, bench_decode, bench_merge);
criterion_main!(benches);
