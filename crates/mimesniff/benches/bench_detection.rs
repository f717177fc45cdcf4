use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use mimesniff::test::read_vec;
use mimesniff::Registry;

const TEST_DATA_FILE: &[u8] = include_bytes!("bench_detection.rs");

fn make_headers() -> Vec<(&'static str, Vec<u8>)> {
    let mut mp4 = b"\x00\x00\x00\x18ftypmp42".to_vec();
    mp4.resize(2048, 0);
    vec![
        ("gif", b"GIF89a\x01\x00\x01\x00".to_vec()),
        ("pdf", b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n".to_vec()),
        ("mp4", mp4),
        ("rfc822", b"Return-Path: <someone@example.com>\r\n".to_vec()),
        ("text", TEST_DATA_FILE.to_vec()),
        ("zeros", vec![0u8; 2048]),
    ]
}

fn criterion_benchmark(c: &mut Criterion) {
    let registry = Registry::builtin();

    let mut group = c.benchmark_group("registry/lookup");
    group.throughput(Throughput::Elements(1));
    for (name, data) in make_headers() {
        let expected = registry.lookup(&data);
        group.bench_function(name, |b| {
            b.iter(|| {
                let res = registry.lookup(black_box(data.as_slice()));
                assert_eq!(res, expected);
            })
        });
    }
    group.finish();

    let mut group = c.benchmark_group("reader/sniff");
    for (name, data) in make_headers() {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| {
                let (_, reader) = registry.sniff_reader(black_box(data.as_slice()));
                assert_eq!(read_vec(reader).len(), data.len());
            })
        });
    }
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
