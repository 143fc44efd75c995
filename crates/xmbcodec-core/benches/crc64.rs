//! CRC64 digest throughput benchmarks.
//!
//! # Running
//! ```bash
//! cargo bench --package xmbcodec-core
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use xmbcodec_core::{Crc64, StreamingDigest};

fn make_payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 251) as u8).collect()
}

fn bench_streaming(c: &mut Criterion) {
    let mut group = c.benchmark_group("crc64_streaming");
    for &size in &[64usize, 4 * 1024, 256 * 1024, 4 * 1024 * 1024] {
        let payload = make_payload(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &payload, |b, data| {
            let mut crc = Crc64::new();
            b.iter(|| {
                crc.reset();
                crc.write(data);
                crc.digest()
            });
        });
    }
    group.finish();
}

fn bench_one_shot(c: &mut Criterion) {
    let payload = make_payload(64 * 1024);
    let mut group = c.benchmark_group("crc64_one_shot");
    group.throughput(Throughput::Bytes(payload.len() as u64));
    group.bench_function("checksum_64k", |b| b.iter(|| Crc64::checksum(&payload)));
    group.finish();
}

criterion_group!(benches, bench_streaming, bench_one_shot);
criterion_main!(benches);
