use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use suid::{SuidGenerator, decode_timestamp};

// Number of IDs generated per benchmark iteration.
const TOTAL_IDS: usize = 4096;

fn bench_generate(c: &mut Criterion) {
    let generator = SuidGenerator::new();

    let mut group = c.benchmark_group("suid/generate");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(generator.generate().expect("generate"));
            }
        });
    });
    group.finish();
}

fn bench_decode(c: &mut Criterion) {
    let generator = SuidGenerator::new();
    let id = generator.generate().expect("generate");

    let mut group = c.benchmark_group("suid/decode");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(decode_timestamp(black_box(id.as_str())).expect("decode"));
            }
        });
    });
    group.finish();
}

criterion_group!(benches, bench_generate, bench_decode);
criterion_main!(benches);
