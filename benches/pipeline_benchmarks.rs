use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pipefeed::prelude::*;
use std::hint::black_box;

fn bench_producer(c: &mut Criterion) {
    let mut group = c.benchmark_group("producer");

    for size in [100u64, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*size));

        for buffer_size in [1usize, 64].iter() {
            group.bench_with_input(
                BenchmarkId::new(format!("buffer_{}", buffer_size), size),
                size,
                |b, &size| {
                    b.iter(|| {
                        tokio::runtime::Runtime::new().unwrap().block_on(async {
                            let cursor = IterCursor::new(0..size);
                            let results =
                                Producer::new(cursor).start(CancellationToken::new(), *buffer_size);
                            let (outputs, _) = partition(results).await;
                            black_box(outputs.len());
                        })
                    });
                },
            );
        }
    }

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");

    for size in [100u64, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*size));

        group.bench_with_input(BenchmarkId::new("map", size), size, |b, &size| {
            b.iter(|| {
                tokio::runtime::Runtime::new().unwrap().block_on(async {
                    let token = CancellationToken::new();
                    let source = build_producer(token.clone(), 0..size);
                    let results = Transformer::with_error_handler(|_| {})
                        .transform(token, source, |x: u64| Ok(black_box(x * 2)));
                    let (outputs, _) = partition(results).await;
                    black_box(outputs.len());
                })
            });
        });

        group.bench_with_input(BenchmarkId::new("skip_half", size), size, |b, &size| {
            b.iter(|| {
                tokio::runtime::Runtime::new().unwrap().block_on(async {
                    let token = CancellationToken::new();
                    let source = build_producer(token.clone(), 0..size);
                    let results = Transformer::with_error_handler(|_| {}).transform(
                        token,
                        source,
                        |x: u64| if x % 2 == 0 { Ok(x) } else { Err(Error::Skip) },
                    );
                    let (outputs, _) = partition(results).await;
                    black_box(outputs.len());
                })
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_producer, bench_transform);
criterion_main!(benches);
