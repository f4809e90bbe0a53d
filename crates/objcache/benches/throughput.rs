//! Benchmarks for objcache facade throughput

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use objcache::{CacheConfig, CacheValue, MemoryStore, ObjectCache};
use std::hint::black_box;
use tokio::runtime::Runtime;

fn create_cache() -> ObjectCache<MemoryStore> {
    ObjectCache::new(MemoryStore::new(), CacheConfig::tenant("1"))
}

fn bench_set(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = create_cache();

    let mut group = c.benchmark_group("set");
    group.throughput(Throughput::Elements(1));

    group.bench_function("backend_int", |b| {
        b.iter(|| {
            rt.block_on(async {
                cache
                    .set(black_box("key"), black_box(42i64), "posts", 0)
                    .await;
            });
        });
    });

    group.bench_function("backend_1kb", |b| {
        let value = CacheValue::from("x".repeat(1024));
        b.iter(|| {
            rt.block_on(async {
                cache
                    .set(black_box("key"), black_box(value.clone()), "posts", 0)
                    .await;
            });
        });
    });

    group.bench_function("non_persistent", |b| {
        b.iter(|| {
            rt.block_on(async {
                cache
                    .set(black_box("key"), black_box(42i64), "counts", 0)
                    .await;
            });
        });
    });

    group.finish();
}

fn bench_get(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = create_cache();

    rt.block_on(async {
        cache.set("key", 42i64, "posts", 0).await;
    });

    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));

    group.bench_function("runtime_hit", |b| {
        b.iter(|| {
            rt.block_on(async {
                black_box(cache.get(black_box("key"), "posts").await);
            });
        });
    });

    group.bench_function("forced_backend_hit", |b| {
        b.iter(|| {
            rt.block_on(async {
                black_box(cache.get_forced(black_box("key"), "posts").await);
            });
        });
    });

    group.bench_function("miss", |b| {
        b.iter(|| {
            rt.block_on(async {
                black_box(cache.get(black_box("missing"), "posts").await);
            });
        });
    });

    group.finish();
}

fn bench_counters(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let cache = create_cache();

    let mut group = c.benchmark_group("increment");
    group.throughput(Throughput::Elements(1));

    group.bench_function("backend", |b| {
        b.iter(|| {
            rt.block_on(async {
                black_box(cache.increment(black_box("hits"), 1, "posts").await);
            });
        });
    });

    group.bench_function("non_persistent", |b| {
        b.iter(|| {
            rt.block_on(async {
                black_box(cache.increment(black_box("hits"), 1, "counts").await);
            });
        });
    });

    group.finish();
}

criterion_group!(benches, bench_set, bench_get, bench_counters);
criterion_main!(benches);
