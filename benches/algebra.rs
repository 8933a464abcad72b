//! Benchmarks for set algebra over facets

use cauldron::{BitSet, Cauldron};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Every `stride`-th index of `[0, size)`.
fn strided_set(size: usize, stride: usize) -> BitSet {
    let mut set = BitSet::with_size(size);
    for index in (0..size).step_by(stride) {
        set.set_bit(index);
    }
    set
}

fn bench_set_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("set_algebra");
    for size in [1 << 10, 1 << 16, 1 << 20] {
        let a = strided_set(size, 3);
        let b = strided_set(size, 5);

        group.bench_with_input(BenchmarkId::new("and", size), &size, |bench, _| {
            bench.iter(|| black_box(a.and(&b)))
        });
        group.bench_with_input(BenchmarkId::new("and_count", size), &size, |bench, _| {
            bench.iter(|| black_box(a.and_count(&b)))
        });
        group.bench_with_input(BenchmarkId::new("or_count", size), &size, |bench, _| {
            bench.iter(|| black_box(a.or_count(&b)))
        });
        group.bench_with_input(BenchmarkId::new("not", size), &size, |bench, _| {
            bench.iter(|| black_box(a.not()))
        });
    }
    group.finish();
}

fn bench_cauldron(c: &mut Criterion) {
    let cauldron = Cauldron::new();
    let items: Vec<String> = (0..100_000).map(|i| format!("item-{i}")).collect();
    for item in &items {
        cauldron.upsert(item);
    }
    let kind = cauldron.aspect_or_insert("Kind");
    let customer = kind.facet_or_insert("Customer");
    let staff = kind.facet_or_insert("Staff");
    for (i, item) in items.iter().enumerate() {
        if i % 2 == 0 {
            customer.set_by_item(item).unwrap();
        }
        if i % 7 == 0 {
            staff.set_by_item(item).unwrap();
        }
    }

    c.bench_function("upsert_existing", |b| {
        b.iter(|| black_box(cauldron.upsert(black_box("item-5000"))))
    });
    c.bench_function("remove_and_reinsert", |b| {
        b.iter(|| {
            cauldron.try_remove("item-42");
            black_box(cauldron.upsert("item-42"))
        })
    });
    c.bench_function("facet_and_count", |b| b.iter(|| black_box(customer.and_count(&staff))));
    c.bench_function("facet_not_count", |b| b.iter(|| black_box(customer.not_count())));
}

criterion_group!(benches, bench_set_algebra, bench_cauldron);
criterion_main!(benches);
