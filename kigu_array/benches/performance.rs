use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use kigu_array::{Array, HeapAllocator};

fn bench_sequential_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_push");

    for size in [10, 100, 1000, 10000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("from_empty", size), size, |b, &size| {
            let allocator = HeapAllocator;
            b.iter(|| {
                let mut array = Array::<u64>::new_in(0, &allocator);
                for i in 0..size as u64 {
                    array.push_value(black_box(i));
                }
                black_box(array.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("preallocated", size), size, |b, &size| {
            let allocator = HeapAllocator;
            b.iter(|| {
                let mut array = Array::<u64>::new_in(size, &allocator);
                for i in 0..size as u64 {
                    array.push_value(black_box(i));
                }
                black_box(array.len())
            });
        });
    }
    group.finish();
}

fn bench_insert_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_front");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("u32", size), size, |b, &size| {
            let allocator = HeapAllocator;
            b.iter(|| {
                let mut array = Array::<u32>::new_in(size, &allocator);
                for i in 0..size as u32 {
                    array.insert_value(0, black_box(i));
                }
                black_box(array.len())
            });
        });
    }
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");

    for size in [100, 1000].iter() {
        let values: Vec<u32> = (0..*size as u32).collect();
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("ordered", size), &values, |b, values| {
            let allocator = HeapAllocator;
            b.iter(|| {
                let mut array = Array::<u32>::from_slice_in(values, &allocator);
                while !array.is_empty() {
                    black_box(array.remove_ordered(0));
                }
            });
        });
        group.bench_with_input(BenchmarkId::new("unordered", size), &values, |b, values| {
            let allocator = HeapAllocator;
            b.iter(|| {
                let mut array = Array::<u32>::from_slice_in(values, &allocator);
                while !array.is_empty() {
                    black_box(array.remove_unordered(0));
                }
            });
        });
    }
    group.finish();
}

fn bench_iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterator");

    for size in [100, 1000].iter() {
        let allocator = HeapAllocator;
        let values: Vec<u64> = (0..*size as u64).collect();
        let array = Array::<u64>::from_slice_in(&values, &allocator);

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("typed_sum", size), &array, |b, array| {
            b.iter(|| black_box(array.iter().sum::<u64>()));
        });
        group.bench_with_input(BenchmarkId::new("raw_slots", size), &array, |b, array| {
            b.iter(|| {
                for slot in array.as_raw() {
                    black_box(slot);
                }
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_sequential_push,
    bench_insert_front,
    bench_remove,
    bench_iteration
);
criterion_main!(benches);
