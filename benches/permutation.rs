use criterion::{
    criterion_group, criterion_main, BenchmarkId, Criterion, Throughput,
};
use orderly::{Container, Order};
use std::hint::black_box;

const SIZES: [usize; 3] = [64, 4_096, 262_144];

fn container(len: usize) -> Container<u32> {
    // Knuth's multiplicative hash, so sorting has work to do.
    (0..len as u32).map(|i| i.wrapping_mul(2_654_435_761) % 1_000).collect()
}

fn bench_permutation(c: &mut Criterion) {
    let mut group = c.benchmark_group("permutation");
    for len in SIZES {
        let data = container(len);
        group.throughput(Throughput::Elements(len as u64));
        for order in Order::ALL {
            let id = BenchmarkId::new(order.name(), len);
            group.bench_with_input(id, &data, |b, data| {
                b.iter(|| order.permutation(black_box(data.as_slice())))
            });
        }
    }
    group.finish();
}

fn bench_traverse(c: &mut Criterion) {
    let data = container(SIZES[1]);
    c.bench_function("traverse side-cross", |b| {
        b.iter(|| {
            let walk = data.traverse(Order::SideCross);
            walk.copied().map(u64::from).sum::<u64>()
        })
    });
}

criterion_group!(benches, bench_permutation, bench_traverse);
criterion_main!(benches);
