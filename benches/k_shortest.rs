use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kpaths::graph::generators::{generate_grid, generate_random};
use kpaths::{k_shortest_paths, shortest_path};

fn bench_shortest_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("shortest_path");
    for &size in &[1_000usize, 10_000] {
        let graph = generate_random(size, 4.0, 100.0, 42);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, graph| {
            b.iter(|| shortest_path(graph, black_box(0), black_box(size - 1)))
        });
    }
    group.finish();
}

fn bench_k_shortest_random(c: &mut Criterion) {
    let graph = generate_random(2_000, 4.0, 100.0, 7);
    let mut group = c.benchmark_group("k_shortest_random_2000");
    for &k in &[1usize, 10, 50] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| k_shortest_paths(&graph, black_box(0), black_box(1_999), k))
        });
    }
    group.finish();
}

fn bench_k_shortest_grid(c: &mut Criterion) {
    let graph = generate_grid(30, 30, 3);
    let mut group = c.benchmark_group("k_shortest_grid_30x30");
    group.sample_size(20);
    for &k in &[10usize, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(k), &k, |b, &k| {
            b.iter(|| k_shortest_paths(&graph, black_box(0), black_box(899), k))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_shortest_path, bench_k_shortest_random, bench_k_shortest_grid);
criterion_main!(benches);
