use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;
use steller::{Graph, SpectralOptions, SpringOptions, spectral_layout, spring_layout};

/// A `side x side` grid graph.
fn grid(side: usize) -> Graph {
    let mut g = Graph::new(side * side);
    for r in 0..side {
        for c in 0..side {
            let v = r * side + c;
            if c + 1 < side {
                g.add_edge(v, v + 1);
            }
            if r + 1 < side {
                g.add_edge(v, v + side);
            }
        }
    }
    g
}

/// Cliques of `size` vertices joined in a chain by single edges.
fn clique_chain(cliques: usize, size: usize) -> Graph {
    let mut g = Graph::new(cliques * size);
    for k in 0..cliques {
        let base = k * size;
        for i in 0..size {
            for j in (i + 1)..size {
                g.add_edge(base + i, base + j);
            }
        }
        if k > 0 {
            g.add_edge(base - 1, base);
        }
    }
    g
}

fn bench_spring(c: &mut Criterion) {
    let mut group = c.benchmark_group("spring");
    group.measurement_time(Duration::from_secs(5));
    for side in [5usize, 10, 20] {
        let g = grid(side);
        let opts = SpringOptions::default();
        group.bench_with_input(BenchmarkId::from_parameter(side * side), &g, |b, g| {
            b.iter(|| spring_layout(black_box(g), &opts).unwrap())
        });
    }
    group.finish();
}

fn bench_spectral(c: &mut Criterion) {
    let mut group = c.benchmark_group("spectral");
    group.measurement_time(Duration::from_secs(5));
    let opts = SpectralOptions::default();
    for side in [10usize, 20] {
        let g = grid(side);
        group.bench_with_input(BenchmarkId::new("dense", side * side), &g, |b, g| {
            b.iter(|| spectral_layout(black_box(g), &opts).unwrap())
        });
    }
    for cliques in [3usize, 6] {
        let g = clique_chain(cliques, 200);
        group.bench_with_input(BenchmarkId::new("sparse", cliques * 200), &g, |b, g| {
            b.iter(|| spectral_layout(black_box(g), &opts).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_spring, bench_spectral);
criterion_main!(benches);
