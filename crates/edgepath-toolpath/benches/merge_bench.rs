use criterion::{black_box, criterion_group, criterion_main, Criterion};
use edgepath_core::{GraphModel, Point};
use edgepath_toolpath::{ChainWalker, PolylineMerger};

/// Regular polygon with its edges listed in a strided order so that
/// neighbouring edges are rarely adjacent in the list.
fn polygon(n: usize) -> GraphModel {
    let points = (0..n)
        .map(|i| {
            let t = i as f64 / n as f64 * std::f64::consts::TAU;
            Point::new(t.cos(), t.sin(), 0.0)
        })
        .collect();
    // coprime with every size used below
    let stride = 7;
    let edges: Vec<[usize; 2]> = (0..n)
        .map(|i| {
            let a = (i * stride) % n;
            [a, (a + 1) % n]
        })
        .collect();
    GraphModel::new(points, &edges).expect("valid polygon")
}

fn bench_merge(c: &mut Criterion) {
    let graph = polygon(200);
    c.bench_function("merge_polygon_200", |b| {
        b.iter(|| {
            let chains = PolylineMerger::merge_graph(black_box(&graph));
            black_box(chains.len());
        });
    });
}

fn bench_walk(c: &mut Criterion) {
    let graph = polygon(50_000);
    let walker = ChainWalker::new();
    c.bench_function("walk_polygon_50k", |b| {
        b.iter(|| {
            let chain = walker.walk(black_box(&graph), 0).expect("closed loop");
            black_box(chain.len());
        });
    });
}

criterion_group!(benches, bench_merge, bench_walk);
criterion_main!(benches);
