// Route engine benchmarks
//
// 1. Shortest path on the small Barretos map
// 2. Shortest path across a generated grid
// 3. Graph construction alone

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use telequote::models::Road;
use telequote::route::{compute_route, RoadGraph};

fn road(origin: &str, destination: &str, cost: f64) -> Road {
    Road {
        origin: origin.to_string(),
        destination: destination.to_string(),
        cost,
    }
}

fn barretos() -> Vec<Road> {
    vec![
        road("Barretos", "Colina", 18.0),
        road("Barretos", "Jaborandi", 31.0),
        road("Barretos", "Colombia", 43.0),
        road("Barretos", "Olimpia", 42.0),
        road("Bebedouro", "Viradouro", 22.0),
        road("Colina", "Jaborandi", 13.0),
        road("Colina", "Bebedouro", 32.0),
        road("Jaborandi", "Terra Roxa", 16.0),
        road("Terra Roxa", "Viradouro", 10.0),
    ]
}

/// `side` x `side` grid with roads going right and down
fn grid(side: usize) -> Vec<Road> {
    let name = |row: usize, col: usize| format!("n{}_{}", row, col);
    let mut roads = Vec::with_capacity(side * side * 2);
    for row in 0..side {
        for col in 0..side {
            if col + 1 < side {
                roads.push(road(&name(row, col), &name(row, col + 1), ((row * 7 + col) % 5 + 1) as f64));
            }
            if row + 1 < side {
                roads.push(road(&name(row, col), &name(row + 1, col), ((row + col * 3) % 4 + 1) as f64));
            }
        }
    }
    roads
}

fn bench_barretos(c: &mut Criterion) {
    let roads = barretos();
    c.bench_function("route_barretos", |b| {
        b.iter(|| {
            compute_route(
                black_box(&roads),
                black_box("Barretos"),
                black_box("Viradouro"),
                10.0,
                2.5,
            )
        });
    });
}

fn bench_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_grid");
    for side in [10usize, 30, 60] {
        let roads = grid(side);
        let target = format!("n{}_{}", side - 1, side - 1);
        group.bench_with_input(BenchmarkId::from_parameter(side), &roads, |b, roads| {
            b.iter(|| compute_route(black_box(roads), "n0_0", &target, 10.0, 2.5));
        });
    }
    group.finish();
}

fn bench_graph_build(c: &mut Criterion) {
    let roads = grid(30);
    c.bench_function("graph_build_30", |b| {
        b.iter(|| RoadGraph::from_roads(black_box(&roads)));
    });
}

criterion_group!(benches, bench_barretos, bench_grid, bench_graph_build);
criterion_main!(benches);
