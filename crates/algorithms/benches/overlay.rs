//! Benchmarks for polygon overlay and contouring

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use geo::{Geometry, Point};
use spatialkit_algorithms::contour::{isobands, ContourParams};
use spatialkit_algorithms::overlay::{intersect, union};
use spatialkit_algorithms::shapes::{circle, CircleParams};
use spatialkit_core::{Feature, FeatureCollection};

fn create_circle(x: f64, steps: usize) -> Geometry<f64> {
    let params = CircleParams { steps, ..Default::default() };
    Geometry::Polygon(circle(Point::new(x, 0.0), 50.0, params).unwrap())
}

fn create_surface(size: usize) -> FeatureCollection {
    let mut fc = FeatureCollection::new();
    for row in 0..size {
        for col in 0..size {
            let (x, y) = (col as f64 * 0.01, row as f64 * 0.01);
            let mut f = Feature::new(Point::new(x, y));
            let variation = ((row * 7 + col * 13) % 100) as f64 / 10.0;
            f.set_property("elevation", (row + col) as f64 + variation);
            fc.push(f);
        }
    }
    fc
}

fn bench_intersect(c: &mut Criterion) {
    let mut group = c.benchmark_group("intersect");

    for steps in [64, 256, 1024].iter() {
        let a = create_circle(0.0, *steps);
        let b = create_circle(0.5, *steps);

        group.bench_with_input(BenchmarkId::from_parameter(steps), steps, |bench, _| {
            bench.iter(|| intersect(black_box(&a), black_box(&b)).unwrap())
        });
    }

    group.finish();
}

fn bench_union(c: &mut Criterion) {
    let circles: FeatureCollection = (0..20).map(|i| Feature::new(create_circle(i as f64 * 0.3, 64))).collect();
    c.bench_function("union_20_circles", |b| b.iter(|| union(black_box(&circles)).unwrap()));
}

fn bench_isobands(c: &mut Criterion) {
    let mut group = c.benchmark_group("isobands");
    let breaks: Vec<f64> = (0..10).map(|i| i as f64 * 20.0).collect();

    for size in [32, 64, 128].iter() {
        let surface = create_surface(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| isobands(black_box(&surface), &breaks, &ContourParams::default()).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_intersect, bench_union, bench_isobands);
criterion_main!(benches);
