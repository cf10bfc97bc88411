//! Benchmarks for geo crate distance calculations.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use surplus_geo::batch::{distances_from, LocationItem};
use surplus_geo::{haversine_distance, resolve_coordinate, Coordinate};

fn create_test_items(count: usize) -> Vec<LocationItem> {
    (0..count)
        .map(|i| {
            // Grid of points around Colombo
            let lat = 6.0 + (i as f64 * 0.01) % 2.0;
            let lng = 79.0 + (i as f64 * 0.01) % 2.0;
            LocationItem {
                id: i as i64,
                location: json!({"type": "Point", "coordinates": [lng, lat]}),
            }
        })
        .collect()
}

fn bench_single_distance(c: &mut Criterion) {
    let colombo = Coordinate::new(6.9271, 79.8612);
    let kandy = Coordinate::new(7.2906, 80.6337);

    c.bench_function("haversine_single", |b| {
        b.iter(|| haversine_distance(black_box(&colombo), black_box(&kandy)))
    });
}

fn bench_batch_distances(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_distances");
    let origin = Coordinate::new(6.9271, 79.8612);

    for size in [10, 100, 1000, 10000].iter() {
        let items = create_test_items(*size);

        group.bench_with_input(BenchmarkId::new("resolve_and_rank", size), size, |b, _| {
            b.iter(|| distances_from(black_box(&origin), black_box(&items)))
        });
    }

    group.finish();
}

fn bench_resolver_paths(c: &mut Criterion) {
    let geojson = json!({"type": "Point", "coordinates": [79.8612, 6.9271]});
    let wkt = json!("POINT(79.8612 6.9271)");
    let ewkb = json!("0101000020E61000002CD49AE61DF75340857CD0B359B51B40");
    let direct = json!({"lat": 6.9271, "lng": 79.8612});

    let mut group = c.benchmark_group("resolver_paths");

    group.bench_function("geojson", |b| {
        b.iter(|| resolve_coordinate(black_box(&geojson)))
    });

    group.bench_function("wkt", |b| b.iter(|| resolve_coordinate(black_box(&wkt))));

    group.bench_function("ewkb_hex", |b| b.iter(|| resolve_coordinate(black_box(&ewkb))));

    group.bench_function("direct_fields", |b| {
        b.iter(|| resolve_coordinate(black_box(&direct)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_single_distance,
    bench_batch_distances,
    bench_resolver_paths
);
criterion_main!(benches);
