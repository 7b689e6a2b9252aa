use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use routemap_lib::{
    Credentials, Endpoints, Location, RenderConfig, RouteMap, TourSummary, Transport,
};
use serde_json::json;
use std::hint::black_box;
use std::sync::Arc;

/// Answers every directions query with the same short walking route.
struct StaticTransport;

impl Transport for StaticTransport {
    fn get(&self, _url: &str) -> routemap_lib::Result<String> {
        Ok(json!({
            "status": "OK",
            "routes": [{
                "legs": [{"distance": {"value": 1250.0}, "duration": {"value": 900.0}}],
                "overview_polyline": {"points": "_p~iF~ps|U_ulLnnqC_mqNvxq`@"},
                "bounds": {
                    "northeast": {"lat": 40.36, "lng": -74.64},
                    "southwest": {"lat": 40.34, "lng": -74.66}
                }
            }]
        })
        .to_string())
    }
}

fn campus_map(points: usize) -> RouteMap {
    let mut map = RouteMap::new(
        Arc::new(StaticTransport),
        Endpoints::default(),
        RenderConfig::default(),
    );
    map.set_credentials_unchecked(Credentials::new("bench", "bench").expect("credentials"))
        .expect("fresh map");
    let locations: Vec<Location> = (0..points)
        .map(|i| Location::new(-74.66 + i as f64 * 0.001, 40.34 + i as f64 * 0.0005))
        .collect::<Result<_, _>>()
        .expect("valid locations");
    map.set_points(locations.iter().copied()).expect("graph builds");
    for pair in locations.windows(2) {
        map.add_visible_path(pair[0], pair[1]).expect("visible path");
    }
    map
}

static SMALL_MAP: Lazy<RouteMap> = Lazy::new(|| campus_map(10));
static LARGE_MAP: Lazy<RouteMap> = Lazy::new(|| campus_map(120));

fn benchmark_rendering(c: &mut Criterion) {
    c.bench_function("render_request_10_points", |b| {
        let map = &*SMALL_MAP;
        b.iter(|| {
            let request = map.render_request().expect("request fits");
            black_box(request.len())
        });
    });

    c.bench_function("render_request_120_points_budgeted", |b| {
        let map = &*LARGE_MAP;
        b.iter(|| {
            let request = map.render_request().expect("request fits");
            black_box((request.markers_dropped, request.paths_dropped))
        });
    });

    c.bench_function("tour_summary_120_points", |b| {
        let map = &*LARGE_MAP;
        b.iter(|| black_box(TourSummary::from_paths(map.visible())));
    });
}

fn benchmark_graph(c: &mut Criterion) {
    c.bench_function("build_graph_30_points", |b| {
        b.iter(|| black_box(campus_map(30).graph().edge_count()));
    });
}

criterion_group!(benches, benchmark_rendering, benchmark_graph);
criterion_main!(benches);
