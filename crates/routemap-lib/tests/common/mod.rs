//! Common test utilities for integration tests.
//!
//! Provides an offline [`Transport`] that answers directions queries from a
//! fixed table and counts how often it was called.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use reqwest::Url;
use routemap_lib::{Credentials, Endpoints, Location, RenderConfig, RouteMap, Transport};
use serde_json::json;

pub const DIRECTIONS_URL: &str = "https://routes.test/maps/api/directions/json";
pub const STATIC_MAP_URL: &str = "https://routes.test/maps/api/staticmap";

/// Offline directions service keyed by unordered endpoint pairs.
#[derive(Debug, Default)]
pub struct FixtureTransport {
    statuses: HashMap<(String, String), String>,
    calls: AtomicUsize,
}

fn pair(a: Location, b: Location) -> (String, String) {
    let (a, b) = (a.to_string(), b.to_string());
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[allow(dead_code)]
impl FixtureTransport {
    /// Answer the pair `a`/`b` with `status` instead of a route.
    pub fn with_status(mut self, a: Location, b: Location, status: &str) -> Self {
        self.statuses.insert(pair(a, b), status.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Transport for FixtureTransport {
    fn get(&self, url: &str) -> routemap_lib::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let url = Url::parse(url).expect("valid request url");
        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        let origin: Location = query["origin"].parse().expect("origin");
        let destination: Location = query["destination"].parse().expect("destination");

        if let Some(status) = self.statuses.get(&pair(origin, destination)) {
            return Ok(json!({"status": status, "routes": []}).to_string());
        }

        // One kilometre and ten minutes per hundredth of a degree of separation.
        let steps = ((origin.lng() - destination.lng()).abs()
            + (origin.lat() - destination.lat()).abs())
            / 0.01;
        let distance = (steps * 1000.0).round();
        let duration = (steps * 600.0).round();
        Ok(json!({
            "status": "OK",
            "routes": [{
                "legs": [{"distance": {"value": distance}, "duration": {"value": duration}}],
                "overview_polyline": {"points": format!("poly{}", distance as u64)},
                "bounds": {
                    "northeast": {
                        "lat": origin.lat().max(destination.lat()),
                        "lng": origin.lng().max(destination.lng())
                    },
                    "southwest": {
                        "lat": origin.lat().min(destination.lat()),
                        "lng": origin.lng().min(destination.lng())
                    }
                }
            }]
        })
        .to_string())
    }
}

pub fn loc(lng: f64, lat: f64) -> Location {
    Location::new(lng, lat).expect("valid location")
}

/// A map wired to `transport` with test credentials installed.
pub fn route_map(transport: Arc<FixtureTransport>) -> RouteMap {
    let endpoints = Endpoints {
        directions: DIRECTIONS_URL.to_string(),
        static_map: STATIC_MAP_URL.to_string(),
    };
    let mut map = RouteMap::new(transport, endpoints, RenderConfig::default());
    map.set_credentials_unchecked(
        Credentials::new("static-key", "directions-key").expect("credentials"),
    )
    .expect("fresh map accepts credentials");
    map
}
