// Test-only helpers for `routemap-lib` unit tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use reqwest::Url;
use serde_json::json;

use crate::error::{Error, Result};
use crate::location::Location;
use crate::path::PathKey;
use crate::routing::RoutingClient;
use crate::transport::Transport;

pub const DIRECTIONS_URL: &str = "https://routes.test/maps/api/directions/json";
pub const STATIC_MAP_URL: &str = "https://routes.test/maps/api/staticmap";

#[derive(Debug, Clone)]
enum Script {
    Status(String),
    Route { distance: f64, duration: f64 },
    Shaped {
        geometry: String,
        south_west: Location,
        north_east: Location,
    },
}

/// In-memory [`Transport`] that answers directions queries from a script and
/// records every URL it was asked for.
///
/// Unscripted pairs get a feasible route whose distance grows with the
/// straight-line separation of the endpoints.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    scripts: HashMap<PathKey, Script>,
    static_map_status: Option<u16>,
    requests: Mutex<Vec<String>>,
}

impl ScriptedTransport {
    pub fn with_status(mut self, a: Location, b: Location, status: &str) -> Self {
        self.scripts
            .insert(PathKey::new(a, b), Script::Status(status.to_string()));
        self
    }

    pub fn with_route(mut self, a: Location, b: Location, distance: f64, duration: f64) -> Self {
        self.scripts
            .insert(PathKey::new(a, b), Script::Route { distance, duration });
        self
    }

    /// Answer the pair with a route carrying the given geometry token and bounds.
    pub fn with_shape(
        mut self,
        a: Location,
        b: Location,
        geometry: &str,
        south_west: Location,
        north_east: Location,
    ) -> Self {
        self.scripts.insert(
            PathKey::new(a, b),
            Script::Shaped {
                geometry: geometry.to_string(),
                south_west,
                north_east,
            },
        );
        self
    }

    pub fn with_static_map_status(mut self, status: u16) -> Self {
        self.static_map_status = Some(status);
        self
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn answer_directions(&self, url: &Url) -> String {
        let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
        let origin: Location = query["origin"].parse().unwrap();
        let destination: Location = query["destination"].parse().unwrap();

        match self.scripts.get(&PathKey::new(origin, destination)) {
            Some(Script::Status(status)) => status_response(status),
            Some(Script::Route { distance, duration }) => {
                ok_response(origin, destination, *distance, *duration)
            }
            Some(Script::Shaped {
                geometry,
                south_west,
                north_east,
            }) => {
                let (distance, duration) = default_metrics(origin, destination);
                route_response(distance, duration, geometry, *south_west, *north_east)
            }
            None => {
                let (distance, duration) = default_metrics(origin, destination);
                ok_response(origin, destination, distance, duration)
            }
        }
    }
}

impl Transport for ScriptedTransport {
    fn get(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        let parsed = Url::parse(url).unwrap();

        if parsed.path().ends_with("staticmap") {
            return match self.static_map_status {
                Some(status) => Err(Error::HttpStatus {
                    endpoint: STATIC_MAP_URL.to_string(),
                    status,
                }),
                None => Ok("PNG".to_string()),
            };
        }

        Ok(self.answer_directions(&parsed))
    }
}

pub fn configured_client(transport: Arc<ScriptedTransport>) -> RoutingClient {
    RoutingClient::new(transport, DIRECTIONS_URL).with_credential("test-key")
}

pub fn default_metrics(a: Location, b: Location) -> (f64, f64) {
    let degrees = ((a.lng() - b.lng()).powi(2) + (a.lat() - b.lat()).powi(2)).sqrt();
    let distance = (degrees * 111_000.0).round();
    (distance, (distance / 1.4).round())
}

pub fn ok_response(a: Location, b: Location, distance: f64, duration: f64) -> String {
    let south_west = Location::new(a.lng().min(b.lng()), a.lat().min(b.lat())).unwrap();
    let north_east = Location::new(a.lng().max(b.lng()), a.lat().max(b.lat())).unwrap();
    route_response(
        distance,
        duration,
        &format!("enc{}", distance as u64),
        south_west,
        north_east,
    )
}

pub fn route_response(
    distance: f64,
    duration: f64,
    geometry: &str,
    south_west: Location,
    north_east: Location,
) -> String {
    json!({
        "status": "OK",
        "routes": [{
            "legs": [{"distance": {"value": distance}, "duration": {"value": duration}}],
            "overview_polyline": {"points": geometry},
            "bounds": {
                "northeast": {"lat": north_east.lat(), "lng": north_east.lng()},
                "southwest": {"lat": south_west.lat(), "lng": south_west.lng()}
            }
        }]
    })
    .to_string()
}

pub fn status_response(status: &str) -> String {
    json!({"status": status, "routes": []}).to_string()
}
