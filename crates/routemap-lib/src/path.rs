use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::bounds::BoundingBox;
use crate::error::Result;
use crate::location::Location;
use crate::routing::{ResolvedRoute, RoutingClient, TravelMode};

/// Meters in one statute mile.
pub const METERS_PER_MILE: f64 = 1609.344;

/// Order-independent identity of an edge between two locations.
///
/// The endpoints are sorted on construction, so `PathKey::new(a, b)` and
/// `PathKey::new(b, a)` are the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PathKey {
    low: Location,
    high: Location,
}

impl PathKey {
    pub fn new(a: Location, b: Location) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    pub fn endpoints(&self) -> (Location, Location) {
        (self.low, self.high)
    }

    pub fn touches(&self, location: Location) -> bool {
        self.low == location || self.high == location
    }
}

/// Undirected edge between two locations, resolved once through the
/// directions service.
#[derive(Debug, Clone, Serialize)]
pub struct Path {
    start: Location,
    end: Location,
    mode: TravelMode,
    route: Option<ResolvedRoute>,
}

impl Path {
    /// Resolve the path between `start` and `end` with exactly one routing call.
    pub fn resolve(
        client: &RoutingClient,
        start: Location,
        end: Location,
        mode: TravelMode,
    ) -> Result<Self> {
        let route = client.route(start, end, mode)?;
        Ok(Self {
            start,
            end,
            mode,
            route,
        })
    }

    pub fn start(&self) -> Location {
        self.start
    }

    pub fn end(&self) -> Location {
        self.end
    }

    pub fn key(&self) -> PathKey {
        PathKey::new(self.start, self.end)
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    /// Whether the directions service reported at least one route.
    pub fn is_feasible(&self) -> bool {
        self.route.is_some()
    }

    /// Route length in meters, or `-1.0` when no route exists.
    pub fn distance(&self) -> f64 {
        self.route.as_ref().map_or(-1.0, |route| route.distance_meters)
    }

    /// Route length in miles rounded to one decimal, or `-1.0` when no route exists.
    pub fn distance_miles(&self) -> f64 {
        self.route.as_ref().map_or(-1.0, |route| {
            (route.distance_meters / METERS_PER_MILE * 10.0).round() / 10.0
        })
    }

    /// Travel time in seconds, or `-1.0` when no route exists.
    pub fn duration(&self) -> f64 {
        self.route.as_ref().map_or(-1.0, |route| route.duration_seconds)
    }

    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        self.route.as_ref().map(|route| &route.bounds)
    }

    /// Opaque encoded geometry, present only for feasible paths.
    pub fn geometry(&self) -> Option<&str> {
        self.route.as_ref().map(|route| route.geometry.as_str())
    }

    pub fn route(&self) -> Option<&ResolvedRoute> {
        self.route.as_ref()
    }
}

impl PartialEq for Path {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Path {}

impl Hash for Path {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
