//! Route resolution against the external directions service.
//!
//! This module provides:
//! - [`TravelMode`] - Travel modes accepted by the directions service
//! - [`RouteStatus`] - Status vocabulary reported by the directions service
//! - [`ResolvedRoute`] - Distance, duration, bounds and geometry of a feasible route
//! - [`RoutingClient`] - Issues one blocking directions query per origin/destination pair
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use routemap_lib::config::DEFAULT_DIRECTIONS_URL;
//! use routemap_lib::{HttpTransport, Location, RoutingClient, TravelMode};
//!
//! let client = RoutingClient::new(Arc::new(HttpTransport::new()?), DEFAULT_DIRECTIONS_URL)
//!     .with_credential("key");
//! let origin = Location::new(-74.65219, 40.35025)?;
//! let destination = Location::new(-74.65904, 40.34187)?;
//! let route = client.route(origin, destination, TravelMode::Walking)?;
//! ```

mod client;

pub use client::{parse_directions, RoutingClient};

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::bounds::BoundingBox;
use crate::error::Error;

/// Travel modes supported by the directions service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Driving,
    #[default]
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "bicycling" => Ok(TravelMode::Bicycling),
            "transit" => Ok(TravelMode::Transit),
            _ => Err(Error::UnsupportedMode {
                mode: s.to_string(),
            }),
        }
    }
}

/// Status reported by the directions service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteStatus {
    Ok,
    ZeroResults,
    MaxWaypointsExceeded,
    MaxRouteLengthExceeded,
    InvalidRequest,
    NotFound,
    RequestDenied,
    OverQueryLimit,
    OverDailyLimit,
    Unknown(String),
}

impl RouteStatus {
    /// Statuses meaning "there is no route", which is a valid outcome rather than an error.
    pub fn is_no_route(&self) -> bool {
        matches!(
            self,
            RouteStatus::ZeroResults
                | RouteStatus::MaxWaypointsExceeded
                | RouteStatus::MaxRouteLengthExceeded
        )
    }
}

impl From<&str> for RouteStatus {
    fn from(value: &str) -> Self {
        match value {
            "OK" => RouteStatus::Ok,
            "ZERO_RESULTS" => RouteStatus::ZeroResults,
            "MAX_WAYPOINTS_EXCEEDED" => RouteStatus::MaxWaypointsExceeded,
            "MAX_ROUTE_LENGTH_EXCEEDED" => RouteStatus::MaxRouteLengthExceeded,
            "INVALID_REQUEST" => RouteStatus::InvalidRequest,
            "NOT_FOUND" => RouteStatus::NotFound,
            "REQUEST_DENIED" => RouteStatus::RequestDenied,
            "OVER_QUERY_LIMIT" => RouteStatus::OverQueryLimit,
            "OVER_DAILY_LIMIT" => RouteStatus::OverDailyLimit,
            other => RouteStatus::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for RouteStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            RouteStatus::Ok => "OK",
            RouteStatus::ZeroResults => "ZERO_RESULTS",
            RouteStatus::MaxWaypointsExceeded => "MAX_WAYPOINTS_EXCEEDED",
            RouteStatus::MaxRouteLengthExceeded => "MAX_ROUTE_LENGTH_EXCEEDED",
            RouteStatus::InvalidRequest => "INVALID_REQUEST",
            RouteStatus::NotFound => "NOT_FOUND",
            RouteStatus::RequestDenied => "REQUEST_DENIED",
            RouteStatus::OverQueryLimit => "OVER_QUERY_LIMIT",
            RouteStatus::OverDailyLimit => "OVER_DAILY_LIMIT",
            RouteStatus::Unknown(other) => other.as_str(),
        };
        f.write_str(value)
    }
}

/// Feasible route returned by the directions service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoute {
    /// Sum of every leg's distance, in meters.
    pub distance_meters: f64,
    /// Sum of every leg's duration, in seconds.
    pub duration_seconds: f64,
    pub bounds: BoundingBox,
    /// Provider-encoded route shape, passed through unmodified.
    pub geometry: String,
}
