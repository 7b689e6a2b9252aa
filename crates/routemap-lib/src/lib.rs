//! Routemap library entry points.
//!
//! This crate resolves travel paths between geographic points through an
//! external directions service, keeps a complete graph of those paths, and
//! composes static map requests for the paths selected for display.
//! Higher-level consumers (the CLI) should only depend on the items exported
//! here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod bounds;
pub mod config;
pub mod error;
pub mod graph;
pub mod location;
pub mod map;
pub mod path;
pub mod render;
pub mod routing;
pub mod summary;
pub mod transport;
pub mod visible;

#[cfg(test)]
mod test_helpers;

pub use bounds::{aggregate_bounds, BoundingBox, MAX_ZOOM};
pub use config::{validate_credentials, Credentials, Endpoints};
pub use error::{Error, Result};
pub use graph::PathGraph;
pub use location::Location;
pub use map::RouteMap;
pub use path::{Path, PathKey, METERS_PER_MILE};
pub use render::{HexColor, RenderConfig, RenderRequest, RenderRequestBuilder, Zoom};
pub use routing::{ResolvedRoute, RouteStatus, RoutingClient, TravelMode};
pub use summary::{format_duration, format_miles, TourSummary};
pub use transport::{HttpTransport, Transport};
pub use visible::VisibleSet;
