//! The [`RouteMap`] context: one owned handle over credentials, render
//! settings, the path graph and the visible paths.
//!
//! # Example
//!
//! ```ignore
//! use routemap_lib::{Credentials, Location, RouteMap};
//!
//! let mut map = RouteMap::from_env()?;
//! map.set_credentials(Credentials::from_env()?)?;
//! let cs = Location::new(-74.65219, 40.35025)?;
//! let wawa = Location::new(-74.65904, 40.34187)?;
//! map.set_points([cs, wawa])?;
//! map.add_visible_path(cs, wawa)?;
//! println!("{}", map.render_request()?);
//! ```

use std::sync::Arc;

use tracing::{debug, info};

use crate::bounds::{aggregate_bounds, BoundingBox, MAX_ZOOM};
use crate::config::{validate_credentials, Credentials, Endpoints};
use crate::error::{Error, Result};
use crate::graph::PathGraph;
use crate::location::Location;
use crate::path::{Path, PathKey};
use crate::render::{RenderConfig, RenderRequest, RenderRequestBuilder, Zoom};
use crate::routing::{RoutingClient, TravelMode};
use crate::summary::TourSummary;
use crate::transport::{HttpTransport, Transport};
use crate::visible::VisibleSet;

/// Owned map state: construct once per run and mutate through `&mut self`.
#[derive(Debug)]
pub struct RouteMap {
    client: RoutingClient,
    endpoints: Endpoints,
    credentials: Option<Credentials>,
    config: RenderConfig,
    graph: PathGraph,
    visible: VisibleSet,
}

impl RouteMap {
    /// Create a map without credentials. Routing and rendering fail with
    /// [`Error::NotConfigured`] until [`RouteMap::set_credentials`] succeeds.
    pub fn new(transport: Arc<dyn Transport>, endpoints: Endpoints, config: RenderConfig) -> Self {
        Self {
            client: RoutingClient::new(transport, endpoints.directions.clone()),
            endpoints,
            credentials: None,
            config,
            graph: PathGraph::default(),
            visible: VisibleSet::default(),
        }
    }

    /// Create a map over the `reqwest` transport with endpoints from the environment.
    pub fn from_env() -> Result<Self> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::new()?);
        Ok(Self::new(
            transport,
            Endpoints::from_env(),
            RenderConfig::default(),
        ))
    }

    /// Validate `credentials` against both services, then install them.
    ///
    /// Credentials can be installed only once.
    pub fn set_credentials(&mut self, credentials: Credentials) -> Result<()> {
        if self.credentials.is_some() {
            return Err(Error::CredentialsAlreadySet);
        }
        validate_credentials(self.client.transport(), &self.endpoints, &credentials)?;
        self.install_credentials(credentials);
        Ok(())
    }

    /// Install credentials without contacting either service.
    pub fn set_credentials_unchecked(&mut self, credentials: Credentials) -> Result<()> {
        if self.credentials.is_some() {
            return Err(Error::CredentialsAlreadySet);
        }
        self.install_credentials(credentials);
        Ok(())
    }

    fn install_credentials(&mut self, credentials: Credentials) {
        self.client.set_credential(credentials.directions());
        self.credentials = Some(credentials);
    }

    pub fn is_configured(&self) -> bool {
        self.credentials.is_some()
    }

    pub fn graph(&self) -> &PathGraph {
        &self.graph
    }

    pub fn visible(&self) -> &VisibleSet {
        &self.visible
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut RenderConfig {
        &mut self.config
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.graph.mode()
    }

    /// Canvas size in pixels; a zero dimension falls back to 500.
    pub fn set_canvas_size(&mut self, width: u32, height: u32) {
        self.config.set_canvas_size(width, height);
    }

    pub fn set_path_color(&mut self, color: &str) -> Result<()> {
        self.config.set_path_color(color)
    }

    pub fn set_point_color(&mut self, color: &str) -> Result<()> {
        self.config.set_point_color(color)
    }

    /// Fix the map center, or clear the override with `None`.
    pub fn set_center(&mut self, center: Option<Location>) {
        self.config.set_center(center);
    }

    pub fn show_points(&mut self, show: bool) {
        self.config.set_show_points(show);
    }

    pub fn set_zoom(&mut self, level: u8) -> Result<()> {
        self.config.set_zoom(Zoom::Fixed(level))
    }

    // -------------------------------------------------------------------------
    // Points
    // -------------------------------------------------------------------------

    /// Add a point; resolves one path to every existing point.
    pub fn add_point(&mut self, location: Location) -> Result<bool> {
        self.graph.add_point(&self.client, location)
    }

    /// Remove a point and every visible path touching it.
    pub fn remove_point(&mut self, location: Location) -> bool {
        if !self.graph.remove_point(location) {
            return false;
        }
        let purged = self.visible.purge(location);
        if purged > 0 {
            debug!(%location, purged, "hid paths touching removed point");
        }
        true
    }

    /// Replace every point; visible paths are cleared.
    pub fn set_points<I>(&mut self, points: I) -> Result<()>
    where
        I: IntoIterator<Item = Location>,
    {
        self.graph.set_points(&self.client, points)?;
        self.visible.clear();
        Ok(())
    }

    /// Remove every point and visible path.
    pub fn clear(&mut self) {
        self.graph.clear();
        self.visible.clear();
    }

    /// Distance in meters, `-1.0` when no route exists.
    pub fn distance(&self, a: Location, b: Location) -> Result<f64> {
        self.graph.distance(&self.client, a, b)
    }

    /// Travel time in seconds, `-1.0` when no route exists.
    pub fn duration(&self, a: Location, b: Location) -> Result<f64> {
        self.graph.duration(&self.client, a, b)
    }

    /// Resolve a one-off path that is not cached in the graph.
    pub fn resolve_path(&self, a: Location, b: Location) -> Result<Path> {
        Path::resolve(&self.client, a, b, self.graph.mode())
    }

    /// Parse `mode` and re-resolve every path with it.
    pub fn change_travel_mode(&mut self, mode: &str) -> Result<()> {
        let mode: TravelMode = mode.parse()?;
        self.set_travel_mode(mode)
    }

    pub fn set_travel_mode(&mut self, mode: TravelMode) -> Result<()> {
        self.graph.change_travel_mode(&self.client, mode)?;
        let hidden = self.visible.refresh(&self.graph);
        if !hidden.is_empty() {
            info!(hidden = hidden.len(), %mode, "visible paths without a route were hidden");
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Visible paths
    // -------------------------------------------------------------------------

    /// Mark the cached path between two points as visible.
    pub fn add_visible_path(&mut self, a: Location, b: Location) -> Result<bool> {
        let path = self.member_path(a, b)?;
        self.visible.insert(path, &self.graph)
    }

    /// Mark an already resolved path as visible.
    pub fn add_visible(&mut self, path: Path) -> Result<bool> {
        self.visible.insert(path, &self.graph)
    }

    pub fn remove_visible_path(&mut self, a: Location, b: Location) -> bool {
        self.visible.remove(PathKey::new(a, b))
    }

    /// Replace the visible paths; nothing changes if any pair is rejected.
    pub fn set_visible_paths<I>(&mut self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (Location, Location)>,
    {
        let paths = pairs
            .into_iter()
            .map(|(a, b)| self.member_path(a, b))
            .collect::<Result<Vec<_>>>()?;
        self.visible.replace(paths, &self.graph)
    }

    pub fn clear_paths(&mut self) {
        self.visible.clear();
    }

    fn member_path(&self, a: Location, b: Location) -> Result<Path> {
        self.graph
            .path(a, b)
            .cloned()
            .ok_or(Error::UnknownEndpoint { a, b })
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Smallest box containing every point, visible path and the center override.
    pub fn bounds(&self) -> Result<BoundingBox> {
        aggregate_bounds(
            self.graph.members(),
            &self.visible,
            self.config.center(),
        )
    }

    /// Center override if set, otherwise the middle of [`RouteMap::bounds`].
    pub fn center(&self) -> Result<Location> {
        match self.config.center() {
            Some(center) => Ok(center),
            None => self.bounds()?.center(),
        }
    }

    /// Zoom level at which the current bounds fit the canvas.
    pub fn fitted_zoom(&self) -> Result<u8> {
        Ok(self
            .bounds()?
            .fit_zoom(self.config.width(), self.config.height()))
    }

    pub fn zoom_in(&mut self) -> Result<()> {
        let level = self.current_zoom()?;
        self.config.set_zoom(Zoom::Fixed((level + 1).min(MAX_ZOOM)))
    }

    pub fn zoom_out(&mut self) -> Result<()> {
        let level = self.current_zoom()?;
        self.config.set_zoom(Zoom::Fixed(level.saturating_sub(1)))
    }

    /// Let the renderer choose the zoom level again.
    pub fn enable_auto_zoom(&mut self) {
        self.config.set_auto_zoom();
    }

    /// Freeze the zoom at the level that currently fits the map.
    pub fn disable_auto_zoom(&mut self) -> Result<()> {
        let level = self.fitted_zoom()?;
        self.config.set_zoom(Zoom::Fixed(level))
    }

    fn current_zoom(&self) -> Result<u8> {
        match self.config.zoom() {
            Zoom::Fixed(level) => Ok(level),
            Zoom::Auto => self.fitted_zoom(),
        }
    }

    /// Compose the static map request for the current state.
    pub fn render_request(&self) -> Result<RenderRequest> {
        if self.graph.is_unset() {
            return Err(Error::NotConfigured { what: "map points" });
        }
        let credentials = self.credentials.as_ref().ok_or(Error::NotConfigured {
            what: "static map credential",
        })?;

        let center = match self.config.zoom() {
            Zoom::Fixed(_) => Some(self.center()?),
            Zoom::Auto => None,
        };
        RenderRequestBuilder::new(
            &self.endpoints.static_map,
            credentials.static_map(),
            &self.config,
        )
        .build(self.graph.members(), &self.visible, center)
    }

    /// Distance and time totals over the visible paths.
    pub fn summary(&self) -> TourSummary {
        TourSummary::from_paths(&self.visible)
    }
}
