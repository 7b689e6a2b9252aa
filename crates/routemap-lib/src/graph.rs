use std::collections::HashMap;

use tracing::{debug, info};

use crate::error::Result;
use crate::location::Location;
use crate::path::{Path, PathKey};
use crate::routing::{RoutingClient, TravelMode};

/// Complete graph of resolved paths over the active point set.
///
/// Every pair of distinct members has exactly one [`Path`] (feasible or not),
/// keyed by its order-independent [`PathKey`]. Members keep their insertion
/// order, which is the order markers are drawn in.
#[derive(Debug, Clone, Default)]
pub struct PathGraph {
    members: Vec<Location>,
    edges: HashMap<PathKey, Path>,
    mode: TravelMode,
}

impl PathGraph {
    pub fn new(mode: TravelMode) -> Self {
        Self {
            members: Vec::new(),
            edges: HashMap::new(),
            mode,
        }
    }

    /// `true` until the first point is added, and again once the last point is removed.
    pub fn is_unset(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Location] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, location: Location) -> bool {
        self.members.contains(&location)
    }

    pub fn mode(&self) -> TravelMode {
        self.mode
    }

    /// Cached path between two members.
    pub fn path(&self, a: Location, b: Location) -> Option<&Path> {
        self.edges.get(&PathKey::new(a, b))
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.edges.values()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Add a point, resolving one path to every existing member.
    ///
    /// Returns `false` without any routing call when the point is already a
    /// member. If any resolution fails the graph is left unchanged.
    pub fn add_point(&mut self, client: &RoutingClient, location: Location) -> Result<bool> {
        if self.contains(location) {
            return Ok(false);
        }

        let new_edges = self
            .members
            .iter()
            .map(|&member| Path::resolve(client, location, member, self.mode))
            .collect::<Result<Vec<_>>>()?;

        debug!(%location, resolved = new_edges.len(), "added point");
        for path in new_edges {
            self.edges.insert(path.key(), path);
        }
        self.members.push(location);
        Ok(true)
    }

    /// Remove a point and every path touching it. Returns `false` if the point was absent.
    pub fn remove_point(&mut self, location: Location) -> bool {
        let Some(index) = self.members.iter().position(|member| *member == location) else {
            return false;
        };

        self.members.remove(index);
        self.edges.retain(|key, _| !key.touches(location));
        debug!(%location, remaining = self.members.len(), "removed point");
        true
    }

    /// Replace the whole member set, re-resolving every pair.
    ///
    /// Duplicates collapse to one member. The new graph is built before the
    /// old one is discarded, so a failed resolution keeps the previous state.
    pub fn set_points<I>(&mut self, client: &RoutingClient, points: I) -> Result<()>
    where
        I: IntoIterator<Item = Location>,
    {
        let mut members: Vec<Location> = Vec::new();
        for point in points {
            if !members.contains(&point) {
                members.push(point);
            }
        }

        let edges = resolve_complete(client, &members, self.mode)?;
        info!(
            members = members.len(),
            edges = edges.len(),
            mode = %self.mode,
            "rebuilt path graph"
        );
        self.members = members;
        self.edges = edges;
        Ok(())
    }

    /// Drop every member and path; the graph returns to the unset state.
    pub fn clear(&mut self) {
        self.members.clear();
        self.edges.clear();
    }

    /// Distance in meters between two locations, `-1.0` when no route exists.
    ///
    /// Uses the cached path when both are members; otherwise resolves a
    /// one-off path that is not cached.
    pub fn distance(&self, client: &RoutingClient, a: Location, b: Location) -> Result<f64> {
        self.measure(client, a, b, Path::distance)
    }

    /// Travel time in seconds between two locations, `-1.0` when no route exists.
    pub fn duration(&self, client: &RoutingClient, a: Location, b: Location) -> Result<f64> {
        self.measure(client, a, b, Path::duration)
    }

    fn measure(
        &self,
        client: &RoutingClient,
        a: Location,
        b: Location,
        metric: fn(&Path) -> f64,
    ) -> Result<f64> {
        if a == b {
            return Ok(0.0);
        }
        if let Some(path) = self.path(a, b) {
            return Ok(metric(path));
        }
        let path = Path::resolve(client, a, b, self.mode)?;
        Ok(metric(&path))
    }

    /// Switch travel mode and re-resolve every path.
    ///
    /// On failure both the previous mode and the previous paths are kept.
    pub fn change_travel_mode(&mut self, client: &RoutingClient, mode: TravelMode) -> Result<()> {
        let edges = resolve_complete(client, &self.members, mode)?;
        info!(from = %self.mode, to = %mode, edges = edges.len(), "changed travel mode");
        self.mode = mode;
        self.edges = edges;
        Ok(())
    }
}

fn resolve_complete(
    client: &RoutingClient,
    members: &[Location],
    mode: TravelMode,
) -> Result<HashMap<PathKey, Path>> {
    let mut edges = HashMap::with_capacity(members.len() * members.len().saturating_sub(1) / 2);
    for (index, &start) in members.iter().enumerate() {
        for &end in &members[index + 1..] {
            let path = Path::resolve(client, start, end, mode)?;
            edges.insert(path.key(), path);
        }
    }
    Ok(edges)
}
