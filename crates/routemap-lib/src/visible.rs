use tracing::warn;

use crate::error::{Error, Result};
use crate::graph::PathGraph;
use crate::location::Location;
use crate::path::{Path, PathKey};

/// Paths selected for rendering, in the order they were added.
///
/// Every entry is feasible and both of its endpoints are members of the
/// owning [`PathGraph`].
#[derive(Debug, Clone, Default)]
pub struct VisibleSet {
    paths: Vec<Path>,
}

impl VisibleSet {
    /// Mark a path visible. Returns `false` if an equal path is already present.
    pub fn insert(&mut self, path: Path, graph: &PathGraph) -> Result<bool> {
        validate(&path, graph)?;
        if self.contains(path.key()) {
            return Ok(false);
        }
        self.paths.push(path);
        Ok(true)
    }

    /// Replace every entry. All paths are validated before anything changes.
    pub fn replace(&mut self, paths: Vec<Path>, graph: &PathGraph) -> Result<()> {
        for path in &paths {
            validate(path, graph)?;
        }
        self.paths.clear();
        for path in paths {
            if !self.contains(path.key()) {
                self.paths.push(path);
            }
        }
        Ok(())
    }

    /// Remove the path with the given key. Absent paths are ignored.
    pub fn remove(&mut self, key: PathKey) -> bool {
        let before = self.paths.len();
        self.paths.retain(|path| path.key() != key);
        self.paths.len() != before
    }

    /// Remove every path touching `location`, returning how many were dropped.
    pub fn purge(&mut self, location: Location) -> usize {
        let before = self.paths.len();
        self.paths.retain(|path| !path.key().touches(location));
        before - self.paths.len()
    }

    /// Re-point every entry at the graph's current path for the same pair.
    ///
    /// Entries whose pair is no longer feasible (or no longer in the graph)
    /// are dropped and returned.
    pub fn refresh(&mut self, graph: &PathGraph) -> Vec<PathKey> {
        let mut dropped = Vec::new();
        let mut refreshed = Vec::with_capacity(self.paths.len());
        for path in self.paths.drain(..) {
            let (a, b) = path.key().endpoints();
            match graph.path(a, b) {
                Some(current) if current.is_feasible() => refreshed.push(current.clone()),
                _ => {
                    warn!(%a, %b, "visible path no longer routable; hiding it");
                    dropped.push(path.key());
                }
            }
        }
        self.paths = refreshed;
        dropped
    }

    pub fn contains(&self, key: PathKey) -> bool {
        self.paths.iter().any(|path| path.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.paths.iter()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// `true` while no path is marked visible.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }
}

fn validate(path: &Path, graph: &PathGraph) -> Result<()> {
    let (a, b) = (path.start(), path.end());
    if !path.is_feasible() {
        return Err(Error::InfeasiblePath { a, b });
    }
    if !graph.contains(a) || !graph.contains(b) {
        return Err(Error::UnknownEndpoint { a, b });
    }
    Ok(())
}

impl<'a> IntoIterator for &'a VisibleSet {
    type Item = &'a Path;
    type IntoIter = std::slice::Iter<'a, Path>;

    fn into_iter(self) -> Self::IntoIter {
        self.paths.iter()
    }
}
