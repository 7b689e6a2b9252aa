//! Bounding rectangles over points and routes.

use std::f64::consts::PI;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::location::Location;
use crate::path::Path;

/// Highest zoom level accepted by the static map service.
pub const MAX_ZOOM: u8 = 21;

/// Width and height of one map tile in pixels at zoom level zero.
const TILE_SIZE: f64 = 256.0;

/// Axis-aligned box in degrees.
///
/// West/east are the lowest/highest longitudes, south/north the
/// lowest/highest latitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub west: f64,
    pub east: f64,
    pub south: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Degenerate box covering a single point.
    pub fn point(location: Location) -> Self {
        Self {
            west: location.lng(),
            east: location.lng(),
            south: location.lat(),
            north: location.lat(),
        }
    }

    /// Box spanned by a south-west and a north-east corner.
    pub fn from_corners(south_west: Location, north_east: Location) -> Self {
        Self::point(south_west).union(&Self::point(north_east))
    }

    pub fn union(&self, other: &BoundingBox) -> Self {
        Self {
            west: self.west.min(other.west),
            east: self.east.max(other.east),
            south: self.south.min(other.south),
            north: self.north.max(other.north),
        }
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Result<Location> {
        Location::new((self.west + self.east) / 2.0, (self.south + self.north) / 2.0)
    }

    /// Largest Web-Mercator zoom level at which the box fits on a
    /// `width` × `height` pixel canvas.
    pub fn fit_zoom(&self, width: u32, height: u32) -> u8 {
        let x_fraction = (self.east - self.west) / 360.0;
        let y_fraction = mercator_y(self.north) - mercator_y(self.south);

        let scale_x = f64::from(width) / (TILE_SIZE * x_fraction);
        let scale_y = f64::from(height) / (TILE_SIZE * y_fraction);
        let scale = scale_x.min(scale_y);

        if !scale.is_finite() {
            return MAX_ZOOM;
        }
        if scale < 1.0 {
            return 0;
        }
        (scale.log2().floor() as u8).min(MAX_ZOOM)
    }
}

/// Normalized Web-Mercator y coordinate, growing northwards, in [0, 1].
fn mercator_y(lat: f64) -> f64 {
    let radians = lat.to_radians();
    let projected = (radians.tan() + 1.0 / radians.cos()).ln();
    (1.0 + projected / PI) / 2.0
}

/// Compute the smallest box containing every member location, the bounds of
/// every visible path, and the fixed center when one is set.
///
/// Fails with [`Error::EmptyGraph`] when there are no members.
pub fn aggregate_bounds<'a>(
    members: &[Location],
    visible: impl IntoIterator<Item = &'a Path>,
    center: Option<Location>,
) -> Result<BoundingBox> {
    let (first, rest) = members.split_first().ok_or(Error::EmptyGraph)?;

    let mut bounds = BoundingBox::point(*first);
    for location in rest {
        bounds = bounds.union(&BoundingBox::point(*location));
    }
    for path_bounds in visible.into_iter().filter_map(Path::bounding_box) {
        bounds = bounds.union(path_bounds);
    }
    if let Some(center) = center {
        bounds = bounds.union(&BoundingBox::point(center));
    }

    Ok(bounds)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::routing::TravelMode;
    use crate::test_helpers::{configured_client, ScriptedTransport};

    fn loc(lng: f64, lat: f64) -> Location {
        Location::new(lng, lat).unwrap()
    }

    #[test]
    fn single_member_gives_degenerate_box() {
        let only = loc(-74.65219, 40.35025);
        let bounds = aggregate_bounds(&[only], std::iter::empty(), None).unwrap();
        assert_eq!(bounds, BoundingBox::point(only));
        assert_eq!(bounds.west, bounds.east);
        assert_eq!(bounds.south, bounds.north);
    }

    #[test]
    fn empty_members_fail() {
        assert!(matches!(
            aggregate_bounds(&[], std::iter::empty(), None),
            Err(Error::EmptyGraph)
        ));
    }

    #[test]
    fn center_override_widens_box() {
        let members = [loc(0.0, 0.0), loc(1.0, 1.0)];
        let bounds = aggregate_bounds(&members, std::iter::empty(), Some(loc(-2.0, 3.0))).unwrap();
        assert_eq!(
            bounds,
            BoundingBox {
                west: -2.0,
                east: 1.0,
                south: 0.0,
                north: 3.0
            }
        );
    }

    #[test]
    fn visible_route_bounds_widen_box() {
        let (a, b) = (loc(0.0, 0.0), loc(1.0, 1.0));
        let client = configured_client(Arc::new(ScriptedTransport::default().with_shape(
            a,
            b,
            "detour",
            loc(-5.0, -5.0),
            loc(5.0, 5.0),
        )));
        let path = Path::resolve(&client, a, b, TravelMode::Walking).unwrap();

        let members_only = aggregate_bounds(&[a, b], std::iter::empty(), None).unwrap();
        assert_eq!(members_only, BoundingBox::from_corners(a, b));

        let bounds = aggregate_bounds(&[a, b], [&path], None).unwrap();
        assert_eq!(
            bounds,
            BoundingBox {
                west: -5.0,
                east: 5.0,
                south: -5.0,
                north: 5.0
            }
        );
    }

    #[test]
    fn infeasible_paths_add_no_bounds() {
        let (a, b) = (loc(0.0, 0.0), loc(1.0, 1.0));
        let client = configured_client(Arc::new(
            ScriptedTransport::default().with_status(a, b, "ZERO_RESULTS"),
        ));
        let path = Path::resolve(&client, a, b, TravelMode::Walking).unwrap();

        let bounds = aggregate_bounds(&[a, b], [&path], None).unwrap();
        assert_eq!(bounds, BoundingBox::from_corners(a, b));
    }

    #[test]
    fn corners_are_normalized() {
        let bounds = BoundingBox::from_corners(loc(10.0, 5.0), loc(-10.0, -5.0));
        assert_eq!(bounds.west, -10.0);
        assert_eq!(bounds.east, 10.0);
        assert_eq!(bounds.south, -5.0);
        assert_eq!(bounds.north, 5.0);
    }

    #[test]
    fn center_is_midpoint() {
        let bounds = BoundingBox::from_corners(loc(-10.0, -4.0), loc(10.0, 6.0));
        assert_eq!(bounds.center().unwrap(), loc(0.0, 1.0));
    }

    #[test]
    fn fit_zoom_handles_extremes() {
        let point = BoundingBox::point(loc(-74.0, 40.0));
        assert_eq!(point.fit_zoom(500, 500), MAX_ZOOM);

        let world = BoundingBox::from_corners(loc(-180.0, -85.0), loc(180.0, 85.0));
        assert_eq!(world.fit_zoom(256, 256), 0);
        assert_eq!(world.fit_zoom(512, 512), 1);
    }

    #[test]
    fn fit_zoom_shrinks_as_box_grows() {
        let small = BoundingBox::from_corners(loc(-74.66, 40.34), loc(-74.65, 40.35));
        let large = BoundingBox::from_corners(loc(-75.0, 40.0), loc(-73.0, 41.0));
        assert!(small.fit_zoom(500, 500) > large.fit_zoom(500, 500));
    }
}
