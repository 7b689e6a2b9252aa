mod common;

use std::sync::Arc;

use common::{loc, route_map, FixtureTransport};
use routemap_lib::{Error, TravelMode};

#[test]
fn adding_points_resolves_one_path_per_existing_member() {
    let transport = Arc::new(FixtureTransport::default());
    let mut map = route_map(transport.clone());

    map.add_point(loc(0.0, 0.0)).unwrap();
    assert_eq!(transport.calls(), 0);
    map.add_point(loc(0.01, 0.0)).unwrap();
    assert_eq!(transport.calls(), 1);
    map.add_point(loc(0.01, 0.01)).unwrap();
    assert_eq!(transport.calls(), 3);
    map.add_point(loc(0.0, 0.01)).unwrap();
    assert_eq!(transport.calls(), 6);

    assert_eq!(map.graph().edge_count(), 6);
    assert!(!map.add_point(loc(0.0, 0.0)).unwrap());
    assert_eq!(transport.calls(), 6);
}

#[test]
fn summary_excludes_paths_that_are_not_visible() {
    let (a, b, c) = (loc(0.0, 0.0), loc(0.01, 0.0), loc(0.01, 0.01));
    let mut map = route_map(Arc::new(FixtureTransport::default()));
    map.set_points([a, b, c]).unwrap();
    map.add_visible_path(a, b).unwrap();
    map.add_visible_path(b, c).unwrap();

    let summary = map.summary();
    assert_eq!(summary.paths, 2);
    assert_eq!(summary.distance_meters, 2000.0);
    assert_eq!(summary.duration_seconds, 1200.0);
    assert_eq!(summary.distance_text(), "1.2 miles");
    assert_eq!(summary.duration_text(), "20 minutes");
}

#[test]
fn infeasible_paths_cannot_be_shown() {
    let (a, b) = (loc(0.0, 0.0), loc(0.01, 0.0));
    let transport = FixtureTransport::default().with_status(a, b, "ZERO_RESULTS");
    let mut map = route_map(Arc::new(transport));
    map.set_points([a, b]).unwrap();

    assert_eq!(map.distance(a, b).unwrap(), -1.0);
    assert!(matches!(
        map.add_visible_path(a, b),
        Err(Error::InfeasiblePath { .. })
    ));
    assert!(map.visible().is_empty());
}

#[test]
fn removing_every_point_returns_to_unset() {
    let (a, b) = (loc(0.0, 0.0), loc(0.01, 0.0));
    let mut map = route_map(Arc::new(FixtureTransport::default()));
    map.set_points([a, b]).unwrap();
    map.add_visible_path(a, b).unwrap();

    assert!(map.remove_point(a));
    assert!(map.visible().is_empty());
    assert!(map.remove_point(b));
    assert!(map.graph().is_unset());
    assert!(matches!(map.bounds(), Err(Error::EmptyGraph)));
}

#[test]
fn distance_between_non_members_is_not_cached() {
    let (a, b) = (loc(0.0, 0.0), loc(0.02, 0.0));
    let transport = Arc::new(FixtureTransport::default());
    let map = route_map(transport.clone());

    assert_eq!(map.distance(a, a).unwrap(), 0.0);
    assert_eq!(transport.calls(), 0);
    assert_eq!(map.distance(a, b).unwrap(), 2000.0);
    assert_eq!(map.duration(a, b).unwrap(), 1200.0);
    assert_eq!(transport.calls(), 2);
    assert!(map.graph().is_empty());
}

#[test]
fn mode_change_hides_paths_without_a_route() {
    let (a, b, c) = (loc(0.0, 0.0), loc(0.01, 0.0), loc(0.01, 0.01));
    // Every pair touching `c` fails, whatever the mode.
    let transport = FixtureTransport::default()
        .with_status(a, c, "ZERO_RESULTS")
        .with_status(b, c, "ZERO_RESULTS");
    let mut map = route_map(Arc::new(transport));
    map.set_points([a, b]).unwrap();
    map.add_visible_path(a, b).unwrap();

    map.change_travel_mode("bicycling").unwrap();
    assert_eq!(map.travel_mode(), TravelMode::Bicycling);
    assert_eq!(map.visible().len(), 1);
    assert!(map
        .visible()
        .iter()
        .all(|path| path.mode() == TravelMode::Bicycling));

    map.add_point(c).unwrap();
    assert!(!map.graph().path(a, c).unwrap().is_feasible());
}

#[test]
fn failed_rebuild_keeps_previous_graph() {
    let (a, b, c) = (loc(0.0, 0.0), loc(0.01, 0.0), loc(0.01, 0.01));
    let transport = FixtureTransport::default().with_status(b, c, "OVER_QUERY_LIMIT");
    let mut map = route_map(Arc::new(transport));
    map.set_points([a, b]).unwrap();

    assert!(matches!(
        map.set_points([a, b, c]),
        Err(Error::QuotaExceeded { .. })
    ));
    assert_eq!(map.graph().members(), &[a, b]);
    assert_eq!(map.graph().edge_count(), 1);
}
