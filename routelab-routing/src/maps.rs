//! Google Maps directions link for a computed route

use crate::geo::Coordinate;
use crate::graph::{Coordinates, NodeId};

pub const DEFAULT_WAYPOINT_LIMIT: usize = 10;

const DIRECTIONS_BASE: &str = "https://www.google.com/maps/dir/?api=1";

/// Directions URL from the first to the last path node that has a coordinate
///
/// Path nodes without a coordinate are skipped. Up to `waypoint_limit`
/// intermediate coordinates become waypoints, in path order. Returns `None`
/// when there is no path or fewer than two of its nodes resolve.
pub fn google_maps_url<N: NodeId>(
    path: Option<&[N]>,
    coords: &Coordinates<N>,
    waypoint_limit: usize,
) -> Option<String> {
    let resolved: Vec<Coordinate> = path?
        .iter()
        .filter_map(|node| coords.get(node).copied())
        .collect();
    let [origin, middle @ .., destination] = resolved.as_slice() else {
        return None;
    };

    let mut url = format!(
        "{DIRECTIONS_BASE}&origin={}&destination={}",
        lat_lon(origin),
        lat_lon(destination)
    );
    if waypoint_limit > 0 && !middle.is_empty() {
        let waypoints: Vec<String> = middle.iter().take(waypoint_limit).map(lat_lon).collect();
        url.push_str("&waypoints=");
        // '|' percent-encoded
        url.push_str(&waypoints.join("%7C"));
    }
    Some(url)
}

fn lat_lon(at: &Coordinate) -> String {
    format!("{},{}", at.lat, at.lon)
}
