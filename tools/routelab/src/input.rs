//! JSON graph files
//!
//! ```json
//! { "nodes": { "A": [26.28, 50.20], "B": [26.29, 50.21] },
//!   "edges": [ { "from": "A", "to": "B", "minutes": 1.5 },
//!              { "from": "B", "to": "A", "highway": "primary", "oneway": true } ] }
//! ```
//!
//! An edge carries either `minutes` directly or a `highway` road class. Class
//! edges are weighted from the segment length at the class speed and are
//! two-way unless `oneway` is set; `minutes` edges are one-way unless `oneway`
//! is `false`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use routelab_common::{Error, Result};
use routelab_routing::geo::haversine_km;
use routelab_routing::profile::edge_minutes;
use routelab_routing::{Coordinate, Coordinates, RoadClass, RoadGraph};
use serde::Deserialize;
use tracing::{debug, warn};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct GraphFile {
    #[serde(default)]
    nodes: BTreeMap<String, [f64; 2]>,
    #[serde(default)]
    edges: Vec<EdgeRecord>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct EdgeRecord {
    from: String,
    to: String,
    minutes: Option<f64>,
    highway: Option<RoadClass>,
    oneway: Option<bool>,
}

/// Routing graph plus whatever node coordinates the file had
pub struct LoadedGraph {
    pub graph: RoadGraph<String>,
    pub coords: Coordinates<String>,
    /// Class edges dropped because an endpoint had no coordinate
    pub skipped_edges: usize,
}

pub fn load_graph<P: AsRef<Path>>(path: P) -> Result<LoadedGraph> {
    let content = fs::read_to_string(path)?;
    parse_graph(&content)
}

pub fn parse_graph(content: &str) -> Result<LoadedGraph> {
    let file: GraphFile = serde_json::from_str(content)?;

    let mut graph = RoadGraph::new();
    let mut coords = Coordinates::new();
    for (id, [lat, lon]) in &file.nodes {
        if !(-90.0..=90.0).contains(lat) || !(-180.0..=180.0).contains(lon) {
            return Err(Error::InvalidGraph(format!(
                "node '{id}' has out-of-range coordinate ({lat}, {lon})"
            )));
        }
        coords.insert(id.clone(), Coordinate::new(*lat, *lon));
        graph.add_node(id.clone());
    }

    let mut skipped_edges = 0;
    for (index, edge) in file.edges.into_iter().enumerate() {
        let (weight, two_way_by_default) = match (edge.minutes, edge.highway) {
            (Some(minutes), _) => (minutes, false),
            (None, Some(class)) => {
                let (Some(&a), Some(&b)) = (coords.get(&edge.from), coords.get(&edge.to)) else {
                    warn!(
                        index,
                        from = %edge.from,
                        to = %edge.to,
                        "skipping road-class edge: endpoint has no coordinate"
                    );
                    skipped_edges += 1;
                    continue;
                };
                (edge_minutes(haversine_km(a, b), class), true)
            }
            (None, None) => {
                return Err(Error::InvalidGraph(format!(
                    "edge {index} ({} -> {}) has neither minutes nor highway",
                    edge.from, edge.to
                )))
            }
        };
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(Error::InvalidGraph(format!(
                "edge {index} ({} -> {}) has invalid weight {weight}",
                edge.from, edge.to
            )));
        }

        let two_way = edge.oneway.map_or(two_way_by_default, |oneway| !oneway);
        if two_way {
            graph.add_edge(edge.to.clone(), edge.from.clone(), weight);
        }
        graph.add_edge(edge.from, edge.to, weight);
    }

    if skipped_edges > 0 {
        warn!(skipped_edges, "some edges were skipped while loading the graph");
    }
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        coordinates = coords.len(),
        "graph loaded"
    );
    Ok(LoadedGraph {
        graph,
        coords,
        skipped_edges,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minutes_edges_are_directed() {
        let loaded = parse_graph(
            r#"{"edges": [{"from": "A", "to": "B", "minutes": 1.0},
                          {"from": "B", "to": "C", "minutes": 2.5, "oneway": false}]}"#,
        )
        .unwrap();
        let graph = &loaded.graph;
        let (a, b, c) = ("A".to_string(), "B".to_string(), "C".to_string());
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_weight(&a, &b), Some(1.0));
        assert_eq!(graph.edge_weight(&b, &a), None);
        assert_eq!(graph.edge_weight(&c, &b), Some(2.5));
        assert!(loaded.coords.is_empty());
    }

    #[test]
    fn test_highway_edges_use_class_speed() {
        let loaded = parse_graph(
            r#"{"nodes": {"A": [26.28, 50.20], "B": [26.29, 50.20]},
                "edges": [{"from": "A", "to": "B", "highway": "residential"}]}"#,
        )
        .unwrap();
        let (a, b) = ("A".to_string(), "B".to_string());
        let expected = edge_minutes(
            haversine_km(loaded.coords[&a], loaded.coords[&b]),
            RoadClass::Residential,
        );
        assert_eq!(loaded.graph.edge_weight(&a, &b), Some(expected));
        assert_eq!(loaded.graph.edge_weight(&b, &a), Some(expected));
    }

    #[test]
    fn test_oneway_highway() {
        let loaded = parse_graph(
            r#"{"nodes": {"A": [26.28, 50.20], "B": [26.29, 50.20]},
                "edges": [{"from": "A", "to": "B", "highway": "living_street", "oneway": true}]}"#,
        )
        .unwrap();
        assert_eq!(loaded.graph.edge_count(), 1);
    }

    #[test]
    fn test_highway_edge_without_coordinates_is_skipped() {
        let loaded = parse_graph(
            r#"{"nodes": {"A": [26.28, 50.20]},
                "edges": [{"from": "A", "to": "B", "highway": "primary"}]}"#,
        )
        .unwrap();
        assert_eq!(loaded.skipped_edges, 1);
        assert_eq!(loaded.graph.edge_count(), 0);
    }

    #[test]
    fn test_edge_needs_weight_or_class() {
        let err = parse_graph(r#"{"edges": [{"from": "A", "to": "B"}]}"#).err().unwrap();
        assert!(matches!(err, Error::InvalidGraph(_)));
        assert!(err.to_string().contains("neither minutes nor highway"));
    }

    #[test]
    fn test_negative_weight_is_rejected() {
        let err = parse_graph(r#"{"edges": [{"from": "A", "to": "B", "minutes": -1.0}]}"#)
            .err()
            .unwrap();
        assert!(matches!(err, Error::InvalidGraph(_)));
    }

    #[test]
    fn test_bad_coordinate_is_rejected() {
        let err = parse_graph(r#"{"nodes": {"A": [95.0, 0.0]}}"#).err().unwrap();
        assert!(matches!(err, Error::InvalidGraph(_)));
    }

    #[test]
    fn test_unknown_road_class_is_a_json_error() {
        let err = parse_graph(r#"{"edges": [{"from": "A", "to": "B", "highway": "footway"}]}"#)
            .err()
            .unwrap();
        assert!(matches!(err, Error::Json(_)));
    }
}
