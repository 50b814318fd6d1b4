//! Point-to-point shortest paths on road networks
//!
//! Dijkstra, A* and bidirectional Dijkstra over a shared [`RoadGraph`], with
//! per-run instrumentation ([`Report`]) and a side-by-side [`Comparison`].

pub mod algorithm;
pub mod geo;
pub mod graph;
pub mod heap;
pub mod maps;
pub mod profile;
pub mod report;
pub mod search;

pub use algorithm::{Algorithm, AlgorithmInfo};
pub use geo::Coordinate;
pub use graph::{Coordinates, Edge, NodeId, RoadGraph};
pub use heap::MinHeap;
pub use maps::google_maps_url;
pub use profile::RoadClass;
pub use report::{compare, compare_with, run, run_with, Comparison, Report, RouteAgreement, RunOptions};
pub use search::{
    astar, bidirectional, dijkstra, Heuristic, Progress, SearchObserver, SearchResult, SearchStats,
    Visit,
};
