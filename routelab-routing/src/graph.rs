//! Directed, weighted road graph
//!
//! The graph is assembled once by whoever ingests the map data and then only
//! read: every search takes `&RoadGraph` and never mutates it, so one graph can
//! be shared by searches running on different threads.
//!
//! Preconditions the graph does not check: weights are finite and
//! non-negative. A negative weight silently breaks every search here.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use crate::geo::Coordinate;

/// Node identifier: any cheap-to-compare key (OSM ids, strings, ...)
pub trait NodeId: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> NodeId for T {}

/// Outgoing edge: target node and traversal cost in minutes
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<N> {
    pub to: N,
    pub weight: f64,
}

/// Node id to (lat, lon); may be partial
pub type Coordinates<N> = HashMap<N, Coordinate>;

#[derive(Debug, Clone)]
pub struct RoadGraph<N> {
    adjacency: HashMap<N, Vec<Edge<N>>>,
    edge_count: usize,
}

impl<N: NodeId> Default for RoadGraph<N> {
    fn default() -> Self {
        Self {
            adjacency: HashMap::new(),
            edge_count: 0,
        }
    }
}

impl<N: NodeId> RoadGraph<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an adjacency map. Nodes that only appear as edge targets get
    /// an empty adjacency entry so they count as graph nodes.
    pub fn from_adjacency(adjacency: HashMap<N, Vec<Edge<N>>>) -> Self {
        let mut graph = Self::new();
        for (from, edges) in adjacency {
            graph.add_node(from.clone());
            for edge in edges {
                graph.add_edge(from.clone(), edge.to, edge.weight);
            }
        }
        graph
    }

    /// Build from `(from, to, weight)` triples, keeping their order per source node
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (N, N, f64)>,
    {
        let mut graph = Self::new();
        for (from, to, weight) in edges {
            graph.add_edge(from, to, weight);
        }
        graph
    }

    pub fn add_node(&mut self, node: N) {
        self.adjacency.entry(node).or_default();
    }

    pub fn add_edge(&mut self, from: N, to: N, weight: f64) {
        self.add_node(to.clone());
        self.adjacency
            .entry(from)
            .or_default()
            .push(Edge { to, weight });
        self.edge_count += 1;
    }

    /// Outgoing edges in insertion order; empty for unknown nodes
    pub fn neighbors(&self, node: &N) -> &[Edge<N>] {
        self.adjacency
            .get(node)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains_node(&self, node: &N) -> bool {
        self.adjacency.contains_key(node)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.keys()
    }

    pub fn edges(&self) -> impl Iterator<Item = (&N, &Edge<N>)> {
        self.adjacency
            .iter()
            .flat_map(|(from, edges)| edges.iter().map(move |edge| (from, edge)))
    }

    /// Cheapest weight among parallel edges `from -> to`
    pub fn edge_weight(&self, from: &N, to: &N) -> Option<f64> {
        self.neighbors(from)
            .iter()
            .filter(|edge| &edge.to == to)
            .map(|edge| edge.weight)
            .reduce(f64::min)
    }

    /// Graph with every edge `u -> v (w)` turned into `v -> u (w)`, O(V + E)
    pub fn reversed(&self) -> Self {
        let mut reverse = Self::new();
        for node in self.nodes() {
            reverse.add_node(node.clone());
        }
        for (from, edge) in self.edges() {
            reverse.add_edge(edge.to.clone(), from.clone(), edge.weight);
        }
        reverse
    }
}
