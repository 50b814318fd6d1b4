//! Heuristic-guided search (A*)
//!
//! The heuristic is the straight-line distance to the target driven at an
//! assumed top speed, in minutes. It stays admissible as long as no edge is
//! faster than that speed; the default is the fastest road class.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::path::reconstruct_path;
use super::{Checkpoints, SearchResult, SearchStats, Visit};
use crate::geo::{haversine_km, minutes_at_speed, Coordinate};
use crate::graph::{Coordinates, NodeId, RoadGraph};
use crate::heap::MinHeap;
use crate::profile::RoadClass;

/// Straight-line travel time estimate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Heuristic {
    /// Assumed maximum speed; must be at least the fastest effective edge speed
    pub max_speed_kmh: f64,
}

impl Default for Heuristic {
    fn default() -> Self {
        Self {
            max_speed_kmh: RoadClass::fastest_speed_kmh(),
        }
    }
}

impl Heuristic {
    pub fn with_max_speed(max_speed_kmh: f64) -> Self {
        Self { max_speed_kmh }
    }

    /// Lower bound on the minutes needed from `from` to `to`
    pub fn estimate_minutes(&self, from: Coordinate, to: Coordinate) -> f64 {
        minutes_at_speed(haversine_km(from, to), self.max_speed_kmh)
    }
}

/// A* from `start` to `target` with the default heuristic
pub fn astar<N: NodeId>(
    graph: &RoadGraph<N>,
    coords: &Coordinates<N>,
    start: &N,
    target: &N,
) -> SearchResult<N> {
    astar_with(graph, coords, start, target, &Heuristic::default(), &mut Checkpoints::none())
}

/// A* with an explicit heuristic and progress notifications
///
/// Fails without exploring anything when `start` or `target` has no
/// coordinate. Other nodes without a coordinate get a zero estimate.
pub fn astar_with<N: NodeId>(
    graph: &RoadGraph<N>,
    coords: &Coordinates<N>,
    start: &N,
    target: &N,
    heuristic: &Heuristic,
    checkpoints: &mut Checkpoints<'_>,
) -> SearchResult<N> {
    let (Some(_), Some(&goal)) = (coords.get(start), coords.get(target)) else {
        debug!(?start, ?target, "astar: endpoint without coordinates");
        checkpoints.finish(0);
        return SearchResult::unreachable(0, Vec::new(), SearchStats::default());
    };
    if !graph.contains_node(start) {
        debug!(?start, "astar: start not in graph");
        checkpoints.finish(0);
        return SearchResult::unreachable(0, Vec::new(), SearchStats::default());
    }
    let estimate = |node: &N| {
        coords
            .get(node)
            .map_or(0.0, |&at| heuristic.estimate_minutes(at, goal))
    };

    let mut cost: HashMap<N, f64> = HashMap::new();
    let mut predecessor: HashMap<N, Option<N>> = HashMap::new();
    let mut frontier: MinHeap<f64, (f64, N)> = MinHeap::new();
    let mut settled: HashSet<N> = HashSet::new();
    let mut stats = SearchStats::default();
    let mut trace = Vec::new();

    let start_estimate = estimate(start);
    cost.insert(start.clone(), 0.0);
    predecessor.insert(start.clone(), None);
    frontier.insert(start_estimate, (0.0, start.clone()));
    stats.peak_frontier = 1;

    // Entries carry their g so stale ones are told apart by cost-so-far
    while let Some((_, (g, node))) = frontier.extract_min() {
        if cost.get(&node).is_some_and(|&best| g > best) {
            stats.stale_skipped += 1;
            continue;
        }

        trace.push(Visit::Settled {
            node: node.clone(),
            predecessor: predecessor.get(&node).cloned().flatten(),
        });
        settled.insert(node.clone());
        checkpoints.settled(settled.len(), frontier.len());

        if &node == target {
            let path = reconstruct_path(&predecessor, target);
            stats.state_entries = cost.len();
            checkpoints.finish(settled.len());
            debug!(explored = settled.len(), cost = g, hops = path.len(), "astar: target settled");
            return SearchResult::found(path, g, settled.len(), trace, stats);
        }

        for edge in graph.neighbors(&node) {
            stats.edges_relaxed += 1;
            let candidate = g + edge.weight;
            if candidate >= cost.get(&edge.to).copied().unwrap_or(f64::INFINITY) {
                continue;
            }
            let f = candidate + estimate(&edge.to);
            cost.insert(edge.to.clone(), candidate);
            predecessor.insert(edge.to.clone(), Some(node.clone()));
            frontier.insert(f, (candidate, edge.to.clone()));
            stats.peak_frontier = stats.peak_frontier.max(frontier.len());
        }
    }

    stats.state_entries = cost.len();
    checkpoints.finish(settled.len());
    debug!(
        explored = settled.len(),
        reached = cost.len(),
        "astar: frontier exhausted, target unreachable"
    );
    SearchResult::unreachable(settled.len(), trace, stats)
}
