//! Point-to-point shortest path searches
//!
//! All three strategies take the same read-only graph and return the same
//! [`SearchResult`]. Failures (unreachable target, missing coordinates for A*)
//! are ordinary results with `path == None`, never errors.
//!
//! Every call allocates its own cost maps, predecessor maps and frontier, so
//! concurrent calls on a shared `&RoadGraph` do not interfere.

pub mod astar;
pub mod bidirectional;
pub mod dijkstra;
pub mod path;

use std::collections::{HashMap, HashSet};
use std::mem::size_of;

use serde::Serialize;

use crate::graph::{Edge, NodeId};
use crate::heap::MinHeap;

pub use astar::{astar, astar_with, Heuristic};
pub use bidirectional::{bidirectional, bidirectional_with};
pub use dijkstra::{dijkstra, dijkstra_with};
pub use path::{join_at_meeting, reconstruct_path};

/// One settled node in the order the search settled it
///
/// `predecessor` is the node the settled node was reached from, `None` for the
/// origin of that search direction. For backward visits it is the next node
/// towards the target.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "side", rename_all = "snake_case")]
pub enum Visit<N> {
    /// Single-direction search (Dijkstra, A*)
    Settled { node: N, predecessor: Option<N> },
    /// Forward half of a bidirectional search
    Forward { node: N, predecessor: Option<N> },
    /// Backward half of a bidirectional search
    Backward { node: N, predecessor: Option<N> },
}

impl<N> Visit<N> {
    pub fn node(&self) -> &N {
        match self {
            Visit::Settled { node, .. } | Visit::Forward { node, .. } | Visit::Backward { node, .. } => {
                node
            }
        }
    }

    pub fn predecessor(&self) -> Option<&N> {
        match self {
            Visit::Settled { predecessor, .. }
            | Visit::Forward { predecessor, .. }
            | Visit::Backward { predecessor, .. } => predecessor.as_ref(),
        }
    }
}

/// Work counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStats {
    /// Outgoing edges examined
    pub edges_relaxed: usize,
    /// Superseded frontier entries discarded on extraction
    pub stale_skipped: usize,
    /// Largest frontier size reached (per direction, summed for bidirectional)
    pub peak_frontier: usize,
    /// Entries in the cost/predecessor maps when the search stopped
    pub state_entries: usize,
}

impl SearchStats {
    /// Rough heap footprint of the search state for node ids of type `N`
    ///
    /// Counts one cost entry, one predecessor entry and the peak number of
    /// frontier entries. Hash table overhead is ignored.
    pub fn memory_estimate_bytes<N>(&self) -> usize {
        let cost_entry = size_of::<N>() + size_of::<f64>();
        let predecessor_entry = size_of::<N>() + size_of::<Option<N>>();
        let frontier_entry = size_of::<(f64, N)>();
        self.state_entries * (cost_entry + predecessor_entry) + self.peak_frontier * frontier_entry
    }
}

/// Outcome of one search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult<N> {
    /// Start to target, `None` when no route exists
    pub path: Option<Vec<N>>,
    /// Sum of edge weights along `path` (minutes)
    pub total_cost: Option<f64>,
    /// Distinct nodes settled by the search
    pub nodes_explored: usize,
    pub trace: Vec<Visit<N>>,
    pub stats: SearchStats,
}

impl<N> SearchResult<N> {
    pub(crate) fn found(
        path: Vec<N>,
        cost: f64,
        nodes_explored: usize,
        trace: Vec<Visit<N>>,
        stats: SearchStats,
    ) -> Self {
        Self {
            path: Some(path),
            total_cost: Some(cost),
            nodes_explored,
            trace,
            stats,
        }
    }

    pub(crate) fn unreachable(nodes_explored: usize, trace: Vec<Visit<N>>, stats: SearchStats) -> Self {
        Self {
            path: None,
            total_cost: None,
            nodes_explored,
            trace,
            stats,
        }
    }

    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
}

/// Snapshot handed to a [`SearchObserver`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub explored: usize,
    pub frontier_len: usize,
    pub finished: bool,
}

/// Receives coarse progress notifications. Observers cannot steer the search.
pub trait SearchObserver {
    fn on_progress(&mut self, progress: Progress);
}

/// Optional observer plus the notification interval in settled nodes
pub struct Checkpoints<'a> {
    observer: Option<&'a mut dyn SearchObserver>,
    interval: usize,
}

impl<'a> Checkpoints<'a> {
    pub fn none() -> Self {
        Self {
            observer: None,
            interval: usize::MAX,
        }
    }

    pub fn new(observer: &'a mut dyn SearchObserver, interval: usize) -> Self {
        Self {
            observer: Some(observer),
            interval: interval.max(1),
        }
    }

    pub(crate) fn settled(&mut self, explored: usize, frontier_len: usize) {
        if explored % self.interval != 0 {
            return;
        }
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_progress(Progress {
                explored,
                frontier_len,
                finished: false,
            });
        }
    }

    pub(crate) fn finish(&mut self, explored: usize) {
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_progress(Progress {
                explored,
                frontier_len: 0,
                finished: true,
            });
        }
    }
}

/// Cost, predecessor and frontier state for one search direction
pub(crate) struct SearchSpace<N> {
    pub cost: HashMap<N, f64>,
    pub predecessor: HashMap<N, Option<N>>,
    pub frontier: MinHeap<f64, N>,
    pub settled: HashSet<N>,
    pub stats: SearchStats,
}

impl<N: NodeId> SearchSpace<N> {
    pub fn new(origin: N) -> Self {
        let mut space = Self {
            cost: HashMap::new(),
            predecessor: HashMap::new(),
            frontier: MinHeap::new(),
            settled: HashSet::new(),
            stats: SearchStats::default(),
        };
        space.cost.insert(origin.clone(), 0.0);
        space.predecessor.insert(origin.clone(), None);
        space.frontier.insert(0.0, origin);
        space.stats.peak_frontier = 1;
        space
    }

    pub fn cost_of(&self, node: &N) -> Option<f64> {
        self.cost.get(node).copied()
    }

    /// Pop the next non-stale entry and mark its node settled
    pub fn settle_next(&mut self) -> Option<(f64, N)> {
        while let Some((cost, node)) = self.frontier.extract_min() {
            if self.cost.get(&node).is_some_and(|&best| cost > best) {
                self.stats.stale_skipped += 1;
                continue;
            }
            self.settled.insert(node.clone());
            return Some((cost, node));
        }
        None
    }

    /// Try `from -> edge.to`; on strict improvement update cost and
    /// predecessor, push a frontier entry and return the new cost
    pub fn relax(&mut self, from: &N, from_cost: f64, edge: &Edge<N>) -> Option<f64> {
        self.stats.edges_relaxed += 1;
        let candidate = from_cost + edge.weight;
        if candidate >= self.cost_of(&edge.to).unwrap_or(f64::INFINITY) {
            return None;
        }
        self.cost.insert(edge.to.clone(), candidate);
        self.predecessor.insert(edge.to.clone(), Some(from.clone()));
        self.frontier.insert(candidate, edge.to.clone());
        self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
        Some(candidate)
    }

    pub fn predecessor_of(&self, node: &N) -> Option<N> {
        self.predecessor.get(node).cloned().flatten()
    }

    pub fn finish_stats(&mut self) -> SearchStats {
        self.stats.state_entries = self.cost.len();
        self.stats
    }
}
