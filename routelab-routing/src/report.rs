//! Run orchestration: time one algorithm, or all of them, and package the
//! outcome for display.

use std::collections::HashSet;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::algorithm::{Algorithm, AlgorithmInfo};
use crate::graph::{Coordinates, NodeId, RoadGraph};
use crate::search::{
    astar_with, bidirectional_with, dijkstra_with, Checkpoints, Heuristic, SearchObserver,
    SearchResult, SearchStats, Visit,
};

/// Costs closer than this are treated as equal when comparing routes
pub const COST_TOLERANCE: f64 = 1e-4;

/// Settled nodes between two progress notifications
pub const DEFAULT_PROGRESS_INTERVAL: usize = 1000;

/// Everything a run needs besides the graph and the endpoints
pub struct RunOptions<'a> {
    pub heuristic: Heuristic,
    pub progress_interval: usize,
    pub observer: Option<&'a mut dyn SearchObserver>,
}

impl Default for RunOptions<'_> {
    fn default() -> Self {
        Self {
            heuristic: Heuristic::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            observer: None,
        }
    }
}

impl<'a> RunOptions<'a> {
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_observer(mut self, observer: &'a mut dyn SearchObserver, interval: usize) -> Self {
        self.observer = Some(observer);
        self.progress_interval = interval;
        self
    }

    fn checkpoints(&mut self) -> Checkpoints<'_> {
        match self.observer.as_deref_mut() {
            Some(observer) => Checkpoints::new(observer, self.progress_interval),
            None => Checkpoints::none(),
        }
    }
}

/// One timed run of one algorithm
#[derive(Debug, Clone, Serialize)]
pub struct Report<N> {
    pub algorithm: Algorithm,
    pub info: AlgorithmInfo,
    pub path: Option<Vec<N>>,
    pub total_cost: Option<f64>,
    pub nodes_explored: usize,
    pub trace: Vec<Visit<N>>,
    pub elapsed_ms: f64,
    /// Nodes on the path, 0 when there is none
    pub path_length: usize,
    pub stats: SearchStats,
    pub memory_estimate_bytes: usize,
}

impl<N> Report<N> {
    fn new(algorithm: Algorithm, result: SearchResult<N>, elapsed_ms: f64) -> Self {
        let path_length = result.path.as_ref().map_or(0, Vec::len);
        let memory_estimate_bytes = result.stats.memory_estimate_bytes::<N>();
        Self {
            algorithm,
            info: algorithm.info(),
            path: result.path,
            total_cost: result.total_cost,
            nodes_explored: result.nodes_explored,
            trace: result.trace,
            elapsed_ms,
            path_length,
            stats: result.stats,
            memory_estimate_bytes,
        }
    }

    pub fn is_found(&self) -> bool {
        self.path.is_some()
    }
}

/// Run `algorithm` with default options
pub fn run<N: NodeId>(
    algorithm: Algorithm,
    graph: &RoadGraph<N>,
    start: &N,
    target: &N,
    coords: Option<&Coordinates<N>>,
) -> Report<N> {
    run_with(algorithm, graph, start, target, coords, &mut RunOptions::default())
}

/// Run `algorithm` and time it
///
/// A* without a coordinate map behaves like A* with an empty one: an
/// immediate failure with nothing explored.
pub fn run_with<N: NodeId>(
    algorithm: Algorithm,
    graph: &RoadGraph<N>,
    start: &N,
    target: &N,
    coords: Option<&Coordinates<N>>,
    options: &mut RunOptions<'_>,
) -> Report<N> {
    let heuristic = options.heuristic;
    let no_coords = Coordinates::new();
    let mut checkpoints = options.checkpoints();

    let started = Instant::now();
    let result = match algorithm {
        Algorithm::Dijkstra => dijkstra_with(graph, start, target, &mut checkpoints),
        Algorithm::AStar => astar_with(
            graph,
            coords.unwrap_or(&no_coords),
            start,
            target,
            &heuristic,
            &mut checkpoints,
        ),
        Algorithm::Bidirectional => bidirectional_with(graph, start, target, &mut checkpoints),
    };
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;

    info!(
        %algorithm,
        found = result.is_found(),
        explored = result.nodes_explored,
        elapsed_ms,
        "run finished"
    );
    Report::new(algorithm, result, elapsed_ms)
}

/// Outcome of running every algorithm on the same query
#[derive(Debug, Clone, Serialize)]
pub struct Comparison<N> {
    pub reports: Vec<Report<N>>,
    pub node_count: usize,
    pub edge_count: usize,
}

/// How far the successful runs agree on the route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RouteAgreement {
    /// Same cost and same node sequence
    Identical,
    /// Equal-cost alternatives
    SameCostDifferentRoutes { distinct_routes: usize },
    DifferentCosts,
    /// Fewer than two runs found a route
    Insufficient,
}

/// Run all algorithms in [`Algorithm::all`] order with default options
pub fn compare<N: NodeId>(
    graph: &RoadGraph<N>,
    start: &N,
    target: &N,
    coords: Option<&Coordinates<N>>,
) -> Comparison<N> {
    compare_with(graph, start, target, coords, &mut RunOptions::default())
}

/// Run all algorithms sequentially with shared options
pub fn compare_with<N: NodeId>(
    graph: &RoadGraph<N>,
    start: &N,
    target: &N,
    coords: Option<&Coordinates<N>>,
    options: &mut RunOptions<'_>,
) -> Comparison<N> {
    let reports = Algorithm::all()
        .iter()
        .map(|&algorithm| run_with(algorithm, graph, start, target, coords, options))
        .collect();
    Comparison {
        reports,
        node_count: graph.node_count(),
        edge_count: graph.edge_count(),
    }
}

impl<N: NodeId> Comparison<N> {
    pub fn report(&self, algorithm: Algorithm) -> Option<&Report<N>> {
        self.reports.iter().find(|r| r.algorithm == algorithm)
    }

    pub fn successful(&self) -> impl Iterator<Item = &Report<N>> {
        self.reports.iter().filter(|r| r.is_found())
    }

    /// Lowest wall time among runs that found a route
    pub fn fastest(&self) -> Option<&Report<N>> {
        self.successful()
            .min_by(|a, b| a.elapsed_ms.total_cmp(&b.elapsed_ms))
    }

    /// Fewest explored nodes among runs that found a route
    pub fn fewest_explored(&self) -> Option<&Report<N>> {
        self.successful().min_by_key(|r| r.nodes_explored)
    }

    /// Percentage of fewer nodes explored than `baseline`, for every
    /// successful run that beat it
    pub fn reductions_vs(&self, baseline: Algorithm) -> Vec<(Algorithm, f64)> {
        let Some(base) = self.report(baseline).filter(|r| r.is_found()) else {
            return Vec::new();
        };
        if base.nodes_explored == 0 {
            return Vec::new();
        }
        self.successful()
            .filter(|r| r.algorithm != baseline && r.nodes_explored < base.nodes_explored)
            .map(|r| {
                let saved = (base.nodes_explored - r.nodes_explored) as f64;
                (r.algorithm, saved / base.nodes_explored as f64 * 100.0)
            })
            .collect()
    }

    pub fn route_agreement(&self) -> RouteAgreement {
        let found: Vec<&Report<N>> = self.successful().collect();
        if found.len() < 2 {
            return RouteAgreement::Insufficient;
        }

        let costs: Vec<f64> = found.iter().filter_map(|r| r.total_cost).collect();
        let (lowest, highest) = costs
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &c| (lo.min(c), hi.max(c)));
        if highest - lowest > COST_TOLERANCE {
            debug!(lowest, highest, "comparison: costs disagree");
            return RouteAgreement::DifferentCosts;
        }

        let routes: HashSet<&Vec<N>> = found.iter().filter_map(|r| r.path.as_ref()).collect();
        match routes.len() {
            1 => RouteAgreement::Identical,
            distinct_routes => RouteAgreement::SameCostDifferentRoutes { distinct_routes },
        }
    }
}
