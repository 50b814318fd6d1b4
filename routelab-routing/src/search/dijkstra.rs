//! Uniform-cost search (Dijkstra)

use tracing::debug;

use super::path::reconstruct_path;
use super::{Checkpoints, SearchResult, SearchSpace, SearchStats, Visit};
use crate::graph::{NodeId, RoadGraph};

/// Shortest path from `start` to `target`
pub fn dijkstra<N: NodeId>(graph: &RoadGraph<N>, start: &N, target: &N) -> SearchResult<N> {
    dijkstra_with(graph, start, target, &mut Checkpoints::none())
}

/// [`dijkstra`] with progress notifications
///
/// Stops as soon as `target` is settled. When the frontier runs dry the
/// result is a failure that still reports every node settled on the way.
/// A `start` that is not a graph node fails without settling anything.
pub fn dijkstra_with<N: NodeId>(
    graph: &RoadGraph<N>,
    start: &N,
    target: &N,
    checkpoints: &mut Checkpoints<'_>,
) -> SearchResult<N> {
    if !graph.contains_node(start) {
        debug!(?start, "dijkstra: start not in graph");
        checkpoints.finish(0);
        return SearchResult::unreachable(0, Vec::new(), SearchStats::default());
    }

    let mut space = SearchSpace::new(start.clone());
    let mut trace = Vec::new();

    while let Some((cost, node)) = space.settle_next() {
        trace.push(Visit::Settled {
            node: node.clone(),
            predecessor: space.predecessor_of(&node),
        });
        checkpoints.settled(space.settled.len(), space.frontier.len());

        if &node == target {
            let path = reconstruct_path(&space.predecessor, target);
            let explored = space.settled.len();
            checkpoints.finish(explored);
            debug!(explored, cost, hops = path.len(), "dijkstra: target settled");
            return SearchResult::found(path, cost, explored, trace, space.finish_stats());
        }

        for edge in graph.neighbors(&node) {
            space.relax(&node, cost, edge);
        }
    }

    let explored = space.settled.len();
    checkpoints.finish(explored);
    debug!(explored, "dijkstra: frontier exhausted, target unreachable");
    SearchResult::unreachable(explored, trace, space.finish_stats())
}
