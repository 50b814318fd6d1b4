//! Bidirectional Dijkstra
//!
//! A forward search from the start on the graph and a backward search from the
//! target on the reversed graph take turns settling one node each. `best` is
//! the cheapest complete route seen so far; it is updated both when a settled
//! node already carries a cost from the other side and when a relaxation
//! reaches a node the other side has labeled. The second update is what makes
//! the stopping rule below exact: without it a route running over one long
//! edge between the two search spaces can be missed.
//!
//! Stop rule: before each single expansion, stop once
//! `min(forward frontier) + min(backward frontier) >= best`. An empty frontier
//! counts as +infinity. Stale entries only make the frontier minimum smaller,
//! so the rule stays conservative under lazy deletion.

use std::collections::HashSet;

use tracing::{debug, trace};

use super::path::{join_at_meeting, reconstruct_path};
use super::{Checkpoints, SearchResult, SearchSpace, SearchStats, Visit};
use crate::graph::{NodeId, RoadGraph};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Cheapest complete route found so far
struct Meeting<N> {
    cost: f64,
    node: Option<N>,
}

impl<N: NodeId> Meeting<N> {
    fn offer(&mut self, node: &N, cost: f64) {
        if cost < self.cost {
            trace!(?node, cost, "bidirectional: better meeting point");
            self.cost = cost;
            self.node = Some(node.clone());
        }
    }
}

/// Bidirectional shortest path from `start` to `target`
pub fn bidirectional<N: NodeId>(graph: &RoadGraph<N>, start: &N, target: &N) -> SearchResult<N> {
    bidirectional_with(graph, start, target, &mut Checkpoints::none())
}

/// [`bidirectional`] with progress notifications
///
/// Endpoints that are not graph nodes give an immediate failure. The reversed
/// graph is built per call. `nodes_explored` counts distinct nodes settled by
/// either side, so a node settled from both ends counts once.
pub fn bidirectional_with<N: NodeId>(
    graph: &RoadGraph<N>,
    start: &N,
    target: &N,
    checkpoints: &mut Checkpoints<'_>,
) -> SearchResult<N> {
    if !graph.contains_node(start) || !graph.contains_node(target) {
        debug!(?start, ?target, "bidirectional: endpoint not in graph");
        checkpoints.finish(0);
        return SearchResult::unreachable(0, Vec::new(), SearchStats::default());
    }

    let reverse = graph.reversed();
    let mut forward = SearchSpace::new(start.clone());
    let mut backward = SearchSpace::new(target.clone());
    let mut meeting = Meeting {
        cost: f64::INFINITY,
        node: None,
    };
    let mut explored: HashSet<N> = HashSet::new();
    let mut visits = Vec::new();

    'search: loop {
        for direction in [Direction::Forward, Direction::Backward] {
            if lower_bound(&forward, &backward) >= meeting.cost {
                break 'search;
            }

            let (this, other, edges) = match direction {
                Direction::Forward => (&mut forward, &backward, graph),
                Direction::Backward => (&mut backward, &forward, &reverse),
            };
            let Some((cost, node)) = this.settle_next() else {
                continue;
            };

            let predecessor = this.predecessor_of(&node);
            visits.push(match direction {
                Direction::Forward => Visit::Forward {
                    node: node.clone(),
                    predecessor,
                },
                Direction::Backward => Visit::Backward {
                    node: node.clone(),
                    predecessor,
                },
            });
            explored.insert(node.clone());
            checkpoints.settled(explored.len(), this.frontier.len() + other.frontier.len());

            if let Some(other_cost) = other.cost_of(&node) {
                meeting.offer(&node, cost + other_cost);
            }

            for edge in edges.neighbors(&node) {
                let Some(reached) = this.relax(&node, cost, edge) else {
                    continue;
                };
                if let Some(other_cost) = other.cost_of(&edge.to) {
                    meeting.offer(&edge.to, reached + other_cost);
                }
            }
        }
    }

    let stats = merge_stats(forward.finish_stats(), backward.finish_stats());
    checkpoints.finish(explored.len());

    let Some(meet) = meeting.node else {
        debug!(explored = explored.len(), "bidirectional: searches never met");
        return SearchResult::unreachable(explored.len(), visits, stats);
    };

    let path = join_at_meeting(
        reconstruct_path(&forward.predecessor, &meet),
        reconstruct_path(&backward.predecessor, &meet),
    );
    debug!(
        explored = explored.len(),
        cost = meeting.cost,
        ?meet,
        hops = path.len(),
        "bidirectional: route found"
    );
    SearchResult::found(path, meeting.cost, explored.len(), visits, stats)
}

/// Smallest total any route not yet seen can have
fn lower_bound<N: NodeId>(forward: &SearchSpace<N>, backward: &SearchSpace<N>) -> f64 {
    let top = |space: &SearchSpace<N>| space.frontier.peek_min_priority().unwrap_or(f64::INFINITY);
    top(forward) + top(backward)
}

fn merge_stats(forward: SearchStats, backward: SearchStats) -> SearchStats {
    SearchStats {
        edges_relaxed: forward.edges_relaxed + backward.edges_relaxed,
        stale_skipped: forward.stale_skipped + backward.stale_skipped,
        peak_frontier: forward.peak_frontier + backward.peak_frontier,
        state_entries: forward.state_entries + backward.state_entries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::dijkstra;

    fn abc() -> RoadGraph<&'static str> {
        RoadGraph::from_edges([("A", "B", 1.0), ("A", "C", 4.0), ("B", "C", 1.0)])
    }

    #[test]
    fn test_finds_two_hop_route() {
        let result = bidirectional(&abc(), &"A", &"C");
        assert_eq!(result.path, Some(vec!["A", "B", "C"]));
        assert_eq!(result.total_cost, Some(2.0));
        assert!(result.nodes_explored >= 1 && result.nodes_explored <= 3);
    }

    #[test]
    fn test_start_equals_target() {
        let mut graph = RoadGraph::new();
        graph.add_node("A");
        let result = bidirectional(&graph, &"A", &"A");
        assert_eq!(result.path, Some(vec!["A"]));
        assert_eq!(result.total_cost, Some(0.0));
        assert_eq!(result.nodes_explored, 1);
    }

    #[test]
    fn test_unknown_endpoint_fails_immediately() {
        let result = bidirectional(&abc(), &"A", &"Z");
        assert!(result.path.is_none());
        assert_eq!(result.nodes_explored, 0);
    }

    #[test]
    fn test_disconnected() {
        let mut graph = RoadGraph::from_edges([("A", "B", 1.0)]);
        graph.add_node("C");
        let result = bidirectional(&graph, &"A", &"C");
        assert!(result.path.is_none());
        assert!(result.total_cost.is_none());
    }

    #[test]
    fn test_respects_edge_direction() {
        let graph = RoadGraph::from_edges([("A", "B", 1.0), ("B", "C", 1.0)]);
        assert!(bidirectional(&graph, &"C", &"A").path.is_none());
        assert_eq!(bidirectional(&graph, &"A", &"C").path, Some(vec!["A", "B", "C"]));
    }

    #[test]
    fn test_long_middle_edge_is_not_missed() {
        // S-U-V-T costs 6 over a 2-weight middle edge; S-X-T costs 7. The
        // searches settle X from both sides before either side settles the
        // other's half of the optimal route.
        let graph = RoadGraph::from_edges([
            ("S", "U", 2.0),
            ("U", "V", 2.0),
            ("V", "T", 2.0),
            ("S", "X", 3.5),
            ("X", "T", 3.5),
        ]);
        let result = bidirectional(&graph, &"S", &"T");
        assert_eq!(result.total_cost, Some(6.0));
        assert_eq!(result.path, Some(vec!["S", "U", "V", "T"]));
    }

    #[test]
    fn test_matches_dijkstra_on_symmetric_graph() {
        let mut graph = RoadGraph::new();
        for (a, b, w) in [
            (1, 2, 7.0),
            (1, 3, 9.0),
            (1, 6, 14.0),
            (2, 3, 10.0),
            (2, 4, 15.0),
            (3, 4, 11.0),
            (3, 6, 2.0),
            (4, 5, 6.0),
            (5, 6, 9.0),
        ] {
            graph.add_edge(a, b, w);
            graph.add_edge(b, a, w);
        }
        for target in 1..=6 {
            let both = bidirectional(&graph, &1, &target);
            let uniform = dijkstra(&graph, &1, &target);
            assert_eq!(both.total_cost, uniform.total_cost, "target {target}");
        }
        assert_eq!(bidirectional(&graph, &1, &5).path, Some(vec![1, 3, 6, 5]));
    }

    #[test]
    fn test_trace_tags_both_sides() {
        let result = bidirectional(&abc(), &"A", &"C");
        assert!(matches!(result.trace.first(), Some(Visit::Forward { node: "A", .. })));
        assert!(result
            .trace
            .iter()
            .any(|v| matches!(v, Visit::Backward { node: "C", predecessor: None })));
        assert!(!result.trace.iter().any(|v| matches!(v, Visit::Settled { .. })));
    }
}
