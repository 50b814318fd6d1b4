//! Path reconstruction from predecessor maps

use std::collections::HashMap;

use crate::graph::NodeId;

/// Walk predecessor links back from `terminal` to the origin sentinel and
/// return the nodes in origin-to-terminal order.
///
/// Returns an empty path when `terminal` was never reached; callers check
/// reachability through the cost map first.
pub fn reconstruct_path<N: NodeId>(predecessors: &HashMap<N, Option<N>>, terminal: &N) -> Vec<N> {
    let mut path = Vec::new();
    if !predecessors.contains_key(terminal) {
        return path;
    }

    let mut cursor = terminal;
    loop {
        path.push(cursor.clone());
        match predecessors.get(cursor) {
            Some(Some(previous)) => cursor = previous,
            _ => break,
        }
    }
    path.reverse();
    path
}

/// Join the two halves of a bidirectional route.
///
/// `forward` runs start..=meeting, `backward` runs target..=meeting (the order
/// the backward search reconstructs it in). The meeting node appears once.
pub fn join_at_meeting<N: NodeId>(mut forward: Vec<N>, mut backward: Vec<N>) -> Vec<N> {
    backward.reverse();
    let skip = usize::from(!forward.is_empty() && forward.last() == backward.first());
    forward.extend(backward.into_iter().skip(skip));
    forward
}
