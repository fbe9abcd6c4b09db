use crate::graph::residual::{Arc, ResidualGraph};
use crate::types::Capacity;
use std::cmp::min;
use std::collections::VecDeque;

/// Breadth-first search for a shortest (in arc count) path from `source` to `sink`
/// whose arcs all have remaining capacity.
///
/// Returns the bottleneck capacity and the arcs of the path in source-to-sink order.
pub fn augmenting_path(
    residual: &ResidualGraph,
    source: usize,
    sink: usize,
) -> Option<(Capacity, Vec<Arc>)> {
    if source == sink {
        return None;
    }
    let mut parent: Vec<Option<Arc>> = vec![None; residual.node_count()];
    let mut visited = vec![false; residual.node_count()];
    let mut queue = VecDeque::new();
    visited[source] = true;
    queue.push_back(source);
    while let Some(node) = queue.pop_front() {
        for &arc in residual.arcs_from(node) {
            let target = residual.head(arc);
            if !visited[target] && residual.remaining(arc) > 0 {
                visited[target] = true;
                parent[target] = Some(arc);
                if target == sink {
                    return Some(trace(residual, &parent, source, sink));
                }
                queue.push_back(target);
            }
        }
    }
    None
}

fn trace(
    residual: &ResidualGraph,
    parent: &[Option<Arc>],
    source: usize,
    sink: usize,
) -> (Capacity, Vec<Arc>) {
    let mut path = Vec::new();
    let mut bottleneck = Capacity::MAX;
    let mut node = sink;
    while node != source {
        let Some(arc) = parent[node] else {
            break;
        };
        bottleneck = min(bottleneck, residual.remaining(arc));
        path.push(arc);
        node = residual.tail(arc);
    }
    path.reverse();
    (bottleneck, path)
}
