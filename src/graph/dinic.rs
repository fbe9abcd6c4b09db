use crate::graph::residual::{Arc, ResidualGraph};
use crate::types::Capacity;
use std::collections::VecDeque;

const UNREACHED: usize = usize::MAX;

/// BFS distances from `source` over arcs with remaining capacity,
/// or `None` if `sink` cannot be reached.
pub fn level_graph(residual: &ResidualGraph, source: usize, sink: usize) -> Option<Vec<usize>> {
    let mut level = vec![UNREACHED; residual.node_count()];
    let mut queue = VecDeque::new();
    level[source] = 0;
    queue.push_back(source);
    while let Some(node) = queue.pop_front() {
        for &arc in residual.arcs_from(node) {
            let target = residual.head(arc);
            if level[target] == UNREACHED && residual.remaining(arc) > 0 {
                level[target] = level[node] + 1;
                queue.push_back(target);
            }
        }
    }
    (level[sink] != UNREACHED).then_some(level)
}

/// Saturates the level graph. Returns the flow added and the number of paths used.
pub fn blocking_flow(
    residual: &mut ResidualGraph,
    level: &[usize],
    source: usize,
    sink: usize,
) -> (Capacity, u64) {
    let mut next = vec![0; residual.node_count()];
    let mut total: Capacity = 0;
    let mut paths = 0;
    loop {
        let pushed = push_path(residual, level, &mut next, source, sink);
        if pushed == 0 {
            return (total, paths);
        }
        total += pushed;
        paths += 1;
    }
}

/// Depth-first search restricted to arcs that go one level up, with the current path
/// kept on an explicit stack. `next[node]` remembers the first arc of `node` that may
/// still lead to the sink. Pushes the bottleneck along the first path found.
fn push_path(
    residual: &mut ResidualGraph,
    level: &[usize],
    next: &mut [usize],
    source: usize,
    sink: usize,
) -> Capacity {
    let mut path: Vec<Arc> = Vec::new();
    let mut node = source;
    while node != sink {
        let arcs = residual.arcs_from(node);
        let mut advanced = None;
        while next[node] < arcs.len() {
            let arc = arcs[next[node]];
            if residual.remaining(arc) > 0 && level[residual.head(arc)] == level[node] + 1 {
                advanced = Some(arc);
                break;
            }
            next[node] += 1;
        }
        match advanced {
            Some(arc) => {
                path.push(arc);
                node = residual.head(arc);
            }
            None => {
                // Dead end: retreat and skip the arc that led here.
                let Some(arc) = path.pop() else {
                    return 0;
                };
                node = residual.tail(arc);
                next[node] += 1;
            }
        }
    }
    let bottleneck = path
        .iter()
        .map(|arc| residual.remaining(*arc))
        .min()
        .unwrap_or(0);
    for arc in &path {
        residual.push(*arc, bottleneck);
    }
    bottleneck
}
