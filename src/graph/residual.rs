use crate::graph::flow::FlowAssignment;
use crate::graph::ReducedGraph;
use crate::types::Capacity;
use std::collections::VecDeque;

/// One direction of a reduced edge inside the residual graph.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Arc {
    pub edge: usize,
    pub forward: bool,
}

/// Both residual directions of a reduced edge live in one record:
/// forward remaining = `capacity - flow`, backward remaining = `flow`.
#[derive(Clone, Copy, Debug)]
struct ResidualEdge {
    from: usize,
    to: usize,
    capacity: Capacity,
    flow: Capacity,
}

#[derive(Clone, Debug)]
pub struct ResidualGraph {
    edges: Vec<ResidualEdge>,
    arcs: Vec<Vec<Arc>>,
}

impl ResidualGraph {
    /// Fresh residual graph with zero flow everywhere.
    pub fn new(graph: &ReducedGraph) -> ResidualGraph {
        let mut arcs = vec![Vec::new(); graph.node_count()];
        let edges = graph
            .edges()
            .iter()
            .enumerate()
            .map(|(i, e)| {
                arcs[e.from].push(Arc {
                    edge: i,
                    forward: true,
                });
                arcs[e.to].push(Arc {
                    edge: i,
                    forward: false,
                });
                ResidualEdge {
                    from: e.from,
                    to: e.to,
                    capacity: e.capacity,
                    flow: 0,
                }
            })
            .collect();
        ResidualGraph { edges, arcs }
    }

    pub fn node_count(&self) -> usize {
        self.arcs.len()
    }

    /// Arcs leaving `node`, in edge insertion order.
    pub fn arcs_from(&self, node: usize) -> &[Arc] {
        &self.arcs[node]
    }

    pub fn head(&self, arc: Arc) -> usize {
        let edge = &self.edges[arc.edge];
        if arc.forward {
            edge.to
        } else {
            edge.from
        }
    }

    pub fn tail(&self, arc: Arc) -> usize {
        let edge = &self.edges[arc.edge];
        if arc.forward {
            edge.from
        } else {
            edge.to
        }
    }

    pub fn remaining(&self, arc: Arc) -> Capacity {
        let edge = &self.edges[arc.edge];
        if arc.forward {
            edge.capacity - edge.flow
        } else {
            edge.flow
        }
    }

    /// Pushes `amount` along `arc`; on a backward arc this cancels flow of the edge.
    pub fn push(&mut self, arc: Arc, amount: Capacity) {
        debug_assert!(amount <= self.remaining(arc));
        let edge = &mut self.edges[arc.edge];
        if arc.forward {
            edge.flow += amount;
        } else {
            edge.flow -= amount;
        }
    }

    pub fn flow(&self, edge: usize) -> Capacity {
        self.edges[edge].flow
    }

    /// Nodes reachable from `source` over arcs with remaining capacity.
    pub fn reachable_from(&self, source: usize) -> Vec<bool> {
        let mut reached = vec![false; self.node_count()];
        let mut queue = VecDeque::new();
        reached[source] = true;
        queue.push_back(source);
        while let Some(node) = queue.pop_front() {
            for &arc in &self.arcs[node] {
                let next = self.head(arc);
                if !reached[next] && self.remaining(arc) > 0 {
                    reached[next] = true;
                    queue.push_back(next);
                }
            }
        }
        reached
    }

    pub fn into_assignment(self) -> FlowAssignment {
        FlowAssignment::new(self.edges.into_iter().map(|e| e.flow).collect())
    }
}
