use crate::types::{Capacity, EdgeId, Network, NodeId};

pub mod augmenting_path;
pub mod dinic;
pub mod flow;
pub mod project;
pub mod residual;
pub mod split;
#[cfg(test)]
mod test;

// A node of the constrained network is
// name, kind -> node capacity (+ production capacity for sources, demand for sinks)
//
// In the transformation into the flow network, every node n is split into two
// halves joined by a single edge, and two synthetic nodes are added:
//
// super_source -P-> n_in -N-> n_out -E-> m_in -N-> m_out -D-> super_sink
//
// The capacities (N, E, P, D) are as follows:
// N: the node capacity of n, so all flow through n has to pass that edge.
// E: the capacity of the original edge (n, m).
// P: only for sources: the production capacity of n.
// D: only for sinks: the demand of n.

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum ReducedNode {
    SuperSource,
    SuperSink,
    In(NodeId),
    Out(NodeId),
}

/// Which constraint of the original network a reduced edge encodes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum EdgeRole {
    /// `n_in -> n_out`, the node capacity.
    Internal(NodeId),
    /// `u_out -> v_in`, an original edge.
    Transcribed(EdgeId),
    /// `super_source -> n_in`, the production capacity of a source.
    Injection(NodeId),
    /// `n_out -> super_sink`, the demand of a sink.
    Extraction(NodeId),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReducedEdge {
    pub from: usize,
    pub to: usize,
    pub capacity: Capacity,
    pub role: EdgeRole,
}

const SUPER_SOURCE: usize = 0;
const SUPER_SINK: usize = 1;

/// Edge-capacitated network produced by [`split::split_nodes`].
///
/// Reduced nodes are laid out as `[super_source, super_sink, n0_in, n0_out, n1_in, ...]`,
/// so both halves of an original node are found without lookups.
#[derive(Clone, Debug)]
pub struct ReducedGraph {
    nodes: Vec<ReducedNode>,
    edges: Vec<ReducedEdge>,
    internal: Vec<usize>,
    transcribed: Vec<usize>,
    injection: Vec<Option<usize>>,
    extraction: Vec<Option<usize>>,
}

impl ReducedGraph {
    pub(crate) fn with_nodes(original_nodes: usize, original_edges: usize) -> ReducedGraph {
        let mut nodes = Vec::with_capacity(2 + 2 * original_nodes);
        nodes.push(ReducedNode::SuperSource);
        nodes.push(ReducedNode::SuperSink);
        for i in 0..original_nodes {
            nodes.push(ReducedNode::In(NodeId(i)));
            nodes.push(ReducedNode::Out(NodeId(i)));
        }
        ReducedGraph {
            nodes,
            edges: Vec::with_capacity(2 * original_nodes + original_edges),
            internal: vec![usize::MAX; original_nodes],
            transcribed: vec![usize::MAX; original_edges],
            injection: vec![None; original_nodes],
            extraction: vec![None; original_nodes],
        }
    }

    pub(crate) fn add_edge(&mut self, from: usize, to: usize, capacity: Capacity, role: EdgeRole) {
        let index = self.edges.len();
        match role {
            EdgeRole::Internal(n) => self.internal[n.0] = index,
            EdgeRole::Transcribed(e) => self.transcribed[e.0] = index,
            EdgeRole::Injection(n) => self.injection[n.0] = Some(index),
            EdgeRole::Extraction(n) => self.extraction[n.0] = Some(index),
        }
        self.edges.push(ReducedEdge {
            from,
            to,
            capacity,
            role,
        });
    }

    pub fn super_source(&self) -> usize {
        SUPER_SOURCE
    }

    pub fn super_sink(&self) -> usize {
        SUPER_SINK
    }

    pub fn in_node(n: NodeId) -> usize {
        2 + 2 * n.0
    }

    pub fn out_node(n: NodeId) -> usize {
        3 + 2 * n.0
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node(&self, index: usize) -> ReducedNode {
        self.nodes[index]
    }

    pub fn edge(&self, index: usize) -> &ReducedEdge {
        &self.edges[index]
    }

    pub fn edges(&self) -> &[ReducedEdge] {
        &self.edges
    }

    pub fn internal_edge(&self, n: NodeId) -> usize {
        self.internal[n.0]
    }

    pub fn transcribed_edge(&self, e: EdgeId) -> usize {
        self.transcribed[e.0]
    }

    pub fn injection_edge(&self, n: NodeId) -> Option<usize> {
        self.injection[n.0]
    }

    pub fn extraction_edge(&self, n: NodeId) -> Option<usize> {
        self.extraction[n.0]
    }

    /// Index of the edge `from -> to`, if there is one.
    pub fn find_edge(&self, from: usize, to: usize) -> Option<usize> {
        self.edges.iter().position(|e| e.from == from && e.to == to)
    }

    /// Human readable name of a reduced node, e.g. `mid_0_in`.
    pub fn label(&self, index: usize, network: &Network) -> String {
        match self.nodes[index] {
            ReducedNode::In(n) => format!("{}_in", network.name(n)),
            ReducedNode::Out(n) => format!("{}_out", network.name(n)),
            ReducedNode::SuperSource => "super_source".to_string(),
            ReducedNode::SuperSink => "super_sink".to_string(),
        }
    }
}
