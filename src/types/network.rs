use std::collections::{HashMap, HashSet};

use crate::error::ValidationError;
use crate::types::{Capacity, Edge, EdgeId, Node, NodeId, NodeKind};

/// The original, constrained network.
///
/// Nodes have to be declared before edges can reference them. Nodes and edges are
/// stored in insertion order and addressed by dense handles; names are only used
/// to resolve references while building and for display.
#[derive(Debug, Default, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    by_name: HashMap<String, NodeId>,
    outgoing: Vec<Vec<EdgeId>>,
    incoming: Vec<Vec<EdgeId>>,
    endpoints: HashSet<(NodeId, NodeId)>,
}

impl Network {
    pub fn new() -> Network {
        Network::default()
    }

    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        node_capacity: Capacity,
        kind: NodeKind,
    ) -> Result<NodeId, ValidationError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(ValidationError::DuplicateNode { node: name });
        }
        let id = NodeId(self.nodes.len());
        self.by_name.insert(name.clone(), id);
        self.nodes.push(Node {
            name,
            node_capacity,
            kind,
        });
        self.outgoing.push(vec![]);
        self.incoming.push(vec![]);
        Ok(id)
    }

    pub fn add_source(
        &mut self,
        name: impl Into<String>,
        node_capacity: Capacity,
        production_capacity: Capacity,
    ) -> Result<NodeId, ValidationError> {
        self.add_node(
            name,
            node_capacity,
            NodeKind::Source {
                production_capacity,
            },
        )
    }

    pub fn add_intermediate(
        &mut self,
        name: impl Into<String>,
        node_capacity: Capacity,
    ) -> Result<NodeId, ValidationError> {
        self.add_node(name, node_capacity, NodeKind::Intermediate)
    }

    pub fn add_sink(
        &mut self,
        name: impl Into<String>,
        node_capacity: Capacity,
        demand: Capacity,
    ) -> Result<NodeId, ValidationError> {
        self.add_node(name, node_capacity, NodeKind::Sink { demand })
    }

    /// Adds the directed edge `tail -> head`. Both endpoints must already exist.
    pub fn add_edge(
        &mut self,
        tail: &str,
        head: &str,
        capacity: Capacity,
    ) -> Result<EdgeId, ValidationError> {
        let unknown = |missing: &str| ValidationError::UnknownNode {
            tail: tail.to_string(),
            head: head.to_string(),
            missing: missing.to_string(),
        };
        let tail_id = self.node_id(tail).ok_or_else(|| unknown(tail))?;
        let head_id = self.node_id(head).ok_or_else(|| unknown(head))?;
        if tail_id == head_id {
            return Err(ValidationError::SelfLoop {
                node: tail.to_string(),
            });
        }
        if !self.endpoints.insert((tail_id, head_id)) {
            return Err(ValidationError::DuplicateEdge {
                tail: tail.to_string(),
                head: head.to_string(),
            });
        }
        let id = EdgeId(self.edges.len());
        self.outgoing[tail_id.0].push(id);
        self.incoming[head_id.0].push(id);
        self.edges.push(Edge {
            tail: tail_id,
            head: head_id,
            capacity,
        });
        Ok(id)
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub(crate) fn edge_mut(&mut self, id: EdgeId) -> &mut Edge {
        &mut self.edges[id.0]
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge {
        &self.edges[id.0]
    }

    pub fn name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes.iter().enumerate().map(|(i, n)| (NodeId(i), n))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, &Edge)> + '_ {
        self.edges.iter().enumerate().map(|(i, e)| (EdgeId(i), e))
    }

    pub fn outgoing(&self, node: NodeId) -> &[EdgeId] {
        &self.outgoing[node.0]
    }

    pub fn incoming(&self, node: NodeId) -> &[EdgeId] {
        &self.incoming[node.0]
    }

    pub fn find_edge(&self, tail: NodeId, head: NodeId) -> Option<EdgeId> {
        self.outgoing[tail.0]
            .iter()
            .copied()
            .find(|e| self.edges[e.0].head == head)
    }

    pub fn sources(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes().filter(|(_, n)| n.is_source())
    }

    pub fn sinks(&self) -> impl Iterator<Item = (NodeId, &Node)> + '_ {
        self.nodes().filter(|(_, n)| n.is_sink())
    }

    /// Saturating: only used for reporting.
    pub fn total_production(&self) -> Capacity {
        self.nodes
            .iter()
            .filter_map(Node::production_capacity)
            .fold(0, Capacity::saturating_add)
    }

    /// Saturating: only used for reporting.
    pub fn total_demand(&self) -> Capacity {
        self.nodes
            .iter()
            .filter_map(Node::demand)
            .fold(0, Capacity::saturating_add)
    }
}
