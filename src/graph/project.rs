use serde::Serialize;

use crate::graph::flow::MaxFlow;
use crate::graph::{EdgeRole, ReducedGraph};
use crate::types::{Capacity, Kind, Network};

/// Result of a solve, expressed purely in terms of the original network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FlowReport {
    pub total_flow: Capacity,
    pub total_production: Capacity,
    pub total_demand: Capacity,
    pub total_delivered: Capacity,
    pub nodes: Vec<NodeFlow>,
    pub edges: Vec<EdgeFlow>,
    pub sources: Vec<SourceSupply>,
    pub sinks: Vec<SinkDelivery>,
    /// A minimum cut: saturated constraints whose capacities add up to `total_flow`.
    pub bottlenecks: Vec<Bottleneck>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NodeFlow {
    pub name: String,
    pub kind: Kind,
    pub node_capacity: Capacity,
    pub throughput: Capacity,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EdgeFlow {
    pub tail: String,
    pub head: String,
    pub capacity: Capacity,
    pub flow: Capacity,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SourceSupply {
    pub name: String,
    pub production_capacity: Capacity,
    pub injected: Capacity,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SinkDelivery {
    pub name: String,
    pub demand: Capacity,
    pub delivered: Capacity,
    pub shortfall: Capacity,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Bottleneck {
    Edge {
        tail: String,
        head: String,
        capacity: Capacity,
    },
    Node {
        node: String,
        capacity: Capacity,
    },
    Production {
        source: String,
        capacity: Capacity,
    },
    Demand {
        sink: String,
        capacity: Capacity,
    },
}

impl Bottleneck {
    pub fn capacity(&self) -> Capacity {
        match self {
            Bottleneck::Edge { capacity, .. }
            | Bottleneck::Node { capacity, .. }
            | Bottleneck::Production { capacity, .. }
            | Bottleneck::Demand { capacity, .. } => *capacity,
        }
    }
}

impl FlowReport {
    pub fn node(&self, name: &str) -> Option<&NodeFlow> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn edge(&self, tail: &str, head: &str) -> Option<&EdgeFlow> {
        self.edges.iter().find(|e| e.tail == tail && e.head == head)
    }

    pub fn source(&self, name: &str) -> Option<&SourceSupply> {
        self.sources.iter().find(|s| s.name == name)
    }

    pub fn sink(&self, name: &str) -> Option<&SinkDelivery> {
        self.sinks.iter().find(|s| s.name == name)
    }

    pub fn total_shortfall(&self) -> Capacity {
        self.sinks.iter().map(|s| s.shortfall).sum()
    }
}

/// Maps the flow on the reduced graph back onto the nodes and edges of `network`.
pub fn project(network: &Network, graph: &ReducedGraph, flow: &MaxFlow) -> FlowReport {
    let assignment = &flow.assignment;

    let nodes = network
        .nodes()
        .map(|(id, node)| NodeFlow {
            name: node.name.clone(),
            kind: node.kind.kind(),
            node_capacity: node.node_capacity,
            throughput: assignment.get(graph.internal_edge(id)),
        })
        .collect();

    let edges = network
        .edges()
        .map(|(id, edge)| EdgeFlow {
            tail: network.name(edge.tail).to_string(),
            head: network.name(edge.head).to_string(),
            capacity: edge.capacity,
            flow: assignment.get(graph.transcribed_edge(id)),
        })
        .collect();

    let sources = network
        .sources()
        .map(|(id, node)| SourceSupply {
            name: node.name.clone(),
            production_capacity: node.production_capacity().unwrap_or_default(),
            injected: assignment.get_opt(graph.injection_edge(id)),
        })
        .collect();

    let sinks: Vec<SinkDelivery> = network
        .sinks()
        .map(|(id, node)| {
            let demand = node.demand().unwrap_or_default();
            let delivered = assignment.get_opt(graph.extraction_edge(id));
            SinkDelivery {
                name: node.name.clone(),
                demand,
                delivered,
                shortfall: demand.saturating_sub(delivered),
            }
        })
        .collect();

    let bottlenecks = flow
        .min_cut(graph)
        .into_iter()
        .map(|e| {
            let edge = graph.edge(e);
            match edge.role {
                EdgeRole::Internal(n) => Bottleneck::Node {
                    node: network.name(n).to_string(),
                    capacity: edge.capacity,
                },
                EdgeRole::Transcribed(id) => {
                    let original = network.edge(id);
                    Bottleneck::Edge {
                        tail: network.name(original.tail).to_string(),
                        head: network.name(original.head).to_string(),
                        capacity: edge.capacity,
                    }
                }
                EdgeRole::Injection(n) => Bottleneck::Production {
                    source: network.name(n).to_string(),
                    capacity: edge.capacity,
                },
                EdgeRole::Extraction(n) => Bottleneck::Demand {
                    sink: network.name(n).to_string(),
                    capacity: edge.capacity,
                },
            }
        })
        .collect();

    FlowReport {
        total_flow: flow.value,
        total_production: network.total_production(),
        total_demand: network.total_demand(),
        total_delivered: sinks.iter().map(|s| s.delivered).sum(),
        nodes,
        edges,
        sources,
        sinks,
        bottlenecks,
    }
}
