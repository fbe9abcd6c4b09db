use log::debug;

use crate::error::CapacityOverflowError;
use crate::graph::{EdgeRole, ReducedGraph, ReducedNode};
use crate::types::{Capacity, Network, NodeKind};

/// Splits every node into `in`/`out` halves and attaches the super-source and super-sink.
///
/// Reduced edges are generated in a fixed order (internal edges, transcribed edges,
/// injections, extractions), each group following the insertion order of the network,
/// so the same network always produces the same reduced graph.
///
/// Fails if the capacities meeting at any reduced node cannot be summed in 64 bits.
pub fn split_nodes(network: &Network) -> Result<ReducedGraph, CapacityOverflowError> {
    let mut graph = ReducedGraph::with_nodes(network.node_count(), network.edge_count());

    for (id, node) in network.nodes() {
        graph.add_edge(
            ReducedGraph::in_node(id),
            ReducedGraph::out_node(id),
            node.node_capacity,
            EdgeRole::Internal(id),
        );
    }
    for (id, edge) in network.edges() {
        graph.add_edge(
            ReducedGraph::out_node(edge.tail),
            ReducedGraph::in_node(edge.head),
            edge.capacity,
            EdgeRole::Transcribed(id),
        );
    }
    for (id, node) in network.nodes() {
        if let NodeKind::Source {
            production_capacity,
        } = node.kind
        {
            graph.add_edge(
                graph.super_source(),
                ReducedGraph::in_node(id),
                production_capacity,
                EdgeRole::Injection(id),
            );
        }
    }
    for (id, node) in network.nodes() {
        if let NodeKind::Sink { demand } = node.kind {
            graph.add_edge(
                ReducedGraph::out_node(id),
                graph.super_sink(),
                demand,
                EdgeRole::Extraction(id),
            );
        }
    }

    check_capacity_sums(&graph, network)?;
    debug!(
        "Split {} nodes / {} edges into {} nodes / {} edges",
        network.node_count(),
        network.edge_count(),
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Every flow value the solver computes is bounded by one of these sums.
fn check_capacity_sums(
    graph: &ReducedGraph,
    network: &Network,
) -> Result<(), CapacityOverflowError> {
    let mut outgoing: Vec<Option<Capacity>> = vec![Some(0); graph.node_count()];
    let mut incoming: Vec<Option<Capacity>> = vec![Some(0); graph.node_count()];
    for edge in graph.edges() {
        outgoing[edge.from] = outgoing[edge.from].and_then(|s| s.checked_add(edge.capacity));
        incoming[edge.to] = incoming[edge.to].and_then(|s| s.checked_add(edge.capacity));
    }
    for index in 0..graph.node_count() {
        for (sums, direction) in [(&outgoing, "outgoing"), (&incoming, "incoming")] {
            if sums[index].is_none() {
                return Err(CapacityOverflowError {
                    location: location(graph, network, index),
                    direction,
                });
            }
        }
    }
    Ok(())
}

fn location(graph: &ReducedGraph, network: &Network, index: usize) -> String {
    match graph.node(index) {
        ReducedNode::SuperSource => "all sources".to_string(),
        ReducedNode::SuperSink => "all sinks".to_string(),
        ReducedNode::In(n) | ReducedNode::Out(n) => format!("node `{}`", network.name(n)),
    }
}
