use crate::config::Algorithm;
use crate::context::SolveContext;
use crate::error::Error;
use crate::graph::augmenting_path::augmenting_path;
use crate::graph::flow::{compute_flow, MaxFlow};
use crate::graph::residual::{Arc, ResidualGraph};
use crate::graph::split::split_nodes;
use crate::graph::{EdgeRole, ReducedGraph, ReducedNode};
use crate::types::{Capacity, Network};
use std::sync::atomic::AtomicBool;

const ALGORITHMS: [Algorithm; 2] = [Algorithm::EdmondsKarp, Algorithm::Dinic];

fn solve(graph: &ReducedGraph, algorithm: Algorithm) -> MaxFlow {
    compute_flow(
        graph,
        graph.super_source(),
        graph.super_sink(),
        algorithm,
        &SolveContext::default(),
    )
    .unwrap()
}

fn direct(edge_capacity: Capacity) -> Network {
    let mut network = Network::new();
    network.add_source("a", 100, 100).unwrap();
    network.add_sink("b", 100, 100).unwrap();
    network.add_edge("a", "b", edge_capacity).unwrap();
    network
}

fn diamond() -> Network {
    let mut network = Network::new();
    network.add_source("a", 100, 100).unwrap();
    network.add_intermediate("b", 100).unwrap();
    network.add_intermediate("c", 100).unwrap();
    network.add_sink("d", 100, 100).unwrap();
    network.add_edge("a", "b", 10).unwrap();
    network.add_edge("a", "c", 7).unwrap();
    network.add_edge("b", "d", 9).unwrap();
    network.add_edge("c", "d", 8).unwrap();
    network
}

#[test]
fn split_layout() {
    let network = diamond();
    let graph = split_nodes(&network).unwrap();
    assert_eq!(graph.node_count(), 2 + 2 * 4);
    // 4 internal + 4 transcribed + 1 injection + 1 extraction
    assert_eq!(graph.edge_count(), 10);
    assert_eq!(graph.node(graph.super_source()), ReducedNode::SuperSource);
    assert_eq!(graph.node(graph.super_sink()), ReducedNode::SuperSink);

    let b = network.node_id("b").unwrap();
    let internal = graph.edge(graph.internal_edge(b));
    assert_eq!(internal.from, ReducedGraph::in_node(b));
    assert_eq!(internal.to, ReducedGraph::out_node(b));
    assert_eq!(internal.capacity, 100);
    assert_eq!(internal.role, EdgeRole::Internal(b));
    assert_eq!(graph.label(internal.from, &network), "b_in");
    assert_eq!(graph.label(graph.super_sink(), &network), "super_sink");

    let a = network.node_id("a").unwrap();
    let ab = network.find_edge(a, b).unwrap();
    let transcribed = graph.edge(graph.transcribed_edge(ab));
    assert_eq!(
        (transcribed.from, transcribed.to, transcribed.capacity),
        (ReducedGraph::out_node(a), ReducedGraph::in_node(b), 10)
    );
    assert_eq!(
        graph.find_edge(ReducedGraph::out_node(a), ReducedGraph::in_node(b)),
        Some(graph.transcribed_edge(ab))
    );
    assert!(graph.injection_edge(a).is_some());
    assert!(graph.injection_edge(b).is_none());
    assert!(graph.extraction_edge(b).is_none());
}

#[test]
fn split_is_reproducible() {
    let first = split_nodes(&diamond()).unwrap();
    let second = split_nodes(&diamond()).unwrap();
    assert_eq!(first.edges(), second.edges());
}

#[test]
fn zero_node_capacity_is_kept() {
    let mut network = Network::new();
    network.add_source("a", 0, 5).unwrap();
    network.add_sink("b", 5, 5).unwrap();
    network.add_edge("a", "b", 5).unwrap();
    let graph = split_nodes(&network).unwrap();
    let a = network.node_id("a").unwrap();
    assert_eq!(graph.edge(graph.internal_edge(a)).capacity, 0);
    for algorithm in ALGORITHMS {
        assert_eq!(solve(&graph, algorithm).value, 0);
    }
}

#[test]
fn overflowing_production() {
    let mut network = Network::new();
    network.add_source("a", 1, Capacity::MAX).unwrap();
    network.add_source("b", 1, 1).unwrap();
    let err = split_nodes(&network).unwrap_err();
    assert_eq!(err.location, "all sources");
    assert_eq!(
        err.to_string(),
        "total outgoing capacity at all sources overflows 64 bits"
    );
}

#[test]
fn overflowing_edges_at_node() {
    let mut network = Network::new();
    network.add_source("a", 1, 1).unwrap();
    network.add_sink("b", 1, 1).unwrap();
    network.add_sink("c", 1, 1).unwrap();
    network.add_edge("a", "b", Capacity::MAX).unwrap();
    network.add_edge("a", "c", 1).unwrap();
    let err = split_nodes(&network).unwrap_err();
    assert_eq!(err.location, "node `a`");
    assert_eq!(err.direction, "outgoing");
}

#[test]
fn residual_arcs_are_paired() {
    let graph = split_nodes(&direct(10)).unwrap();
    let mut residual = ResidualGraph::new(&graph);
    let forward = Arc {
        edge: 0,
        forward: true,
    };
    let backward = Arc {
        edge: 0,
        forward: false,
    };
    assert_eq!(residual.remaining(forward), 100);
    assert_eq!(residual.remaining(backward), 0);
    residual.push(forward, 30);
    assert_eq!(residual.remaining(forward), 70);
    assert_eq!(residual.remaining(backward), 30);
    residual.push(backward, 10);
    assert_eq!(residual.flow(0), 20);
    assert_eq!(residual.remaining(forward) + residual.flow(0), 100);
    assert_eq!(residual.head(backward), residual.tail(forward));
}

#[test]
fn shortest_path_first() {
    let graph = split_nodes(&direct(10)).unwrap();
    let residual = ResidualGraph::new(&graph);
    let (bottleneck, path) =
        augmenting_path(&residual, graph.super_source(), graph.super_sink()).unwrap();
    assert_eq!(bottleneck, 10);
    // super_source -> a_in -> a_out -> b_in -> b_out -> super_sink
    assert_eq!(path.len(), 5);
    assert!(path.iter().all(|arc| arc.forward));
    assert_eq!(residual.tail(path[0]), graph.super_source());
    assert_eq!(residual.head(path[4]), graph.super_sink());
    assert!(augmenting_path(&residual, 0, 0).is_none());
}

#[test]
fn direct_flow() {
    let network = direct(10);
    let graph = split_nodes(&network).unwrap();
    for algorithm in ALGORITHMS {
        let flow = solve(&graph, algorithm);
        assert_eq!(flow.value, 10);
        let a = network.node_id("a").unwrap();
        let b = network.node_id("b").unwrap();
        let e = network.find_edge(a, b).unwrap();
        assert_eq!(flow.assignment.get(graph.transcribed_edge(e)), 10);
        assert_eq!(flow.assignment.get(graph.internal_edge(a)), 10);
        assert_eq!(flow.min_cut(&graph), vec![graph.transcribed_edge(e)]);
    }
}

#[test]
fn one_hop() {
    let mut network = Network::new();
    network.add_source("a", 100, 100).unwrap();
    network.add_intermediate("b", 100).unwrap();
    network.add_sink("c", 100, 100).unwrap();
    network.add_edge("a", "b", 10).unwrap();
    network.add_edge("b", "c", 8).unwrap();
    let graph = split_nodes(&network).unwrap();
    for algorithm in ALGORITHMS {
        assert_eq!(solve(&graph, algorithm).value, 8);
    }
}

#[test]
fn diamond_flow() {
    let network = diamond();
    let graph = split_nodes(&network).unwrap();
    for algorithm in ALGORITHMS {
        let flow = solve(&graph, algorithm);
        assert_eq!(flow.value, 16);
        let cut: Capacity = flow
            .min_cut(&graph)
            .iter()
            .map(|e| graph.edge(*e).capacity)
            .sum();
        assert_eq!(cut, 16);
    }
}

#[test]
fn node_capacity_limits_diamond() {
    let mut network = Network::new();
    network.add_source("a", 100, 100).unwrap();
    network.add_intermediate("b", 4).unwrap();
    network.add_intermediate("c", 100).unwrap();
    network.add_sink("d", 100, 100).unwrap();
    network.add_edge("a", "b", 10).unwrap();
    network.add_edge("a", "c", 7).unwrap();
    network.add_edge("b", "d", 9).unwrap();
    network.add_edge("c", "d", 8).unwrap();
    let graph = split_nodes(&network).unwrap();
    for algorithm in ALGORITHMS {
        let flow = solve(&graph, algorithm);
        assert_eq!(flow.value, 11);
        let b = network.node_id("b").unwrap();
        assert_eq!(flow.assignment.get(graph.internal_edge(b)), 4);
    }
}

#[test]
fn flow_needs_cancellation() {
    // Greedy choice a->b->d first has to be partly undone over a backward arc.
    let mut network = Network::new();
    network.add_source("s", 100, 100).unwrap();
    network.add_intermediate("a", 100).unwrap();
    network.add_intermediate("b", 100).unwrap();
    network.add_sink("t", 100, 100).unwrap();
    network.add_edge("s", "a", 1).unwrap();
    network.add_edge("s", "b", 1).unwrap();
    network.add_edge("a", "b", 1).unwrap();
    network.add_edge("a", "t", 1).unwrap();
    network.add_edge("b", "t", 1).unwrap();
    let graph = split_nodes(&network).unwrap();
    for algorithm in ALGORITHMS {
        assert_eq!(solve(&graph, algorithm).value, 2);
    }
}

#[test]
fn no_sources() {
    let mut network = Network::new();
    network.add_intermediate("m", 10).unwrap();
    network.add_sink("t", 10, 10).unwrap();
    network.add_edge("m", "t", 10).unwrap();
    let graph = split_nodes(&network).unwrap();
    for algorithm in ALGORITHMS {
        let flow = solve(&graph, algorithm);
        assert_eq!(flow.value, 0);
        assert_eq!(flow.augmentations, 0);
        assert!(flow.min_cut(&graph).is_empty());
    }
}

#[test]
fn cancelled_before_first_search() {
    let graph = split_nodes(&diamond()).unwrap();
    for algorithm in ALGORITHMS {
        let context = SolveContext::new("test")
            .with_cancel_flag(std::sync::Arc::new(AtomicBool::new(true)));
        let result = compute_flow(
            &graph,
            graph.super_source(),
            graph.super_sink(),
            algorithm,
            &context,
        );
        assert!(matches!(result, Err(Error::Cancelled)));
    }
}

#[test]
fn long_chain() {
    let length = 100_000;
    let mut network = Network::new();
    network.add_source("n0", 10, 25).unwrap();
    for i in 1..length - 1 {
        network.add_intermediate(format!("n{i}"), 10).unwrap();
    }
    network.add_sink(format!("n{}", length - 1), 10, 25).unwrap();
    for i in 0..length - 1 {
        network
            .add_edge(&format!("n{i}"), &format!("n{}", i + 1), 10)
            .unwrap();
    }
    let graph = split_nodes(&network).unwrap();
    for algorithm in ALGORITHMS {
        let flow = solve(&graph, algorithm);
        assert_eq!(flow.value, 10);
        assert_eq!(flow.augmentations, 1);
    }
}
