use crate::config::{Algorithm, SolverConfig};
use crate::context::SolveContext;
use crate::error::Result;
use crate::graph::augmenting_path::augmenting_path;
use crate::graph::dinic::{blocking_flow, level_graph};
use crate::graph::project::{project, FlowReport};
use crate::graph::residual::ResidualGraph;
use crate::graph::split::split_nodes;
use crate::graph::ReducedGraph;
use crate::types::{Capacity, Network};
use log::trace;

/// Flow on every reduced edge, indexed like [`ReducedGraph::edges`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FlowAssignment {
    flows: Vec<Capacity>,
}

impl FlowAssignment {
    pub(crate) fn new(flows: Vec<Capacity>) -> FlowAssignment {
        FlowAssignment { flows }
    }

    /// Flow on reduced edge `edge`, zero for edges that do not exist.
    pub fn get(&self, edge: usize) -> Capacity {
        self.flows.get(edge).copied().unwrap_or(0)
    }

    pub fn get_opt(&self, edge: Option<usize>) -> Capacity {
        edge.map_or(0, |e| self.get(e))
    }
}

#[derive(Clone, Debug)]
pub struct MaxFlow {
    pub value: Capacity,
    pub assignment: FlowAssignment,
    /// Number of augmenting paths used.
    pub augmentations: u64,
    source_side: Vec<bool>,
}

impl MaxFlow {
    /// Whether `node` is reachable from the source in the final residual graph.
    pub fn is_source_side(&self, node: usize) -> bool {
        self.source_side.get(node).copied().unwrap_or(false)
    }

    /// Reduced edges leaving the source side of the final residual graph.
    /// Their capacities add up to [`MaxFlow::value`].
    pub fn min_cut(&self, graph: &ReducedGraph) -> Vec<usize> {
        graph
            .edges()
            .iter()
            .enumerate()
            .filter(|(_, e)| self.is_source_side(e.from) && !self.is_source_side(e.to))
            .map(|(i, _)| i)
            .collect()
    }
}

/// Maximum flow from `source` to `sink` in the reduced graph.
///
/// The context is checked before every breadth-first search, so a cancelled or
/// expired solve stops at the next search boundary.
pub fn compute_flow(
    graph: &ReducedGraph,
    source: usize,
    sink: usize,
    algorithm: Algorithm,
    context: &SolveContext,
) -> Result<MaxFlow> {
    let mut residual = ResidualGraph::new(graph);
    let mut value: Capacity = 0;
    let mut augmentations = 0;

    if source != sink {
        match algorithm {
            Algorithm::EdmondsKarp => loop {
                context.check()?;
                let Some((bottleneck, path)) = augmenting_path(&residual, source, sink) else {
                    break;
                };
                for arc in &path {
                    residual.push(*arc, bottleneck);
                }
                value += bottleneck;
                augmentations += 1;
                trace!("Augmented {bottleneck} along {} arcs", path.len());
            },
            Algorithm::Dinic => loop {
                context.check()?;
                let Some(level) = level_graph(&residual, source, sink) else {
                    break;
                };
                let (pushed, paths) = blocking_flow(&mut residual, &level, source, sink);
                value += pushed;
                augmentations += paths;
                trace!("Blocking flow of {pushed} over {paths} paths");
            },
        }
    }

    context.log_message(&format!(
        "Max flow: {value} after {augmentations} augmentations ({algorithm})"
    ));
    let source_side = residual.reachable_from(source);
    Ok(MaxFlow {
        value,
        assignment: residual.into_assignment(),
        augmentations,
        source_side,
    })
}

/// Builds the reduced graph, solves it and projects the result back onto `network`.
pub fn solve_network(network: &Network, config: &SolverConfig) -> Result<FlowReport> {
    let context = SolveContext::for_config("solve", config);
    solve_with_context(network, config.algorithm, &context)
}

pub fn solve_with_context(
    network: &Network,
    algorithm: Algorithm,
    context: &SolveContext,
) -> Result<FlowReport> {
    let graph = split_nodes(network)?;
    let flow = compute_flow(
        &graph,
        graph.super_source(),
        graph.super_sink(),
        algorithm,
        context,
    )?;
    Ok(project(network, &graph, &flow))
}
