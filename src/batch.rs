use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::SolverConfig;
use crate::error::{Attribute, Result, ValidationError};
use crate::graph::flow::solve_network;
use crate::graph::project::FlowReport;
use crate::types::{Capacity, Network, NodeId, NodeKind};

/// Solves independent networks in parallel. Results keep the input order.
pub fn solve_batch(networks: &[Network], config: &SolverConfig) -> Vec<Result<FlowReport>> {
    networks
        .par_iter()
        .map(|network| solve_network(network, config))
        .collect()
}

/// Replaces one capacity of a network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "set", rename_all = "snake_case", deny_unknown_fields)]
pub enum Override {
    EdgeCapacity {
        tail: String,
        head: String,
        capacity: Capacity,
    },
    NodeCapacity {
        node: String,
        capacity: Capacity,
    },
    ProductionCapacity {
        node: String,
        capacity: Capacity,
    },
    Demand {
        node: String,
        capacity: Capacity,
    },
}

/// A named variant of a base network.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub overrides: Vec<Override>,
}

impl Scenario {
    /// Copy of `base` with all overrides applied.
    pub fn apply(&self, base: &Network) -> Result<Network> {
        let mut network = base.clone();
        for o in &self.overrides {
            apply_override(&mut network, o)?;
        }
        Ok(network)
    }
}

fn lookup(network: &Network, node: &str) -> Result<NodeId, ValidationError> {
    network
        .node_id(node)
        .ok_or_else(|| ValidationError::NoSuchNode {
            node: node.to_string(),
        })
}

fn apply_override(network: &mut Network, o: &Override) -> Result<(), ValidationError> {
    match o {
        Override::EdgeCapacity {
            tail,
            head,
            capacity,
        } => {
            let edge = network
                .find_edge(lookup(network, tail)?, lookup(network, head)?)
                .ok_or_else(|| ValidationError::NoSuchEdge {
                    tail: tail.clone(),
                    head: head.clone(),
                })?;
            network.edge_mut(edge).capacity = *capacity;
        }
        Override::NodeCapacity { node, capacity } => {
            let id = lookup(network, node)?;
            network.node_mut(id).node_capacity = *capacity;
        }
        Override::ProductionCapacity { node, capacity } => {
            let id = lookup(network, node)?;
            match &mut network.node_mut(id).kind {
                NodeKind::Source {
                    production_capacity,
                } => *production_capacity = *capacity,
                other => {
                    return Err(ValidationError::UnexpectedAttribute {
                        node: node.clone(),
                        kind: other.kind(),
                        attribute: Attribute::ProductionCapacity,
                    })
                }
            }
        }
        Override::Demand { node, capacity } => {
            let id = lookup(network, node)?;
            match &mut network.node_mut(id).kind {
                NodeKind::Sink { demand } => *demand = *capacity,
                other => {
                    return Err(ValidationError::UnexpectedAttribute {
                        node: node.clone(),
                        kind: other.kind(),
                        attribute: Attribute::Demand,
                    })
                }
            }
        }
    }
    Ok(())
}

/// Solves every scenario against `base` in parallel.
pub fn scenario_sweep(
    base: &Network,
    scenarios: &[Scenario],
    config: &SolverConfig,
) -> Vec<(String, Result<FlowReport>)> {
    scenarios
        .par_iter()
        .map(|scenario| {
            let report = scenario
                .apply(base)
                .and_then(|network| solve_network(&network, config));
            (scenario.name.clone(), report)
        })
        .collect()
}
