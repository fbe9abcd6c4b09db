use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::Capacity;

/// Dense handle of a node inside a [`super::Network`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Kind of a node without its payload, as it appears in records and reports.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Source,
    Intermediate,
    Sink,
}

impl Display for Kind {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Kind::Source => write!(f, "source"),
            Kind::Intermediate => write!(f, "intermediate"),
            Kind::Sink => write!(f, "sink"),
        }
    }
}

/// Kind-specific attributes. A source always has a production capacity
/// and a sink always has a demand.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum NodeKind {
    Source { production_capacity: Capacity },
    Intermediate,
    Sink { demand: Capacity },
}

impl NodeKind {
    pub fn kind(&self) -> Kind {
        match self {
            NodeKind::Source { .. } => Kind::Source,
            NodeKind::Intermediate => Kind::Intermediate,
            NodeKind::Sink { .. } => Kind::Sink,
        }
    }
}

#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    /// Upper bound on the total flow passing through the node.
    pub node_capacity: Capacity,
    pub kind: NodeKind,
}

impl Node {
    pub fn production_capacity(&self) -> Option<Capacity> {
        match self.kind {
            NodeKind::Source {
                production_capacity,
            } => Some(production_capacity),
            _ => None,
        }
    }

    pub fn demand(&self) -> Option<Capacity> {
        match self.kind {
            NodeKind::Sink { demand } => Some(demand),
            _ => None,
        }
    }

    pub fn is_source(&self) -> bool {
        matches!(self.kind, NodeKind::Source { .. })
    }

    pub fn is_sink(&self) -> bool {
        matches!(self.kind, NodeKind::Sink { .. })
    }
}
