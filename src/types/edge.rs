use super::{Capacity, NodeId};

/// Dense handle of an edge inside a [`super::Network`].
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct EdgeId(pub(crate) usize);

#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct Edge {
    pub tail: NodeId,
    pub head: NodeId,
    pub capacity: Capacity,
}
