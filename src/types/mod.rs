pub mod edge;
pub mod network;
pub mod node;
pub mod record;

pub use edge::{Edge, EdgeId};
pub use network::Network;
pub use node::{Kind, Node, NodeId, NodeKind};
pub use record::{EdgeRecord, NetworkRecord, NodeRecord};

/// Capacities and flow values. Integer so that solving is exact.
pub type Capacity = u64;
