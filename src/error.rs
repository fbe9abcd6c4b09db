use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::types::Kind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Names of the capacity-like attributes, spelled the way the input schema spells them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Attribute {
    NodeCapacity,
    ProductionCapacity,
    Demand,
    Capacity,
}

impl Display for Attribute {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let name = match self {
            Attribute::NodeCapacity => "node_capacity",
            Attribute::ProductionCapacity => "production_capacity",
            Attribute::Demand => "demand",
            Attribute::Capacity => "capacity",
        };
        write!(f, "{name}")
    }
}

/// The network itself is malformed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("node `{node}` is declared more than once")]
    DuplicateNode { node: String },
    #[error("edge `{tail} -> {head}` references unknown node `{missing}`")]
    UnknownNode {
        tail: String,
        head: String,
        missing: String,
    },
    #[error("no node named `{node}`")]
    NoSuchNode { node: String },
    #[error("no edge `{tail} -> {head}`")]
    NoSuchEdge { tail: String, head: String },
    #[error("edge `{node} -> {node}` is a self-loop")]
    SelfLoop { node: String },
    #[error("edge `{tail} -> {head}` is declared more than once")]
    DuplicateEdge { tail: String, head: String },
    #[error("node `{node}`: {attribute} must be non-negative, got {value}")]
    NegativeNodeAttribute {
        node: String,
        attribute: Attribute,
        value: String,
    },
    #[error("edge `{tail} -> {head}`: capacity must be non-negative, got {value}")]
    NegativeEdgeCapacity {
        tail: String,
        head: String,
        value: String,
    },
    #[error("{kind} node `{node}` must not have {attribute}")]
    UnexpectedAttribute {
        node: String,
        kind: Kind,
        attribute: Attribute,
    },
    #[error("invalid identifier `{id}`")]
    InvalidIdentifier { id: String },
    #[error("{subject}: {attribute} must be an integer, got {value}")]
    NotAnInteger {
        subject: String,
        attribute: Attribute,
        value: String,
    },
    #[error("{subject}: {attribute} value {value} does not fit into 64 bits")]
    OutOfRange {
        subject: String,
        attribute: Attribute,
        value: String,
    },
}

/// A node or edge lacks an attribute its kind requires.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MissingAttributeError {
    #[error("{kind} node `{node}` is missing {attribute}")]
    Node {
        node: String,
        kind: Kind,
        attribute: Attribute,
    },
    #[error("edge `{tail} -> {head}` is missing {attribute}")]
    Edge {
        tail: String,
        head: String,
        attribute: Attribute,
    },
}

/// Summing the capacities incident to one point of the network would overflow `u64`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("total {direction} capacity at {location} overflows 64 bits")]
pub struct CapacityOverflowError {
    pub location: String,
    pub direction: &'static str,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    MissingAttribute(#[from] MissingAttributeError),
    #[error(transparent)]
    CapacityOverflow(#[from] CapacityOverflowError),
    #[error("computation was cancelled")]
    Cancelled,
    #[error("deadline exceeded after {elapsed_ms} ms")]
    DeadlineExceeded { elapsed_ms: u128 },
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
