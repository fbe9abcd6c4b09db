use num_bigint::{BigInt, Sign};
use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::{Attribute, MissingAttributeError, Result, ValidationError};
use crate::types::{Capacity, Kind, Network, NodeKind};

/// Loosely-typed description of a network as handed over by whoever builds it.
///
/// Every capacity-like field is an optional JSON number, so that a missing, negative
/// or oversized value can be reported against the node or edge it belongs to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NetworkRecord {
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeRecord {
    pub id: String,
    pub kind: Kind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_capacity: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub production_capacity: Option<Number>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demand: Option<Number>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeRecord {
    pub tail: String,
    pub head: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<Number>,
}

/// A number that is not a valid capacity, before it is attributed to a node or edge.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum InvalidCapacity {
    Negative(String),
    TooLarge(String),
    NotAnInteger(String),
}

impl InvalidCapacity {
    pub(crate) fn at_node(self, node: &str, attribute: Attribute) -> ValidationError {
        match self {
            InvalidCapacity::Negative(value) => ValidationError::NegativeNodeAttribute {
                node: node.to_string(),
                attribute,
                value,
            },
            InvalidCapacity::TooLarge(value) => ValidationError::OutOfRange {
                subject: format!("node `{node}`"),
                attribute,
                value,
            },
            InvalidCapacity::NotAnInteger(value) => ValidationError::NotAnInteger {
                subject: format!("node `{node}`"),
                attribute,
                value,
            },
        }
    }

    pub(crate) fn at_edge(self, tail: &str, head: &str) -> ValidationError {
        match self {
            InvalidCapacity::Negative(value) => ValidationError::NegativeEdgeCapacity {
                tail: tail.to_string(),
                head: head.to_string(),
                value,
            },
            InvalidCapacity::TooLarge(value) => ValidationError::OutOfRange {
                subject: format!("edge `{tail} -> {head}`"),
                attribute: Attribute::Capacity,
                value,
            },
            InvalidCapacity::NotAnInteger(value) => ValidationError::NotAnInteger {
                subject: format!("edge `{tail} -> {head}`"),
                attribute: Attribute::Capacity,
                value,
            },
        }
    }
}

pub(crate) fn capacity_from_bigint(value: &BigInt) -> Result<Capacity, InvalidCapacity> {
    if value.sign() == Sign::Minus {
        return Err(InvalidCapacity::Negative(value.to_string()));
    }
    Capacity::try_from(value).map_err(|_| InvalidCapacity::TooLarge(value.to_string()))
}

/// Integers beyond the `i64`/`u64` range arrive as floats.
pub(crate) fn capacity_from_number(value: &Number) -> Result<Capacity, InvalidCapacity> {
    if let Some(capacity) = value.as_u64() {
        return Ok(capacity);
    }
    if value.is_i64() {
        return Err(InvalidCapacity::Negative(value.to_string()));
    }
    match value.as_f64() {
        Some(f) if f < 0.0 => Err(InvalidCapacity::Negative(value.to_string())),
        Some(f) if f.fract() == 0.0 && f >= Capacity::MAX as f64 => {
            Err(InvalidCapacity::TooLarge(value.to_string()))
        }
        _ => Err(InvalidCapacity::NotAnInteger(value.to_string())),
    }
}

impl NodeRecord {
    fn required(&self, value: &Option<Number>, attribute: Attribute) -> Result<Capacity> {
        let value = value.as_ref().ok_or_else(|| MissingAttributeError::Node {
            node: self.id.clone(),
            kind: self.kind,
            attribute,
        })?;
        Ok(capacity_from_number(value).map_err(|e| e.at_node(&self.id, attribute))?)
    }

    fn absent(&self, value: &Option<Number>, attribute: Attribute) -> Result<()> {
        match value {
            None => Ok(()),
            Some(_) => Err(ValidationError::UnexpectedAttribute {
                node: self.id.clone(),
                kind: self.kind,
                attribute,
            }
            .into()),
        }
    }

    pub fn node_kind(&self) -> Result<NodeKind> {
        match self.kind {
            Kind::Source => {
                self.absent(&self.demand, Attribute::Demand)?;
                Ok(NodeKind::Source {
                    production_capacity: self
                        .required(&self.production_capacity, Attribute::ProductionCapacity)?,
                })
            }
            Kind::Intermediate => {
                self.absent(&self.production_capacity, Attribute::ProductionCapacity)?;
                self.absent(&self.demand, Attribute::Demand)?;
                Ok(NodeKind::Intermediate)
            }
            Kind::Sink => {
                self.absent(&self.production_capacity, Attribute::ProductionCapacity)?;
                Ok(NodeKind::Sink {
                    demand: self.required(&self.demand, Attribute::Demand)?,
                })
            }
        }
    }
}

impl EdgeRecord {
    pub fn capacity(&self) -> Result<Capacity> {
        let value = self
            .capacity
            .as_ref()
            .ok_or_else(|| MissingAttributeError::Edge {
                tail: self.tail.clone(),
                head: self.head.clone(),
                attribute: Attribute::Capacity,
            })?;
        Ok(capacity_from_number(value).map_err(|e| e.at_edge(&self.tail, &self.head))?)
    }
}

impl Network {
    /// Builds the typed network, failing on the first record that is incomplete or invalid.
    pub fn from_record(record: &NetworkRecord) -> Result<Network> {
        let mut network = Network::new();
        for node in &record.nodes {
            let node_capacity = node.required(&node.node_capacity, Attribute::NodeCapacity)?;
            network.add_node(node.id.clone(), node_capacity, node.node_kind()?)?;
        }
        for edge in &record.edges {
            network.add_edge(&edge.tail, &edge.head, edge.capacity()?)?;
        }
        Ok(network)
    }

    pub fn to_record(&self) -> NetworkRecord {
        NetworkRecord {
            nodes: self
                .nodes()
                .map(|(_, n)| NodeRecord {
                    id: n.name.clone(),
                    kind: n.kind.kind(),
                    node_capacity: Some(n.node_capacity.into()),
                    production_capacity: n.production_capacity().map(Number::from),
                    demand: n.demand().map(Number::from),
                })
                .collect(),
            edges: self
                .edges()
                .map(|(_, e)| EdgeRecord {
                    tail: self.name(e.tail).to_string(),
                    head: self.name(e.head).to_string(),
                    capacity: Some(e.capacity.into()),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{EdgeRecord, NetworkRecord, NodeRecord};
    use crate::error::{Attribute, Error, MissingAttributeError, ValidationError};
    use crate::types::{Kind, Network};
    use serde_json::Number;

    fn node(
        id: &str,
        kind: Kind,
        cap: Option<i64>,
        prod: Option<i64>,
        demand: Option<i64>,
    ) -> NodeRecord {
        NodeRecord {
            id: id.to_string(),
            kind,
            node_capacity: cap.map(Number::from),
            production_capacity: prod.map(Number::from),
            demand: demand.map(Number::from),
        }
    }

    fn edge(tail: &str, head: &str, capacity: Option<i64>) -> EdgeRecord {
        EdgeRecord {
            tail: tail.to_string(),
            head: head.to_string(),
            capacity: capacity.map(Number::from),
        }
    }

    #[test]
    fn builds_typed_network() {
        let record = NetworkRecord {
            nodes: vec![
                node("s", Kind::Source, Some(10), Some(8), None),
                node("m", Kind::Intermediate, Some(0), None, None),
                node("t", Kind::Sink, Some(10), None, Some(3)),
            ],
            edges: vec![edge("s", "m", Some(4)), edge("m", "t", Some(0))],
        };
        let network = Network::from_record(&record).unwrap();
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_count(), 2);
        assert_eq!(network.total_production(), 8);
        assert_eq!(network.to_record(), record);
    }

    #[test]
    fn sink_without_demand() {
        let record = NetworkRecord {
            nodes: vec![node("t", Kind::Sink, Some(10), None, None)],
            edges: vec![],
        };
        match Network::from_record(&record) {
            Err(Error::MissingAttribute(MissingAttributeError::Node {
                node, attribute, ..
            })) => {
                assert_eq!(node, "t");
                assert_eq!(attribute, Attribute::Demand);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn node_without_capacity() {
        let record = NetworkRecord {
            nodes: vec![node("m", Kind::Intermediate, None, None, None)],
            edges: vec![],
        };
        let err = Network::from_record(&record).unwrap_err();
        assert_eq!(err.to_string(), "intermediate node `m` is missing node_capacity");
    }

    #[test]
    fn source_without_production() {
        let record = NetworkRecord {
            nodes: vec![node("s", Kind::Source, Some(1), None, None)],
            edges: vec![],
        };
        let err = Network::from_record(&record).unwrap_err();
        assert_eq!(err.to_string(), "source node `s` is missing production_capacity");
    }

    #[test]
    fn edge_without_capacity() {
        let record = NetworkRecord {
            nodes: vec![
                node("s", Kind::Source, Some(1), Some(1), None),
                node("t", Kind::Sink, Some(1), None, Some(1)),
            ],
            edges: vec![edge("s", "t", None)],
        };
        assert!(matches!(
            Network::from_record(&record),
            Err(Error::MissingAttribute(MissingAttributeError::Edge { .. }))
        ));
    }

    #[test]
    fn negative_values() {
        let record = NetworkRecord {
            nodes: vec![node("m", Kind::Intermediate, Some(-1), None, None)],
            edges: vec![],
        };
        assert!(matches!(
            Network::from_record(&record),
            Err(Error::Validation(ValidationError::NegativeNodeAttribute { .. }))
        ));
        let record = NetworkRecord {
            nodes: vec![
                node("s", Kind::Source, Some(1), Some(1), None),
                node("t", Kind::Sink, Some(1), None, Some(1)),
            ],
            edges: vec![edge("s", "t", Some(-5))],
        };
        let err = Network::from_record(&record).unwrap_err();
        assert_eq!(
            err.to_string(),
            "edge `s -> t`: capacity must be non-negative, got -5"
        );
    }

    #[test]
    fn intermediate_with_demand() {
        let record = NetworkRecord {
            nodes: vec![node("m", Kind::Intermediate, Some(1), None, Some(3))],
            edges: vec![],
        };
        assert!(matches!(
            Network::from_record(&record),
            Err(Error::Validation(ValidationError::UnexpectedAttribute {
                attribute: Attribute::Demand,
                ..
            }))
        ));
    }
}
