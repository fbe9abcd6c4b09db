use std::fs::{read_to_string, File};
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

use log::debug;
use num_bigint::BigInt;
use regex::Regex;

use crate::error::{Attribute, Error, MissingAttributeError, Result, ValidationError};
use crate::types::record::{capacity_from_bigint, InvalidCapacity};
use crate::types::{Capacity, Kind, Network, NetworkRecord, NodeKind};

/// Reads a network, as JSON if the file name ends in `.json` and in the text format otherwise.
pub fn read_network(path: impl AsRef<Path>) -> Result<Network> {
    let path = path.as_ref();
    let network = if is_json(path) {
        read_network_json(path)?
    } else {
        read_network_csv(path)?
    };
    debug!(
        "Read {} nodes and {} edges from {}",
        network.node_count(),
        network.edge_count(),
        path.display()
    );
    Ok(network)
}

pub fn write_network(network: &Network, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if is_json(path) {
        write_network_json(network, path)
    } else {
        write_network_csv(network, path)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

pub fn read_network_json(path: impl AsRef<Path>) -> Result<Network> {
    parse_network_json(&read_to_string(path)?)
}

pub fn parse_network_json(contents: &str) -> Result<Network> {
    let record: NetworkRecord = serde_json::from_str(contents)?;
    Network::from_record(&record)
}

pub fn write_network_json(network: &Network, path: impl AsRef<Path>) -> Result<()> {
    let mut file = File::create(path)?;
    serde_json::to_writer_pretty(&mut file, &network.to_record())?;
    writeln!(file)?;
    Ok(())
}

pub fn read_network_csv(path: impl AsRef<Path>) -> Result<Network> {
    parse_network_csv(&read_to_string(path)?)
}

/// Parses the line-based format:
///
/// ```text
/// node,<id>,source,<node_capacity>,<production_capacity>
/// node,<id>,intermediate,<node_capacity>
/// node,<id>,sink,<node_capacity>,<demand>
/// edge,<tail>,<head>,<capacity>
/// ```
///
/// Blank lines and lines starting with `#` are ignored.
pub fn parse_network_csv(contents: &str) -> Result<Network> {
    let mut network = Network::new();
    for (index, line) in contents.lines().enumerate() {
        let line_number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields = line
            .split(',')
            .map(|f| unescape(f.trim()))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| parse_error(line_number, format!("Unbalanced quotes in {line}")))?;
        match &fields[..] {
            ["node", id, kind, attributes @ ..] => {
                parse_node(&mut network, line_number, id, kind, attributes)?
            }
            ["edge", tail, head, attributes @ ..] => {
                parse_edge(&mut network, line_number, tail, head, attributes)?
            }
            _ => {
                return Err(parse_error(
                    line_number,
                    format!("Expected node,<id>,<kind>,... or edge,<tail>,<head>,<capacity>, but got {line}"),
                ))
            }
        }
    }
    Ok(network)
}

fn parse_node(
    network: &mut Network,
    line_number: usize,
    id: &str,
    kind: &str,
    attributes: &[&str],
) -> Result<()> {
    validate_identifier(id)?;
    let kind = match kind {
        "source" => Kind::Source,
        "intermediate" => Kind::Intermediate,
        "sink" => Kind::Sink,
        _ => {
            return Err(parse_error(
                line_number,
                format!("Unknown node kind `{kind}` for node `{id}`"),
            ))
        }
    };
    let expected = if kind == Kind::Intermediate { 1 } else { 2 };
    if attributes.len() > expected {
        return Err(parse_error(
            line_number,
            format!("Too many fields for {kind} node `{id}`"),
        ));
    }
    let required = |position: usize, attribute: Attribute| -> Result<Capacity> {
        match attributes.get(position).filter(|text| !text.is_empty()) {
            None => Err(MissingAttributeError::Node {
                node: id.to_string(),
                kind,
                attribute,
            }
            .into()),
            Some(text) => {
                parse_capacity(line_number, text, attribute, |e| e.at_node(id, attribute))
            }
        }
    };
    let node_capacity = required(0, Attribute::NodeCapacity)?;
    let node_kind = match kind {
        Kind::Source => NodeKind::Source {
            production_capacity: required(1, Attribute::ProductionCapacity)?,
        },
        Kind::Intermediate => NodeKind::Intermediate,
        Kind::Sink => NodeKind::Sink {
            demand: required(1, Attribute::Demand)?,
        },
    };
    network.add_node(id, node_capacity, node_kind)?;
    Ok(())
}

fn parse_edge(
    network: &mut Network,
    line_number: usize,
    tail: &str,
    head: &str,
    attributes: &[&str],
) -> Result<()> {
    validate_identifier(tail)?;
    validate_identifier(head)?;
    if attributes.len() > 1 {
        return Err(parse_error(
            line_number,
            format!("Too many fields for edge `{tail} -> {head}`"),
        ));
    }
    let capacity = match attributes.first().filter(|text| !text.is_empty()) {
        None => {
            return Err(MissingAttributeError::Edge {
                tail: tail.to_string(),
                head: head.to_string(),
                attribute: Attribute::Capacity,
            }
            .into())
        }
        Some(text) => parse_capacity(line_number, text, Attribute::Capacity, |e| {
            e.at_edge(tail, head)
        })?,
    };
    network.add_edge(tail, head, capacity)?;
    Ok(())
}

/// Parses an arbitrarily long integer literal and checks that it fits a [`Capacity`].
fn parse_capacity(
    line_number: usize,
    text: &str,
    attribute: Attribute,
    invalid: impl FnOnce(InvalidCapacity) -> ValidationError,
) -> Result<Capacity> {
    let value = BigInt::from_str(text).map_err(|e| {
        parse_error(line_number, format!("Invalid {attribute} `{text}`: {e}"))
    })?;
    Ok(capacity_from_bigint(&value).map_err(invalid)?)
}

fn identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Za-z0-9_.:-]+$").unwrap())
}

/// Identifiers of the text format: letters, digits and `_ . : -`.
pub fn validate_identifier(id: &str) -> Result<(), ValidationError> {
    if identifier_pattern().is_match(id) {
        Ok(())
    } else {
        Err(ValidationError::InvalidIdentifier { id: id.to_string() })
    }
}

pub fn write_network_csv(network: &Network, path: impl AsRef<Path>) -> Result<()> {
    let contents = format_network_csv(network)?;
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

/// Fails if a node name cannot be written in the text format.
pub fn format_network_csv(network: &Network) -> Result<String> {
    let mut out = String::new();
    for (_, node) in network.nodes() {
        validate_identifier(&node.name)?;
        let line = match node.kind {
            NodeKind::Source {
                production_capacity,
            } => format!(
                "node,{},source,{},{production_capacity}",
                node.name, node.node_capacity
            ),
            NodeKind::Intermediate => {
                format!("node,{},intermediate,{}", node.name, node.node_capacity)
            }
            NodeKind::Sink { demand } => {
                format!("node,{},sink,{},{demand}", node.name, node.node_capacity)
            }
        };
        out.push_str(&line);
        out.push('\n');
    }
    for (_, edge) in network.edges() {
        out.push_str(&format!(
            "edge,{},{},{}\n",
            network.name(edge.tail),
            network.name(edge.head),
            edge.capacity
        ));
    }
    Ok(out)
}

fn parse_error(line: usize, message: String) -> Error {
    Error::Parse { line, message }
}

fn unescape(input: &str) -> Option<&str> {
    match input.chars().next() {
        Some(quote @ ('"' | '\'')) => {
            if input.len() >= 2 && input.ends_with(quote) {
                Some(&input[1..input.len() - 1])
            } else {
                None
            }
        }
        _ => Some(input),
    }
}
