use std::fmt::Write;

use crate::error::Result;
use crate::graph::project::{Bottleneck, FlowReport};
use crate::types::{Capacity, Kind};

/// Formats `value` with `,` as thousands separator.
pub fn group_thousands(value: Capacity) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn to_text(report: &FlowReport) -> String {
    let g = group_thousands;
    let mut out = String::new();
    let _ = writeln!(out, "=== Network Flow ===");
    let _ = writeln!(out, "Total max flow delivered to sinks: {}", g(report.total_flow));
    for sink in &report.sinks {
        let _ = writeln!(
            out,
            "Sink {}: demand={}  delivered={}  shortfall={}",
            sink.name,
            g(sink.demand),
            g(sink.delivered),
            g(sink.shortfall)
        );
    }
    let _ = writeln!(out, "---");
    let _ = writeln!(out, "Total demand across sinks: {}", g(report.total_demand));
    let _ = writeln!(out, "Total delivered to sinks: {}", g(report.total_delivered));
    let _ = writeln!(out, "Total production capacity: {}", g(report.total_production));

    let _ = writeln!(out, "\nNodes:");
    for node in &report.nodes {
        let _ = writeln!(
            out,
            "  {:8} kind={:12} node_capacity={}  throughput={}",
            node.name,
            node.kind.to_string(),
            g(node.node_capacity),
            g(node.throughput)
        );
    }

    let _ = writeln!(out, "\nEdges:");
    for edge in &report.edges {
        let _ = writeln!(
            out,
            "  {} -> {}  flow={}/{}",
            edge.tail,
            edge.head,
            g(edge.flow),
            g(edge.capacity)
        );
    }

    let _ = writeln!(out, "\nBottlenecks:");
    for bottleneck in &report.bottlenecks {
        let _ = writeln!(out, "  {}", describe(bottleneck));
    }
    out
}

fn describe(bottleneck: &Bottleneck) -> String {
    let g = group_thousands;
    match bottleneck {
        Bottleneck::Edge {
            tail,
            head,
            capacity,
        } => format!("edge {tail} -> {head} ({})", g(*capacity)),
        Bottleneck::Node { node, capacity } => {
            format!("node capacity of {node} ({})", g(*capacity))
        }
        Bottleneck::Production { source, capacity } => {
            format!("production of {source} ({})", g(*capacity))
        }
        Bottleneck::Demand { sink, capacity } => format!("demand of {sink} ({})", g(*capacity)),
    }
}

pub fn to_json(report: &FlowReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Graphviz rendering with `flow/capacity` labels on edges and
/// `throughput/node_capacity` labels on nodes.
pub fn to_dot(report: &FlowReport) -> String {
    let g = group_thousands;
    let mut out = String::new();
    let _ = writeln!(out, "digraph flow {{");
    let _ = writeln!(out, "  rankdir=LR;");
    let _ = writeln!(out, "  node [style=filled];");
    for node in &report.nodes {
        let color = match node.kind {
            Kind::Source => "lightgreen",
            Kind::Sink => "salmon",
            Kind::Intermediate => "lightblue",
        };
        let _ = writeln!(
            out,
            "  \"{}\" [label=\"{}\\n{}/{}\" fillcolor={color}];",
            escape(&node.name),
            escape(&node.name),
            g(node.throughput),
            g(node.node_capacity)
        );
    }
    for edge in &report.edges {
        let style = if edge.flow == 0 { " style=dashed" } else { "" };
        let _ = writeln!(
            out,
            "  \"{}\" -> \"{}\" [label=\"{}/{}\"{style}];",
            escape(&edge.tail),
            escape(&edge.head),
            g(edge.flow),
            g(edge.capacity)
        );
    }
    let _ = writeln!(out, "}}");
    out
}

fn escape(name: &str) -> String {
    name.replace('\\', "\\\\").replace('"', "\\\"")
}
