use std::fs::{read_to_string, File};
use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use log::info;

use pipeflow::batch::{scenario_sweep, Scenario};
use pipeflow::io::read_network;
use pipeflow::report::{group_thousands, to_dot, to_json, to_text};
use pipeflow::{solve_network, Algorithm, SolverConfig};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

/// Maximum deliverable flow through a capacitated network.
#[derive(Parser)]
#[command(name = "pipeflow", version)]
struct Cli {
    /// Network file (`.json`, anything else is read as the text format)
    network: PathBuf,
    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    format: Format,
    /// Solver configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// `edmonds-karp` or `dinic`, overrides the configuration file
    #[arg(long)]
    algorithm: Option<Algorithm>,
    /// Abort after this many milliseconds, overrides the configuration file
    #[arg(long)]
    timeout_ms: Option<u64>,
    /// Also write a Graphviz rendering of the flow to this file
    #[arg(long)]
    dot: Option<PathBuf>,
    /// Solve every scenario of this JSON file (a list of capacity overrides) instead
    #[arg(long)]
    scenarios: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    if let Err(e) = run(Cli::parse()) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => SolverConfig::from_json_file(path)?,
        None => SolverConfig::default(),
    };
    if let Some(algorithm) = cli.algorithm {
        config.algorithm = algorithm;
    }
    if cli.timeout_ms.is_some() {
        config.timeout_ms = cli.timeout_ms;
    }

    let network = read_network(&cli.network)?;
    info!(
        "Read {} nodes and {} edges from {}",
        network.node_count(),
        network.edge_count(),
        cli.network.display()
    );

    if let Some(path) = &cli.scenarios {
        let scenarios: Vec<Scenario> = serde_json::from_str(&read_to_string(path)?)?;
        return print_scenarios(&network, &scenarios, &config, cli.format);
    }

    let report = solve_network(&network, &config)?;
    match cli.format {
        Format::Text => print!("{}", to_text(&report)),
        Format::Json => println!("{}", to_json(&report)?),
    }

    if let Some(dotfile) = &cli.dot {
        File::create(dotfile)?.write_all(to_dot(&report).as_bytes())?;
        info!("Wrote dotfile {}.", dotfile.display());
    }
    Ok(())
}

fn print_scenarios(
    network: &pipeflow::Network,
    scenarios: &[Scenario],
    config: &SolverConfig,
    format: Format,
) -> Result<(), Box<dyn std::error::Error>> {
    let results = scenario_sweep(network, scenarios, config);
    match format {
        Format::Text => {
            for (name, result) in &results {
                match result {
                    Ok(report) => println!(
                        "{name}: flow={}  shortfall={}",
                        group_thousands(report.total_flow),
                        group_thousands(report.total_shortfall())
                    ),
                    Err(e) => println!("{name}: error: {e}"),
                }
            }
        }
        Format::Json => {
            let entries = results
                .iter()
                .map(|(name, result)| match result {
                    Ok(report) => serde_json::json!({ "scenario": name, "report": report }),
                    Err(e) => serde_json::json!({ "scenario": name, "error": e.to_string() }),
                })
                .collect::<Vec<_>>();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}
