use std::path::PathBuf;
use std::process;

use clap::Parser;

use pipeflow::io::{read_network, write_network};

/// Converts a network between the text and the JSON format, chosen by file extension.
#[derive(Parser)]
#[command(name = "convert", version)]
struct Args {
    /// Network to read
    input: PathBuf,
    /// Network to write
    output: PathBuf,
}

fn main() {
    env_logger::init();
    let args = Args::parse();
    match read_network(&args.input).and_then(|network| {
        write_network(&network, &args.output)?;
        Ok(network)
    }) {
        Ok(network) => println!(
            "Converted {} nodes and {} edges to {}.",
            network.node_count(),
            network.edge_count(),
            args.output.display()
        ),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
