pub mod batch;
pub mod config;
pub mod context;
pub mod error;
pub mod graph;
pub mod io;
pub mod report;
pub mod types;

pub use config::{Algorithm, SolverConfig};
pub use context::SolveContext;
pub use error::{Error, Result};
pub use graph::flow::solve_network;
pub use graph::project::FlowReport;
pub use types::{Capacity, Network};
