//! Command-line arguments for routelab

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "routelab")]
#[command(version)]
#[command(about = "Shortest-path lab: run and compare Dijkstra, A* and bidirectional search on road graphs")]
#[command(long_about = "Runs point-to-point searches on a road graph stored as JSON:
  routelab route graph.json --from A --to C --algorithm astar
  routelab compare graph.json --from A --to C
  routelab algorithms

Graph file:
  {\"nodes\": {\"A\": [26.28, 50.20], ...},
   \"edges\": [{\"from\": \"A\", \"to\": \"B\", \"minutes\": 1.5},
             {\"from\": \"B\", \"to\": \"C\", \"highway\": \"primary\"}]}")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    /// Assumed top speed for the A* heuristic, km/h
    #[arg(long, global = true)]
    pub max_speed: Option<f64>,

    /// Show a spinner while searching
    #[arg(long, global = true)]
    pub progress: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Find a route with one algorithm
    Route {
        /// Graph file (JSON)
        graph: PathBuf,
        /// Start node id
        #[arg(long)]
        from: String,
        /// Target node id
        #[arg(long)]
        to: String,
        /// dijkstra, astar or bidirectional
        #[arg(short, long, default_value = "dijkstra")]
        algorithm: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
        /// Include the settle order
        #[arg(long)]
        trace: bool,
    },
    /// Run every algorithm on the same query and compare them
    Compare {
        /// Graph file (JSON)
        graph: PathBuf,
        /// Start node id
        #[arg(long)]
        from: String,
        /// Target node id
        #[arg(long)]
        to: String,
        /// Print the comparison as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the available algorithms
    Algorithms,
}
