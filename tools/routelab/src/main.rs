//! # routelab CLI
//!
//! Loads a JSON road graph and runs, or compares, the shortest-path
//! algorithms from `routelab-routing` on it.

use anyhow::{Context, Result};
use clap::Parser;
use routelab_routing::{compare_with, run_with, Algorithm, Heuristic, RunOptions};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod input;
mod output;
mod progress;

use cli::{Cli, Commands};
use config::Config;
use input::LoadedGraph;
use progress::SearchSpinner;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    if let Err(e) = run(cli) {
        eprintln!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

/// Logs go to stderr so stdout stays clean for reports and JSON
fn init_tracing(verbose: bool, json: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())
        .context("Failed to load configuration")?
        .with_max_speed(cli.max_speed)?;
    debug!(?config, "configuration resolved");

    match cli.command {
        Commands::Algorithms => output::print_algorithms(),
        Commands::Route {
            graph,
            from,
            to,
            algorithm,
            json,
            trace,
        } => {
            let algorithm: Algorithm = algorithm.parse()?;
            let loaded = load(&graph)?;
            check_endpoints(&loaded, &from, &to);
            if algorithm.needs_coordinates() && loaded.coords.is_empty() {
                warn!("graph has no coordinates; {algorithm} cannot estimate distances");
            }

            let mut spinner = cli
                .progress
                .then(|| SearchSpinner::new(&format!("{algorithm}: searching")));
            let mut options = run_options(&config);
            if let Some(spinner) = spinner.as_mut() {
                options = options.with_observer(spinner, config.report.progress_interval);
            }
            let mut report = run_with(
                algorithm,
                &loaded.graph,
                &from,
                &to,
                Some(&loaded.coords),
                &mut options,
            );
            if let Some(spinner) = &spinner {
                spinner.finish();
            }

            if !(trace || config.report.include_trace) {
                report.trace.clear();
            }
            let limit = config.report.waypoint_limit;
            if json {
                output::print_route_json(&report, &loaded.coords, limit)?;
            } else {
                output::print_route(&report, &from, &to, &loaded.coords, limit);
            }
        }
        Commands::Compare {
            graph,
            from,
            to,
            json,
        } => {
            let loaded = load(&graph)?;
            check_endpoints(&loaded, &from, &to);

            let mut spinner = cli.progress.then(|| SearchSpinner::new("comparing algorithms"));
            let mut options = run_options(&config);
            if let Some(spinner) = spinner.as_mut() {
                options = options.with_observer(spinner, config.report.progress_interval);
            }
            let mut comparison = compare_with(
                &loaded.graph,
                &from,
                &to,
                Some(&loaded.coords),
                &mut options,
            );
            if let Some(spinner) = &spinner {
                spinner.finish();
            }

            if !config.report.include_trace {
                for report in &mut comparison.reports {
                    report.trace.clear();
                }
            }
            let limit = config.report.waypoint_limit;
            if json {
                output::print_comparison_json(&comparison, &loaded.coords, limit)?;
            } else {
                output::print_comparison(&comparison, &from, &to, &loaded.coords, limit);
            }
        }
    }

    Ok(())
}

fn run_options<'a>(config: &Config) -> RunOptions<'a> {
    let mut options = RunOptions::default()
        .with_heuristic(Heuristic::with_max_speed(config.heuristic.max_speed_kmh));
    options.progress_interval = config.report.progress_interval;
    options
}

fn load(path: &std::path::Path) -> Result<LoadedGraph> {
    let loaded = input::load_graph(path)
        .with_context(|| format!("Failed to load graph from {}", path.display()))?;
    if loaded.skipped_edges > 0 {
        eprintln!(
            "⚠ Skipped {} road-class edge(s) with an endpoint that has no coordinate",
            loaded.skipped_edges
        );
    }
    Ok(loaded)
}

/// Unknown endpoints are not errors: the search reports no route
fn check_endpoints(loaded: &LoadedGraph, from: &str, to: &str) {
    for (role, id) in [("start", from), ("target", to)] {
        if !loaded.graph.contains_node(&id.to_string()) {
            warn!(%id, "{role} node is not in the graph");
        }
    }
}
