//! Human-readable and JSON output for reports and comparisons

use anyhow::Result;
use routelab_routing::{
    google_maps_url, Algorithm, Comparison, Coordinates, Report, RouteAgreement, Visit,
};
use serde::Serialize;

/// A report plus its maps link
#[derive(Serialize)]
struct ReportJson<'a> {
    #[serde(flatten)]
    report: &'a Report<String>,
    maps_url: Option<String>,
}

#[derive(Serialize)]
struct Reduction {
    algorithm: Algorithm,
    percent: f64,
}

#[derive(Serialize)]
struct ComparisonJson<'a> {
    node_count: usize,
    edge_count: usize,
    runs: Vec<ReportJson<'a>>,
    fastest: Option<Algorithm>,
    fewest_explored: Option<Algorithm>,
    reductions_vs_dijkstra: Vec<Reduction>,
    route_agreement: RouteAgreement,
}

fn report_json<'a>(
    report: &'a Report<String>,
    coords: &Coordinates<String>,
    waypoint_limit: usize,
) -> ReportJson<'a> {
    ReportJson {
        report,
        maps_url: google_maps_url(report.path.as_deref(), coords, waypoint_limit),
    }
}

pub fn print_route_json(
    report: &Report<String>,
    coords: &Coordinates<String>,
    waypoint_limit: usize,
) -> Result<()> {
    let json = serde_json::to_string_pretty(&report_json(report, coords, waypoint_limit))?;
    println!("{json}");
    Ok(())
}

pub fn print_comparison_json(
    comparison: &Comparison<String>,
    coords: &Coordinates<String>,
    waypoint_limit: usize,
) -> Result<()> {
    let summary = ComparisonJson {
        node_count: comparison.node_count,
        edge_count: comparison.edge_count,
        runs: comparison
            .reports
            .iter()
            .map(|report| report_json(report, coords, waypoint_limit))
            .collect(),
        fastest: comparison.fastest().map(|r| r.algorithm),
        fewest_explored: comparison.fewest_explored().map(|r| r.algorithm),
        reductions_vs_dijkstra: comparison
            .reductions_vs(Algorithm::Dijkstra)
            .into_iter()
            .map(|(algorithm, percent)| Reduction { algorithm, percent })
            .collect(),
        route_agreement: comparison.route_agreement(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub fn print_route(
    report: &Report<String>,
    from: &str,
    to: &str,
    coords: &Coordinates<String>,
    waypoint_limit: usize,
) {
    println!("🧭 {}: {from} → {to}", report.info.name);

    match (&report.path, report.total_cost) {
        (Some(path), Some(cost)) => {
            println!("✓ Route found: {} nodes, {cost:.2} min", report.path_length);
            println!("  Path: {}", path.join(" → "));
        }
        _ => println!("✗ No route from {from} to {to}"),
    }
    println!("  Nodes explored: {}", report.nodes_explored);
    println!("  Search time: {:.3} ms", report.elapsed_ms);
    println!("  Edges relaxed: {}", report.stats.edges_relaxed);
    println!("  Memory estimate: {} bytes", report.memory_estimate_bytes);

    if !report.trace.is_empty() {
        println!("\nSettle order:");
        for (step, visit) in report.trace.iter().enumerate() {
            let side = match visit {
                Visit::Settled { .. } => "",
                Visit::Forward { .. } => " [forward]",
                Visit::Backward { .. } => " [backward]",
            };
            match visit.predecessor() {
                Some(previous) => println!("  {:>4}. {} (from {previous}){side}", step + 1, visit.node()),
                None => println!("  {:>4}. {}{side}", step + 1, visit.node()),
            }
        }
    }

    if let Some(url) = google_maps_url(report.path.as_deref(), coords, waypoint_limit) {
        println!("\n📍 Google Maps: {url}");
    }
}

pub fn print_comparison(
    comparison: &Comparison<String>,
    from: &str,
    to: &str,
    coords: &Coordinates<String>,
    waypoint_limit: usize,
) {
    println!("🧭 Comparing algorithms: {from} → {to}");
    println!(
        "Graph size: V = {} vertices, E = {} edges\n",
        comparison.node_count, comparison.edge_count
    );

    println!(
        "{:<24} {:>12} {:>10} {:>10} {:>12}",
        "Algorithm", "Time (ms)", "Explored", "Path", "Travel (min)"
    );
    for report in &comparison.reports {
        let travel = report
            .total_cost
            .map_or_else(|| "-".to_string(), |cost| format!("{cost:.2}"));
        println!(
            "{:<24} {:>12.3} {:>10} {:>10} {:>12}",
            report.info.name, report.elapsed_ms, report.nodes_explored, report.path_length, travel
        );
    }
    println!();

    if let Some(fastest) = comparison.fastest() {
        println!(
            "⚡ Fastest execution: {} ({:.3} ms)",
            fastest.info.name, fastest.elapsed_ms
        );
    }
    if let Some(fewest) = comparison.fewest_explored() {
        println!(
            "🎯 Fewest nodes explored: {} ({} nodes)",
            fewest.info.name, fewest.nodes_explored
        );
    }
    for (algorithm, percent) in comparison.reductions_vs(Algorithm::Dijkstra) {
        println!(
            "📊 {} explored {percent:.1}% fewer nodes than Dijkstra",
            algorithm.info().name
        );
    }
    println!();

    match comparison.route_agreement() {
        RouteAgreement::Identical => {
            println!("✓ All algorithms found the same route");
        }
        RouteAgreement::SameCostDifferentRoutes { distinct_routes } => {
            println!("⚠ Algorithms found {distinct_routes} different routes with the same travel time");
        }
        RouteAgreement::DifferentCosts => {
            println!("✗ Routes have different travel times; some are not optimal");
        }
        RouteAgreement::Insufficient => {
            println!("✗ Fewer than two algorithms found a route");
        }
    }

    let links: Vec<(&str, String)> = comparison
        .reports
        .iter()
        .filter_map(|r| {
            google_maps_url(r.path.as_deref(), coords, waypoint_limit).map(|url| (r.info.name, url))
        })
        .collect();
    if !links.is_empty() {
        println!("\n📍 Google Maps links:");
        for (name, url) in links {
            println!("  {name}: {url}");
        }
    }
}

pub fn print_algorithms() {
    println!("Available algorithms:\n");
    for algorithm in Algorithm::all() {
        let info = algorithm.info();
        println!("  {:<14} {}", algorithm.id(), info.name);
        println!("  {:<14} time {}, space {}", "", info.time_complexity, info.space_complexity);
        println!("  {:<14} {}", "", info.description);
        if algorithm.needs_coordinates() {
            println!("  {:<14} needs node coordinates", "");
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use routelab_routing::{run, Coordinate, RoadGraph};

    fn sample() -> (RoadGraph<String>, Coordinates<String>) {
        let graph = RoadGraph::from_edges([
            ("A".to_string(), "B".to_string(), 1.0),
            ("B".to_string(), "C".to_string(), 1.0),
        ]);
        let mut coords = Coordinates::new();
        coords.insert("A".to_string(), Coordinate::new(26.28, 50.2));
        coords.insert("C".to_string(), Coordinate::new(26.3, 50.22));
        (graph, coords)
    }

    #[test]
    fn test_report_json_has_maps_url_and_flat_fields() {
        let (graph, coords) = sample();
        let report = run(Algorithm::Dijkstra, &graph, &"A".to_string(), &"C".to_string(), None);
        let value = serde_json::to_value(report_json(&report, &coords, 10)).unwrap();
        assert_eq!(value["algorithm"], "dijkstra");
        assert_eq!(value["total_cost"], 2.0);
        assert!(value["maps_url"]
            .as_str()
            .is_some_and(|url| url.contains("destination=26.3,50.22")));
    }

    #[test]
    fn test_failed_report_has_null_maps_url() {
        let (graph, coords) = sample();
        let report = run(Algorithm::Dijkstra, &graph, &"C".to_string(), &"A".to_string(), None);
        let value = serde_json::to_value(report_json(&report, &coords, 10)).unwrap();
        assert!(value["path"].is_null());
        assert!(value["maps_url"].is_null());
        assert_eq!(value["path_length"], 0);
    }
}
