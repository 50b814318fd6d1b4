use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const ABC_GRAPH: &str = r#"{
  "nodes": {
    "A": [26.280, 50.200],
    "B": [26.281, 50.201],
    "C": [26.282, 50.202],
    "Z": [26.400, 50.400]
  },
  "edges": [
    {"from": "A", "to": "B", "minutes": 1.0},
    {"from": "A", "to": "C", "minutes": 4.0},
    {"from": "B", "to": "C", "minutes": 1.0}
  ]
}"#;

fn write_graph(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("graph.json");
    fs::write(&path, content).unwrap();
    path
}

fn routelab() -> Command {
    Command::cargo_bin("routelab").unwrap()
}

#[test]
fn test_help_lists_subcommands() {
    routelab()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("route"))
        .stdout(predicate::str::contains("compare"))
        .stdout(predicate::str::contains("algorithms"));
}

#[test]
fn test_algorithms_lists_all_three() {
    routelab()
        .arg("algorithms")
        .assert()
        .success()
        .stdout(predicate::str::contains("dijkstra"))
        .stdout(predicate::str::contains("A* (A-Star)"))
        .stdout(predicate::str::contains("Bidirectional Dijkstra"));
}

#[test]
fn test_route_prints_path() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir, ABC_GRAPH);
    routelab()
        .arg("route")
        .arg(&graph)
        .args(["--from", "A", "--to", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A → B → C"))
        .stdout(predicate::str::contains("2.00 min"))
        .stdout(predicate::str::contains("google.com/maps/dir"));
}

#[test]
fn test_route_json_for_each_algorithm() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir, ABC_GRAPH);
    for algorithm in ["dijkstra", "astar", "bidirectional"] {
        let output = routelab()
            .arg("route")
            .arg(&graph)
            .args(["--from", "A", "--to", "C", "--json", "--algorithm", algorithm])
            .output()
            .unwrap();
        assert!(output.status.success(), "{algorithm}");
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["algorithm"], algorithm);
        assert_eq!(value["path"], serde_json::json!(["A", "B", "C"]));
        assert_eq!(value["total_cost"], 2.0);
        assert_eq!(value["trace"], serde_json::json!([]));
    }
}

#[test]
fn test_route_trace_flag_keeps_settle_order() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir, ABC_GRAPH);
    let output = routelab()
        .arg("route")
        .arg(&graph)
        .args(["--from", "A", "--to", "C", "--json", "--trace"])
        .output()
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let nodes: Vec<&str> = value["trace"]
        .as_array()
        .unwrap()
        .iter()
        .map(|visit| visit["node"].as_str().unwrap())
        .collect();
    assert_eq!(nodes, vec!["A", "B", "C"]);
}

#[test]
fn test_unreachable_route_is_not_an_error() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir, ABC_GRAPH);
    routelab()
        .arg("route")
        .arg(&graph)
        .args(["--from", "A", "--to", "Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No route from A to Z"));
}

#[test]
fn test_unknown_algorithm_suggests_correction() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir, ABC_GRAPH);
    routelab()
        .arg("route")
        .arg(&graph)
        .args(["--from", "A", "--to", "C", "--algorithm", "dijsktra"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("did you mean 'dijkstra'?"));
}

#[test]
fn test_compare_summarizes_runs() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir, ABC_GRAPH);
    routelab()
        .arg("compare")
        .arg(&graph)
        .args(["--from", "A", "--to", "C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Graph size: V = 4 vertices, E = 3 edges"))
        .stdout(predicate::str::contains("Fastest execution"))
        .stdout(predicate::str::contains("All algorithms found the same route"));
}

#[test]
fn test_compare_json() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir, ABC_GRAPH);
    let output = routelab()
        .arg("compare")
        .arg(&graph)
        .args(["--from", "A", "--to", "C", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["runs"].as_array().map(Vec::len), Some(3));
    assert_eq!(value["route_agreement"]["kind"], "identical");
    assert_eq!(value["node_count"], 4);
}

#[test]
fn test_missing_graph_file_fails() {
    routelab()
        .args(["route", "/nonexistent/graph.json", "--from", "A", "--to", "B"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Failed to load graph"));
}

#[test]
fn test_invalid_graph_fails() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir, r#"{"edges": [{"from": "A", "to": "B"}]}"#);
    routelab()
        .arg("compare")
        .arg(&graph)
        .args(["--from", "A", "--to", "B"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("neither minutes nor highway"));
}

#[test]
fn test_config_file_is_validated() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir, ABC_GRAPH);
    let config = dir.path().join("routelab.toml");
    fs::write(&config, "[heuristic]\nmax_speed_kmh = -1.0\n").unwrap();
    routelab()
        .arg("--config")
        .arg(&config)
        .arg("route")
        .arg(&graph)
        .args(["--from", "A", "--to", "C"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("max_speed_kmh must be a positive number"));
}

#[test]
fn test_max_speed_flag_must_be_positive() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(&dir, ABC_GRAPH);
    routelab()
        .arg("route")
        .arg(&graph)
        .args(["--from", "A", "--to", "C", "--algorithm", "astar", "--max-speed", "0"])
        .assert()
        .failure()
        .code(1);
}

#[test]
fn test_skipped_class_edges_are_reported() {
    let dir = TempDir::new().unwrap();
    let graph = write_graph(
        &dir,
        r#"{
  "nodes": {"A": [26.280, 50.200], "B": [26.281, 50.201]},
  "edges": [
    {"from": "A", "to": "B", "highway": "primary"},
    {"from": "B", "to": "X", "highway": "residential"}
  ]
}"#,
    );
    routelab()
        .arg("route")
        .arg(&graph)
        .args(["--from", "A", "--to", "B"])
        .assert()
        .success()
        .stdout(predicate::str::contains("A → B"))
        .stderr(predicate::str::contains("Skipped 1 road-class edge(s)"));
}
