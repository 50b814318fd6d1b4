//! Algorithm selector and the static facts shown next to each run

use std::fmt;
use std::str::FromStr;

use routelab_common::{suggest_correction, Error};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Algorithm {
    #[serde(rename = "dijkstra")]
    Dijkstra,
    #[serde(rename = "astar")]
    AStar,
    #[serde(rename = "bidirectional")]
    Bidirectional,
}

/// Name, asserted complexity classes and a one-line description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub time_complexity: &'static str,
    pub space_complexity: &'static str,
    pub description: &'static str,
}

impl Algorithm {
    pub fn all() -> &'static [Algorithm] {
        &[Algorithm::Dijkstra, Algorithm::AStar, Algorithm::Bidirectional]
    }

    /// Selector string accepted by [`FromStr`]
    pub fn id(&self) -> &'static str {
        match self {
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::Bidirectional => "bidirectional",
        }
    }

    pub fn needs_coordinates(&self) -> bool {
        matches!(self, Algorithm::AStar)
    }

    pub fn info(&self) -> AlgorithmInfo {
        match self {
            Algorithm::Dijkstra => AlgorithmInfo {
                name: "Dijkstra",
                time_complexity: "O((V + E) log V)",
                space_complexity: "O(V)",
                description: "Classic shortest path. Explores all directions equally until the target is settled.",
            },
            Algorithm::AStar => AlgorithmInfo {
                name: "A* (A-Star)",
                // Same worst case; the heuristic usually cuts the explored set
                time_complexity: "O((V + E) log V)*",
                space_complexity: "O(V)",
                description: "Heuristic-guided search. Uses straight-line travel time to prioritize promising paths.",
            },
            Algorithm::Bidirectional => AlgorithmInfo {
                name: "Bidirectional Dijkstra",
                time_complexity: "O((V + E) log V)",
                space_complexity: "O(V + E)",
                description: "Searches from both ends at once over the graph and its reverse, meeting in the middle.",
            },
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "dijkstra" | "ucs" | "uniformcost" => Ok(Algorithm::Dijkstra),
            "astar" | "a*" => Ok(Algorithm::AStar),
            "bidirectional" | "bidirectionaldijkstra" | "bidir" => Ok(Algorithm::Bidirectional),
            _ => {
                let ids: Vec<&str> = Algorithm::all().iter().map(Algorithm::id).collect();
                Err(Error::UnknownAlgorithm {
                    name: s.to_string(),
                    suggestion: suggest_correction(s, &ids),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ids_and_aliases() {
        assert_eq!("dijkstra".parse::<Algorithm>().unwrap(), Algorithm::Dijkstra);
        assert_eq!("A*".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!("a-star".parse::<Algorithm>().unwrap(), Algorithm::AStar);
        assert_eq!(
            "Bidirectional_Dijkstra".parse::<Algorithm>().unwrap(),
            Algorithm::Bidirectional
        );
    }

    #[test]
    fn test_parse_roundtrips_display() {
        for algorithm in Algorithm::all() {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), *algorithm);
        }
    }

    #[test]
    fn test_unknown_algorithm_suggests() {
        match "dijsktra".parse::<Algorithm>() {
            Err(Error::UnknownAlgorithm { name, suggestion }) => {
                assert_eq!(name, "dijsktra");
                assert_eq!(suggestion.as_deref(), Some("dijkstra"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_only_astar_needs_coordinates() {
        let needing: Vec<_> = Algorithm::all()
            .iter()
            .filter(|a| a.needs_coordinates())
            .collect();
        assert_eq!(needing, vec![&Algorithm::AStar]);
    }

    #[test]
    fn test_serde_names_match_ids() {
        for algorithm in Algorithm::all() {
            let json = serde_json::to_string(algorithm).unwrap();
            assert_eq!(json, format!("\"{}\"", algorithm.id()));
        }
    }
}
