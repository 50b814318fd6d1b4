//! Error types and utilities for the routelab toolkit
//!
//! Library crates return [`Error`]; the CLI wraps it with `anyhow` context.

use strsim::{jaro_winkler, normalized_levenshtein};
use thiserror::Error;

/// Find the best fuzzy match using character-based scoring with a prefix bonus
///
/// Combines Jaro-Winkler (70%) with normalized Levenshtein (30%), then adds up to
/// 20% when the first few characters line up. Candidates scoring below 0.65 are
/// never suggested.
fn find_best_fuzzy_match(input: &str, candidates: &[&str]) -> Option<String> {
    let input_lower = input.to_lowercase();
    let min_threshold = 0.65;

    let mut best_match = None;
    let mut best_score = 0.0f64;

    for candidate in candidates {
        let candidate_lower = candidate.to_lowercase();

        let jw_score = jaro_winkler(&input_lower, &candidate_lower);
        let lev_score = normalized_levenshtein(&input_lower, &candidate_lower);
        let mut score = (jw_score * 0.7) + (lev_score * 0.3);

        // Abbreviations ("bidir", "dijk") share a long prefix with the full name.
        let prefix_len = input_lower.chars().count().min(7);
        if prefix_len >= 4 {
            let input_prefix: String = input_lower.chars().take(prefix_len).collect();
            let candidate_prefix: String = candidate_lower.chars().take(prefix_len).collect();
            let prefix_similarity = normalized_levenshtein(&input_prefix, &candidate_prefix);
            if prefix_similarity > 0.7 {
                score += 0.2 * prefix_similarity;
            }
        }

        if score > best_score && score >= min_threshold {
            best_score = score;
            best_match = Some((*candidate).to_string());
        }
    }

    best_match
}

/// Suggest a correction for a misspelled identifier
///
/// Returns `None` when `input` already names a candidate (case-insensitive) or
/// when nothing is close enough to be a plausible typo.
pub fn suggest_correction(input: &str, candidates: &[&str]) -> Option<String> {
    if candidates.iter().any(|c| c.eq_ignore_ascii_case(input)) {
        return None;
    }
    find_best_fuzzy_match(input, candidates)
}

/// Main error type for routelab operations
#[derive(Debug, Error)]
pub enum Error {
    /// Algorithm selector not recognized
    #[error("unknown algorithm '{name}'{}", suggestion_hint(.suggestion))]
    UnknownAlgorithm {
        name: String,
        suggestion: Option<String>,
    },

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Graph input could not be turned into a routing graph
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// File I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed TOML configuration
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed JSON input
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(s) => format!(", did you mean '{s}'?"),
        None => String::new(),
    }
}

/// Result type alias for routelab operations
pub type Result<T> = std::result::Result<T, Error>;
