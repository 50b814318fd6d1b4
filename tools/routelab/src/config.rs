//! Optional TOML configuration
//!
//! ```toml
//! [heuristic]
//! max_speed_kmh = 85.0
//!
//! [report]
//! waypoint_limit = 10
//! progress_interval = 1000
//! include_trace = false
//! ```
//!
//! Every key is optional. Command-line flags win over file values.

use std::fs;
use std::path::Path;

use routelab_common::{Error, Result};
use routelab_routing::maps::DEFAULT_WAYPOINT_LIMIT;
use routelab_routing::report::DEFAULT_PROGRESS_INTERVAL;
use routelab_routing::RoadClass;
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub heuristic: HeuristicConfig,
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeuristicConfig {
    pub max_speed_kmh: f64,
}

impl Default for HeuristicConfig {
    fn default() -> Self {
        Self {
            max_speed_kmh: RoadClass::fastest_speed_kmh(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Intermediate points in the maps link
    pub waypoint_limit: usize,
    /// Settled nodes between spinner updates
    pub progress_interval: usize,
    pub include_trace: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            waypoint_limit: DEFAULT_WAYPOINT_LIMIT,
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            include_trace: false,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// File config if a path is given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn with_max_speed(mut self, max_speed_kmh: Option<f64>) -> Result<Self> {
        if let Some(speed) = max_speed_kmh {
            self.heuristic.max_speed_kmh = speed;
            self.validate()?;
        }
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        let speed = self.heuristic.max_speed_kmh;
        if !(speed.is_finite() && speed > 0.0) {
            return Err(Error::Config(format!(
                "max_speed_kmh must be a positive number, got {speed}"
            )));
        }
        if self.report.progress_interval == 0 {
            return Err(Error::Config("progress_interval must be at least 1".to_string()));
        }
        Ok(())
    }
}
