use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::constants::{DEFAULT_CRITICAL_DISTRICTS, DEFAULT_TOP_N};
use crate::config::scenario::{CostParams, ScenarioPercent};
use crate::config::tanker::TankerClass;
use crate::core::allocation::AllocationSettings;
use crate::geo::point::DistanceMethod;

#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    JsonError(serde_json::Error),
    InvalidScenario(f64),
    InvalidTankerCapacity(f64),
    UnknownTanker(String),
    InvalidCostParam(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::JsonError(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::JsonError(e) => write!(f, "JSON error: {}", e),
            ConfigError::InvalidScenario(p) => write!(f, "Scenario percentage must be in (0, 100], got {}", p),
            ConfigError::InvalidTankerCapacity(c) => write!(f, "Tanker capacity must be positive, got {}", c),
            ConfigError::UnknownTanker(s) => write!(f, "Unknown tanker class: {} (expected 19 or 34)", s),
            ConfigError::InvalidCostParam(s) => write!(f, "Invalid cost parameter: {}", s),
        }
    }
}

impl std::error::Error for ConfigError {}

/// File-level configuration for an analysis run. Every field is optional in
/// JSON and falls back to the reference defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub scenario_pct: ScenarioPercent,
    pub tanker: TankerClass,
    pub cost: CostParams,
    pub distance: DistanceMethod,
    pub critical_districts: Vec<String>,
    pub top_n: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            scenario_pct: ScenarioPercent::default(),
            tanker: TankerClass::default(),
            cost: CostParams::default(),
            distance: DistanceMethod::default(),
            critical_districts: DEFAULT_CRITICAL_DISTRICTS.iter().map(|s| s.to_string()).collect(),
            top_n: DEFAULT_TOP_N,
        }
    }
}

impl AnalysisConfig {
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config: AnalysisConfig = serde_json::from_reader(reader)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the cost constants. Scenario and tanker are valid by type.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let checks = [
            ("fuel_rate_gal_per_hr", self.cost.fuel_rate_gal_per_hr),
            ("fuel_price_per_gal", self.cost.fuel_price_per_gal),
            ("speed_kmh", self.cost.speed_kmh),
        ];
        for (name, value) in checks {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidCostParam(format!("{} = {}", name, value)));
            }
        }
        Ok(())
    }

    pub fn settings(&self) -> AllocationSettings {
        AllocationSettings::new(self.scenario_pct, self.tanker)
            .with_cost(self.cost)
            .with_distance(self.distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: AnalysisConfig = serde_json::from_str(r#"{"scenario_pct": 30, "tanker": "34"}"#).unwrap();
        assert_eq!(config.scenario_pct.value(), 30.0);
        assert_eq!(config.tanker, TankerClass::Large34);
        assert_eq!(config.cost, CostParams::default());
        assert_eq!(config.distance, DistanceMethod::Planar);
        assert_eq!(config.critical_districts.len(), 5);
        assert_eq!(config.top_n, 5);
    }

    #[test]
    fn test_partial_cost_block() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"cost": {"fuel_price_per_gal": 18.5}, "distance": "haversine"}"#).unwrap();
        assert_eq!(config.cost.fuel_price_per_gal, 18.5);
        assert_eq!(config.cost.speed_kmh, 30.0);
        assert_eq!(config.distance, DistanceMethod::Haversine);
    }

    #[test]
    fn test_out_of_range_scenario_is_rejected() {
        assert!(serde_json::from_str::<AnalysisConfig>(r#"{"scenario_pct": 0}"#).is_err());
        assert!(serde_json::from_str::<AnalysisConfig>(r#"{"scenario_pct": 250}"#).is_err());
    }

    #[test]
    fn test_negative_cost_fails_validation() {
        let mut config = AnalysisConfig::default();
        config.cost.speed_kmh = -1.0;
        assert!(config.validate().is_err());
    }
}
