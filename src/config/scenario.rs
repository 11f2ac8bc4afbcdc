use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::analysis_config::ConfigError;
use crate::config::constants::{
    DEFAULT_FUEL_PRICE_PER_GAL, DEFAULT_FUEL_RATE_GAL_PER_HR, DEFAULT_SCENARIO_PCT,
    DEFAULT_SPEED_KMH, MAX_SCENARIO_PCT, SCENARIO_PRESETS,
};

/// Share of each well's nominal yield usable during a scarcity scenario.
///
/// Always within (0, 100]. Out-of-range input is rejected at construction
/// rather than clamped, so the allocation engine never sees a negative or
/// over-100% available yield.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ScenarioPercent(f64);

impl ScenarioPercent {
    pub fn new(pct: f64) -> Result<Self, ConfigError> {
        if !pct.is_finite() || pct <= 0.0 || pct > MAX_SCENARIO_PCT {
            return Err(ConfigError::InvalidScenario(pct));
        }
        Ok(Self(pct))
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn fraction(&self) -> f64 {
        self.0 / 100.0
    }

    /// The 10/20/30 presets offered for comparative analysis.
    pub const PRESETS: [ScenarioPercent; 3] = [
        ScenarioPercent(SCENARIO_PRESETS[0]),
        ScenarioPercent(SCENARIO_PRESETS[1]),
        ScenarioPercent(SCENARIO_PRESETS[2]),
    ];
}

impl Default for ScenarioPercent {
    fn default() -> Self {
        ScenarioPercent(DEFAULT_SCENARIO_PCT)
    }
}

impl TryFrom<f64> for ScenarioPercent {
    type Error = ConfigError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        ScenarioPercent::new(value)
    }
}

impl From<ScenarioPercent> for f64 {
    fn from(pct: ScenarioPercent) -> Self {
        pct.0
    }
}

impl fmt::Display for ScenarioPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// Fixed operational constants for tanker runs, passed explicitly per call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CostParams {
    pub fuel_rate_gal_per_hr: f64,
    pub fuel_price_per_gal: f64,
    pub speed_kmh: f64,
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            fuel_rate_gal_per_hr: DEFAULT_FUEL_RATE_GAL_PER_HR,
            fuel_price_per_gal: DEFAULT_FUEL_PRICE_PER_GAL,
            speed_kmh: DEFAULT_SPEED_KMH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_accepts_presets_and_full_range() {
        for pct in [10.0, 20.0, 30.0, 0.5, 100.0] {
            assert_eq!(ScenarioPercent::new(pct).unwrap().value(), pct);
        }
        assert_eq!(ScenarioPercent::PRESETS.len(), 3);
        assert_eq!(ScenarioPercent::PRESETS[2].value(), 30.0);
    }

    #[test]
    fn test_scenario_rejects_out_of_range() {
        for pct in [0.0, -10.0, 100.5, f64::NAN, f64::INFINITY] {
            assert!(ScenarioPercent::new(pct).is_err(), "{} should be rejected", pct);
        }
    }

    #[test]
    fn test_cost_params_defaults() {
        let params = CostParams::default();
        assert_eq!(params.fuel_rate_gal_per_hr, 6.0);
        assert_eq!(params.fuel_price_per_gal, 20.0);
        assert_eq!(params.speed_kmh, 30.0);
    }

    #[test]
    fn test_scenario_deserialize_validates() {
        let ok: ScenarioPercent = serde_json::from_str("20").unwrap();
        assert_eq!(ok.fraction(), 0.2);
        assert!(serde_json::from_str::<ScenarioPercent>("150").is_err());
    }
}
