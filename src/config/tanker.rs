use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::analysis_config::ConfigError;
use crate::config::constants::{LARGE_TANKER_CAPACITY_M3, SMALL_TANKER_CAPACITY_M3};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TankerClass {
    #[serde(rename = "19")]
    Small19,
    #[serde(rename = "34")]
    Large34,
}

impl TankerClass {
    pub const ALL: [TankerClass; 2] = [TankerClass::Small19, TankerClass::Large34];

    pub fn capacity_m3(&self) -> f64 {
        match self {
            TankerClass::Small19 => SMALL_TANKER_CAPACITY_M3,
            TankerClass::Large34 => LARGE_TANKER_CAPACITY_M3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TankerClass::Small19 => "19 m³",
            TankerClass::Large34 => "34 m³",
        }
    }

    pub fn profile(&self) -> TankerProfile {
        TankerProfile {
            label: self.label().to_string(),
            capacity_m3: self.capacity_m3(),
        }
    }
}

impl Default for TankerClass {
    fn default() -> Self {
        TankerClass::Small19
    }
}

impl fmt::Display for TankerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TankerClass {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
        match digits.as_str() {
            "19" => Ok(TankerClass::Small19),
            "34" => Ok(TankerClass::Large34),
            _ => Err(ConfigError::UnknownTanker(s.to_string())),
        }
    }
}

/// Capacity used for trip counting. Always strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TankerProfile {
    label: String,
    capacity_m3: f64,
}

impl TankerProfile {
    pub fn custom(label: impl Into<String>, capacity_m3: f64) -> Result<Self, ConfigError> {
        if !capacity_m3.is_finite() || capacity_m3 <= 0.0 {
            return Err(ConfigError::InvalidTankerCapacity(capacity_m3));
        }
        Ok(Self {
            label: label.into(),
            capacity_m3,
        })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn capacity_m3(&self) -> f64 {
        self.capacity_m3
    }
}

impl From<TankerClass> for TankerProfile {
    fn from(class: TankerClass) -> Self {
        class.profile()
    }
}
