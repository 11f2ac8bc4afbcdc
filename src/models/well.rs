use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

use crate::config::constants::UNKNOWN_WELL_ID;
use crate::config::scenario::ScenarioPercent;
use crate::geo::point::GeoPoint;

/// Raw well row as it appears in an input catalog.
///
/// `id` and `yield_m3_day` are optional: a missing id becomes `"NA"` and a
/// missing or non-numeric yield becomes 0 (which excludes the well).
#[derive(Debug, Clone, Deserialize)]
pub struct WellRecord {
    #[serde(default, alias = "ID", deserialize_with = "blank_as_none")]
    pub id: Option<String>,
    pub lon: f64,
    pub lat: f64,
    #[serde(default, alias = "Q_m3_dia", deserialize_with = "lenient_f64")]
    pub yield_m3_day: Option<f64>,
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrText {
        Num(f64),
        Text(String),
    }

    let raw: Option<NumOrText> = Option::deserialize(deserializer)?;
    Ok(match raw {
        Some(NumOrText::Num(n)) => Some(n),
        Some(NumOrText::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WellData {
    id: String,
    position: GeoPoint,
    nominal_yield_m3_day: f64,
}

/// Industrial well with a nominal daily yield. Read-only once loaded.
#[derive(Debug, Clone)]
pub struct Well {
    data: Arc<WellData>,
}

impl Well {
    pub fn new(id: impl Into<String>, position: GeoPoint, nominal_yield_m3_day: f64) -> Self {
        let nominal = if nominal_yield_m3_day.is_finite() {
            nominal_yield_m3_day
        } else {
            0.0
        };
        Well {
            data: Arc::new(WellData {
                id: id.into(),
                position,
                nominal_yield_m3_day: nominal,
            }),
        }
    }

    pub fn get_id(&self) -> &str {
        &self.data.id
    }

    pub fn get_position(&self) -> &GeoPoint {
        &self.data.position
    }

    pub fn get_nominal_yield(&self) -> f64 {
        self.data.nominal_yield_m3_day
    }

    /// Wells with non-positive yield never take part in an allocation.
    pub fn is_candidate(&self) -> bool {
        self.data.nominal_yield_m3_day > 0.0
    }

    pub fn available_yield(&self, scenario: ScenarioPercent) -> f64 {
        self.data.nominal_yield_m3_day * scenario.fraction()
    }
}

impl From<WellRecord> for Well {
    fn from(record: WellRecord) -> Self {
        Well::new(
            record.id.unwrap_or_else(|| UNKNOWN_WELL_ID.to_string()),
            GeoPoint::new(record.lon, record.lat),
            record.yield_m3_day.unwrap_or(0.0),
        )
    }
}
