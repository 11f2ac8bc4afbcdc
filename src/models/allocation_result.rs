use serde::Serialize;

use crate::geo::point::GeoPoint;

/// One well's contribution to a demand site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationRecord {
    pub well_id: String,
    pub assigned_m3_day: f64,
    pub trips: u64,
    pub cost: f64,
    pub fuel_gallons: f64,
    pub distance_km: f64,
    pub position: GeoPoint,
}

/// Records ordered by ascending distance, plus totals and the unmet residual.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct AllocationResult {
    pub records: Vec<AllocationRecord>,
    pub total_trips: u64,
    pub total_cost: f64,
    pub total_fuel_gallons: f64,
    pub residual_m3_day: f64,
}

impl AllocationResult {
    pub fn assigned_total(&self) -> f64 {
        self.records.iter().map(|r| r.assigned_m3_day).sum()
    }

    pub fn wells_used(&self) -> usize {
        self.records.len()
    }

    /// Zero or negative residual means the demand was fully covered.
    pub fn is_fully_covered(&self) -> bool {
        self.residual_m3_day <= 0.0
    }
}
