use serde::Serialize;

use crate::config::constants::FULL_COVERAGE_THRESHOLD_PCT;
use crate::models::allocation_result::AllocationResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoverageStatus {
    FullySatisfied,
    Partial,
}

/// Headline indicators for one allocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplyKpis {
    pub demand_m3_day: f64,
    pub coverage_pct: f64,
    pub wells_used: usize,
    pub trips: u64,
    pub cost: f64,
    pub fuel_gallons: f64,
    /// Delivered m³ per currency unit spent on fuel.
    pub efficiency_m3_per_cost: f64,
    pub residual_m3_day: f64,
}

pub fn coverage_pct(demand: f64, residual: f64) -> f64 {
    if demand > 0.0 {
        (1.0 - residual / demand) * 100.0
    } else {
        0.0
    }
}

pub fn efficiency(demand: f64, residual: f64, cost: f64) -> f64 {
    if cost > 0.0 {
        (demand - residual) / cost
    } else {
        0.0
    }
}

impl SupplyKpis {
    pub fn from_result(demand: f64, result: &AllocationResult) -> Self {
        Self {
            demand_m3_day: demand,
            coverage_pct: coverage_pct(demand, result.residual_m3_day),
            wells_used: result.wells_used(),
            trips: result.total_trips,
            cost: result.total_cost,
            fuel_gallons: result.total_fuel_gallons,
            efficiency_m3_per_cost: efficiency(demand, result.residual_m3_day, result.total_cost),
            residual_m3_day: result.residual_m3_day,
        }
    }

    pub fn status(&self) -> CoverageStatus {
        if self.residual_m3_day <= 0.0 || self.coverage_pct >= FULL_COVERAGE_THRESHOLD_PCT {
            CoverageStatus::FullySatisfied
        } else {
            CoverageStatus::Partial
        }
    }
}
