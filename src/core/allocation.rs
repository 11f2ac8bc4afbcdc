use tracing::{debug, info, trace};

use crate::config::scenario::{CostParams, ScenarioPercent};
use crate::config::tanker::{TankerClass, TankerProfile};
use crate::core::cost_model::compute_cost;
use crate::geo::point::{distance_km, DistanceMethod, GeoPoint};
use crate::models::allocation_result::{AllocationRecord, AllocationResult};
use crate::models::demand_site::DemandSite;
use crate::models::well::Well;
use crate::utils::logging::{self, AllocationStage, OperationCategory};

/// Everything about a run that is not the demand itself.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationSettings {
    pub scenario: ScenarioPercent,
    pub tanker: TankerProfile,
    pub cost: CostParams,
    pub distance: DistanceMethod,
}

impl AllocationSettings {
    pub fn new(scenario: ScenarioPercent, tanker: impl Into<TankerProfile>) -> Self {
        Self {
            scenario,
            tanker: tanker.into(),
            cost: CostParams::default(),
            distance: DistanceMethod::default(),
        }
    }

    pub fn with_cost(mut self, cost: CostParams) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_distance(mut self, distance: DistanceMethod) -> Self {
        self.distance = distance;
        self
    }
}

impl Default for AllocationSettings {
    fn default() -> Self {
        AllocationSettings::new(ScenarioPercent::default(), TankerClass::default())
    }
}

struct Candidate<'a> {
    well: &'a Well,
    distance_km: f64,
    available: f64,
}

fn build_candidates<'a>(anchor: &GeoPoint, wells: &'a [Well], settings: &AllocationSettings) -> Vec<Candidate<'a>> {
    let _timing = logging::start_timing("build_candidates",
        OperationCategory::Allocation { stage: AllocationStage::Candidates });

    let mut candidates: Vec<Candidate<'a>> = wells
        .iter()
        .filter(|well| well.is_candidate())
        .map(|well| Candidate {
            well,
            distance_km: distance_km(well.get_position(), anchor, settings.distance),
            available: well.available_yield(settings.scenario),
        })
        .collect();

    // Stable: equal distances keep catalog order
    candidates.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    candidates
}

/// Greedy nearest-first assignment of capped well output to one demand point.
///
/// Wells are visited in ascending distance; each gives
/// `min(available, remaining)` until the remaining demand reaches zero. The
/// walk never backtracks, so the plan is feasible but not cost-optimal.
/// A non-finite demand is treated as zero.
pub fn allocate(anchor: &GeoPoint, demand_m3_day: f64, wells: &[Well], settings: &AllocationSettings) -> AllocationResult {
    let _timing = logging::start_timing("allocate",
        OperationCategory::Allocation { stage: AllocationStage::Assignment });

    let demand = if demand_m3_day.is_finite() { demand_m3_day } else { 0.0 };
    let candidates = build_candidates(anchor, wells, settings);
    trace!(candidates = candidates.len(), demand, "ranked candidate wells");

    let mut result = AllocationResult {
        residual_m3_day: demand,
        ..AllocationResult::default()
    };
    let capacity = settings.tanker.capacity_m3();

    for candidate in candidates {
        if result.residual_m3_day <= 0.0 {
            break;
        }

        let assigned = candidate.available.min(result.residual_m3_day);
        let trip_cost = compute_cost(assigned, candidate.distance_km, capacity, &settings.cost);

        debug!(
            well = candidate.well.get_id(),
            assigned,
            distance_km = candidate.distance_km,
            trips = trip_cost.trips,
            "assigned well output"
        );

        result.records.push(AllocationRecord {
            well_id: candidate.well.get_id().to_string(),
            assigned_m3_day: assigned,
            trips: trip_cost.trips,
            cost: trip_cost.cost,
            fuel_gallons: trip_cost.fuel_gallons,
            distance_km: candidate.distance_km,
            position: *candidate.well.get_position(),
        });

        result.residual_m3_day -= assigned;
        result.total_trips += trip_cost.trips;
        result.total_cost += trip_cost.cost;
        result.total_fuel_gallons += trip_cost.fuel_gallons;
    }

    info!(
        wells_used = result.records.len(),
        residual = result.residual_m3_day,
        total_cost = result.total_cost,
        "allocation finished"
    );

    result
}

/// Convenience wrapper allocating a site's demand at its anchor.
pub fn allocate_site(site: &DemandSite, wells: &[Well], settings: &AllocationSettings) -> AllocationResult {
    allocate(site.get_anchor(), site.get_demand(), wells, settings)
}
