use rayon::prelude::*;
use serde::Serialize;

use crate::analysis::kpis::efficiency;
use crate::config::scenario::{CostParams, ScenarioPercent};
use crate::config::tanker::TankerClass;
use crate::core::allocation::{allocate_site, AllocationSettings};
use crate::geo::point::DistanceMethod;
use crate::models::demand_site::DemandSite;
use crate::models::well::Well;
use crate::utils::logging::{self, AnalysisType, OperationCategory};

/// Outcome of one (tanker, scenario) combination for a site.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub tanker: TankerClass,
    pub scenario_pct: f64,
    pub residual_m3_day: f64,
    pub cost: f64,
    pub trips: u64,
    pub efficiency_m3_per_cost: f64,
}

/// Runs every tanker/scenario pair for one site.
///
/// Rows come back tanker-major, scenario-minor, in the order given,
/// regardless of how rayon schedules the work.
pub fn compare_scenarios(
    site: &DemandSite,
    wells: &[Well],
    scenarios: &[ScenarioPercent],
    tankers: &[TankerClass],
    cost: &CostParams,
    distance: DistanceMethod,
) -> Vec<ComparisonRow> {
    let _timing = logging::start_timing("compare_scenarios",
        OperationCategory::Analysis { subcategory: AnalysisType::ScenarioComparison });

    let combos: Vec<(TankerClass, ScenarioPercent)> = tankers
        .iter()
        .flat_map(|&t| scenarios.iter().map(move |&s| (t, s)))
        .collect();

    combos
        .into_par_iter()
        .map(|(tanker, scenario)| {
            let settings = AllocationSettings::new(scenario, tanker)
                .with_cost(*cost)
                .with_distance(distance);
            let result = allocate_site(site, wells, &settings);
            ComparisonRow {
                tanker,
                scenario_pct: scenario.value(),
                residual_m3_day: result.residual_m3_day,
                cost: result.total_cost,
                trips: result.total_trips,
                efficiency_m3_per_cost: efficiency(site.get_demand(), result.residual_m3_day, result.total_cost),
            }
        })
        .collect()
}

/// Mean efficiency per tanker class, in first-appearance order.
pub fn mean_efficiency_by_tanker(rows: &[ComparisonRow]) -> Vec<(TankerClass, f64)> {
    let mut order: Vec<TankerClass> = Vec::new();
    for row in rows {
        if !order.contains(&row.tanker) {
            order.push(row.tanker);
        }
    }

    order
        .into_iter()
        .map(|tanker| {
            let values: Vec<f64> = rows
                .iter()
                .filter(|r| r.tanker == tanker)
                .map(|r| r.efficiency_m3_per_cost)
                .collect();
            (tanker, values.iter().sum::<f64>() / values.len() as f64)
        })
        .collect()
}

/// Tanker with the highest mean efficiency. The first one wins ties.
pub fn best_tanker(rows: &[ComparisonRow]) -> Option<(TankerClass, f64)> {
    mean_efficiency_by_tanker(rows)
        .into_iter()
        .fold(None, |best, (tanker, eff)| match best {
            Some((_, best_eff)) if best_eff >= eff => best,
            _ => Some((tanker, eff)),
        })
}
