use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{info, warn};

use crate::analysis::kpis::coverage_pct;
use crate::core::allocation::{allocate_site, AllocationSettings};
use crate::models::allocation_result::AllocationResult;
use crate::models::demand_site::{select_sites, DemandSite};
use crate::models::well::Well;
use crate::utils::logging::{self, AnalysisType, OperationCategory};

/// One line of a multi-site overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteSummary {
    pub name: String,
    pub demand_m3_day: f64,
    pub trips: u64,
    pub cost: f64,
    pub fuel_gallons: f64,
    pub residual_m3_day: f64,
    pub coverage_pct: f64,
}

impl SiteSummary {
    fn from_result(site: &DemandSite, result: &AllocationResult) -> Self {
        Self {
            name: site.get_name().to_string(),
            demand_m3_day: site.get_demand(),
            trips: result.total_trips,
            cost: result.total_cost,
            fuel_gallons: result.total_fuel_gallons,
            residual_m3_day: result.residual_m3_day,
            coverage_pct: coverage_pct(site.get_demand(), result.residual_m3_day),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankOrder {
    MostCostly,
    LeastCostly,
}

/// Allocates every site independently and summarises the outcome.
///
/// Sites without positive demand are left out. Rows keep the input order.
pub fn summarize_sites(
    sites: &[DemandSite],
    wells: &[Well],
    settings: &AllocationSettings,
    show_progress: bool,
) -> Vec<SiteSummary> {
    let _timing = logging::start_timing("summarize_sites",
        OperationCategory::Analysis { subcategory: AnalysisType::SiteSummary });

    let active: Vec<&DemandSite> = sites.iter().filter(|s| s.get_demand() > 0.0).collect();
    if active.len() < sites.len() {
        info!(skipped = sites.len() - active.len(), "sites without demand left out of summary");
    }

    let progress = if show_progress {
        let bar = ProgressBar::new(active.len() as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} sites")
        {
            bar.set_style(style.progress_chars("#>-"));
        }
        Some(bar)
    } else {
        None
    };

    let rows: Vec<SiteSummary> = active
        .par_iter()
        .map(|site| {
            let result = allocate_site(site, wells, settings);
            if let Some(bar) = &progress {
                bar.inc(1);
            }
            SiteSummary::from_result(site, &result)
        })
        .collect();

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    rows
}

/// Allocates the named districts as one combined site.
///
/// Names are matched after normalisation and each district counts once;
/// names with no matching district are logged and ignored. Returns `None` when nothing matched.
pub fn critical_combination(
    districts: &[DemandSite],
    names: &[String],
    wells: &[Well],
    settings: &AllocationSettings,
) -> Option<(DemandSite, AllocationResult)> {
    let _timing = logging::start_timing("critical_combination",
        OperationCategory::Analysis { subcategory: AnalysisType::CriticalCombination });

    let (picked, missing) = select_sites(districts, names);
    for name in &missing {
        warn!(district = %name, "critical district not found");
    }
    let selected: Vec<DemandSite> = picked.into_iter().cloned().collect();

    let label = selected.iter().map(|d| d.get_name()).collect::<Vec<_>>().join(", ");
    let combined = DemandSite::combine(label, &selected)?;
    let result = allocate_site(&combined, wells, settings);
    Some((combined, result))
}

pub fn average_cost(rows: &[SiteSummary]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|r| r.cost).sum::<f64>() / rows.len() as f64
}

pub fn average_coverage(rows: &[SiteSummary]) -> f64 {
    if rows.is_empty() {
        return 0.0;
    }
    rows.iter().map(|r| r.coverage_pct).sum::<f64>() / rows.len() as f64
}

/// The `n` most or least costly sites. Equal costs keep input order.
pub fn top_by_cost(rows: &[SiteSummary], n: usize, order: RankOrder) -> Vec<SiteSummary> {
    let mut ranked: Vec<SiteSummary> = rows.to_vec();
    match order {
        RankOrder::MostCostly => ranked.sort_by(|a, b| b.cost.total_cmp(&a.cost)),
        RankOrder::LeastCostly => ranked.sort_by(|a, b| a.cost.total_cmp(&b.cost)),
    }
    ranked.truncate(n);
    ranked
}
