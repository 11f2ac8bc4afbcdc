use super::comparison::{best_tanker, mean_efficiency_by_tanker, ComparisonRow};
use super::kpis::{CoverageStatus, SupplyKpis};
use super::summary::{average_cost, average_coverage, SiteSummary};
use crate::config::tanker::TankerProfile;
use crate::models::allocation_result::AllocationResult;
use crate::models::demand_site::DemandSite;

pub fn print_kpis(site: &DemandSite, kpis: &SupplyKpis) {
    println!("\n{} {}", site.get_level(), site.get_name());
    println!("----------------------------------------");
    println!("Demand: {:.1} m³/day", kpis.demand_m3_day);
    println!("Coverage: {:.1}%", kpis.coverage_pct);
    println!("Wells used: {}", kpis.wells_used);
    println!("Trips: {}", kpis.trips);
    println!("Cost: S/ {:.2}", kpis.cost);
    println!("Fuel: {:.1} gal", kpis.fuel_gallons);
    println!("Water-cost efficiency: {:.2} m³ per S/", kpis.efficiency_m3_per_cost);
    println!("(costs cover fuel only)");
}

pub fn print_allocation_report(result: &AllocationResult) {
    println!("\nWell Allocation:");
    println!("----------------------------------------");
    println!("{:<12} {:>14} {:>7} {:>12} {:>10} {:>10}",
        "Well", "Supply m³/day", "Trips", "Cost S/", "Fuel gal", "Dist km");
    for record in &result.records {
        println!("{:<12} {:>14.2} {:>7} {:>12.2} {:>10.1} {:>10.3}",
            record.well_id,
            record.assigned_m3_day,
            record.trips,
            record.cost,
            record.fuel_gallons,
            record.distance_km);
    }
    println!("----------------------------------------");
    println!("Totals: {} trips, S/ {:.2}, {:.1} gal, residual {:.2} m³/day",
        result.total_trips, result.total_cost, result.total_fuel_gallons, result.residual_m3_day.max(0.0));
}

pub fn print_conclusion(site: &DemandSite, kpis: &SupplyKpis, tanker: &TankerProfile) {
    println!("\nOperational Conclusion");
    println!("----------------------------------------");
    match kpis.status() {
        CoverageStatus::FullySatisfied => println!(
            "Daily demand of {:.2} m³ in {} {} was fully met ({:.1}%) by {} industrial wells, \
             requiring {} trips with {} tankers.",
            kpis.demand_m3_day, site.get_level(), site.get_name(), kpis.coverage_pct,
            kpis.wells_used, kpis.trips, tanker.label()),
        CoverageStatus::Partial => println!(
            "Daily demand of {:.2} m³ in {} {} was only partly met ({:.1}%) despite {} industrial wells \
             and {} trips with {} tankers.",
            kpis.demand_m3_day, site.get_level(), site.get_name(), kpis.coverage_pct,
            kpis.wells_used, kpis.trips, tanker.label()),
    }
    println!("Hauling burned {:.1} gal of fuel, S/ {:.2} in operating cost.",
        kpis.fuel_gallons, kpis.cost);
}

pub fn print_comparison(rows: &[ComparisonRow]) {
    println!("\nScenario / Tanker Comparison");
    println!("----------------------------------------");
    println!("{:<8} {:>9} {:>12} {:>12} {:>14}", "Tanker", "Scenario", "Cost S/", "Residual", "Eff m³/S/");
    for row in rows {
        println!("{:<8} {:>8}% {:>12.2} {:>12.2} {:>14.3}",
            row.tanker.label(), row.scenario_pct, row.cost, row.residual_m3_day, row.efficiency_m3_per_cost);
    }

    for (tanker, mean) in mean_efficiency_by_tanker(rows) {
        println!("Mean efficiency {}: {:.3} m³/S/", tanker.label(), mean);
    }
    if let Some((tanker, eff)) = best_tanker(rows) {
        println!("Most efficient tanker: {} ({:.3} m³/S/ on average)", tanker.label(), eff);
    }
}

pub fn print_summary_table(title: &str, rows: &[SiteSummary]) {
    println!("\n{}", title);
    println!("----------------------------------------");
    println!("{:<26} {:>12} {:>7} {:>12} {:>10} {:>10} {:>8}",
        "Site", "Demand", "Trips", "Cost S/", "Fuel gal", "Shortfall", "Cover%");
    for row in rows {
        println!("{:<26} {:>12.2} {:>7} {:>12.2} {:>10.1} {:>10.2} {:>8.1}",
            row.name, row.demand_m3_day, row.trips, row.cost, row.fuel_gallons,
            row.residual_m3_day.max(0.0), row.coverage_pct);
    }
    println!("----------------------------------------");
    println!("Average cost: S/ {:.2}", average_cost(rows));
    println!("Average coverage: {:.1}%", average_coverage(rows));
}
