use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use tracing::info;

use wellsupply::analysis::comparison::compare_scenarios;
use wellsupply::analysis::kpis::SupplyKpis;
use wellsupply::analysis::reporting::{
    print_allocation_report, print_comparison, print_conclusion, print_kpis, print_summary_table,
};
use wellsupply::analysis::summary::{critical_combination, summarize_sites, top_by_cost, RankOrder};
use wellsupply::cli::cli::Args;
use wellsupply::config::analysis_config::AnalysisConfig;
use wellsupply::config::scenario::ScenarioPercent;
use wellsupply::config::tanker::TankerClass;
use wellsupply::core::allocation::{allocate_site, AllocationSettings};
use wellsupply::data::{demand_loader, regions_loader, wells_loader};
use wellsupply::geo::point::{DistanceMethod, GeoPoint};
use wellsupply::models::demand_site::{select_sites, DemandSite, SiteLevel};
use wellsupply::models::well::Well;
use wellsupply::utils::csv_export::CsvExporter;
use wellsupply::utils::logging::{self, FileIOType, OperationCategory};

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging())
        .context("failed to install tracing subscriber")?;

    let config = load_config(&args)?;
    let settings = config.settings();

    println!("Emergency Water Redistribution Planner");
    println!("Scenario: {} of nominal yield | Tanker: {} | Distance: {:?}",
        settings.scenario, settings.tanker.label(), settings.distance);

    let wells = wells_loader::load_wells(args.wells())
        .with_context(|| format!("failed to load wells from {}", args.wells()))?;

    let regions = load_sites(&args)?;
    let exporter = match args.export_dir() {
        Some(dir) => Some(CsvExporter::new(dir).with_context(|| format!("failed to create export dir {}", dir))?),
        None => None,
    };

    let mut ran_anything = false;

    if args.summary() {
        run_summary(&regions, &wells, &settings, &config, args.progress(), exporter.as_ref())?;
        ran_anything = true;
    }

    if args.critical() {
        let (site, result) = critical_combination(&regions, &config.critical_districts, &wells, &settings)
            .ok_or_else(|| anyhow!("none of the critical districts were found in the regions file"))?;
        let kpis = SupplyKpis::from_result(site.get_demand(), &result);
        print_kpis(&site, &kpis);
        print_conclusion(&site, &kpis, &settings.tanker);
        if let Some(exporter) = &exporter {
            exporter.export_allocation("critical", &result)?;
        }
        ran_anything = true;
    }

    if let Some(site) = selected_site(&args, &regions)? {
        run_single(&site, &wells, &settings, &config, args.compare(), exporter.as_ref())?;
        ran_anything = true;
    }

    if !ran_anything {
        bail!("nothing to do: pass --site, --lon/--lat, --summary or --critical");
    }

    if let Some(exporter) = &exporter {
        info!(dir = %exporter.output_dir().display(), "exports written");
    }

    logging::print_timing_report();
    Ok(())
}

fn load_config(args: &Args) -> Result<AnalysisConfig> {
    let _timing = logging::start_timing("load_config",
        OperationCategory::FileIO { subcategory: FileIOType::ConfigLoad });

    let mut config = match args.config() {
        Some(path) => AnalysisConfig::from_json_file(path)
            .with_context(|| format!("failed to read config {}", path))?,
        None => AnalysisConfig::default(),
    };

    if let Some(pct) = args.scenario() {
        config.scenario_pct = ScenarioPercent::new(pct)?;
    }
    if let Some(tanker) = args.tanker() {
        config.tanker = tanker.parse::<TankerClass>()?;
    }
    if let Some(method) = args.distance() {
        config.distance = method.parse::<DistanceMethod>().map_err(|e| anyhow!(e))?;
    }

    Ok(config)
}

fn load_sites(args: &Args) -> Result<Vec<DemandSite>> {
    let Some(path) = args.regions() else {
        return Ok(Vec::new());
    };

    let regions = regions_loader::load_regions(path, args.level())
        .with_context(|| format!("failed to load regions from {}", path))?;

    match args.demands() {
        Some(demand_path) => {
            let table = demand_loader::load_demand_table(demand_path)
                .with_context(|| format!("failed to load demand table {}", demand_path))?;
            Ok(demand_loader::join_demand(regions, &table))
        }
        None => Ok(regions),
    }
}

/// Resolves the site for a detail view: an ad hoc point, one named region,
/// or several named regions combined.
fn selected_site(args: &Args, regions: &[DemandSite]) -> Result<Option<DemandSite>> {
    if let Some((lon, lat)) = args.point() {
        let demand = args.demand().unwrap_or(0.0);
        return Ok(Some(DemandSite::from_point("Ad hoc point", SiteLevel::City, GeoPoint::new(lon, lat), demand)));
    }

    if args.sites().is_empty() {
        return Ok(None);
    }

    let (picked, missing) = select_sites(regions, args.sites());
    if let Some(name) = missing.first() {
        bail!("region {} not found", name);
    }
    let mut selected: Vec<DemandSite> = picked.into_iter().cloned().collect();

    if selected.len() == 1 {
        return Ok(selected.pop());
    }

    let label = selected.iter().map(|s| s.get_name()).collect::<Vec<_>>().join(", ");
    Ok(DemandSite::combine(label, &selected))
}

fn run_single(
    site: &DemandSite,
    wells: &[Well],
    settings: &AllocationSettings,
    config: &AnalysisConfig,
    compare: bool,
    exporter: Option<&CsvExporter>,
) -> Result<()> {
    let result = allocate_site(site, wells, settings);
    let kpis = SupplyKpis::from_result(site.get_demand(), &result);

    print_kpis(site, &kpis);
    print_allocation_report(&result);
    print_conclusion(site, &kpis, &settings.tanker);

    if let Some(exporter) = exporter {
        exporter.export_allocation(site.get_name(), &result)?;
    }

    if compare {
        let rows = compare_scenarios(
            site,
            wells,
            &ScenarioPercent::PRESETS,
            &TankerClass::ALL,
            &config.cost,
            config.distance,
        );
        print_comparison(&rows);
        if let Some(exporter) = exporter {
            exporter.export_comparison(site.get_name(), &rows)?;
        }
    }

    Ok(())
}

fn run_summary(
    regions: &[DemandSite],
    wells: &[Well],
    settings: &AllocationSettings,
    config: &AnalysisConfig,
    show_progress: bool,
    exporter: Option<&CsvExporter>,
) -> Result<()> {
    if regions.is_empty() {
        bail!("--summary needs a regions file");
    }

    let rows = summarize_sites(regions, wells, settings, show_progress);
    print_summary_table("Summary", &rows);
    print_summary_table(
        &format!("Top {} most costly", config.top_n),
        &top_by_cost(&rows, config.top_n, RankOrder::MostCostly),
    );
    print_summary_table(
        &format!("Top {} least costly", config.top_n),
        &top_by_cost(&rows, config.top_n, RankOrder::LeastCostly),
    );

    if let Some(exporter) = exporter {
        exporter.export_summary("sites", &rows)?;
    }
    Ok(())
}
