use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use tracing::{info, warn};

use super::error::DataLoadError;
use crate::models::demand_site::DemandSite;
use crate::utils::logging::{self, FileIOType, OperationCategory};
use crate::utils::text::normalize_name;

#[derive(Debug, Deserialize)]
struct DemandRow {
    #[serde(alias = "ZONENAME", alias = "Distrito")]
    name: String,
    #[serde(
        default,
        alias = "Demanda_m3_dia",
        alias = "Demanda_Distrito_m3_30_lhd",
        deserialize_with = "crate::models::well::lenient_f64"
    )]
    demand_m3_day: Option<f64>,
}

/// Demand per normalised region name.
pub type DemandTable = HashMap<String, f64>;

/// Reads a `name,demand_m3_day` table. Blank or non-numeric demand is 0.
/// Repeated names keep the last value.
pub fn load_demand_table(csv_path: impl AsRef<Path>) -> Result<DemandTable, DataLoadError> {
    let _timing = logging::start_timing("load_demand_table",
        OperationCategory::FileIO { subcategory: FileIOType::DemandLoad });

    let file = File::open(csv_path.as_ref())?;
    let table = read_demand_table(file)?;
    info!(count = table.len(), path = %csv_path.as_ref().display(), "loaded demand table");
    Ok(table)
}

pub fn read_demand_table<R: Read>(reader: R) -> Result<DemandTable, DataLoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut table = DemandTable::new();
    for result in reader.deserialize::<DemandRow>() {
        let row = result?;
        table.insert(normalize_name(&row.name), row.demand_m3_day.unwrap_or(0.0));
    }
    Ok(table)
}

/// Left join of regions with a demand table on normalised name.
/// The table wins when it has an entry; otherwise a region keeps the demand
/// it was loaded with, which is zero unless the regions file gave one.
pub fn join_demand(regions: Vec<DemandSite>, table: &DemandTable) -> Vec<DemandSite> {
    let mut unmatched = 0usize;
    let joined: Vec<DemandSite> = regions
        .into_iter()
        .map(|site| match table.get(&normalize_name(site.get_name())) {
            Some(&demand) => site.with_demand(demand),
            None => {
                unmatched += 1;
                site
            }
        })
        .collect();

    if unmatched > 0 {
        warn!(unmatched, "regions without a demand entry keep their inline demand");
    }
    joined
}
