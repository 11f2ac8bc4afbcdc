use std::path::{Path, PathBuf};
use chrono::Local;
use csv::Writer;
use serde::Serialize;
use tracing::info;

use crate::analysis::comparison::ComparisonRow;
use crate::analysis::summary::SiteSummary;
use crate::data::error::DataLoadError;
use crate::models::allocation_result::AllocationResult;
use crate::utils::logging::{self, FileIOType, OperationCategory};

#[derive(Serialize)]
struct AllocationRow<'a> {
    well_id: &'a str,
    assigned_m3_day: f64,
    trips: u64,
    cost: f64,
    fuel_gallons: f64,
    distance_km: f64,
    lon: f64,
    lat: f64,
}

#[derive(Serialize)]
struct ComparisonCsvRow<'a> {
    tanker: &'a str,
    scenario_pct: f64,
    residual_m3_day: f64,
    cost: f64,
    trips: u64,
    efficiency_m3_per_cost: f64,
}

/// Writes analysis results into a timestamped directory.
pub struct CsvExporter {
    output_dir: PathBuf,
}

impl CsvExporter {
    /// Creates `<output_dir>/<YYYYmmdd_HHMMSS>/`.
    pub fn new(output_dir: impl AsRef<Path>) -> Result<Self, DataLoadError> {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        let full_path = output_dir.as_ref().join(timestamp);
        std::fs::create_dir_all(&full_path)?;
        Ok(Self { output_dir: full_path })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn export_allocation(&self, file_stem: &str, result: &AllocationResult) -> Result<PathBuf, DataLoadError> {
        let rows = result.records.iter().map(|r| AllocationRow {
            well_id: &r.well_id,
            assigned_m3_day: r.assigned_m3_day,
            trips: r.trips,
            cost: r.cost,
            fuel_gallons: r.fuel_gallons,
            distance_km: r.distance_km,
            lon: r.position.lon,
            lat: r.position.lat,
        });
        self.write_rows(&format!("{}_allocation.csv", file_stem), rows)
    }

    pub fn export_summary(&self, file_stem: &str, rows: &[SiteSummary]) -> Result<PathBuf, DataLoadError> {
        self.write_rows(&format!("{}_summary.csv", file_stem), rows.iter())
    }

    pub fn export_comparison(&self, file_stem: &str, rows: &[ComparisonRow]) -> Result<PathBuf, DataLoadError> {
        let rows = rows.iter().map(|r| ComparisonCsvRow {
            tanker: r.tanker.label(),
            scenario_pct: r.scenario_pct,
            residual_m3_day: r.residual_m3_day,
            cost: r.cost,
            trips: r.trips,
            efficiency_m3_per_cost: r.efficiency_m3_per_cost,
        });
        self.write_rows(&format!("{}_comparison.csv", file_stem), rows)
    }

    fn write_rows<T, I>(&self, file_name: &str, rows: I) -> Result<PathBuf, DataLoadError>
    where
        T: Serialize,
        I: IntoIterator<Item = T>,
    {
        let _timing = logging::start_timing("write_rows",
            OperationCategory::FileIO { subcategory: FileIOType::ResultsSave });

        let path = self.output_dir.join(sanitize_file_name(file_name));
        let mut writer = Writer::from_path(&path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        info!(path = %path.display(), "exported csv");
        Ok(path)
    }
}

fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' { c } else { '_' })
        .collect()
}
