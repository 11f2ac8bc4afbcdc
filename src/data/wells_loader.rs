use std::fs::File;
use std::io::Read;
use std::path::Path;
use csv::{ReaderBuilder, Trim};
use tracing::{info, warn};

use super::error::DataLoadError;
use crate::models::well::{Well, WellRecord};
use crate::utils::logging::{self, FileIOType, OperationCategory};

/// Reads a well catalog with headers `id,lon,lat,yield_m3_day`.
///
/// Rows whose coordinates cannot be parsed are skipped with a warning; a
/// blank id becomes `"NA"` and a blank or non-numeric yield becomes 0.
pub fn load_wells(csv_path: impl AsRef<Path>) -> Result<Vec<Well>, DataLoadError> {
    let _timing = logging::start_timing("load_wells",
        OperationCategory::FileIO { subcategory: FileIOType::WellsLoad });

    let file = File::open(csv_path.as_ref())?;
    let wells = read_wells(file)?;
    info!(count = wells.len(), path = %csv_path.as_ref().display(), "loaded wells");
    Ok(wells)
}

pub fn read_wells<R: Read>(reader: R) -> Result<Vec<Well>, DataLoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut wells = Vec::new();
    let mut skipped = 0usize;

    for (row, result) in reader.deserialize::<WellRecord>().enumerate() {
        match result {
            Ok(record) => wells.push(Well::from(record)),
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                warn!(row = row + 1, error = %e, "skipping well row");
                skipped += 1;
            }
        }
    }

    let excluded = wells.iter().filter(|w| !w.is_candidate()).count();
    if skipped > 0 || excluded > 0 {
        warn!(skipped, excluded, "wells skipped or without usable yield");
    }

    Ok(wells)
}
