use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use serde::Deserialize;
use tracing::info;

use super::error::DataLoadError;
use crate::geo::point::GeoPoint;
use crate::geo::region::Polygon;
use crate::models::demand_site::{DemandSite, SiteLevel};
use crate::utils::logging::{self, FileIOType, OperationCategory};
use crate::utils::text::normalize_name;

#[derive(Debug, Deserialize)]
pub struct RegionData {
    pub name: String,
    #[serde(default)]
    pub point: Option<[f64; 2]>,
    /// Exterior rings as `[lon, lat]` pairs, one per polygon part.
    #[serde(default)]
    pub polygons: Vec<Vec<[f64; 2]>>,
    #[serde(default, deserialize_with = "crate::models::well::lenient_f64")]
    pub demand_m3_day: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct RegionsList {
    pub regions: Vec<RegionData>,
}

/// Loads sector or district regions and reduces each to its anchor point.
///
/// Names are normalised so they can be joined against demand tables. A
/// region with polygons is anchored at their centroid; otherwise `point`
/// is used as given.
pub fn load_regions(json_path: impl AsRef<Path>, level: SiteLevel) -> Result<Vec<DemandSite>, DataLoadError> {
    let _timing = logging::start_timing("load_regions",
        OperationCategory::FileIO { subcategory: FileIOType::RegionsLoad });

    let file = File::open(json_path.as_ref())?;
    let sites = read_regions(BufReader::new(file), level)?;
    info!(count = sites.len(), %level, path = %json_path.as_ref().display(), "loaded regions");
    Ok(sites)
}

pub fn read_regions<R: Read>(reader: R, level: SiteLevel) -> Result<Vec<DemandSite>, DataLoadError> {
    let list: RegionsList = serde_json::from_reader(reader)?;

    let mut seen = HashSet::new();
    let mut sites = Vec::with_capacity(list.regions.len());

    for region in list.regions {
        let name = normalize_name(&region.name);
        if !seen.insert(name.clone()) {
            return Err(DataLoadError::DuplicateRegion(name));
        }

        let demand = region.demand_m3_day.unwrap_or(0.0);
        let polygons: Vec<Polygon> = region
            .polygons
            .iter()
            .filter(|ring| !ring.is_empty())
            .map(|ring| Polygon::from_pairs(ring))
            .collect();

        let site = if !polygons.is_empty() {
            DemandSite::from_polygons(name.clone(), level, polygons, demand)
        } else {
            region
                .point
                .map(|[lon, lat]| DemandSite::from_point(name.clone(), level, GeoPoint::new(lon, lat), demand))
        };

        sites.push(site.ok_or(DataLoadError::MissingGeometry(name))?);
    }

    Ok(sites)
}
