use serde::{Deserialize, Serialize};
use std::fmt;

use crate::geo::point::GeoPoint;
use crate::geo::region::{combined_centroid, Polygon};
use crate::utils::text::normalize_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteLevel {
    Sector,
    District,
    Combined,
    City,
}

impl fmt::Display for SiteLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SiteLevel::Sector => "Sector",
            SiteLevel::District => "District",
            SiteLevel::Combined => "District combination",
            SiteLevel::City => "City-wide",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for SiteLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sector" => Ok(SiteLevel::Sector),
            "district" => Ok(SiteLevel::District),
            "combined" => Ok(SiteLevel::Combined),
            "city" => Ok(SiteLevel::City),
            other => Err(format!("unknown site level: {}", other)),
        }
    }
}

/// A demand volume anchored at a single representative point.
///
/// Polygons are reduced to their centroid when the site is built; the
/// original shapes are kept so sites can later be combined.
#[derive(Debug, Clone, Serialize)]
pub struct DemandSite {
    name: String,
    level: SiteLevel,
    anchor: GeoPoint,
    demand_m3_day: f64,
    #[serde(skip)]
    polygons: Vec<Polygon>,
}

impl DemandSite {
    pub fn from_point(name: impl Into<String>, level: SiteLevel, anchor: GeoPoint, demand_m3_day: f64) -> Self {
        Self {
            name: name.into(),
            level,
            anchor,
            demand_m3_day: sanitize_demand(demand_m3_day),
            polygons: Vec::new(),
        }
    }

    /// Builds a site anchored at the centroid of its polygon parts.
    /// Returns `None` when no part has any vertex.
    pub fn from_polygons(
        name: impl Into<String>,
        level: SiteLevel,
        polygons: Vec<Polygon>,
        demand_m3_day: f64,
    ) -> Option<Self> {
        let anchor = combined_centroid(&polygons)?;
        Some(Self {
            name: name.into(),
            level,
            anchor,
            demand_m3_day: sanitize_demand(demand_m3_day),
            polygons,
        })
    }

    /// Merges several sites into one: demands are summed and the anchor is
    /// the centroid of the union of their regions. If any site is point-only
    /// the union has no area for it, so the anchor falls back to the mean of
    /// every site's anchor.
    pub fn combine(name: impl Into<String>, sites: &[DemandSite]) -> Option<Self> {
        if sites.is_empty() {
            return None;
        }

        let demand: f64 = sites.iter().map(|s| s.demand_m3_day).sum();
        let polygons: Vec<Polygon> = sites.iter().flat_map(|s| s.polygons.iter().cloned()).collect();

        let all_have_regions = sites.iter().all(|s| !s.polygons.is_empty());
        let union_centroid = if all_have_regions { combined_centroid(&polygons) } else { None };
        let anchor = union_centroid.unwrap_or_else(|| mean_anchor(sites));

        Some(Self {
            name: name.into(),
            level: SiteLevel::Combined,
            anchor,
            demand_m3_day: demand,
            polygons,
        })
    }

    pub fn with_demand(mut self, demand_m3_day: f64) -> Self {
        self.demand_m3_day = sanitize_demand(demand_m3_day);
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_level(&self) -> SiteLevel {
        self.level
    }

    pub fn get_anchor(&self) -> &GeoPoint {
        &self.anchor
    }

    pub fn get_demand(&self) -> f64 {
        self.demand_m3_day
    }

    pub fn get_polygons(&self) -> &[Polygon] {
        &self.polygons
    }
}

/// Picks the sites named in `names`, matched after normalisation.
///
/// Each site is returned at most once, in the order first requested, so
/// repeated names or spelling variants of one region do not double its
/// demand. Names with no match are returned separately, normalised.
pub fn select_sites<'a>(sites: &'a [DemandSite], names: &[String]) -> (Vec<&'a DemandSite>, Vec<String>) {
    let mut picked: Vec<usize> = Vec::new();
    let mut missing = Vec::new();

    for name in names {
        let wanted = normalize_name(name);
        match sites.iter().position(|s| normalize_name(s.get_name()) == wanted) {
            Some(index) if !picked.contains(&index) => picked.push(index),
            Some(_) => {}
            None => missing.push(wanted),
        }
    }

    (picked.into_iter().map(|i| &sites[i]).collect(), missing)
}

fn mean_anchor(sites: &[DemandSite]) -> GeoPoint {
    let n = sites.len() as f64;
    GeoPoint::new(
        sites.iter().map(|s| s.anchor.lon).sum::<f64>() / n,
        sites.iter().map(|s| s.anchor.lat).sum::<f64>() / n,
    )
}

fn sanitize_demand(demand: f64) -> f64 {
    if demand.is_finite() && demand > 0.0 {
        demand
    } else {
        0.0
    }
}
