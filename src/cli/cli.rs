use clap::Parser;

use crate::models::demand_site::SiteLevel;

#[derive(Parser)]
#[command(author, version, about = "Emergency water redistribution from industrial wells", long_about = None)]
pub struct Args {
    #[arg(short, long, help = "Well catalog CSV (id,lon,lat,yield_m3_day)")]
    wells: String,

    #[arg(short, long, help = "Regions JSON with polygons or anchor points")]
    regions: Option<String>,

    #[arg(short, long, help = "Demand table CSV (name,demand_m3_day) joined to regions by name")]
    demands: Option<String>,

    #[arg(short, long, default_value = "district", value_parser = parse_level)]
    level: SiteLevel,

    #[arg(long = "site", help = "Region to analyse; repeat to combine several districts")]
    sites: Vec<String>,

    #[arg(long, allow_hyphen_values = true, requires = "lat", help = "Anchor longitude for a single ad hoc point")]
    lon: Option<f64>,

    #[arg(long, allow_hyphen_values = true, requires = "lon", help = "Anchor latitude for a single ad hoc point")]
    lat: Option<f64>,

    #[arg(long, help = "Demand in m³/day for the ad hoc point")]
    demand: Option<f64>,

    #[arg(short, long, help = "Scenario percentage of nominal yield, in (0, 100]")]
    scenario: Option<f64>,

    #[arg(short, long, help = "Tanker class: 19 or 34")]
    tanker: Option<String>,

    #[arg(long, help = "Distance formula: planar or haversine")]
    distance: Option<String>,

    #[arg(short, long, help = "Analysis configuration JSON")]
    config: Option<String>,

    #[arg(long, default_value_t = false, help = "Summarise every region with demand")]
    summary: bool,

    #[arg(long, default_value_t = false, help = "Compare all scenario presets and tanker classes")]
    compare: bool,

    #[arg(long, default_value_t = false, help = "Analyse the configured critical district combination")]
    critical: bool,

    #[arg(short, long, help = "Directory for CSV exports")]
    export_dir: Option<String>,

    #[arg(long, default_value_t = false)]
    progress: bool,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,
}

fn parse_level(s: &str) -> Result<SiteLevel, String> {
    s.parse()
}

impl Args {
    pub fn wells(&self) -> &str {
        &self.wells
    }

    pub fn regions(&self) -> Option<&str> {
        self.regions.as_deref()
    }

    pub fn demands(&self) -> Option<&str> {
        self.demands.as_deref()
    }

    pub fn level(&self) -> SiteLevel {
        self.level
    }

    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    pub fn point(&self) -> Option<(f64, f64)> {
        self.lon.zip(self.lat)
    }

    pub fn demand(&self) -> Option<f64> {
        self.demand
    }

    pub fn scenario(&self) -> Option<f64> {
        self.scenario
    }

    pub fn tanker(&self) -> Option<&str> {
        self.tanker.as_deref()
    }

    pub fn distance(&self) -> Option<&str> {
        self.distance.as_deref()
    }

    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn summary(&self) -> bool {
        self.summary
    }

    pub fn compare(&self) -> bool {
        self.compare
    }

    pub fn critical(&self) -> bool {
        self.critical
    }

    pub fn export_dir(&self) -> Option<&str> {
        self.export_dir.as_deref()
    }

    pub fn progress(&self) -> bool {
        self.progress
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_combined_sites() {
        let args = Args::parse_from([
            "wellsupply", "--wells", "pozos.csv", "--regions", "distritos.json",
            "--site", "ATE", "--site", "SANTA ANITA", "--scenario", "20", "--tanker", "34",
        ]);
        assert_eq!(args.sites().len(), 2);
        assert_eq!(args.level(), SiteLevel::District);
        assert_eq!(args.scenario(), Some(20.0));
        assert_eq!(args.tanker(), Some("34"));
    }

    #[test]
    fn test_parse_ad_hoc_point() {
        let args = Args::parse_from([
            "wellsupply", "-w", "pozos.csv", "--lon", "-77.03", "--lat", "-12.05", "--demand", "500",
        ]);
        assert_eq!(args.point(), Some((-77.03, -12.05)));
        assert_eq!(args.demand(), Some(500.0));
    }
}
