use std::io::Write;

use tempfile::{tempdir, NamedTempFile};

use wellsupply::config::analysis_config::AnalysisConfig;
use wellsupply::data::demand_loader::{join_demand, load_demand_table, read_demand_table};
use wellsupply::data::error::DataLoadError;
use wellsupply::data::regions_loader::{load_regions, read_regions};
use wellsupply::data::wells_loader::{load_wells, read_wells};
use wellsupply::models::demand_site::SiteLevel;
use wellsupply::utils::csv_export::CsvExporter;
use wellsupply::{allocate_site, AllocationSettings};

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn wells_csv_substitutes_defaults() {
    let csv = "id,lon,lat,yield_m3_day\n\
               P-01,-77.01,-12.02,120.5\n\
               ,-77.05,-12.06,80\n\
               P-03,-77.10,-12.10,\n\
               P-04,-77.11,-12.11,unknown\n";
    let wells = read_wells(csv.as_bytes()).unwrap();

    assert_eq!(wells.len(), 4);
    assert_eq!(wells[0].get_id(), "P-01");
    assert_eq!(wells[0].get_nominal_yield(), 120.5);
    assert_eq!(wells[1].get_id(), "NA");
    assert_eq!(wells[1].get_nominal_yield(), 80.0);
    assert_eq!(wells[2].get_nominal_yield(), 0.0);
    assert_eq!(wells[3].get_nominal_yield(), 0.0);
    assert!(!wells[3].is_candidate());
}

#[test]
fn wells_csv_accepts_source_column_names_and_skips_bad_rows() {
    let csv = "ID,lon,lat,Q_m3_dia\n\
               7,-77.0,-12.0,55\n\
               8,not-a-number,-12.0,40\n";
    let wells = read_wells(csv.as_bytes()).unwrap();
    assert_eq!(wells.len(), 1);
    assert_eq!(wells[0].get_id(), "7");
    assert_eq!(wells[0].get_nominal_yield(), 55.0);
}

#[test]
fn load_wells_reads_from_disk() {
    let file = write_temp("id,lon,lat,yield_m3_day\nA,-77.0,-12.0,10\n");
    let wells = load_wells(file.path()).unwrap();
    assert_eq!(wells.len(), 1);

    assert!(matches!(load_wells("/nonexistent/wells.csv"), Err(DataLoadError::IoError(_))));
}

#[test]
fn regions_reduce_polygons_to_centroids() {
    let json = r#"{
        "regions": [
            {"name": "Breña", "polygons": [[[0,0],[2,0],[2,2],[0,2],[0,0]]]},
            {"name": "san isidro", "point": [-77.03, -12.09], "demand_m3_day": 300}
        ]
    }"#;
    let sites = read_regions(json.as_bytes(), SiteLevel::Sector).unwrap();

    assert_eq!(sites.len(), 2);
    assert_eq!(sites[0].get_name(), "BREÑA");
    assert!((sites[0].get_anchor().lon - 1.0).abs() < 1e-12);
    assert!((sites[0].get_anchor().lat - 1.0).abs() < 1e-12);
    assert_eq!(sites[0].get_demand(), 0.0);
    assert_eq!(sites[1].get_name(), "SAN ISIDRO");
    assert_eq!(sites[1].get_demand(), 300.0);
    assert_eq!(sites[1].get_level(), SiteLevel::Sector);
}

#[test]
fn regions_without_geometry_or_duplicated_are_rejected() {
    let missing = r#"{"regions": [{"name": "Nowhere"}]}"#;
    assert!(matches!(
        read_regions(missing.as_bytes(), SiteLevel::District),
        Err(DataLoadError::MissingGeometry(_))
    ));

    let duplicated = r#"{"regions": [
        {"name": "Ate", "point": [0, 0]},
        {"name": "ATE", "point": [1, 1]}
    ]}"#;
    assert!(matches!(
        read_regions(duplicated.as_bytes(), SiteLevel::District),
        Err(DataLoadError::DuplicateRegion(_))
    ));
}

#[test]
fn demand_join_matches_normalised_names() {
    let regions_json = r#"{"regions": [
        {"name": "Jesús María", "point": [-77.04, -12.07]},
        {"name": "Lince", "point": [-77.03, -12.08]},
        {"name": "Breña", "point": [-77.05, -12.06], "demand_m3_day": 300}
    ]}"#;
    let regions = read_regions(regions_json.as_bytes(), SiteLevel::District).unwrap();

    let table = read_demand_table(
        "Distrito,Demanda_Distrito_m3_30_lhd\n  jesus maría ,1250.5\nBREÑA,40\n".as_bytes(),
    )
    .unwrap();
    let joined = join_demand(regions, &table);

    assert_eq!(joined[0].get_demand(), 1250.5);
    assert_eq!(joined[1].get_demand(), 0.0);
    assert_eq!(joined[2].get_demand(), 40.0);
}

#[test]
fn demand_join_keeps_inline_demand_without_table_entry() {
    let regions_json = r#"{"regions": [
        {"name": "San Isidro", "point": [-77.03, -12.09], "demand_m3_day": 300}
    ]}"#;
    let regions = read_regions(regions_json.as_bytes(), SiteLevel::District).unwrap();
    let table = read_demand_table("name,demand_m3_day\nLINCE,10\n".as_bytes()).unwrap();

    let joined = join_demand(regions, &table);
    assert_eq!(joined[0].get_demand(), 300.0);
}

#[test]
fn files_on_disk_feed_an_allocation() {
    let wells_file = write_temp("id,lon,lat,yield_m3_day\nW1,-77.00,-12.00,200\nW2,-77.20,-12.20,200\n");
    let regions_file = write_temp(r#"{"regions": [{"name": "Centro", "point": [-77.01, -12.01]}]}"#);
    let demand_file = write_temp("name,demand_m3_day\nCENTRO,30\n");

    let wells = load_wells(wells_file.path()).unwrap();
    let regions = load_regions(regions_file.path(), SiteLevel::Sector).unwrap();
    let table = load_demand_table(demand_file.path()).unwrap();
    let sites = join_demand(regions, &table);

    let result = allocate_site(&sites[0], &wells, &AllocationSettings::default());
    // 10% of 200 = 20 from the nearest well, the rest from the far one
    assert_eq!(result.records.len(), 2);
    assert_eq!(result.records[0].well_id, "W1");
    assert!((result.records[0].assigned_m3_day - 20.0).abs() < 1e-9);
    assert!(result.residual_m3_day.abs() < 1e-9);
}

#[test]
fn config_file_round_trip() {
    let file = write_temp(r#"{"scenario_pct": 20, "tanker": "34", "top_n": 3}"#);
    let config = AnalysisConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.scenario_pct.value(), 20.0);
    assert_eq!(config.top_n, 3);
    assert_eq!(config.settings().tanker.capacity_m3(), 34.0);

    let bad = write_temp(r#"{"cost": {"speed_kmh": -5}}"#);
    assert!(AnalysisConfig::from_json_file(bad.path()).is_err());
}

#[test]
fn exporter_writes_allocation_csv() {
    let dir = tempdir().unwrap();
    let wells = read_wells("id,lon,lat,yield_m3_day\nW1,0.0,0.0,100\n".as_bytes()).unwrap();
    let regions = read_regions(r#"{"regions": [{"name": "X", "point": [0.0, 0.01], "demand_m3_day": 5}]}"#.as_bytes(), SiteLevel::Sector).unwrap();
    let result = allocate_site(&regions[0], &wells, &AllocationSettings::default());

    let exporter = CsvExporter::new(dir.path()).unwrap();
    let path = exporter.export_allocation("X site", &result).unwrap();

    let contents = std::fs::read_to_string(&path).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next(), Some("well_id,assigned_m3_day,trips,cost,fuel_gallons,distance_km,lon,lat"));
    assert!(lines.next().unwrap().starts_with("W1,5.0,1,"));
    assert!(path.file_name().unwrap().to_string_lossy().starts_with("X_site"));
}
