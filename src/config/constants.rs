// Distance Constants
pub const KM_PER_DEGREE: f64 = 111.0;                // Planar degree -> km factor
pub const EARTH_RADIUS_KM: f64 = 6371.0;             // Mean Earth radius for haversine

// Operational Defaults
pub const DEFAULT_FUEL_RATE_GAL_PER_HR: f64 = 6.0;
pub const DEFAULT_FUEL_PRICE_PER_GAL: f64 = 20.0;    // Soles per gallon
pub const DEFAULT_SPEED_KMH: f64 = 30.0;
pub const MIN_SPEED_KMH: f64 = 1e-6;                 // Floor to avoid division by zero

// Scenario Constants
pub const SCENARIO_PRESETS: [f64; 3] = [10.0, 20.0, 30.0];
pub const DEFAULT_SCENARIO_PCT: f64 = 10.0;
pub const MAX_SCENARIO_PCT: f64 = 100.0;

// Tanker Capacities (m³)
pub const SMALL_TANKER_CAPACITY_M3: f64 = 19.0;
pub const LARGE_TANKER_CAPACITY_M3: f64 = 34.0;

// Input Defaults
pub const UNKNOWN_WELL_ID: &str = "NA";

// Reporting Thresholds
pub const CONSERVATION_TOLERANCE: f64 = 1e-6;
pub const FULL_COVERAGE_THRESHOLD_PCT: f64 = 99.9;
pub const DEFAULT_TOP_N: usize = 5;

// Districts analysed together as the critical combination
pub const DEFAULT_CRITICAL_DISTRICTS: [&str; 5] = [
    "ATE",
    "LURIGANCHO",
    "SAN_JUAN_DE_LURIGANCHO",
    "EL_AGUSTINO",
    "SANTA_ANITA",
];
