// Main module declarations for the well supply planner

// Core allocation modules
pub mod core {
    pub mod cost_model;
    pub mod allocation;
}

// Configuration modules
pub mod config {
    pub mod constants;
    pub mod scenario;
    pub mod tanker;
    pub mod analysis_config;
}

// Geographic primitives
pub mod geo {
    pub mod point;
    pub mod region;
}

// Model definitions
pub mod models {
    pub mod well;
    pub mod demand_site;
    pub mod allocation_result;
}

// Data loaders
pub mod data {
    pub mod error;
    pub mod wells_loader;
    pub mod regions_loader;
    pub mod demand_loader;
}

// Analysis and metrics
pub mod analysis {
    pub mod kpis;
    pub mod comparison;
    pub mod summary;
    pub mod reporting;
}

// Utility functions
pub mod utils {
    pub mod logging;
    pub mod csv_export;
    pub mod text;
}

// CLI interface
pub mod cli {
    pub mod cli;
}

// Re-export commonly used items
pub use crate::core::allocation::{allocate, allocate_site, AllocationSettings};
pub use crate::core::cost_model::{compute_cost, TripCost};
pub use crate::config::scenario::{CostParams, ScenarioPercent};
pub use crate::config::tanker::{TankerClass, TankerProfile};
pub use crate::geo::point::{distance_km, DistanceMethod, GeoPoint};
pub use crate::models::allocation_result::{AllocationRecord, AllocationResult};
pub use crate::models::demand_site::{DemandSite, SiteLevel};
pub use crate::models::well::{Well, WellRecord};
