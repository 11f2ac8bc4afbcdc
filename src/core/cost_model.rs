use serde::Serialize;

use crate::config::constants::MIN_SPEED_KMH;
use crate::config::scenario::CostParams;

/// Trips, cost and fuel needed to haul an assigned volume.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TripCost {
    pub trips: u64,
    pub cost: f64,
    pub fuel_gallons: f64,
}

/// Number of tanker loads needed for `volume`, rounding any remainder up.
pub fn trip_count(volume: f64, tanker_capacity: f64) -> u64 {
    if volume <= 0.0 || !volume.is_finite() {
        return 0;
    }
    let full_loads = (volume / tanker_capacity).floor() as u64;
    if volume % tanker_capacity > 0.0 {
        full_loads + 1
    } else {
        full_loads
    }
}

/// Round-trip driving time in hours for a one-way `distance_km`.
pub fn round_trip_hours(distance_km: f64, speed_kmh: f64) -> f64 {
    (2.0 * distance_km) / speed_kmh.max(MIN_SPEED_KMH)
}

/// Converts an assigned volume and one-way distance into trips, fuel and cost.
///
/// Only fuel is costed: every trip burns `fuel_rate_gal_per_hr` for the
/// round-trip duration at `speed_kmh`. Non-positive volume yields all zeros.
pub fn compute_cost(
    assigned_volume: f64,
    distance_km: f64,
    tanker_capacity: f64,
    params: &CostParams,
) -> TripCost {
    let trips = trip_count(assigned_volume, tanker_capacity);
    if trips == 0 {
        return TripCost::default();
    }

    let hours_per_trip = round_trip_hours(distance_km, params.speed_kmh);
    let fuel_per_trip = hours_per_trip * params.fuel_rate_gal_per_hr;
    let cost_per_trip = fuel_per_trip * params.fuel_price_per_gal;

    TripCost {
        trips,
        cost: trips as f64 * cost_per_trip,
        fuel_gallons: trips as f64 * fuel_per_trip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_load_is_one_trip() {
        let cost = compute_cost(19.0, 10.0, 19.0, &CostParams::default());
        assert_eq!(cost.trips, 1);
    }

    #[test]
    fn test_remainder_rounds_up() {
        let cost = compute_cost(20.0, 10.0, 19.0, &CostParams::default());
        assert_eq!(cost.trips, 2);
        assert_eq!(trip_count(38.0, 19.0), 2);
        assert_eq!(trip_count(0.5, 34.0), 1);
    }

    #[test]
    fn test_zero_and_negative_volume_cost_nothing() {
        for volume in [0.0, -5.0] {
            let cost = compute_cost(volume, 12.0, 19.0, &CostParams::default());
            assert_eq!(cost, TripCost::default());
        }
    }

    #[test]
    fn test_fuel_and_cost_per_trip() {
        // 10 km one way at 30 km/h -> 2/3 h round trip -> 4 gal -> 80.0
        let cost = compute_cost(15.0, 10.0, 19.0, &CostParams::default());
        assert_eq!(cost.trips, 1);
        assert!((cost.fuel_gallons - 4.0).abs() < 1e-9);
        assert!((cost.cost - 80.0).abs() < 1e-9);

        let two = compute_cost(30.0, 10.0, 19.0, &CostParams::default());
        assert!((two.cost - 160.0).abs() < 1e-9);
        assert!((two.fuel_gallons - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_speed_is_clamped() {
        let params = CostParams { speed_kmh: 0.0, ..CostParams::default() };
        let cost = compute_cost(5.0, 1.0, 19.0, &params);
        assert!(cost.cost.is_finite());
        assert!(cost.cost > 0.0);
    }

    #[test]
    fn test_zero_distance_has_trips_but_no_fuel() {
        let cost = compute_cost(40.0, 0.0, 19.0, &CostParams::default());
        assert_eq!(cost.trips, 3);
        assert_eq!(cost.fuel_gallons, 0.0);
        assert_eq!(cost.cost, 0.0);
    }
}
