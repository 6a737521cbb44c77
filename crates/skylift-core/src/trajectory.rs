//! Trajectory math: speed envelope, flight altitude, and route geometry.
//!
//! Everything here is pure computation over itinerary and profile data;
//! no I/O, no side effects.

use crate::error::{EndpointTag, PlanError};
use crate::models::{DroneProfile, SpeedEnvelope};

/// Fraction of the load-adjusted top speed used for maneuvering phases.
const MIN_SPEED_RATIO: f64 = 0.3;

/// Fraction of the load-adjusted top speed used for cruise; the remainder
/// stays in reserve for emergencies such as wind.
const MAX_SPEED_RATIO: f64 = 0.7;

/// Fraction of the flight-zone ceiling tried first as cruise altitude,
/// to reduce climb cost.
const FLIGHT_ALTITUDE_RATIO: f64 = 0.3;

pub const EARTH_RADIUS_CM: f64 = 637_100_000.0;

/// Derive the (min, max) safe speed pair for the given payload.
///
/// The load-adjusted top speed drops by `speed_decreasing_factor` for every
/// hectogram of unused capacity; the envelope splits it into a maneuvering
/// speed and a cruise speed.
pub fn speed_envelope(weight_hg: i64, profile: &DroneProfile) -> Result<SpeedEnvelope, PlanError> {
    if weight_hg > profile.max_weight_hg {
        return Err(PlanError::WeightExceeded {
            weight_hg,
            limit_hg: profile.max_weight_hg,
        });
    }

    let slack_hg = profile.max_weight_hg - weight_hg;
    let base =
        profile.max_reachable_speed_cm_s as f64 - slack_hg as f64 * profile.speed_decreasing_factor;

    Ok(SpeedEnvelope {
        min_cm_s: (base * MIN_SPEED_RATIO) as i64,
        max_cm_s: (base * MAX_SPEED_RATIO) as i64,
    })
}

/// Pick the cruise altitude for the route.
///
/// A fraction of the ceiling is tried first; when that candidate fails to
/// clear either endpoint the full ceiling is used instead. The returned
/// altitude is always at or above both endpoint heights.
pub fn flight_altitude(
    start_height_cm: i64,
    end_height_cm: i64,
    max_height_cm: i64,
) -> Result<i64, PlanError> {
    if start_height_cm > max_height_cm {
        return Err(PlanError::FlightZoneExceeded {
            point: EndpointTag::Start,
            height_cm: start_height_cm,
            limit_cm: max_height_cm,
        });
    }
    if end_height_cm > max_height_cm {
        return Err(PlanError::FlightZoneExceeded {
            point: EndpointTag::End,
            height_cm: end_height_cm,
            limit_cm: max_height_cm,
        });
    }

    let candidate = (max_height_cm as f64 * FLIGHT_ALTITUDE_RATIO) as i64;
    if candidate <= start_height_cm || candidate <= end_height_cm {
        Ok(max_height_cm)
    } else {
        Ok(candidate)
    }
}

/// Great-circle distance between two points in centimeters, via the
/// haversine formula with a spherical Earth of radius 6371 km.
pub fn great_circle_distance_cm(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> i64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let dphi = (lat2 - lat1).to_radians();
    let dlambda = (lon2 - lon1).to_radians();
    let a = (dphi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (dlambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    (EARTH_RADIUS_CM * c) as i64
}

/// Heading delta between two points, in degrees normalized into `[0, 360)`.
/// A delta of 0 means the end point lies due east on the flat lat/lon grid.
pub fn bearing_delta_deg(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    (lat2 - lat1).atan2(lon2 - lon1).to_degrees().rem_euclid(360.0)
}

/// Distance covered while rotating at the given speed.
///
/// Linear placeholder, not a physical model of the airframe's rotation
/// profile; tune here if that profile is ever characterized.
pub fn radial_travel_cm(speed_cm_s: i64, degrees: f64) -> i64 {
    (speed_cm_s as f64 * degrees.abs() / 1000.0).ceil() as i64
}

/// Time needed to cover `distance_cm` at `speed_cm_s`, in milliseconds.
pub fn duration_ms(speed_cm_s: i64, distance_cm: i64) -> Result<i64, PlanError> {
    if speed_cm_s == 0 {
        return Err(PlanError::InvalidSpeed);
    }
    Ok(((distance_cm as f64).abs() / speed_cm_s as f64 * 1000.0) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> DroneProfile {
        DroneProfile {
            model_name: "SL-1".to_string(),
            max_weight_hg: 80,
            max_reachable_speed_cm_s: 2000,
            speed_decreasing_factor: 10.0,
            total_journey_cm: 1_000_000_000,
        }
    }

    #[test]
    fn speed_envelope_splits_load_adjusted_speed() {
        // base = 2000 - (80 - 50) * 10 = 1700
        let envelope = speed_envelope(50, &profile()).unwrap();
        assert_eq!(envelope.min_cm_s, 510);
        assert_eq!(envelope.max_cm_s, 1190);
    }

    #[test]
    fn speed_envelope_allows_exactly_max_weight() {
        let envelope = speed_envelope(80, &profile()).unwrap();
        assert_eq!(envelope.min_cm_s, 600);
        assert_eq!(envelope.max_cm_s, 1400);
    }

    #[test]
    fn speed_envelope_truncates_fractional_speeds() {
        // base = 2000 - (80 - 20) * 10 = 1400; 1400 * 0.7 computes to just
        // below 980 in f64 and truncates toward zero.
        let envelope = speed_envelope(20, &profile()).unwrap();
        assert_eq!(envelope.min_cm_s, 420);
        assert_eq!(envelope.max_cm_s, 979);
    }

    #[test]
    fn speed_envelope_rejects_excess_weight() {
        let err = speed_envelope(81, &profile()).unwrap_err();
        assert_eq!(
            err,
            PlanError::WeightExceeded {
                weight_hg: 81,
                limit_hg: 80
            }
        );
    }

    #[test]
    fn flight_altitude_prefers_low_cruise() {
        assert_eq!(flight_altitude(100, 100, 5000).unwrap(), 1500);
    }

    #[test]
    fn flight_altitude_falls_back_to_ceiling() {
        // Candidate 1500 does not clear the 2000 cm endpoint.
        assert_eq!(flight_altitude(2000, 100, 5000).unwrap(), 5000);
        assert_eq!(flight_altitude(100, 1500, 5000).unwrap(), 5000);
    }

    #[test]
    fn flight_altitude_clears_both_endpoints() {
        for (start, end, max) in [(0, 0, 1000), (250, 400, 3000), (2999, 10, 3000)] {
            let altitude = flight_altitude(start, end, max).unwrap();
            assert!(altitude >= start && altitude >= end);
        }
    }

    #[test]
    fn flight_altitude_rejects_start_above_ceiling() {
        let err = flight_altitude(5001, 100, 5000).unwrap_err();
        assert_eq!(
            err,
            PlanError::FlightZoneExceeded {
                point: EndpointTag::Start,
                height_cm: 5001,
                limit_cm: 5000
            }
        );
    }

    #[test]
    fn flight_altitude_rejects_end_above_ceiling() {
        let err = flight_altitude(100, 6000, 5000).unwrap_err();
        assert_eq!(
            err,
            PlanError::FlightZoneExceeded {
                point: EndpointTag::End,
                height_cm: 6000,
                limit_cm: 5000
            }
        );
    }

    #[test]
    fn distance_of_one_degree_latitude() {
        // ~111.19 km between these points
        let d = great_circle_distance_cm(0.0, 0.0, 1.0, 0.0);
        assert!((d - 11_119_400).abs() < 10_000, "got {d}");
    }

    #[test]
    fn distance_of_same_point_is_zero() {
        assert_eq!(great_circle_distance_cm(45.464, 9.19, 45.464, 9.19), 0);
    }

    #[test]
    fn bearing_is_normalized() {
        let pairs = [
            (45.0, 9.0, 45.001, 9.001),
            (45.0, 9.0, 44.999, 9.001),
            (45.0, 9.0, 44.999, 8.999),
            (45.0, 9.0, 45.001, 8.999),
            (0.0, 0.0, 0.0, 0.0),
        ];
        for (lat1, lon1, lat2, lon2) in pairs {
            let b = bearing_delta_deg(lat1, lon1, lat2, lon2);
            assert!((0.0..360.0).contains(&b), "bearing {b} out of range");
        }
    }

    #[test]
    fn bearing_cardinal_directions() {
        assert_eq!(bearing_delta_deg(45.0, 9.0, 45.0, 9.001), 0.0);
        assert!((bearing_delta_deg(45.0, 9.0, 45.001, 9.0) - 90.0).abs() < 1e-9);
        assert!((bearing_delta_deg(45.0, 9.0, 45.0, 8.999) - 180.0).abs() < 1e-9);
        assert!((bearing_delta_deg(45.0, 9.0, 44.999, 9.0) - 270.0).abs() < 1e-9);
    }

    #[test]
    fn radial_travel_rounds_up() {
        // 420 * 45 / 1000 = 18.9
        assert_eq!(radial_travel_cm(420, 45.0), 19);
        assert_eq!(radial_travel_cm(420, -45.0), 19);
        assert_eq!(radial_travel_cm(420, 0.0), 0);
    }

    #[test]
    fn duration_uses_absolute_distance() {
        assert_eq!(duration_ms(420, 1400).unwrap(), 3333);
        assert_eq!(duration_ms(420, -1400).unwrap(), 3333);
    }

    #[test]
    fn duration_rejects_zero_speed() {
        assert_eq!(duration_ms(0, 1400).unwrap_err(), PlanError::InvalidSpeed);
    }
}
