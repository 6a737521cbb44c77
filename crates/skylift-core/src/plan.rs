//! Flight-plan emission: ordered phase directives plus route accounting.
//!
//! A [`FlightPlan`] is the intermediate representation between an
//! [`Itinerary`] and a compiled command program. Its rendered text is the
//! contract with the external plan compiler.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::models::{DroneProfile, Itinerary};
use crate::trajectory;

/// Placeholder billing figure carried in the plan header.
const COST_DROPS: u32 = 100;

/// Plans are scheduled this far ahead until real slotting exists.
const SCHEDULE_LEAD_MS: i64 = 10_000_000;

/// One maneuver phase of a planned flight, in execution order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Ascend {
        speed_cm_s: i64,
        duration_ms: i64,
        distance_cm: i64,
    },
    Rotate {
        speed_cm_s: i64,
        degrees: f64,
        distance_cm: i64,
    },
    Forward {
        speed_cm_s: i64,
        duration_ms: i64,
        distance_cm: i64,
    },
    Descend {
        speed_cm_s: i64,
        duration_ms: i64,
        distance_cm: i64,
    },
}

impl Phase {
    /// Distance this phase contributes to the total route.
    pub fn distance_cm(&self) -> i64 {
        match self {
            Phase::Ascend { distance_cm, .. }
            | Phase::Rotate { distance_cm, .. }
            | Phase::Forward { distance_cm, .. }
            | Phase::Descend { distance_cm, .. } => *distance_cm,
        }
    }

    /// Directive line as the external compiler expects it.
    pub fn directive(&self) -> String {
        match self {
            Phase::Ascend {
                speed_cm_s,
                duration_ms,
                ..
            } => format!("up at {speed_cm_s} cm/sec for {duration_ms} milliseconds"),
            Phase::Rotate {
                speed_cm_s,
                degrees,
                ..
            } => format!("rotate at {speed_cm_s} cm/sec {degrees} degrees"),
            Phase::Forward {
                speed_cm_s,
                duration_ms,
                ..
            } => format!("forward at {speed_cm_s} cm/sec for {duration_ms} milliseconds"),
            Phase::Descend {
                speed_cm_s,
                duration_ms,
                ..
            } => format!("down at {speed_cm_s} cm/sec for {duration_ms} milliseconds"),
        }
    }
}

/// Ordered flight-plan representation emitted from an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightPlan {
    pub scheduled_at: DateTime<Utc>,
    pub model_name: String,
    pub cost_drops: u32,
    /// Phases in physical maneuver order
    pub phases: Vec<Phase>,
    /// Sum of all phase distances in centimeters
    pub total_route_cm: i64,
}

impl FlightPlan {
    /// Plan the itinerary against the drone's profile.
    ///
    /// Phase order is fixed: ascend, rotate to bearing (when the bearing is
    /// non-zero), forward cruise, rotate back to north (same condition),
    /// descend. Fails before emitting anything when the payload, either
    /// endpoint elevation, or the total route violates a profile limit.
    pub fn build(itinerary: &Itinerary, profile: &DroneProfile) -> Result<Self, PlanError> {
        let speeds = trajectory::speed_envelope(itinerary.weight_hg, profile)?;
        let altitude_cm = trajectory::flight_altitude(
            itinerary.start.height_cm,
            itinerary.end.height_cm,
            itinerary.max_height_cm,
        )?;

        let mut phases = Vec::with_capacity(5);
        let mut total_route_cm = 0_i64;

        let climb_cm = altitude_cm - itinerary.start.height_cm;
        total_route_cm += climb_cm;
        phases.push(Phase::Ascend {
            speed_cm_s: speeds.min_cm_s,
            duration_ms: trajectory::duration_ms(speeds.min_cm_s, climb_cm)?,
            distance_cm: climb_cm,
        });

        let bearing = trajectory::bearing_delta_deg(
            itinerary.start.latitude,
            itinerary.start.longitude,
            itinerary.end.latitude,
            itinerary.end.longitude,
        );
        if bearing > 0.0 {
            let distance_cm = trajectory::radial_travel_cm(speeds.min_cm_s, bearing);
            total_route_cm += distance_cm;
            phases.push(Phase::Rotate {
                speed_cm_s: speeds.min_cm_s,
                degrees: bearing,
                distance_cm,
            });
        }

        let cruise_cm = trajectory::great_circle_distance_cm(
            itinerary.start.latitude,
            itinerary.start.longitude,
            itinerary.end.latitude,
            itinerary.end.longitude,
        );
        total_route_cm += cruise_cm;
        phases.push(Phase::Forward {
            speed_cm_s: speeds.max_cm_s,
            duration_ms: trajectory::duration_ms(speeds.max_cm_s, cruise_cm)?,
            distance_cm: cruise_cm,
        });

        if bearing > 0.0 {
            let back = 360.0 - bearing;
            let distance_cm = trajectory::radial_travel_cm(speeds.min_cm_s, back);
            total_route_cm += distance_cm;
            phases.push(Phase::Rotate {
                speed_cm_s: speeds.min_cm_s,
                degrees: back,
                distance_cm,
            });
        }

        let descent_cm = altitude_cm - itinerary.end.height_cm;
        total_route_cm += descent_cm;
        phases.push(Phase::Descend {
            speed_cm_s: speeds.min_cm_s,
            duration_ms: trajectory::duration_ms(speeds.min_cm_s, descent_cm)?,
            distance_cm: descent_cm,
        });

        if total_route_cm > profile.total_journey_cm {
            return Err(PlanError::InsufficientAutonomy {
                limit_cm: profile.total_journey_cm,
                computed_cm: total_route_cm,
            });
        }

        Ok(FlightPlan {
            scheduled_at: Utc::now() + Duration::milliseconds(SCHEDULE_LEAD_MS),
            model_name: profile.model_name.clone(),
            cost_drops: COST_DROPS,
            phases,
            total_route_cm,
        })
    }

    /// Render the plan text handed to the external compiler.
    pub fn render(&self) -> String {
        let directives: Vec<String> = self
            .phases
            .iter()
            .map(|phase| format!("\t\t{}", phase.directive()))
            .collect();
        format!(
            "scheduled skylift flight {{\n\tdate: {},\n\tmodel: \"{}\",\n\tcost: {} drops,\n\tcommands: [\n{}\n\t]\n}}",
            self.scheduled_at.format("%d/%m/%Y %H:%M:%S"),
            self.model_name,
            self.cost_drops,
            directives.join(",\n"),
        )
    }
}
