//! Planning-time validation errors.

use std::fmt;

use thiserror::Error;

/// Which itinerary endpoint violated the flight-zone ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointTag {
    Start,
    End,
}

impl fmt::Display for EndpointTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EndpointTag::Start => write!(f, "start"),
            EndpointTag::End => write!(f, "end"),
        }
    }
}

/// Validation failures detected during planning, before any command is
/// produced. All of them abort the planning call; no partial plan escapes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("weight of {weight_hg} hg exceeds max drone capacity of {limit_hg} hg")]
    WeightExceeded { weight_hg: i64, limit_hg: i64 },

    #[error("the {point} point elevation of {height_cm} cm exceeds the flight zone limit of {limit_cm} cm")]
    FlightZoneExceeded {
        point: EndpointTag,
        height_cm: i64,
        limit_cm: i64,
    },

    #[error("drone autonomy of {limit_cm} cm is insufficient for an itinerary of {computed_cm} cm")]
    InsufficientAutonomy { limit_cm: i64, computed_cm: i64 },

    #[error("cannot compute a phase duration at zero speed")]
    InvalidSpeed,
}
