pub mod error;
pub mod models;
pub mod plan;
pub mod trajectory;

pub use error::{EndpointTag, PlanError};
pub use models::{
    ArgKind, Command, CommandProgram, Coordinates, DroneProfile, Itinerary, SpeedEnvelope,
};
pub use plan::{FlightPlan, Phase};
pub use trajectory::{bearing_delta_deg, great_circle_distance_cm};
