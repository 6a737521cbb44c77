//! Core data models for itinerary planning.

use serde::{Deserialize, Serialize};

/// A point on the globe with its elevation above sea level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    /// Elevation above sea level in centimeters
    pub height_cm: i64,
}

/// A point-to-point flight request. Read-only input to planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub start: Coordinates,
    pub end: Coordinates,
    /// Flight-zone altitude ceiling in centimeters above sea level
    pub max_height_cm: i64,
    /// Payload mass in hectograms
    pub weight_hg: i64,
}

/// Capability data reported by the drone, fetched once per session and
/// immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DroneProfile {
    pub model_name: String,
    /// Maximum payload the drone can lift, in hectograms
    pub max_weight_hg: i64,
    /// Top speed at zero load slack, in cm/s
    pub max_reachable_speed_cm_s: i64,
    /// Speed lost per hectogram of unused capacity, in cm/s
    pub speed_decreasing_factor: f64,
    /// Maximum cumulative travel the power source supports, in centimeters
    pub total_journey_cm: i64,
}

/// Safe speed pair derived from payload weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedEnvelope {
    /// Maneuvering speed for ascend, rotate and descend phases, in cm/s
    pub min_cm_s: i64,
    /// Cruise speed, keeping headroom in reserve for emergencies, in cm/s
    pub max_cm_s: i64,
}

/// Numeric kind a capability expects for its argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgKind {
    Integer,
    Float,
}

/// A single low-level actuation command produced by the plan compiler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// Verb identifying a drone capability
    pub name: String,
    /// Actuation speed in cm/s
    pub speed: i64,
    /// Capability argument; its numeric kind depends on the capability
    pub arg: f64,
}

/// Ordered command sequence. The order is the physical maneuver sequence and
/// must be preserved end-to-end.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandProgram(Vec<Command>);

impl CommandProgram {
    pub fn new(commands: Vec<Command>) -> Self {
        Self(commands)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn commands(&self) -> &[Command] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Command> {
        self.0.iter()
    }

    /// Decode a compiler's JSON output (`[{"name", "speed", "arg"}, ...]`).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_decodes_compiler_json_in_order() {
        let json = r#"[
            {"name": "up", "speed": 420, "arg": 3333.0},
            {"name": "rotate", "speed": 420, "arg": 45.0}
        ]"#;
        let program = CommandProgram::from_json(json).unwrap();
        assert_eq!(program.len(), 2);
        assert_eq!(program.commands()[0].name, "up");
        assert_eq!(program.commands()[1].name, "rotate");
        assert_eq!(program.commands()[1].arg, 45.0);
    }
}
