//! Collaborator seams: the physical drone, its telemetry, and the compiler.
//!
//! Each trait is one external system. Their transports and internals are out
//! of scope here; the in-memory versions in [`crate::sim`] stand in for them
//! in tests and demos.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use skylift_core::models::{ArgKind, CommandProgram, DroneProfile};

use crate::error::{CapabilityFault, CompileError};

/// A named actuation operation the drone exposes. Closed set: adding an
/// operation means adding a variant here and a row to the capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Maneuver {
    Up,
    Down,
    Forward,
    Rotate,
}

/// One row of the drone's capability table: the command verb as it appears
/// in compiled programs, the operation it resolves to, and the numeric kind
/// the operation expects for its argument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapabilitySpec {
    pub name: String,
    pub maneuver: Maneuver,
    pub arg_kind: ArgKind,
}

/// Command argument after coercion to the capability's declared kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandArg {
    Integer(i64),
    Float(f64),
}

/// The physical drone capability interface.
#[async_trait]
pub trait DroneInterface: Send + Sync {
    /// Introspect the supported maneuvers. Called once, at session start,
    /// to build the dispatch table.
    fn capability_table(&self) -> Vec<CapabilitySpec>;

    /// Perform one maneuver, resolving when it physically completes.
    /// Callers must never have two of these in flight at once.
    async fn actuate(
        &self,
        maneuver: Maneuver,
        speed_cm_s: i64,
        arg: CommandArg,
    ) -> Result<(), CapabilityFault>;
}

/// The drone telemetry interface.
#[async_trait]
pub trait TelemetryInterface: Send + Sync {
    /// Fetch the drone's capability profile. One round trip per session.
    async fn drone_profile(&self) -> anyhow::Result<DroneProfile>;
}

/// The external plan compiler.
#[async_trait]
pub trait PlanCompiler: Send + Sync {
    /// Compile rendered plan text into an ordered command program.
    async fn compile(&self, plan_text: &str) -> Result<CommandProgram, CompileError>;
}
