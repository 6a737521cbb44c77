//! Error taxonomy for dispatch, execution, and session flow.
//!
//! The kinds stay distinguishable end-to-end so a caller can tell "the plan
//! was invalid" from "the compiler failed" from "the drone rejected a
//! command". None of them is retried anywhere: planning errors abort the
//! planning call, compile errors abort setup, and dispatch or capability
//! failures halt the flight.

use skylift_core::error::PlanError;
use skylift_core::models::ArgKind;
use thiserror::Error;

/// A command could not be resolved to a drone capability.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    #[error("argument of command {name:?} is not representable as {kind:?}")]
    ArgumentCoercion { name: String, kind: ArgKind },
}

/// Execution precondition that was not met; checked before any command is
/// issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("drone profile has not arrived yet")]
    DroneDataNotReady,

    #[error("no command program is set; plan an itinerary first")]
    EmptyProgram,
}

/// Opaque failure from the external plan compiler. Its internals are never
/// interpreted beyond being distinguishable from the other kinds.
#[derive(Debug, Error)]
#[error("plan compilation failed")]
pub struct CompileError(#[source] pub anyhow::Error);

/// A maneuver the airframe reported as failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CapabilityFault(pub String);

/// Why a single command failed during execution.
#[derive(Debug, Error)]
pub enum CommandFailure {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Capability(#[from] CapabilityFault),
}

/// Failure of a whole flight operation.
#[derive(Debug, Error)]
pub enum FlightError {
    #[error(transparent)]
    Plan(#[from] PlanError),

    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    State(#[from] StateError),

    /// Execution stopped at `name`; the `completed` commands before it were
    /// already issued and are not undone.
    #[error("flight halted at command {name:?} after {completed} completed commands: {source}")]
    Halted {
        name: String,
        completed: usize,
        #[source]
        source: CommandFailure,
    },
}
