//! Flight session side of skylift: collaborator seams, capability dispatch,
//! and strictly sequential execution of compiled command programs.

pub mod dispatch;
pub mod error;
pub mod executor;
pub mod interfaces;
pub mod session;
pub mod sim;

pub use dispatch::CapabilityDispatcher;
pub use error::{
    CapabilityFault, CommandFailure, CompileError, DispatchError, FlightError, StateError,
};
pub use executor::{EngineState, ExecutionEngine};
pub use interfaces::{
    CapabilitySpec, CommandArg, DroneInterface, Maneuver, PlanCompiler, TelemetryInterface,
};
pub use session::FlightSession;
