//! Strictly sequential command execution.

use skylift_core::models::CommandProgram;

use crate::dispatch::CapabilityDispatcher;
use crate::error::{FlightError, StateError};
use crate::interfaces::DroneInterface;

/// Lifecycle of one command program run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EngineState {
    #[default]
    NotReady,
    Ready,
    Running,
    Completed,
    Halted,
}

/// Walks a command program one command at a time.
///
/// The completion of command `i` must resolve before command `i + 1` is
/// dispatched; exactly one capability call is in flight at any moment,
/// since overlapping maneuvers are physically unsafe. A program is consumed
/// by a single run; there is no replay of a partially executed program.
#[derive(Debug, Default)]
pub struct ExecutionEngine {
    state: EngineState,
    program: Option<CommandProgram>,
}

impl ExecutionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    /// `NotReady -> Ready`. Requires the drone profile fetch to have
    /// resolved and a non-empty program.
    pub fn arm(&mut self, program: CommandProgram, profile_ready: bool) -> Result<(), StateError> {
        if !profile_ready {
            return Err(StateError::DroneDataNotReady);
        }
        if program.is_empty() {
            return Err(StateError::EmptyProgram);
        }
        self.program = Some(program);
        self.state = EngineState::Ready;
        Ok(())
    }

    /// Run the armed program to completion, halting on the first failure.
    ///
    /// On success returns the number of executed commands. On failure the
    /// engine is `Halted`, no further command is issued, and the error
    /// carries how many commands completed before the halt.
    pub async fn run(
        &mut self,
        dispatcher: &CapabilityDispatcher,
        drone: &dyn DroneInterface,
    ) -> Result<usize, FlightError> {
        let program = match (self.state, self.program.take()) {
            (EngineState::Ready, Some(program)) => program,
            _ => return Err(StateError::EmptyProgram.into()),
        };

        self.state = EngineState::Running;
        for (index, command) in program.iter().enumerate() {
            tracing::debug!("dispatching command {} ({})", index, command.name);
            if let Err(failure) = dispatcher.invoke(command, drone).await {
                self.state = EngineState::Halted;
                tracing::error!(
                    "flight halted at command {} ({}): {}",
                    index,
                    command.name,
                    failure
                );
                return Err(FlightError::Halted {
                    name: command.name.clone(),
                    completed: index,
                    source: failure,
                });
            }
        }

        self.state = EngineState::Completed;
        Ok(program.len())
    }
}
