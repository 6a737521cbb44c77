//! One flight session: profile fetch, planning, compilation, execution.

use std::sync::Arc;

use skylift_core::models::{CommandProgram, DroneProfile, Itinerary};
use skylift_core::plan::FlightPlan;

use crate::dispatch::CapabilityDispatcher;
use crate::error::{FlightError, StateError};
use crate::executor::ExecutionEngine;
use crate::interfaces::{DroneInterface, PlanCompiler, TelemetryInterface};

/// A single-drone flight session.
///
/// Owns the three collaborators, the drone profile once it has resolved, and
/// the current command program. One logical flow per session; nothing here
/// is shared across sessions.
pub struct FlightSession {
    drone: Arc<dyn DroneInterface>,
    telemetry: Arc<dyn TelemetryInterface>,
    compiler: Arc<dyn PlanCompiler>,
    dispatcher: CapabilityDispatcher,
    profile: Option<DroneProfile>,
    program: Option<CommandProgram>,
}

impl FlightSession {
    /// Build a session around the collaborators. The dispatch table is built
    /// here, once, by introspecting the drone.
    pub fn new(
        drone: Arc<dyn DroneInterface>,
        telemetry: Arc<dyn TelemetryInterface>,
        compiler: Arc<dyn PlanCompiler>,
    ) -> Self {
        let dispatcher = CapabilityDispatcher::from_drone(drone.as_ref());
        tracing::debug!("capability table built with {} entries", dispatcher.len());
        Self {
            drone,
            telemetry,
            compiler,
            dispatcher,
            profile: None,
            program: None,
        }
    }

    /// One-shot profile fetch; a no-op once the profile has resolved.
    pub async fn resolve_profile(&mut self) -> anyhow::Result<()> {
        if self.profile.is_some() {
            return Ok(());
        }
        let profile = self.telemetry.drone_profile().await?;
        tracing::info!("drone profile resolved for model {:?}", profile.model_name);
        self.profile = Some(profile);
        Ok(())
    }

    pub fn profile(&self) -> Option<&DroneProfile> {
        self.profile.as_ref()
    }

    /// Plan the itinerary and compile it into a fresh command program,
    /// replacing whatever program a previous call produced.
    ///
    /// Requires the profile to have resolved; never block-waits for it.
    pub async fn set_itinerary(&mut self, itinerary: &Itinerary) -> Result<FlightPlan, FlightError> {
        let profile = self
            .profile
            .as_ref()
            .ok_or(StateError::DroneDataNotReady)?;

        let plan = FlightPlan::build(itinerary, profile)?;
        tracing::info!(
            "planned {} phases, total route {} cm",
            plan.phases.len(),
            plan.total_route_cm
        );

        let plan_text = plan.render();
        tracing::debug!("rendered plan:\n{plan_text}");
        let program = self.compiler.compile(&plan_text).await?;
        tracing::info!("compiled program with {} commands", program.len());

        self.program = Some(program);
        Ok(plan)
    }

    /// Execute the current program strictly in order, consuming it.
    ///
    /// Returns the number of executed commands. A halt is an error carrying
    /// the progress point; already-issued maneuvers are not undone.
    pub async fn fly(&mut self) -> Result<usize, FlightError> {
        if self.profile.is_none() {
            return Err(StateError::DroneDataNotReady.into());
        }
        let program = self.program.take().ok_or(StateError::EmptyProgram)?;

        let mut engine = ExecutionEngine::new();
        engine.arm(program, true)?;
        let completed = engine.run(&self.dispatcher, self.drone.as_ref()).await?;
        tracing::info!("all {completed} commands executed, drone landed at destination");
        Ok(completed)
    }
}
