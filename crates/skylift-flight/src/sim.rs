//! In-memory collaborators for tests and demos.

use std::sync::Mutex;

use async_trait::async_trait;
use skylift_core::models::{ArgKind, Command, CommandProgram, DroneProfile};

use crate::error::{CapabilityFault, CompileError};
use crate::interfaces::{
    CapabilitySpec, CommandArg, DroneInterface, Maneuver, PlanCompiler, TelemetryInterface,
};

/// Record of one actuation the simulated drone performed.
#[derive(Debug, Clone, PartialEq)]
pub struct ActuationRecord {
    pub maneuver: Maneuver,
    pub speed_cm_s: i64,
    pub arg: CommandArg,
}

/// Simulated airframe that records every actuation in order and can be
/// scripted to fail a particular maneuver.
#[derive(Debug, Default)]
pub struct SimDrone {
    log: Mutex<Vec<ActuationRecord>>,
    fault_on: Option<Maneuver>,
}

impl SimDrone {
    pub fn new() -> Self {
        Self::default()
    }

    /// A drone whose given maneuver fails with a capability fault.
    pub fn failing_on(maneuver: Maneuver) -> Self {
        Self {
            log: Mutex::new(Vec::new()),
            fault_on: Some(maneuver),
        }
    }

    /// Everything actuated so far, in dispatch order.
    pub fn actuations(&self) -> Vec<ActuationRecord> {
        self.log.lock().expect("actuation log lock").clone()
    }
}

#[async_trait]
impl DroneInterface for SimDrone {
    fn capability_table(&self) -> Vec<CapabilitySpec> {
        vec![
            CapabilitySpec {
                name: "up".to_string(),
                maneuver: Maneuver::Up,
                arg_kind: ArgKind::Integer,
            },
            CapabilitySpec {
                name: "down".to_string(),
                maneuver: Maneuver::Down,
                arg_kind: ArgKind::Integer,
            },
            CapabilitySpec {
                name: "forward".to_string(),
                maneuver: Maneuver::Forward,
                arg_kind: ArgKind::Integer,
            },
            CapabilitySpec {
                name: "rotate".to_string(),
                maneuver: Maneuver::Rotate,
                arg_kind: ArgKind::Float,
            },
        ]
    }

    async fn actuate(
        &self,
        maneuver: Maneuver,
        speed_cm_s: i64,
        arg: CommandArg,
    ) -> Result<(), CapabilityFault> {
        if self.fault_on == Some(maneuver) {
            return Err(CapabilityFault(format!(
                "simulated {maneuver:?} failure"
            )));
        }
        self.log.lock().expect("actuation log lock").push(ActuationRecord {
            maneuver,
            speed_cm_s,
            arg,
        });
        Ok(())
    }
}

/// Canned telemetry source.
#[derive(Debug, Clone)]
pub struct SimTelemetry {
    profile: DroneProfile,
}

impl SimTelemetry {
    pub fn new(profile: DroneProfile) -> Self {
        Self { profile }
    }
}

#[async_trait]
impl TelemetryInterface for SimTelemetry {
    async fn drone_profile(&self) -> anyhow::Result<DroneProfile> {
        Ok(self.profile.clone())
    }
}

/// Reference compiler for the directive grammar.
///
/// Parses the command block of a rendered plan and answers over the same
/// JSON wire shape a remote compiler returns, decoded through
/// [`CommandProgram::from_json`]. Real deployments plug a remote compiler in
/// behind [`PlanCompiler`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimCompiler;

#[async_trait]
impl PlanCompiler for SimCompiler {
    async fn compile(&self, plan_text: &str) -> Result<CommandProgram, CompileError> {
        let commands = parse_directives(plan_text).map_err(CompileError)?;
        let wire = serde_json::to_string(&commands)
            .map_err(|err| CompileError(err.into()))?;
        CommandProgram::from_json(&wire).map_err(|err| CompileError(err.into()))
    }
}

fn parse_directives(plan_text: &str) -> anyhow::Result<Vec<Command>> {
    let mut commands = Vec::new();
    let mut in_commands = false;
    for raw in plan_text.lines() {
        let line = raw.trim().trim_end_matches(',');
        if line.starts_with("commands: [") {
            in_commands = true;
            continue;
        }
        if !in_commands || line.is_empty() {
            continue;
        }
        if line.starts_with(']') {
            break;
        }
        commands.push(parse_directive(line)?);
    }
    if commands.is_empty() {
        anyhow::bail!("plan carries no command directives");
    }
    Ok(commands)
}

fn parse_directive(line: &str) -> anyhow::Result<Command> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    match tokens.as_slice() {
        // e.g. "up at 420 cm/sec for 3333 milliseconds"
        [name, "at", speed, "cm/sec", "for", duration, "milliseconds"] => Ok(Command {
            name: (*name).to_string(),
            speed: speed.parse()?,
            arg: duration.parse()?,
        }),
        // e.g. "rotate at 420 cm/sec 45 degrees"
        [name, "at", speed, "cm/sec", degrees, "degrees"] => Ok(Command {
            name: (*name).to_string(),
            speed: speed.parse()?,
            arg: degrees.parse()?,
        }),
        _ => anyhow::bail!("unrecognized directive: {line}"),
    }
}
