//! Resolves compiled commands to drone capabilities.

use std::collections::HashMap;

use skylift_core::models::{ArgKind, Command};

use crate::error::{CommandFailure, DispatchError};
use crate::interfaces::{CapabilitySpec, CommandArg, DroneInterface, Maneuver};

/// Maps command names to drone capabilities.
///
/// Built once per session from the drone's capability table and owned by the
/// session; there is no process-wide dispatch state. Registering a new
/// capability is adding a table row, not changing the dispatch logic.
#[derive(Debug, Clone, Default)]
pub struct CapabilityDispatcher {
    table: HashMap<String, CapabilitySpec>,
}

impl CapabilityDispatcher {
    pub fn new(specs: Vec<CapabilitySpec>) -> Self {
        let table = specs
            .into_iter()
            .map(|spec| (spec.name.clone(), spec))
            .collect();
        Self { table }
    }

    /// Build the table by introspecting the drone, a one-time cost paid
    /// before first use.
    pub fn from_drone(drone: &dyn DroneInterface) -> Self {
        Self::new(drone.capability_table())
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Resolve a command to its maneuver and coerced argument without
    /// touching the drone.
    pub fn resolve(&self, command: &Command) -> Result<(Maneuver, CommandArg), DispatchError> {
        let spec = self
            .table
            .get(&command.name)
            .ok_or_else(|| DispatchError::UnknownCommand(command.name.clone()))?;
        let arg = coerce(command.arg, spec.arg_kind).ok_or(DispatchError::ArgumentCoercion {
            name: command.name.clone(),
            kind: spec.arg_kind,
        })?;
        Ok((spec.maneuver, arg))
    }

    /// Resolve the command and invoke the capability, awaiting its
    /// completion.
    pub async fn invoke(
        &self,
        command: &Command,
        drone: &dyn DroneInterface,
    ) -> Result<(), CommandFailure> {
        let (maneuver, arg) = self.resolve(command)?;
        drone.actuate(maneuver, command.speed, arg).await?;
        Ok(())
    }
}

fn coerce(value: f64, kind: ArgKind) -> Option<CommandArg> {
    if !value.is_finite() {
        return None;
    }
    match kind {
        ArgKind::Integer => {
            // i64::MAX as f64 rounds up to 2^63, one past the last valid
            // value, so the upper bound must stay exclusive or the cast
            // saturates to a different number.
            if value.fract() == 0.0 && (i64::MIN as f64) <= value && value < i64::MAX as f64 {
                Some(CommandArg::Integer(value as i64))
            } else {
                None
            }
        }
        ArgKind::Float => Some(CommandArg::Float(value)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dispatcher() -> CapabilityDispatcher {
        CapabilityDispatcher::new(vec![
            CapabilitySpec {
                name: "up".to_string(),
                maneuver: Maneuver::Up,
                arg_kind: ArgKind::Integer,
            },
            CapabilitySpec {
                name: "rotate".to_string(),
                maneuver: Maneuver::Rotate,
                arg_kind: ArgKind::Float,
            },
        ])
    }

    fn command(name: &str, arg: f64) -> Command {
        Command {
            name: name.to_string(),
            speed: 420,
            arg,
        }
    }

    #[test]
    fn resolves_integer_argument() {
        let (maneuver, arg) = dispatcher().resolve(&command("up", 3333.0)).unwrap();
        assert_eq!(maneuver, Maneuver::Up);
        assert_eq!(arg, CommandArg::Integer(3333));
    }

    #[test]
    fn resolves_float_argument() {
        let (maneuver, arg) = dispatcher().resolve(&command("rotate", 45.5)).unwrap();
        assert_eq!(maneuver, Maneuver::Rotate);
        assert_eq!(arg, CommandArg::Float(45.5));
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = dispatcher().resolve(&command("hover", 1.0)).unwrap_err();
        assert_eq!(err, DispatchError::UnknownCommand("hover".to_string()));
    }

    #[test]
    fn fractional_value_cannot_coerce_to_integer() {
        let err = dispatcher().resolve(&command("up", 3333.5)).unwrap_err();
        assert_eq!(
            err,
            DispatchError::ArgumentCoercion {
                name: "up".to_string(),
                kind: ArgKind::Integer,
            }
        );
    }

    #[test]
    fn value_past_integer_range_cannot_coerce() {
        // 2^63 has no i64 counterpart; a saturating cast would silently
        // substitute i64::MAX.
        let err = dispatcher()
            .resolve(&command("up", 9_223_372_036_854_775_808.0))
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::ArgumentCoercion {
                name: "up".to_string(),
                kind: ArgKind::Integer,
            }
        );
    }

    #[test]
    fn non_finite_value_cannot_coerce() {
        assert!(dispatcher().resolve(&command("rotate", f64::NAN)).is_err());
        assert!(dispatcher()
            .resolve(&command("up", f64::INFINITY))
            .is_err());
    }
}
