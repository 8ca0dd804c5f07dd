/*!
Character mover settings and tolerances.

These constants centralize the parameters used by the three sweeps of a
movement step. `MoverSettings::default()` uses them as-is; per-actor tuning
goes through [`MoverSettings`] and is validated once at construction.

Notes
- Distances are in meters.
- The ground probe must reach at least as far down as the lift it starts
  from, otherwise it can never see the ground the actor stands on.
*/

use crate::error::ControllerError;

/// Upward bias applied to the query transform of the ground and horizontal
/// sweeps, so the capsule does not start inside the floor it stands on.
pub const PROBE_LIFT: f32 = 0.1;

/// Length of the downward ground probe. Slightly longer than `PROBE_LIFT`
/// so contact at (or just under) the original height is detected.
pub const GROUND_PROBE_DISTANCE: f32 = 0.105;

/// Hits at or below this distance count as "already touching".
pub const CONTACT_EPSILON: f32 = 1.0e-3;

/// Tunable tolerances for a [`CharacterMover`](crate::CharacterMover).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoverSettings {
    pub probe_lift: f32,
    pub ground_probe_distance: f32,
    pub contact_epsilon: f32,
}

impl Default for MoverSettings {
    fn default() -> Self {
        Self {
            probe_lift: PROBE_LIFT,
            ground_probe_distance: GROUND_PROBE_DISTANCE,
            contact_epsilon: CONTACT_EPSILON,
        }
    }
}

impl MoverSettings {
    pub fn validate(&self) -> Result<(), ControllerError> {
        if !(self.probe_lift.is_finite()
            && self.ground_probe_distance.is_finite()
            && self.contact_epsilon.is_finite())
        {
            return Err(ControllerError::InvalidSettings(
                "tolerances must be finite",
            ));
        }
        if self.probe_lift < 0.0 || self.contact_epsilon < 0.0 {
            return Err(ControllerError::InvalidSettings(
                "probe lift and contact epsilon must be non-negative",
            ));
        }
        if self.ground_probe_distance <= 0.0 || self.ground_probe_distance < self.probe_lift {
            return Err(ControllerError::InvalidSettings(
                "ground probe must be positive and reach below the probe lift",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(MoverSettings::default().validate().is_ok());
        assert!(GROUND_PROBE_DISTANCE > PROBE_LIFT);
    }

    #[test]
    fn rejects_probe_shorter_than_lift() {
        let settings = MoverSettings {
            ground_probe_distance: 0.05,
            ..MoverSettings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(ControllerError::InvalidSettings(_))
        ));
    }

    #[test]
    fn rejects_negative_and_non_finite_values() {
        let negative = MoverSettings {
            contact_epsilon: -1.0,
            ..MoverSettings::default()
        };
        assert!(negative.validate().is_err());

        let nan = MoverSettings {
            probe_lift: f32::NAN,
            ..MoverSettings::default()
        };
        assert!(nan.validate().is_err());
    }
}
