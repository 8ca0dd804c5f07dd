use crate::{
    capsule::{Capsule, ColliderShape},
    error::ControllerError,
    query::CollisionQuery,
    settings::MoverSettings,
    slide::{SweepOutcome, VerticalOutcome, split_displacement},
    types::{SweepHit, Transform, UnitVec3, Vec3},
};

/// Output of a single [`CharacterMover::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepResult {
    /// Resolved actor position (feet, world space).
    pub position: Vec3,
    /// Whether the ground probe found support under the starting position.
    pub is_touching_ground: bool,
    pub horizontal: SweepOutcome,
    pub vertical: VerticalOutcome,
}

/// Kinematic capsule mover for one actor.
///
/// Owns the actor's capsule and the collider shape derived from it, plus the
/// ground-contact flag of the last step. World geometry is never owned: every
/// call borrows a [`CollisionQuery`].
#[derive(Clone, Debug)]
pub struct CharacterMover {
    capsule: Capsule,
    collider_shape: ColliderShape,
    settings: MoverSettings,
    is_touching_ground: bool,
}

impl CharacterMover {
    pub fn new(capsule: Capsule) -> Self {
        Self::from_parts(capsule, MoverSettings::default())
    }

    pub fn with_settings(
        capsule: Capsule,
        settings: MoverSettings,
    ) -> Result<Self, ControllerError> {
        settings.validate()?;
        Ok(Self::from_parts(capsule, settings))
    }

    fn from_parts(capsule: Capsule, settings: MoverSettings) -> Self {
        log::debug!(
            "character mover: radius={} half_height={} {:?}",
            capsule.radius(),
            capsule.half_height(),
            settings
        );
        Self {
            capsule,
            collider_shape: ColliderShape::from_capsule(capsule),
            settings,
            is_touching_ground: false,
        }
    }

    #[inline]
    pub fn capsule(&self) -> Capsule {
        self.capsule
    }

    #[inline]
    pub fn collider_shape(&self) -> &ColliderShape {
        &self.collider_shape
    }

    #[inline]
    pub fn settings(&self) -> &MoverSettings {
        &self.settings
    }

    /// Ground contact found by the last step. Meaningless before the first step.
    #[inline]
    pub fn is_touching_ground(&self) -> bool {
        self.is_touching_ground
    }

    /// Move the actor at `current` (its feet) by `displacement`, resolving
    /// collisions against `world`, and return where it ends up.
    pub fn move_and_slide<W>(&mut self, world: &W, current: Vec3, displacement: Vec3) -> Vec3
    where
        W: CollisionQuery + ?Sized,
    {
        self.step(world, current, displacement).position
    }

    /// One movement step with the per-sweep outcomes.
    ///
    /// Behavior
    /// - Ground probe: short downward sweep from a lifted pose; only sets the ground flag.
    /// - Horizontal: sweep the XY part from the lifted pose; clear, clamp, or slide when flush.
    /// - Vertical: sweep the Z part from the unlifted pose; clear or clamp, with the
    ///   corner policy when the horizontal pass was flush as well.
    pub fn step<W>(&mut self, world: &W, current: Vec3, displacement: Vec3) -> StepResult
    where
        W: CollisionQuery + ?Sized,
    {
        let mut hits = Vec::new();
        let eps = self.settings.contact_epsilon;
        let lifted = Transform::from_translation(current + Vec3::z() * self.settings.probe_lift);
        let (horizontal, vertical) = split_displacement(displacement);

        // Ground probe.
        self.is_touching_ground = world.sweep(
            &self.collider_shape,
            &lifted,
            &-Vec3::z_axis(),
            self.settings.ground_probe_distance,
            &mut hits,
        );

        // Horizontal pass.
        let side = match UnitVec3::try_new(horizontal, 0.0) {
            Some(dir) => {
                let contacts = self.sweep(world, &lifted, &dir, horizontal.norm(), &mut hits);
                SweepOutcome::classify(contacts, eps)
            }
            None => SweepOutcome::Clear,
        };

        // Vertical pass, from the true height.
        let here = Transform::from_translation(current);
        let up_down = match UnitVec3::try_new(vertical, 0.0) {
            Some(dir) => {
                let contacts = self.sweep(world, &here, &dir, vertical.norm(), &mut hits);
                VerticalOutcome::classify(contacts, dir.z > 0.0, side.is_flush(), eps)
            }
            None => VerticalOutcome::Clear,
        };

        let position = current + side.displacement(horizontal) + up_down.displacement(vertical);

        log::trace!(
            "step: ground={} horizontal={:?} vertical={:?} -> {:?}",
            self.is_touching_ground,
            side,
            up_down,
            position
        );

        StepResult {
            position,
            is_touching_ground: self.is_touching_ground,
            horizontal: side,
            vertical: up_down,
        }
    }

    /// Run one sweep and return its contacts (empty when nothing was hit).
    fn sweep<'h, W>(
        &self,
        world: &W,
        pose: &Transform,
        direction: &UnitVec3,
        max_distance: f32,
        hits: &'h mut Vec<SweepHit>,
    ) -> &'h [SweepHit]
    where
        W: CollisionQuery + ?Sized,
    {
        hits.clear();
        if !world.sweep(&self.collider_shape, pose, direction, max_distance, hits) {
            return &[];
        }
        if hits.is_empty() {
            log::warn!(
                "sweep along {direction:?} reported a hit without contacts; treating as clear"
            );
        }
        &hits[..]
    }
}
