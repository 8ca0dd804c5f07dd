use std::f32::consts::FRAC_PI_2;

use crate::{
    error::ControllerError,
    types::{Iso, Quat, Transform, Vec3},
};

/// Capsule specification for kinematic actors.
///
/// `half_height` is the half-length of the cylinder section, so the total
/// capsule height is `2*half_height + 2*radius`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Capsule {
    radius: f32,
    half_height: f32,
}

impl Capsule {
    /// Both dimensions must be finite and strictly positive. Invalid input is
    /// rejected, never clamped.
    pub fn new(radius: f32, half_height: f32) -> Result<Self, ControllerError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(radius) || !valid(half_height) {
            return Err(ControllerError::InvalidCapsule {
                radius,
                half_height,
            });
        }
        Ok(Self {
            radius,
            half_height,
        })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.half_height
    }

    /// Height of the capsule center above the actor's feet.
    #[inline]
    pub fn center_height(&self) -> f32 {
        self.half_height + self.radius
    }

    #[inline]
    pub fn total_height(&self) -> f32 {
        2.0 * self.center_height()
    }

    /// Local pose of the collider relative to the actor origin (the feet).
    ///
    /// The collider's native axis is +Y; a quarter turn about +X stands it up
    /// along world +Z, and the body floats `center_height()` above the origin.
    pub fn collider_pose(&self) -> Transform {
        Transform::new(
            Vec3::new(0.0, 0.0, self.center_height()),
            Quat::from_axis_angle(&Vec3::x_axis(), FRAC_PI_2),
        )
    }
}

/// The shape handed to every sweep: a capsule together with its cached local pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColliderShape {
    capsule: Capsule,
    local_pose: Transform,
}

impl ColliderShape {
    pub fn from_capsule(capsule: Capsule) -> Self {
        Self {
            capsule,
            local_pose: capsule.collider_pose(),
        }
    }

    #[inline]
    pub fn capsule(&self) -> Capsule {
        self.capsule
    }

    #[inline]
    pub fn local_pose(&self) -> &Transform {
        &self.local_pose
    }

    /// World placement of the collider for an actor placed at `pose`.
    #[inline]
    pub fn world_iso(&self, pose: &Transform) -> Iso {
        pose.iso() * self.local_pose.iso()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn rejects_non_positive_dimensions() {
        for (r, hh) in [(0.0, 1.0), (1.0, 0.0), (-0.3, 0.9), (0.3, -0.9)] {
            assert_eq!(
                Capsule::new(r, hh),
                Err(ControllerError::InvalidCapsule {
                    radius: r,
                    half_height: hh,
                })
            );
        }
    }

    #[test]
    fn rejects_non_finite_dimensions() {
        assert!(Capsule::new(f32::NAN, 1.0).is_err());
        assert!(Capsule::new(0.5, f32::INFINITY).is_err());
    }

    #[test]
    fn collider_pose_stands_capsule_up() {
        let capsule = Capsule::new(0.3, 0.9).unwrap();
        let pose = capsule.collider_pose();

        assert_relative_eq!(pose.translation, Vec3::new(0.0, 0.0, 1.2), epsilon = 1.0e-6);
        assert_relative_eq!(pose.rotation * Vec3::y(), Vec3::z(), epsilon = 1.0e-6);
        assert_relative_eq!(capsule.total_height(), 2.4, epsilon = 1.0e-6);
    }

    #[test]
    fn world_iso_offsets_collider_from_feet() {
        let shape = ColliderShape::from_capsule(Capsule::new(0.5, 1.0).unwrap());
        let feet = Transform::from_translation(Vec3::new(2.0, -1.0, 3.0));
        let iso = shape.world_iso(&feet);

        assert_relative_eq!(
            iso.translation.vector,
            Vec3::new(2.0, -1.0, 4.5),
            epsilon = 1.0e-6
        );
    }

    proptest! {
        #[test]
        fn collider_center_sits_at_half_height_plus_radius(
            radius in 0.01f32..10.0,
            half_height in 0.01f32..10.0,
        ) {
            let capsule = Capsule::new(radius, half_height).unwrap();
            let a = ColliderShape::from_capsule(capsule);
            let b = ColliderShape::from_capsule(Capsule::new(radius, half_height).unwrap());

            prop_assert_eq!(a.local_pose().translation.z, half_height + radius);
            prop_assert_eq!(a.local_pose().translation.x, 0.0);
            prop_assert_eq!(a.local_pose().translation.y, 0.0);
            prop_assert_eq!(a, b);
        }
    }
}
