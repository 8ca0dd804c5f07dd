/*!
Math aliases and the plain data exchanged between the mover and a collision
query backend.

World convention: right-handed, +Z is up, the XY plane is horizontal.
Distances are in meters.
*/

use nalgebra as na;

/// Common math aliases for clarity and consistency.
pub type Vec3 = na::Vector3<f32>;
pub type Quat = na::UnitQuaternion<f32>;
pub type Iso = na::Isometry3<f32>;
pub type UnitVec3 = na::Unit<Vec3>;

/// A rigid transform (isometry) in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl Transform {
    #[inline]
    pub fn new(translation: Vec3, rotation: Quat) -> Self {
        Self {
            translation,
            rotation,
        }
    }

    /// Pure translation with identity rotation.
    #[inline]
    pub fn from_translation(translation: Vec3) -> Self {
        Self::new(translation, Quat::identity())
    }

    /// Convert to nalgebra `Isometry3` for use with parry3d narrow-phase queries.
    #[inline]
    pub fn iso(&self) -> Iso {
        Iso::from_parts(na::Translation3::from(self.translation), self.rotation)
    }
}

/// A single contact reported by a sweep.
///
/// Within one sweep, contacts are ordered by increasing `distance`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SweepHit {
    /// Distance travelled along the sweep direction before contact (>= 0).
    pub distance: f32,
    /// World-space unit surface normal at the contact, pointing away from the obstacle.
    pub normal: Vec3,
}

impl SweepHit {
    #[inline]
    pub fn new(distance: f32, normal: Vec3) -> Self {
        Self { distance, normal }
    }
}
