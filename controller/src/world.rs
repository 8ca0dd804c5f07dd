//! Static query world: a [`CollisionQuery`] over immutable world colliders.
//!
//! Callers map their level data to [`WorldStaticDef`]s and call
//! [`StaticWorld::build`] once. Sweeps shape-cast the character's capsule
//! against every static with parry3d (bundled with rapier3d) and report all
//! contacts, nearest first.
//!
//! Design goals
//! - Deterministic: definitions are sorted by `id`, and contacts at equal
//!   distance are ordered by `id`.
//! - Immutable: nothing moves after construction, so one world can be shared
//!   by many movers across threads.

use std::cmp::Ordering;

use nalgebra as na;
use rapier3d::parry::{
    query::{self, ShapeCastOptions},
    shape::{Capsule as CapsuleShape, SharedShape},
};

use crate::{
    capsule::ColliderShape,
    error::ControllerError,
    query::CollisionQuery,
    types::{Iso, Quat, SweepHit, Transform, UnitVec3, Vec3},
};

/// Canonical, schema-agnostic definition of an immutable world collider.
///
/// Conventions
/// - Units are meters.
/// - Rotation is a unit quaternion.
/// - For planes, the normal is pose-derived: `normal = rotation * +Z`, and
///   `dist = dot(normal, translation) + offset_along_normal`.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic ordering.
    pub id: u32,
    /// World-space translation.
    pub translation: Vec3,
    /// World-space rotation.
    pub rotation: Quat,
    /// Collider shape parameters.
    pub shape: ColliderShapeDef,
}

/// Supported static collider shapes. Axis-aligned variants use the local +Y axis.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space), offset along its pose-derived normal.
    Plane { offset_along_normal: f32 },

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vec3 },

    Sphere { radius: f32 },

    CapsuleY {
        radius: f32,
        half_height: f32,
    },

    CylinderY {
        radius: f32,
        half_height: f32,
    },

    ConeY {
        radius: f32,
        half_height: f32,
    },

    /// Rounded cuboid; `border_radius` rounds all edges/corners.
    RoundCuboid {
        half_extents: Vec3,
        border_radius: f32,
    },

    RoundCylinderY {
        radius: f32,
        half_height: f32,
        border_radius: f32,
    },

    RoundConeY {
        radius: f32,
        half_height: f32,
        border_radius: f32,
    },
}

struct StaticCollider {
    id: u32,
    pose: Iso,
    shape: SharedShape,
}

/// Immutable set of static colliders answering capsule sweeps.
pub struct StaticWorld {
    statics: Vec<StaticCollider>,
}

impl StaticWorld {
    /// Build a query world from a list of static collider definitions.
    ///
    /// Rejects duplicate ids and degenerate shapes (non-positive or non-finite
    /// dimensions, negative border radii, non-finite poses).
    pub fn build(mut defs: Vec<WorldStaticDef>) -> Result<Self, ControllerError> {
        defs.sort_by_key(|d| d.id);

        if let Some(pair) = defs.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(ControllerError::InvalidStatic {
                id: pair[0].id,
                reason: "duplicate id",
            });
        }

        let statics = defs
            .iter()
            .map(static_from_def)
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("static query world built with {} colliders", statics.len());

        Ok(Self { statics })
    }

    /// Number of static colliders.
    #[inline]
    pub fn len(&self) -> usize {
        self.statics.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.statics.is_empty()
    }
}

impl CollisionQuery for StaticWorld {
    fn sweep(
        &self,
        shape: &ColliderShape,
        pose: &Transform,
        direction: &UnitVec3,
        max_distance: f32,
        hits: &mut Vec<SweepHit>,
    ) -> bool {
        let capsule = shape.capsule();
        let capsule_shape = CapsuleShape::new_y(capsule.half_height(), capsule.radius());
        let capsule_iso = shape.world_iso(pose);
        // Unit velocity: time of impact is the distance travelled.
        let vel = direction.into_inner();

        let mut found: Vec<(u32, SweepHit)> = Vec::new();
        for s in &self.statics {
            let mut opts = ShapeCastOptions::with_max_time_of_impact(max_distance.max(0.0));
            opts.stop_at_penetration = true;

            match query::cast_shapes(
                &capsule_iso,
                &vel,
                &capsule_shape,
                &s.pose,
                &Vec3::zeros(),
                &*s.shape,
                opts,
            ) {
                Ok(Some(hit)) => {
                    // normal1 is local to the capsule and points into the obstacle.
                    let mut normal = -(capsule_iso.rotation * hit.normal1.into_inner());
                    if normal.dot(&vel) > 0.0 {
                        normal = -normal;
                    }
                    found.push((s.id, SweepHit::new(hit.time_of_impact.max(0.0), normal)));
                }
                Ok(None) => {}
                Err(_) => log::warn!("shape cast unsupported against static {}", s.id),
            }
        }

        found.sort_by(nearest_first);
        hits.extend(found.iter().map(|(_, hit)| *hit));

        !found.is_empty()
    }
}

/// Nearest contact first; equal distances fall back to the static id.
fn nearest_first(a: &(u32, SweepHit), b: &(u32, SweepHit)) -> Ordering {
    a.1.distance.total_cmp(&b.1.distance).then(a.0.cmp(&b.0))
}

fn static_from_def(def: &WorldStaticDef) -> Result<StaticCollider, ControllerError> {
    let invalid = |reason: &'static str| ControllerError::InvalidStatic { id: def.id, reason };
    let positive = |v: f32| {
        if v.is_finite() && v > 0.0 {
            Ok(v)
        } else {
            Err(invalid("dimensions must be finite and positive"))
        }
    };
    let border = |v: f32| {
        if v.is_finite() && v >= 0.0 {
            Ok(v)
        } else {
            Err(invalid("border radius must be finite and non-negative"))
        }
    };

    if !def.translation.iter().all(|c| c.is_finite())
        || !def.rotation.coords.iter().all(|c| c.is_finite())
    {
        return Err(invalid("pose must be finite"));
    }

    let body_pose = Iso::from_parts(na::Translation3::from(def.translation), def.rotation);

    let (pose, shape) = match &def.shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => {
            if !offset_along_normal.is_finite() {
                return Err(invalid("plane offset must be finite"));
            }
            // Plane `n . x = dist` as a half-space placed at `n * dist`.
            let unit_n = UnitVec3::new_normalize(def.rotation * Vec3::z());
            let dist = unit_n.dot(&def.translation) + offset_along_normal;
            (
                Iso::translation(unit_n.x * dist, unit_n.y * dist, unit_n.z * dist),
                SharedShape::halfspace(unit_n),
            )
        }

        ColliderShapeDef::Cuboid { half_extents } => (
            body_pose,
            SharedShape::cuboid(
                positive(half_extents.x)?,
                positive(half_extents.y)?,
                positive(half_extents.z)?,
            ),
        ),

        ColliderShapeDef::Sphere { radius } => (body_pose, SharedShape::ball(positive(*radius)?)),

        ColliderShapeDef::CapsuleY {
            radius,
            half_height,
        } => (
            body_pose,
            SharedShape::capsule_y(positive(*half_height)?, positive(*radius)?),
        ),

        ColliderShapeDef::CylinderY {
            radius,
            half_height,
        } => (
            body_pose,
            SharedShape::cylinder(positive(*half_height)?, positive(*radius)?),
        ),

        ColliderShapeDef::ConeY {
            radius,
            half_height,
        } => (
            body_pose,
            SharedShape::cone(positive(*half_height)?, positive(*radius)?),
        ),

        ColliderShapeDef::RoundCuboid {
            half_extents,
            border_radius,
        } => (
            body_pose,
            SharedShape::round_cuboid(
                positive(half_extents.x)?,
                positive(half_extents.y)?,
                positive(half_extents.z)?,
                border(*border_radius)?,
            ),
        ),

        ColliderShapeDef::RoundCylinderY {
            radius,
            half_height,
            border_radius,
        } => (
            body_pose,
            SharedShape::round_cylinder(
                positive(*half_height)?,
                positive(*radius)?,
                border(*border_radius)?,
            ),
        ),

        ColliderShapeDef::RoundConeY {
            radius,
            half_height,
            border_radius,
        } => (
            body_pose,
            SharedShape::round_cone(
                positive(*half_height)?,
                positive(*radius)?,
                border(*border_radius)?,
            ),
        ),
    };

    Ok(StaticCollider {
        id: def.id,
        pose,
        shape,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sphere(id: u32, radius: f32) -> WorldStaticDef {
        WorldStaticDef {
            id,
            translation: Vec3::new(0.0, 0.0, 5.0),
            rotation: Quat::identity(),
            shape: ColliderShapeDef::Sphere { radius },
        }
    }

    #[test]
    fn empty_world_reports_no_hits() {
        let world = StaticWorld::build(Vec::new()).unwrap();
        assert!(world.is_empty());

        let shape = ColliderShape::from_capsule(crate::Capsule::new(0.3, 0.9).unwrap());
        let mut hits = Vec::new();
        let hit = world.sweep(
            &shape,
            &Transform::from_translation(Vec3::zeros()),
            &Vec3::x_axis(),
            10.0,
            &mut hits,
        );
        assert!(!hit);
        assert!(hits.is_empty());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let err = StaticWorld::build(vec![sphere(7, 1.0), sphere(3, 1.0), sphere(7, 2.0)])
            .err()
            .unwrap();
        assert_eq!(
            err,
            ControllerError::InvalidStatic {
                id: 7,
                reason: "duplicate id",
            }
        );
    }

    #[test]
    fn rejects_degenerate_shapes() {
        assert!(StaticWorld::build(vec![sphere(1, 0.0)]).is_err());

        let rounded = WorldStaticDef {
            id: 2,
            translation: Vec3::zeros(),
            rotation: Quat::identity(),
            shape: ColliderShapeDef::RoundCuboid {
                half_extents: Vec3::new(1.0, 1.0, 1.0),
                border_radius: -0.1,
            },
        };
        assert!(StaticWorld::build(vec![rounded]).is_err());

        let mut far = sphere(3, 1.0);
        far.translation.x = f32::NAN;
        assert!(StaticWorld::build(vec![far]).is_err());
    }

    #[test]
    fn builds_every_shape_kind() {
        let shapes = [
            ColliderShapeDef::Plane {
                offset_along_normal: 0.0,
            },
            ColliderShapeDef::Cuboid {
                half_extents: Vec3::new(1.0, 2.0, 3.0),
            },
            ColliderShapeDef::Sphere { radius: 1.0 },
            ColliderShapeDef::CapsuleY {
                radius: 0.5,
                half_height: 1.0,
            },
            ColliderShapeDef::CylinderY {
                radius: 0.5,
                half_height: 1.0,
            },
            ColliderShapeDef::ConeY {
                radius: 0.5,
                half_height: 1.0,
            },
            ColliderShapeDef::RoundCuboid {
                half_extents: Vec3::new(1.0, 1.0, 1.0),
                border_radius: 0.1,
            },
            ColliderShapeDef::RoundCylinderY {
                radius: 0.5,
                half_height: 1.0,
                border_radius: 0.1,
            },
            ColliderShapeDef::RoundConeY {
                radius: 0.5,
                half_height: 1.0,
                border_radius: 0.1,
            },
        ];
        let defs = shapes
            .into_iter()
            .enumerate()
            .map(|(i, shape)| WorldStaticDef {
                id: i as u32,
                translation: Vec3::new(10.0 * i as f32, 0.0, 0.0),
                rotation: Quat::identity(),
                shape,
            })
            .collect();

        let world = StaticWorld::build(defs).unwrap();
        assert_eq!(world.len(), 9);
    }
}
