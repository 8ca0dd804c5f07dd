/*!
Sweep-and-slide resolution policy.

Each sweep of a movement step is classified into a tagged outcome, and the
outcome alone decides how much of the intended displacement is applied. The
vertical classification depends on whether the horizontal pass ended flush
against a wall, which is the only coupling between the two passes.

Nothing in here issues queries; everything works on the contacts a
[`CollisionQuery`](crate::CollisionQuery) already returned.
*/

use crate::types::{SweepHit, Vec3};

/// Outcome of the horizontal sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SweepOutcome {
    /// No contact (or nothing to sweep): the full displacement applies.
    Clear,
    /// Contact ahead: travel up to it and stop.
    Clamped { distance: f32 },
    /// Already touching the obstacle: slide along its surface.
    Flush { normal: Vec3 },
}

impl SweepOutcome {
    /// Classify from the nearest-first contacts of one sweep.
    pub fn classify(hits: &[SweepHit], contact_epsilon: f32) -> Self {
        match hits.first() {
            None => Self::Clear,
            Some(hit) if hit.distance <= contact_epsilon => Self::Flush { normal: hit.normal },
            Some(hit) => Self::Clamped {
                distance: hit.distance,
            },
        }
    }

    #[inline]
    pub fn is_flush(&self) -> bool {
        matches!(self, Self::Flush { .. })
    }

    /// The part of `intended` this outcome lets through.
    pub fn displacement(&self, intended: Vec3) -> Vec3 {
        match *self {
            Self::Clear => intended,
            Self::Clamped { distance } => along(intended, distance),
            Self::Flush { normal } => slide_along(intended, &normal),
        }
    }
}

/// How a simultaneous wall + floor/ceiling contact was resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CornerResolution {
    /// Several contacts: the farthest one marks the travel actually available.
    FarthestHit { distance: f32 },
    /// Single contact while moving up: let the actor through.
    Escape,
    /// Single contact while moving down: no vertical motion this step.
    Stall,
}

/// Outcome of the vertical sweep.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum VerticalOutcome {
    Clear,
    Clamped { distance: f32 },
    Corner(CornerResolution),
}

impl VerticalOutcome {
    /// Classify from the nearest-first contacts of the vertical sweep.
    ///
    /// `moving_up` is the sign of the vertical direction; `side_flush` is
    /// whether the horizontal pass resolved to [`SweepOutcome::Flush`].
    pub fn classify(
        hits: &[SweepHit],
        moving_up: bool,
        side_flush: bool,
        contact_epsilon: f32,
    ) -> Self {
        let Some(first) = hits.first() else {
            return Self::Clear;
        };

        if side_flush && first.distance <= contact_epsilon {
            let resolution = match hits {
                [_, .., last] => CornerResolution::FarthestHit {
                    distance: last.distance,
                },
                _ if moving_up => CornerResolution::Escape,
                _ => CornerResolution::Stall,
            };
            return Self::Corner(resolution);
        }

        Self::Clamped {
            distance: first.distance,
        }
    }

    /// The part of `intended` this outcome lets through.
    pub fn displacement(&self, intended: Vec3) -> Vec3 {
        match *self {
            Self::Clear | Self::Corner(CornerResolution::Escape) => intended,
            Self::Clamped { distance }
            | Self::Corner(CornerResolution::FarthestHit { distance }) => along(intended, distance),
            Self::Corner(CornerResolution::Stall) => Vec3::zeros(),
        }
    }
}

/// Split a displacement into its horizontal (XY) and vertical (Z) parts.
#[inline]
pub fn split_displacement(displacement: Vec3) -> (Vec3, Vec3) {
    (
        Vec3::new(displacement.x, displacement.y, 0.0),
        Vec3::new(0.0, 0.0, displacement.z),
    )
}

/// Slide `intended` along a surface with unit `normal`.
///
/// With `d = intended / |intended|`, the slide direction is
/// `v = normalize(n + d / (d·-n))` and the applied motion `v * |intended| * (v·d)`.
/// That product is exactly the tangential part of `intended`, which is what is
/// computed here; it stays finite for grazing contacts where `d·-n` is zero.
#[inline]
pub fn slide_along(intended: Vec3, normal: &Vec3) -> Vec3 {
    intended - normal * intended.dot(normal)
}

#[inline]
fn along(intended: Vec3, distance: f32) -> Vec3 {
    intended
        .try_normalize(0.0)
        .map_or_else(Vec3::zeros, |dir| dir * distance)
}
