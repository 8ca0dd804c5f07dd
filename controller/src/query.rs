use crate::{
    capsule::ColliderShape,
    types::{SweepHit, Transform, UnitVec3},
};

/// Read-only capsule sweep queries against world geometry.
///
/// The mover receives an implementor by reference on every call, so the same
/// world can serve any number of actors. Implementations must be pure queries:
/// the same inputs always produce the same contacts, and world state is never
/// mutated.
pub trait CollisionQuery {
    /// Sweep `shape`, placed by `pose`, along `direction` for at most `max_distance`.
    ///
    /// Appends every contact to `hits` ordered nearest-first and returns whether
    /// any contact occurred.
    fn sweep(
        &self,
        shape: &ColliderShape,
        pose: &Transform,
        direction: &UnitVec3,
        max_distance: f32,
        hits: &mut Vec<SweepHit>,
    ) -> bool;
}
