pub mod capsule;
pub mod error;
pub mod mover;
pub mod query;
pub mod settings;
pub mod slide;
pub mod types;
pub mod world;

pub use capsule::{Capsule, ColliderShape};
pub use error::ControllerError;
pub use mover::{CharacterMover, StepResult};
pub use query::CollisionQuery;
pub use settings::{CONTACT_EPSILON, GROUND_PROBE_DISTANCE, MoverSettings, PROBE_LIFT};
pub use slide::{CornerResolution, SweepOutcome, VerticalOutcome, split_displacement};
pub use types::{Iso, Quat, SweepHit, Transform, UnitVec3, Vec3};
pub use world::{ColliderShapeDef, StaticWorld, WorldStaticDef};
