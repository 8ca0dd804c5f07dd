use thiserror::Error;

/// Construction-time failures of the controller and its static query world.
///
/// Everything here is rejected up front; `move_and_slide` itself never fails.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ControllerError {
    /// Capsule dimensions must be finite and strictly positive.
    #[error("invalid capsule: radius {radius}, half height {half_height}")]
    InvalidCapsule { radius: f32, half_height: f32 },

    #[error("invalid mover settings: {0}")]
    InvalidSettings(&'static str),

    /// A static collider definition could not be turned into a query shape.
    #[error("invalid static collider {id}: {reason}")]
    InvalidStatic { id: u32, reason: &'static str },
}
