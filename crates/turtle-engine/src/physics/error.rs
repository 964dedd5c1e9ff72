use super::ColliderHandle;

/// Local errors returned by [`World`](super::World) operations.
///
/// These never reach the session error screen; the caller decides what to do.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("invalid timestep {0}: must be finite and non-negative")]
    InvalidTimestep(f32),

    #[error("invalid body type `{0}`: expected `static` or `dynamic`")]
    InvalidBodyType(String),

    #[error("invalid shape parameters: {0}")]
    InvalidShapeParameters(String),

    #[error("collider {0} was already destroyed")]
    AlreadyDestroyed(ColliderHandle),
}
