use thiserror::Error;

/// Errors raised by the animation controller.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AnimationError {
    /// The operation needs at least one waypoint.
    #[error("the path has no waypoints")]
    EmptyPath,
}
