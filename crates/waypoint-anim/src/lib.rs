//! Animation of colored markers travelling around a closed path.
//!
//! An [`Animation`] owns the waypoints and the moving markers. Each call to
//! [`Animation::update`] advances every marker toward its current waypoint,
//! gives it a fresh random color, draws the scene onto a
//! [`Surface`](waypoint_core::Surface) and asks the
//! [`FrameScheduler`](waypoint_core::FrameScheduler) for another frame until
//! the frame budget runs out.

mod controller;
mod draw;
mod error;
mod object;

#[cfg(test)]
mod testing;

pub use controller::{Animation, FRAME_BUDGET};
pub use draw::{MARKER_RADIUS, draw};
pub use error::AnimationError;
pub use object::MovingObject;
