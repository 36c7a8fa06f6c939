//! Core types shared by the waypoint crates.
//!
//! Holds the plain value types (waypoints, colors, surface dimensions) and the
//! two collaborator traits the animation controller talks to: a 2D drawing
//! [`Surface`] and a [`FrameScheduler`] that runs the next frame.

mod color;
mod geometry;
mod surface;

pub use color::Rgb;
pub use geometry::{PathPoint, SurfaceSize};
pub use surface::{FrameScheduler, Surface};
