//! Points and dimensions in surface coordinates.

use serde::{Deserialize, Serialize};

/// A fixed waypoint on the closed path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathPoint {
    pub x: f64,
    pub y: f64,
}

impl PathPoint {
    /// Create a new waypoint.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Dimensions of the drawing surface, fixed at setup.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
