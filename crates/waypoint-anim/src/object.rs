//! A single marker moving along the path.

use rand::Rng;
use waypoint_core::{PathPoint, Rgb};

/// Slowest marker speed, in surface units per frame.
pub const MIN_SPEED: f64 = 1.0;
/// Upper (exclusive) bound on marker speed.
pub const MAX_SPEED: f64 = 5.0;

/// State of one marker.
#[derive(Debug, Clone, PartialEq)]
pub struct MovingObject {
    /// Current x position.
    pub x: f64,
    /// Current y position.
    pub y: f64,
    /// Color used for the next draw.
    pub color: Rgb,
    /// Distance covered per frame.
    pub speed: f64,
    /// Index of the waypoint this marker is heading to.
    pub path_index: usize,
}

impl MovingObject {
    /// Spawn a marker at the origin heading to a random waypoint.
    ///
    /// `path_len` must be non-zero.
    pub(crate) fn spawn<R: Rng + ?Sized>(rng: &mut R, path_len: usize) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            color: Rgb::BLACK,
            speed: rng.gen_range(MIN_SPEED..MAX_SPEED),
            path_index: rng.gen_range(0..path_len),
        }
    }

    /// Move one frame toward the current waypoint.
    ///
    /// Returns `true` when the marker reached the waypoint this frame, in which
    /// case it sits exactly on it and heads for the next one.
    pub(crate) fn advance(&mut self, path: &[PathPoint]) -> bool {
        let target = path[self.path_index];
        let dx = target.x - self.x;
        let dy = target.y - self.y;
        let distance = dx.hypot(dy);

        if distance > self.speed {
            self.x += dx / distance * self.speed;
            self.y += dy / distance * self.speed;
            false
        } else {
            self.x = target.x;
            self.y = target.y;
            self.path_index = (self.path_index + 1) % path.len();
            true
        }
    }
}
