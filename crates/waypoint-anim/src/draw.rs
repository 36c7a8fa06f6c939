//! Scene rendering.

use std::f64::consts::TAU;

use waypoint_core::{Surface, SurfaceSize};

use crate::MovingObject;

/// Radius of every marker, in surface units.
pub const MARKER_RADIUS: f64 = 10.0;

/// Clear the whole surface and draw each marker as a filled circle.
pub fn draw<S: Surface + ?Sized>(surface: &mut S, size: SurfaceSize, objects: &[MovingObject]) {
    surface.clear_rect(0.0, 0.0, size.width, size.height);

    for obj in objects {
        surface.begin_path();
        surface.arc(obj.x, obj.y, MARKER_RADIUS, 0.0, TAU);
        surface.set_fill_color(obj.color);
        surface.fill();
        surface.close_path();
    }
}
