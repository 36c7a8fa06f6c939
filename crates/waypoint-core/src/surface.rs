//! Collaborator traits implemented by the hosting environment.

use crate::Rgb;

/// A 2D drawing surface with a canvas-like path API.
///
/// The animation treats the surface as an opaque sink and never reads back
/// from it. Coordinates grow rightwards and downwards from the top-left corner.
pub trait Surface {
    /// Clear the given rectangle.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Start a new path, discarding any pending sub-paths.
    fn begin_path(&mut self);

    /// Add a circular arc centered at `(cx, cy)` to the current path.
    ///
    /// Angles are in radians.
    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64);

    /// Set the color used by subsequent fills.
    fn set_fill_color(&mut self, color: Rgb);

    /// Fill the current path with the current fill color.
    fn fill(&mut self);

    fn close_path(&mut self);
}

/// "Run this again before the next visual refresh."
///
/// The host decides when the next frame actually runs; a request only marks
/// that one more frame is wanted.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}
