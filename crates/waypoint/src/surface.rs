//! Terminal drawing surface backed by a ratatui canvas.

use std::f64::consts::TAU;

use ratatui::{
    buffer::Buffer,
    layout::{Rect, Size},
    style::Color,
    symbols::Marker,
    widgets::{
        Widget,
        canvas::{Canvas, Points},
    },
};
use waypoint_core::{Rgb, Surface, SurfaceSize};

/// Approximate pixel width of a terminal cell.
pub const CELL_WIDTH_PX: f64 = 8.0;
/// Approximate pixel height of a terminal cell.
pub const CELL_HEIGHT_PX: f64 = 16.0;

/// Surface size in pixels for a terminal area measured in cells.
pub fn surface_size(area: Size) -> SurfaceSize {
    SurfaceSize::new(
        f64::from(area.width) * CELL_WIDTH_PX,
        f64::from(area.height) * CELL_HEIGHT_PX,
    )
}

/// An arc added to the current path.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ArcSegment {
    cx: f64,
    cy: f64,
    radius: f64,
    start_angle: f64,
    end_angle: f64,
}

impl ArcSegment {
    /// Whether `(x, y)` falls inside the filled arc.
    fn contains(&self, x: f64, y: f64) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        if dx.hypot(dy) > self.radius {
            return false;
        }
        let sweep = self.end_angle - self.start_angle;
        if sweep.abs() >= TAU || (dx == 0.0 && dy == 0.0) {
            return true;
        }
        let angle = (dy.atan2(dx) - self.start_angle).rem_euclid(TAU);
        if sweep >= 0.0 {
            angle <= sweep
        } else {
            angle == 0.0 || angle >= TAU + sweep
        }
    }
}

/// A filled shape waiting to be painted.
#[derive(Debug, Clone, Copy, PartialEq)]
struct FilledArc {
    arc: ArcSegment,
    color: Color,
}

/// Retained display list painted into a braille [`Canvas`].
///
/// Surface coordinates start at the top-left corner; the canvas y axis points
/// up, so rows are flipped when painting.
#[derive(Debug)]
pub struct CanvasSurface {
    size: SurfaceSize,
    shapes: Vec<FilledArc>,
    current_path: Vec<ArcSegment>,
    fill_color: Color,
}

impl CanvasSurface {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            shapes: Vec::new(),
            current_path: Vec::new(),
            fill_color: Color::Black,
        }
    }

    /// Number of filled shapes currently on the surface.
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Sample the interior of every shape on a grid matching the braille dot
    /// resolution of `area`.
    fn rasterize(&self, area: Rect) -> Vec<(Vec<(f64, f64)>, Color)> {
        // braille cells are 2 dots wide and 4 dots tall
        let step_x = self.size.width / (f64::from(area.width.max(1)) * 2.0);
        let step_y = self.size.height / (f64::from(area.height.max(1)) * 4.0);
        if step_x <= 0.0 || step_y <= 0.0 {
            return Vec::new();
        }

        self.shapes
            .iter()
            .map(|shape| {
                let arc = shape.arc;
                let mut coords = vec![(arc.cx, self.size.height - arc.cy)];
                let mut y = (arc.cy - arc.radius).max(0.0);
                while y <= (arc.cy + arc.radius).min(self.size.height) {
                    let mut x = (arc.cx - arc.radius).max(0.0);
                    while x <= (arc.cx + arc.radius).min(self.size.width) {
                        if arc.contains(x, y) {
                            coords.push((x, self.size.height - y));
                        }
                        x += step_x;
                    }
                    y += step_y;
                }
                (coords, shape.color)
            })
            .collect()
    }
}

impl Surface for CanvasSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (right, bottom) = (x + width, y + height);
        self.shapes.retain(|shape| {
            let arc = shape.arc;
            let inside = arc.cx - arc.radius >= x
                && arc.cx + arc.radius <= right
                && arc.cy - arc.radius >= y
                && arc.cy + arc.radius <= bottom;
            !inside
        });
        // markers partly off-surface are cleared with the whole surface
        if x <= 0.0 && y <= 0.0 && right >= self.size.width && bottom >= self.size.height {
            self.shapes.clear();
        }
    }

    fn begin_path(&mut self) {
        self.current_path.clear();
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.current_path.push(ArcSegment {
            cx,
            cy,
            radius,
            start_angle,
            end_angle,
        });
    }

    fn set_fill_color(&mut self, color: Rgb) {
        let (r, g, b) = color.to_u8();
        self.fill_color = Color::Rgb(r, g, b);
    }

    fn fill(&mut self) {
        let color = self.fill_color;
        self.shapes
            .extend(self.current_path.iter().map(|&arc| FilledArc { arc, color }));
    }

    fn close_path(&mut self) {
        // arcs are filled as closed sectors already
    }
}

impl Widget for &CanvasSurface {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layers = self.rasterize(area);
        Canvas::default()
            .marker(Marker::Braille)
            .x_bounds([0.0, self.size.width])
            .y_bounds([0.0, self.size.height])
            .paint(|ctx| {
                for (coords, color) in &layers {
                    ctx.draw(&Points {
                        coords,
                        color: *color,
                    });
                }
            })
            .render(area, buf);
    }
}
