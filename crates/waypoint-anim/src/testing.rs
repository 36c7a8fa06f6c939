//! Test doubles for the collaborator traits.

use waypoint_core::{FrameScheduler, Rgb, Surface};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    ClearRect(f64, f64, f64, f64),
    BeginPath,
    Arc(f64, f64, f64, f64, f64),
    SetFillColor(Rgb),
    Fill,
    ClosePath,
}

/// Surface that records every call.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn clears(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, Op::ClearRect(..)))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(Op::ClearRect(x, y, width, height));
    }

    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }

    fn arc(&mut self, cx: f64, cy: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.ops.push(Op::Arc(cx, cy, radius, start_angle, end_angle));
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.ops.push(Op::SetFillColor(color));
    }

    fn fill(&mut self) {
        self.ops.push(Op::Fill);
    }

    fn close_path(&mut self) {
        self.ops.push(Op::ClosePath);
    }
}

/// Scheduler that counts frame requests.
#[derive(Debug, Default)]
pub struct CountingScheduler {
    pub requests: usize,
}

impl FrameScheduler for CountingScheduler {
    fn request_frame(&mut self) {
        self.requests += 1;
    }
}
