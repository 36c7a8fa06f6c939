//! The animation controller.

use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, info, trace};
use rand::{Rng, rngs::ThreadRng};
use waypoint_core::{FrameScheduler, PathPoint, Rgb, Surface, SurfaceSize};

use crate::{AnimationError, MovingObject, draw};

/// Number of frames after which the animation stops requesting new ones.
pub const FRAME_BUDGET: u32 = 1000;

/// Markers travelling around a closed path.
#[derive(Debug)]
pub struct Animation<R = ThreadRng> {
    /// Markers, drawn in insertion order.
    objects: Vec<MovingObject>,
    /// Waypoints, visited cyclically.
    path: Vec<PathPoint>,
    /// Frames run since construction or the last reset.
    frame_count: u32,
    /// Wall-clock time of the first frame.
    start_time: Option<DateTime<Utc>>,
    /// Surface dimensions captured at setup.
    size: SurfaceSize,
    rng: R,
}

impl Animation<ThreadRng> {
    /// Create an empty animation for a surface of the given size.
    pub fn new(size: SurfaceSize) -> Self {
        Self::with_rng(size, rand::thread_rng())
    }
}

impl<R: Rng> Animation<R> {
    /// Create an empty animation drawing randomness from `rng`.
    pub fn with_rng(size: SurfaceSize, rng: R) -> Self {
        Self {
            objects: Vec::new(),
            path: Vec::new(),
            frame_count: 0,
            start_time: None,
            size,
            rng,
        }
    }

    /// Create an animation with the given waypoints and `object_count` markers.
    pub fn from_parts(
        size: SurfaceSize,
        path: impl IntoIterator<Item = PathPoint>,
        object_count: usize,
        rng: R,
    ) -> Result<Self, AnimationError> {
        let mut animation = Self::with_rng(size, rng);
        for point in path {
            animation.add_path_point(point.x, point.y);
        }
        animation.add_objects(object_count)?;
        Ok(animation)
    }

    /// Append a waypoint to the end of the path.
    pub fn add_path_point(&mut self, x: f64, y: f64) {
        self.path.push(PathPoint::new(x, y));
    }

    /// Spawn `count` markers at the origin, each heading to a random waypoint.
    pub fn add_objects(&mut self, count: usize) -> Result<(), AnimationError> {
        if self.path.is_empty() {
            return Err(AnimationError::EmptyPath);
        }

        let path_len = self.path.len();
        let rng = &mut self.rng;
        self.objects
            .extend((0..count).map(|_| MovingObject::spawn(rng, path_len)));
        debug!("added {count} objects ({} total)", self.objects.len());
        Ok(())
    }

    /// Run one frame: move, recolor, draw, and request the next frame while
    /// the budget lasts.
    pub fn update<S, F>(&mut self, surface: &mut S, scheduler: &mut F) -> Result<(), AnimationError>
    where
        S: Surface + ?Sized,
        F: FrameScheduler + ?Sized,
    {
        if self.path.is_empty() {
            return Err(AnimationError::EmptyPath);
        }

        let now = Utc::now();
        let start = *self.start_time.get_or_insert(now);
        trace!(
            "frame {} at {}ms",
            self.frame_count,
            (now - start).num_milliseconds()
        );

        for (i, obj) in self.objects.iter_mut().enumerate() {
            if obj.advance(&self.path) {
                trace!("object {i} reached waypoint, next {}", obj.path_index);
            }
            obj.color = Rgb::random(&mut self.rng);
        }

        draw(surface, self.size, &self.objects);
        self.frame_count += 1;

        if self.frame_count < FRAME_BUDGET {
            scheduler.request_frame();
        } else if self.frame_count == FRAME_BUDGET {
            info!(
                "frame budget of {FRAME_BUDGET} reached after {}ms",
                (Utc::now() - start).num_milliseconds()
            );
        }
        Ok(())
    }

    /// Forget the frame count and start time so the loop can run again.
    ///
    /// Markers and waypoints are kept where they are.
    pub fn reset(&mut self) {
        info!("resetting animation after {} frames", self.frame_count);
        self.frame_count = 0;
        self.start_time = None;
    }

    pub fn objects(&self) -> &[MovingObject] {
        &self.objects
    }

    /// Mutable access to the markers, for placing them explicitly.
    pub fn objects_mut(&mut self) -> &mut [MovingObject] {
        &mut self.objects
    }

    pub fn path(&self) -> &[PathPoint] {
        &self.path
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Whether the frame budget has been used up.
    pub fn is_finished(&self) -> bool {
        self.frame_count >= FRAME_BUDGET
    }

    pub fn start_time(&self) -> Option<DateTime<Utc>> {
        self.start_time
    }

    /// Wall-clock time since the first frame, if one has run.
    pub fn elapsed(&self) -> Option<TimeDelta> {
        self.start_time.map(|start| Utc::now() - start)
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::object::{MAX_SPEED, MIN_SPEED};
    use crate::testing::{CountingScheduler, Op, RecordingSurface};
    use rand::{SeedableRng, rngs::StdRng};

    const SIZE: SurfaceSize = SurfaceSize::new(800.0, 600.0);

    fn seeded() -> Animation<StdRng> {
        Animation::with_rng(SIZE, StdRng::seed_from_u64(42))
    }

    fn place(animation: &mut Animation<StdRng>, x: f64, y: f64, speed: f64, path_index: usize) {
        let obj = &mut animation.objects_mut()[0];
        obj.x = x;
        obj.y = y;
        obj.speed = speed;
        obj.path_index = path_index;
    }

    #[test]
    fn test_add_path_point_keeps_order() {
        let mut animation = seeded();
        animation.add_path_point(100.0, 100.0);
        animation.add_path_point(500.0, 200.0);
        animation.add_path_point(300.0, 400.0);

        assert_eq!(
            animation.path(),
            &[
                PathPoint::new(100.0, 100.0),
                PathPoint::new(500.0, 200.0),
                PathPoint::new(300.0, 400.0),
            ]
        );
    }

    #[test]
    fn test_add_objects_on_three_point_path() {
        let mut animation = seeded();
        animation.add_path_point(0.0, 0.0);
        animation.add_path_point(10.0, 0.0);
        animation.add_path_point(10.0, 10.0);

        animation.add_objects(5).unwrap();

        assert_eq!(animation.objects().len(), 5);
        for obj in animation.objects() {
            assert_eq!((obj.x, obj.y), (0.0, 0.0));
            assert!(obj.path_index < 3);
            assert!((MIN_SPEED..MAX_SPEED).contains(&obj.speed));
        }
    }

    #[test]
    fn test_add_objects_requires_path() {
        let mut animation = seeded();
        assert_eq!(animation.add_objects(3), Err(AnimationError::EmptyPath));
        assert!(animation.objects().is_empty());
    }

    #[test]
    fn test_update_requires_path() {
        let mut animation = seeded();
        let mut surface = RecordingSurface::default();
        let mut scheduler = CountingScheduler::default();

        let result = animation.update(&mut surface, &mut scheduler);

        assert_eq!(result, Err(AnimationError::EmptyPath));
        assert!(surface.ops.is_empty());
        assert_eq!(scheduler.requests, 0);
        assert_eq!(animation.frame_count(), 0);
        assert!(animation.start_time().is_none());
    }

    #[test]
    fn test_from_parts_with_empty_path_fails() {
        let result = Animation::from_parts(SIZE, Vec::new(), 4, StdRng::seed_from_u64(1));
        assert!(matches!(result, Err(AnimationError::EmptyPath)));
    }

    #[test]
    fn test_first_update_moves_toward_first_waypoint() {
        let mut animation = Animation::from_parts(
            SIZE,
            [PathPoint::new(100.0, 100.0), PathPoint::new(500.0, 200.0)],
            1,
            StdRng::seed_from_u64(3),
        )
        .unwrap();
        place(&mut animation, 0.0, 0.0, 5.0, 0);
        let mut surface = RecordingSurface::default();
        let mut scheduler = CountingScheduler::default();

        animation.update(&mut surface, &mut scheduler).unwrap();

        let obj = &animation.objects()[0];
        let step = 5.0 / 2f64.sqrt();
        assert!((obj.x - step).abs() < 1e-9);
        assert!((obj.y - step).abs() < 1e-9);
        assert_eq!(obj.path_index, 0);
        assert_ne!(obj.color, Rgb::BLACK);
        assert_eq!(animation.frame_count(), 1);
        assert_eq!(scheduler.requests, 1);
        assert!(animation.start_time().is_some());
    }

    #[test]
    fn test_update_on_target_snaps_and_advances() {
        let mut animation = Animation::from_parts(
            SIZE,
            [PathPoint::new(100.0, 100.0), PathPoint::new(500.0, 200.0)],
            1,
            StdRng::seed_from_u64(3),
        )
        .unwrap();
        place(&mut animation, 100.0, 100.0, 2.0, 0);
        let mut surface = RecordingSurface::default();
        let mut scheduler = CountingScheduler::default();

        animation.update(&mut surface, &mut scheduler).unwrap();

        let obj = &animation.objects()[0];
        assert_eq!((obj.x, obj.y), (100.0, 100.0));
        assert_eq!(obj.path_index, 1);
    }

    #[test]
    fn test_traversal_visits_every_waypoint_in_order() {
        let path = [
            PathPoint::new(100.0, 100.0),
            PathPoint::new(200.0, 100.0),
            PathPoint::new(200.0, 200.0),
            PathPoint::new(100.0, 200.0),
        ];
        let mut animation =
            Animation::from_parts(SIZE, path, 3, StdRng::seed_from_u64(11)).unwrap();
        let mut surface = RecordingSurface::default();
        let mut scheduler = CountingScheduler::default();

        let mut arrivals = vec![0usize; animation.objects().len()];
        for _ in 0..FRAME_BUDGET {
            let before: Vec<MovingObject> = animation.objects().to_vec();
            animation.update(&mut surface, &mut scheduler).unwrap();

            for (i, (old, new)) in before.iter().zip(animation.objects()).enumerate() {
                if old.path_index == new.path_index {
                    // still travelling, never overshoots the waypoint
                    let target = path[old.path_index];
                    let old_dist = (target.x - old.x).hypot(target.y - old.y);
                    let new_dist = (target.x - new.x).hypot(target.y - new.y);
                    assert!(new_dist < old_dist);
                    assert!((old_dist - new_dist - old.speed).abs() < 1e-6);
                } else {
                    assert_eq!(new.path_index, (old.path_index + 1) % path.len());
                    let reached = path[old.path_index];
                    assert_eq!((new.x, new.y), (reached.x, reached.y));
                    arrivals[i] += 1;
                }
            }
        }

        // 1000 frames at >= 1 unit/frame is at least two laps of this square
        assert!(arrivals.iter().all(|&n| n > path.len()));
    }

    #[test]
    fn test_color_changes_every_frame_while_stationary() {
        let mut animation = Animation::from_parts(
            SIZE,
            [PathPoint::new(50.0, 50.0)],
            1,
            StdRng::seed_from_u64(5),
        )
        .unwrap();
        place(&mut animation, 50.0, 50.0, 1.0, 0);
        let mut surface = RecordingSurface::default();
        let mut scheduler = CountingScheduler::default();

        let mut previous = animation.objects()[0].color;
        for _ in 0..20 {
            animation.update(&mut surface, &mut scheduler).unwrap();
            let obj = &animation.objects()[0];
            assert_eq!((obj.x, obj.y), (50.0, 50.0));
            assert_ne!(obj.color, previous);
            previous = obj.color;
        }
    }

    #[test]
    fn test_update_draws_current_state() {
        let mut animation = Animation::from_parts(
            SIZE,
            [PathPoint::new(100.0, 0.0)],
            1,
            StdRng::seed_from_u64(9),
        )
        .unwrap();
        place(&mut animation, 0.0, 0.0, 4.0, 0);
        let mut surface = RecordingSurface::default();
        let mut scheduler = CountingScheduler::default();

        animation.update(&mut surface, &mut scheduler).unwrap();

        let color = animation.objects()[0].color;
        assert_eq!(surface.ops[0], Op::ClearRect(0.0, 0.0, 800.0, 600.0));
        assert!(surface.ops.contains(&Op::Arc(
            4.0,
            0.0,
            crate::MARKER_RADIUS,
            0.0,
            std::f64::consts::TAU
        )));
        assert!(surface.ops.contains(&Op::SetFillColor(color)));
    }

    #[test]
    fn test_frame_budget_stops_scheduling() {
        let mut animation = Animation::from_parts(
            SIZE,
            [PathPoint::new(10.0, 10.0), PathPoint::new(20.0, 20.0)],
            2,
            StdRng::seed_from_u64(1),
        )
        .unwrap();
        let mut surface = RecordingSurface::default();
        let mut scheduler = CountingScheduler::default();

        for _ in 0..FRAME_BUDGET - 1 {
            animation.update(&mut surface, &mut scheduler).unwrap();
        }
        assert_eq!(scheduler.requests, (FRAME_BUDGET - 1) as usize);
        assert!(!animation.is_finished());

        // the last frame still does its work but asks for nothing more
        animation.update(&mut surface, &mut scheduler).unwrap();
        assert_eq!(surface.clears(), FRAME_BUDGET as usize);
        assert_eq!(scheduler.requests, (FRAME_BUDGET - 1) as usize);
        assert_eq!(animation.frame_count(), FRAME_BUDGET);
        assert!(animation.is_finished());
    }

    #[test]
    fn test_reset_restarts_budget() {
        let mut animation = Animation::from_parts(
            SIZE,
            [PathPoint::new(10.0, 10.0)],
            1,
            StdRng::seed_from_u64(2),
        )
        .unwrap();
        let mut surface = RecordingSurface::default();
        let mut scheduler = CountingScheduler::default();

        for _ in 0..FRAME_BUDGET {
            animation.update(&mut surface, &mut scheduler).unwrap();
        }
        assert!(animation.is_finished());
        assert!(animation.elapsed().is_some());
        let positions: Vec<(f64, f64)> = animation.objects().iter().map(|o| (o.x, o.y)).collect();

        animation.reset();

        assert_eq!(animation.frame_count(), 0);
        assert!(animation.start_time().is_none());
        assert!(animation.elapsed().is_none());
        assert_eq!(animation.objects().len(), 1);
        assert_eq!(
            animation.objects().iter().map(|o| (o.x, o.y)).collect::<Vec<_>>(),
            positions
        );

        let before = scheduler.requests;
        animation.update(&mut surface, &mut scheduler).unwrap();
        assert_eq!(scheduler.requests, before + 1);
    }

    #[test]
    fn test_new_uses_thread_rng() {
        let mut animation = Animation::new(SIZE);
        animation.add_path_point(1.0, 1.0);
        animation.add_objects(2).unwrap();
        assert_eq!(animation.objects().len(), 2);
        assert_eq!(animation.size(), SIZE);
    }
}
