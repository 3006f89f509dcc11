use glam::Vec2;
use thiserror::Error;

use crate::map::Segment;
use crate::math::VecExt;
use crate::ray::{Hit, Ray};

/// Rejected construction parameters.
///
/// Everything else the viewer encounters mid-frame (parallel walls, zero
/// movement, empty wall sets) is a normal negative result, not an error.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("ray count must be at least 2, got {0}")]
    RayCount(usize),
    #[error("field of view must be positive, got {0} rad")]
    Fov(f32),
}

/// The observer: position, field of view, and the per-frame ray fan with
/// its nearest-hit results.
///
/// `direction` is stored the way the sweep consumes it: the fan's sweep
/// origin, half a field of view below the centre. [`Viewer::set_facing`]
/// applies that offset, so callers only ever deal in look targets.
pub struct Viewer {
    pos: Vec2,
    fov: f32,
    direction: f32,
    ray_count: usize,
    rays: Vec<Ray>,
    hits: Vec<Option<Hit>>,
}

impl Viewer {
    pub fn new(pos: Vec2, fov: f32, direction: f32, ray_count: usize) -> Result<Self, ConfigError> {
        if ray_count < 2 {
            return Err(ConfigError::RayCount(ray_count));
        }
        if fov <= 0.0 {
            return Err(ConfigError::Fov(fov));
        }

        let mut this = Self {
            pos,
            fov,
            direction,
            ray_count,
            rays: Vec::with_capacity(ray_count),
            hits: Vec::with_capacity(ray_count),
        };
        this.regenerate_rays();

        Ok(this)
    }

    pub fn pos(&self) -> Vec2 {
        self.pos
    }

    pub fn fov(&self) -> f32 {
        self.fov
    }

    pub fn rays(&self) -> &[Ray] {
        &self.rays
    }

    /// One slot per ray; `None` where the ray escaped without touching a
    /// wall.
    pub fn hits(&self) -> &[Option<Hit>] {
        &self.hits
    }

    /// Teleport; the stale fan stays put until the next regeneration.
    pub fn move_to(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    /// Shift by a movement delta. Walls do not push back.
    pub fn advance(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Centre the fan on `target`.
    pub fn set_facing(&mut self, target: Vec2) {
        self.direction = (target - self.pos).full_angle() - self.fov / 2.0;
    }

    /// Rebuild the fan: sweep `[360 - fov - direction, 360 - direction]`
    /// degrees inclusive, in `ray_count - 1` equal steps. The mirrored
    /// sweep keeps ray order matching left-to-right screen columns with y
    /// growing downward. The step accumulates in floating point; terminal
    /// rounding drift is accepted, not corrected.
    pub fn regenerate_rays(&mut self) {
        self.rays.clear();

        let fov_deg = self.fov.to_degrees();
        let direction_deg = self.direction.to_degrees();

        let from = 360.0 - fov_deg - direction_deg;
        let to = 360.0 - direction_deg;
        let step = (to - from) / (self.ray_count - 1) as f32;

        let mut angle = from;
        while angle <= to {
            self.rays.push(Ray::from_angle(self.pos, angle.to_radians()));
            angle += step;
        }
    }

    /// Nearest wall hit per ray, tagged with the ray's angle. Misses keep
    /// their slot so the hit list stays aligned with the ray list.
    pub fn compute_intersections(&mut self, walls: &[Segment]) {
        self.hits.clear();

        for ray in &self.rays {
            let mut closest: Option<Hit> = None;

            for wall in walls {
                let Some(point) = ray.intersect(wall) else {
                    continue;
                };

                let distance = self.pos.distance(point);
                if closest.is_none_or(|hit| distance < hit.distance) {
                    closest = Some(Hit {
                        point,
                        angle_deg: ray.angle_deg,
                        distance,
                    });
                }
            }

            self.hits.push(closest);
        }
    }

    /// One full update pass: re-centre on `target`, rebuild the fan, pick
    /// the nearest hit against `walls` for every ray.
    pub fn sweep(&mut self, target: Vec2, walls: &[Segment]) {
        self.set_facing(target);
        self.regenerate_rays();
        self.compute_intersections(walls);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn box_walls(w: f32, h: f32) -> Vec<Segment> {
        vec![
            Segment::new(0.0, 0.0, w, 0.0),
            Segment::new(0.0, 0.0, 0.0, h),
            Segment::new(w, 0.0, w, h),
            Segment::new(0.0, h, w, h),
        ]
    }

    #[test]
    fn rejects_bad_config() {
        assert_eq!(
            Viewer::new(Vec2::ZERO, FRAC_PI_2, 0.0, 1).err(),
            Some(ConfigError::RayCount(1))
        );
        assert_eq!(
            Viewer::new(Vec2::ZERO, 0.0, 0.0, 3).err(),
            Some(ConfigError::Fov(0.0))
        );
    }

    #[test]
    fn three_ray_fan_spans_the_fov_around_its_target() {
        let mut viewer = Viewer::new(Vec2::ZERO, FRAC_PI_2, 0.0, 3).unwrap();
        viewer.set_facing(Vec2::new(1.0, 0.0));
        viewer.regenerate_rays();

        let rays = viewer.rays();
        assert_eq!(rays.len(), 3);
        // the middle ray points straight at the target
        assert!((rays[1].dir - Vec2::new(1.0, 0.0)).length() < 1e-4);
        // the outer rays sit half a fov to each side
        assert!((rays[0].dir.angle_with(rays[2].dir) - FRAC_PI_2).abs() < 1e-4);
        assert!((rays[0].dir.angle_with(rays[1].dir) - FRAC_PI_2 / 2.0).abs() < 1e-4);
    }

    #[test]
    fn fan_mirrors_the_vertical_axis_of_its_target() {
        // screen y grows downward, so the sweep runs mirrored: the driver
        // flips the mouse y before it gets here
        let mut viewer = Viewer::new(Vec2::ZERO, FRAC_PI_2, 0.0, 3).unwrap();
        viewer.set_facing(Vec2::new(1.0, 1.0));
        viewer.regenerate_rays();

        let middle = viewer.rays()[1].dir;
        assert!((middle - Vec2::new(1.0, -1.0).normalize()).length() < 1e-4);
    }

    #[test]
    fn enclosing_box_fills_every_slot() {
        let mut viewer = Viewer::new(Vec2::new(320.0, 240.0), FRAC_PI_2, 0.3, 60).unwrap();
        viewer.compute_intersections(&box_walls(640.0, 480.0));

        assert_eq!(viewer.hits().len(), viewer.rays().len());
        assert!(viewer.hits().iter().all(Option::is_some));
    }

    #[test]
    fn misses_keep_their_slot() {
        let mut viewer = Viewer::new(Vec2::ZERO, FRAC_PI_2, 0.0, 3).unwrap();
        viewer.set_facing(Vec2::new(1.0, 0.0));
        viewer.regenerate_rays();
        viewer.compute_intersections(&[Segment::new(500.0, -50.0, 500.0, 50.0)]);

        let hits = viewer.hits();
        assert_eq!(hits.len(), 3);
        assert!(hits[0].is_none());
        assert!(hits[2].is_none());

        let hit = hits[1].unwrap();
        assert!((hit.point - Vec2::new(500.0, 0.0)).length() < 1e-2);
        assert!((hit.distance - 500.0).abs() < 1e-2);
    }

    #[test]
    fn nearest_wall_wins() {
        let mut viewer = Viewer::new(Vec2::ZERO, FRAC_PI_2, 0.0, 3).unwrap();
        viewer.set_facing(Vec2::new(1.0, 0.0));
        viewer.regenerate_rays();
        viewer.compute_intersections(&[
            Segment::new(500.0, -50.0, 500.0, 50.0),
            Segment::new(200.0, -50.0, 200.0, 50.0),
        ]);

        let hit = viewer.hits()[1].unwrap();
        assert!((hit.distance - 200.0).abs() < 1e-2);
    }

    #[test]
    fn regeneration_is_idempotent() {
        let mut viewer = Viewer::new(Vec2::new(10.0, 20.0), 1.0, 0.7, 33).unwrap();
        viewer.regenerate_rays();
        let first: Vec<f32> = viewer.rays().iter().map(|ray| ray.angle_deg).collect();
        viewer.regenerate_rays();
        let second: Vec<f32> = viewer.rays().iter().map(|ray| ray.angle_deg).collect();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert!((a - b).abs() < 1e-5);
        }
    }

    #[test]
    fn hits_carry_their_ray_angle() {
        let mut viewer = Viewer::new(Vec2::new(320.0, 240.0), FRAC_PI_2, 0.0, 5).unwrap();
        viewer.compute_intersections(&box_walls(640.0, 480.0));

        for (ray, hit) in viewer.rays().iter().zip(viewer.hits()) {
            assert_eq!(hit.unwrap().angle_deg, ray.angle_deg);
        }
    }
}
