use glam::Vec2;

use crate::map::Segment;
use crate::math::VecExt;

/// One ray of the fan: an origin copied from the viewer at regeneration
/// time (never aliased) plus a unit direction.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Ray {
    pub origin: Vec2,
    pub dir: Vec2,
    /// Facing angle in degrees, `[0, 360)`, measured from +x and running
    /// clockwise in screen coordinates.
    pub angle_deg: f32,
}

/// Nearest wall intersection found for one ray, tagged with the angle of
/// the ray that produced it.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Hit {
    pub point: Vec2,
    pub angle_deg: f32,
    pub distance: f32,
}

impl Ray {
    pub fn from_angle(origin: Vec2, angle: f32) -> Self {
        let dir = Vec2::from_angle(angle);

        Self {
            origin,
            dir,
            angle_deg: dir.full_angle().to_degrees(),
        }
    }

    /// Parametric line intersection against one wall segment.
    ///
    /// `t` runs along the segment and is exclusive at both ends, so a ray
    /// grazing a corner shared by two walls misses both instead of hitting
    /// twice. `u` runs along the ray and is open above: the ray reaches
    /// forward without limit but never behind its origin. Parallel and
    /// coincident lines (`denom == 0`) are ordinary misses.
    pub fn intersect(&self, wall: &Segment) -> Option<Vec2> {
        let (x1, y1) = (wall.a.x, wall.a.y);
        let (x2, y2) = (wall.b.x, wall.b.y);
        let (x3, y3) = (self.origin.x, self.origin.y);
        let (x4, y4) = (self.origin.x + self.dir.x, self.origin.y + self.dir.y);

        let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
        if denom == 0.0 {
            return None;
        }

        let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
        let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / denom;

        if t > 0.0 && t < 1.0 && u > 0.0 {
            Some(Vec2::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
        } else {
            None
        }
    }
}
