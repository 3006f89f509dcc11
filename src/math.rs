use glam::Vec2;
use std::f32::consts::TAU;

/// Angle helpers layered over [`glam::Vec2`].
///
/// The arithmetic itself (add, sub, scale, dot, negate, distance) comes from
/// glam; this trait carries the few operations the raycasting loop needs on
/// top of it, with the degenerate-input policies the loop relies on.
pub trait VecExt {
    fn mag(self) -> f32;
    fn angle_with(self, other: Vec2) -> f32;
    fn full_angle(self) -> f32;
}

impl VecExt for Vec2 {
    /// Euclidean norm via `hypot`, which stays finite where a naive
    /// `sqrt(x*x + y*y)` would overflow.
    fn mag(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Unsigned angle to `other`, in `[0, PI]`.
    ///
    /// Zero-magnitude operands yield 0, and the cosine ratio is clamped to
    /// `[-1, 1]` so rounding can never push `acos` into NaN.
    fn angle_with(self, other: Vec2) -> f32 {
        let mags = self.mag() * other.mag();
        if mags == 0.0 {
            return 0.0;
        }

        (self.dot(other) / mags).clamp(-1.0, 1.0).acos()
    }

    /// `atan2` angle normalized into `[0, TAU)`.
    fn full_angle(self) -> f32 {
        let angle = self.y.atan2(self.x);

        if angle < 0.0 {
            angle + TAU
        } else {
            angle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn add_then_sub_round_trips() {
        let a = Vec2::new(1.25, -7.5);
        let b = Vec2::new(-3.0, 0.125);
        assert!((a + b - b - a).mag() < 1e-6);
    }

    #[test]
    fn mag_matches_pythagoras() {
        assert_eq!(Vec2::new(3.0, 4.0).mag(), 5.0);
    }

    #[test]
    fn normalize_keeps_zero_vector() {
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);

        let n = Vec2::new(3.0, 4.0).normalize_or_zero();
        assert!((n - Vec2::new(0.6, 0.8)).mag() < 1e-6);
    }

    #[test]
    fn angle_with_zero_operand_is_zero() {
        assert_eq!(Vec2::ZERO.angle_with(Vec2::new(2.0, 5.0)), 0.0);
        assert_eq!(Vec2::new(2.0, 5.0).angle_with(Vec2::ZERO), 0.0);
        assert_eq!(Vec2::ZERO.angle_with(Vec2::ZERO), 0.0);
    }

    #[test]
    fn angle_with_never_goes_nan_on_parallel_vectors() {
        // without the clamp, dot/(|a||b|) can land a hair outside [-1, 1]
        let v = Vec2::new(0.1, 0.3);
        let w = v * 7.0;

        let angle = v.angle_with(w);
        assert!(angle.is_finite());
        assert!(angle.abs() < 1e-3);
        assert!((v.angle_with(-w) - PI).abs() < 1e-3);
    }

    #[test]
    fn angle_with_orthogonal_vectors() {
        let angle = Vec2::new(1.0, 0.0).angle_with(Vec2::new(0.0, 3.0));
        assert!((angle - FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn full_angle_stays_in_range() {
        assert!((Vec2::new(0.0, -1.0).full_angle() - 3.0 * FRAC_PI_2).abs() < 1e-6);
        assert_eq!(Vec2::new(1.0, 0.0).full_angle(), 0.0);

        for deg in 0..360 {
            let angle = Vec2::from_angle((deg as f32).to_radians()).full_angle();
            assert!((0.0..TAU).contains(&angle));
        }
    }
}
