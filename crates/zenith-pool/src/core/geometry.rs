//! Point math on `glam::Vec2`.

use glam::Vec2;

/// Euclidean distance between two points.
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Angle in radians of the direction from `from` toward `to`.
#[inline]
pub fn heading(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Vector of the given length pointing along `angle`.
#[inline]
pub fn from_polar(angle: f32, length: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin()) * length
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    #[test]
    fn distance_is_pythagorean() {
        assert_eq!(distance(Vec2::ZERO, Vec2::new(3.0, 4.0)), 5.0);
    }

    #[test]
    fn heading_along_axes() {
        assert_eq!(heading(Vec2::ZERO, Vec2::new(10.0, 0.0)), 0.0);
        assert!((heading(Vec2::ZERO, Vec2::new(0.0, 5.0)) - FRAC_PI_2).abs() < 1e-6);
        assert!((heading(Vec2::ZERO, Vec2::new(-1.0, 0.0)).abs() - PI).abs() < 1e-6);
    }

    #[test]
    fn polar_roundtrip() {
        let v = from_polar(heading(Vec2::ZERO, Vec2::new(1.0, 1.0)), 2.0);
        assert!((v.length() - 2.0).abs() < 1e-5);
        assert!((v.x - v.y).abs() < 1e-5);
    }
}
