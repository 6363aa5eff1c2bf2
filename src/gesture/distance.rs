//! Pixel-space points and the thumb–index distance measurement.

use serde::{Deserialize, Serialize};

/// A landmark scaled into pixel coordinates of the current frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i32,
    pub y: i32,
}

impl PixelPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Integer midpoint, rounding toward negative infinity like floor division.
    pub fn midpoint(self, other: PixelPoint) -> PixelPoint {
        PixelPoint {
            x: (self.x + other.x).div_euclid(2),
            y: (self.y + other.y).div_euclid(2),
        }
    }
}

/// Euclidean distance between two pixel points, truncated to whole pixels.
pub fn measure_distance(a: PixelPoint, b: PixelPoint) -> u32 {
    let dx = f64::from(b.x) - f64::from(a.x);
    let dy = f64::from(b.y) - f64::from(a.y);
    dx.hypot(dy) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_of_345_triangle() {
        let a = PixelPoint::new(10, 10);
        let b = PixelPoint::new(13, 14);
        assert_eq!(measure_distance(a, b), 5);
    }

    #[test]
    fn test_distance_is_truncated() {
        // sqrt(2) * 10 = 14.14...
        let a = PixelPoint::new(0, 0);
        let b = PixelPoint::new(10, 10);
        assert_eq!(measure_distance(a, b), 14);
    }

    #[test]
    fn test_distance_symmetry_and_identity() {
        let points = [
            PixelPoint::new(0, 0),
            PixelPoint::new(-5, 12),
            PixelPoint::new(320, 240),
            PixelPoint::new(639, 1),
            PixelPoint::new(17, 479),
        ];

        for &a in &points {
            assert_eq!(measure_distance(a, a), 0);
            for &b in &points {
                assert_eq!(measure_distance(a, b), measure_distance(b, a));
            }
        }
    }

    #[test]
    fn test_midpoint_floors() {
        let mid = PixelPoint::new(1, 2).midpoint(PixelPoint::new(4, 5));
        assert_eq!(mid, PixelPoint::new(2, 3));
    }
}
