//! Hand landmark storage in normalized image coordinates.

use serde::{Deserialize, Serialize};

use super::distance::PixelPoint;

// ============================================================================
// HAND LANDMARK INDICES
// ============================================================================

pub const WRIST: usize = 0;
pub const THUMB_CMC: usize = 1;
pub const THUMB_MCP: usize = 2;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_MCP: usize = 5;
pub const INDEX_PIP: usize = 6;
pub const INDEX_DIP: usize = 7;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_MCP: usize = 9;
pub const MIDDLE_PIP: usize = 10;
pub const MIDDLE_DIP: usize = 11;
pub const MIDDLE_TIP: usize = 12;
pub const RING_MCP: usize = 13;
pub const RING_PIP: usize = 14;
pub const RING_DIP: usize = 15;
pub const RING_TIP: usize = 16;
pub const PINKY_MCP: usize = 17;
pub const PINKY_PIP: usize = 18;
pub const PINKY_DIP: usize = 19;
pub const PINKY_TIP: usize = 20;

/// Number of keypoints reported per hand
pub const LANDMARK_COUNT: usize = 21;

/// Hand skeleton connections for overlay rendering (palm outline, then fingers)
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    (WRIST, THUMB_CMC), (WRIST, INDEX_MCP), (INDEX_MCP, MIDDLE_MCP),
    (MIDDLE_MCP, RING_MCP), (RING_MCP, PINKY_MCP), (WRIST, PINKY_MCP),
    (THUMB_CMC, THUMB_MCP), (THUMB_MCP, THUMB_IP), (THUMB_IP, THUMB_TIP),
    (INDEX_MCP, INDEX_PIP), (INDEX_PIP, INDEX_DIP), (INDEX_DIP, INDEX_TIP),
    (MIDDLE_MCP, MIDDLE_PIP), (MIDDLE_PIP, MIDDLE_DIP), (MIDDLE_DIP, MIDDLE_TIP),
    (RING_MCP, RING_PIP), (RING_PIP, RING_DIP), (RING_DIP, RING_TIP),
    (PINKY_MCP, PINKY_PIP), (PINKY_PIP, PINKY_DIP), (PINKY_DIP, PINKY_TIP),
];

/// A single keypoint in normalized `[0,1] x [0,1]` image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Scale into pixel space, truncating toward zero.
    pub fn to_pixel(self, width: u32, height: u32) -> PixelPoint {
        PixelPoint {
            x: (self.x * width as f32) as i32,
            y: (self.y * height as f32) as i32,
        }
    }
}

/// All keypoints of exactly one detected hand.
#[derive(Debug, Clone, PartialEq)]
pub struct HandLandmarks {
    points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    pub fn new(points: [Landmark; LANDMARK_COUNT]) -> Self {
        Self { points }
    }

    /// Build from a detector's point list; `None` unless exactly 21 points.
    pub fn from_slice(points: &[Landmark]) -> Option<Self> {
        let points: [Landmark; LANDMARK_COUNT] = points.try_into().ok()?;
        Some(Self { points })
    }

    pub fn get(&self, index: usize) -> Option<Landmark> {
        self.points.get(index).copied()
    }

    pub fn points(&self) -> &[Landmark; LANDMARK_COUNT] {
        &self.points
    }

    pub fn thumb_tip(&self) -> Landmark {
        self.points[THUMB_TIP]
    }

    pub fn index_tip(&self) -> Landmark {
        self.points[INDEX_TIP]
    }

    /// Every keypoint scaled to the frame's pixel grid.
    pub fn to_pixels(&self, width: u32, height: u32) -> [PixelPoint; LANDMARK_COUNT] {
        self.points.map(|point| point.to_pixel(width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_pixel_truncates() {
        let point = Landmark::new(0.4999, 0.75);
        assert_eq!(point.to_pixel(640, 480), PixelPoint::new(319, 360));
    }

    #[test]
    fn test_from_slice_requires_full_hand() {
        assert!(HandLandmarks::from_slice(&[Landmark::default(); 20]).is_none());
        assert!(HandLandmarks::from_slice(&[Landmark::default(); LANDMARK_COUNT]).is_some());
    }

    #[test]
    fn test_connections_outline_the_palm() {
        let has = |a: usize, b: usize| {
            HAND_CONNECTIONS
                .iter()
                .any(|&(from, to)| (from, to) == (a, b) || (from, to) == (b, a))
        };

        for (a, b) in [
            (WRIST, THUMB_CMC),
            (WRIST, INDEX_MCP),
            (INDEX_MCP, MIDDLE_MCP),
            (MIDDLE_MCP, RING_MCP),
            (RING_MCP, PINKY_MCP),
            (WRIST, PINKY_MCP),
        ] {
            assert!(has(a, b), "missing palm edge ({a}, {b})");
        }
        assert!(!has(WRIST, MIDDLE_MCP));
        assert!(!has(WRIST, RING_MCP));
    }

    #[test]
    fn test_every_landmark_is_connected() {
        for index in 0..LANDMARK_COUNT {
            assert!(
                HAND_CONNECTIONS
                    .iter()
                    .any(|&(from, to)| from == index || to == index),
                "landmark {index} is not drawn"
            );
        }
    }

    #[test]
    fn test_tip_accessors() {
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        points[THUMB_TIP] = Landmark::new(0.1, 0.2);
        points[INDEX_TIP] = Landmark::new(0.3, 0.4);
        let hand = HandLandmarks::new(points);

        assert_eq!(hand.thumb_tip(), Landmark::new(0.1, 0.2));
        assert_eq!(hand.index_tip(), Landmark::new(0.3, 0.4));
        assert_eq!(hand.get(LANDMARK_COUNT), None);
    }
}
