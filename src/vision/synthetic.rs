//! Synthetic video source and hand detectors for headless runs and tests.

use std::collections::VecDeque;
use std::f32::consts::PI;

use image::Rgb;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::CaptureConfig;
use crate::error::CaptureError;
use crate::gesture::landmarks::{
    INDEX_DIP, INDEX_MCP, INDEX_PIP, MIDDLE_DIP, MIDDLE_MCP, MIDDLE_PIP, MIDDLE_TIP, PINKY_DIP,
    PINKY_MCP, PINKY_PIP, PINKY_TIP, RING_DIP, RING_MCP, RING_PIP, RING_TIP, THUMB_CMC,
    THUMB_IP, THUMB_MCP, WRIST,
};
use crate::gesture::{HandLandmarks, Landmark, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};

use super::{Frame, FrameSource, HandDetector};

const BACKGROUND: Rgb<u8> = Rgb([24, 28, 36]);

/// Camera stand-in producing blank frames of a fixed size.
///
/// Optionally drops every n-th frame (transient failure) and disconnects
/// after a fixed number of frames.
pub struct SyntheticCamera {
    width: u32,
    height: u32,
    drop_every: Option<u64>,
    frame_limit: Option<u64>,
    attempts: u64,
    delivered: u64,
}

impl SyntheticCamera {
    /// Open the synthetic source with the configured frame geometry.
    ///
    /// # Errors
    /// `SourceUnavailable` if either dimension is zero.
    pub fn open(config: &CaptureConfig) -> Result<Self, CaptureError> {
        if config.width == 0 || config.height == 0 {
            return Err(CaptureError::SourceUnavailable {
                reason: format!(
                    "invalid frame size {}x{}",
                    config.width, config.height
                ),
            });
        }

        Ok(Self {
            width: config.width,
            height: config.height,
            drop_every: None,
            frame_limit: None,
            attempts: 0,
            delivered: 0,
        })
    }

    /// Fail every n-th acquisition with a transient `FrameDropped`.
    pub fn with_drop_every(mut self, n: u64) -> Self {
        self.drop_every = (n > 0).then_some(n);
        self
    }

    /// Disconnect after delivering `frames` frames.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self
    }
}

impl FrameSource for SyntheticCamera {
    fn acquire(&mut self) -> Result<Frame, CaptureError> {
        if self.frame_limit.is_some_and(|limit| self.delivered >= limit) {
            return Err(CaptureError::Disconnected);
        }

        self.attempts += 1;
        if self.drop_every.is_some_and(|n| self.attempts % n == 0) {
            return Err(CaptureError::FrameDropped {
                reason: format!("synthetic glitch on attempt {}", self.attempts),
            });
        }

        self.delivered += 1;
        Ok(Frame::from_pixel(self.width, self.height, BACKGROUND))
    }
}

/// Build a plausible open hand whose thumb and index tips sit at the given
/// normalized positions. The wrist sits below the midpoint of the two tips.
pub fn synthetic_hand(thumb_tip: Landmark, index_tip: Landmark) -> HandLandmarks {
    let mid = Landmark::new(
        (thumb_tip.x + index_tip.x) / 2.0,
        (thumb_tip.y + index_tip.y) / 2.0,
    );
    let wrist = Landmark::new(mid.x, (mid.y + 0.3).min(1.0));
    let lerp = |a: Landmark, b: Landmark, t: f32| {
        Landmark::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    };

    let mut points = [Landmark::default(); LANDMARK_COUNT];
    points[WRIST] = wrist;
    points[THUMB_CMC] = lerp(wrist, thumb_tip, 0.25);
    points[THUMB_MCP] = lerp(wrist, thumb_tip, 0.5);
    points[THUMB_IP] = lerp(wrist, thumb_tip, 0.75);
    points[THUMB_TIP] = thumb_tip;
    points[INDEX_MCP] = lerp(wrist, index_tip, 0.4);
    points[INDEX_PIP] = lerp(wrist, index_tip, 0.6);
    points[INDEX_DIP] = lerp(wrist, index_tip, 0.8);
    points[INDEX_TIP] = index_tip;

    // Remaining fingers curled into the palm beside the index finger
    let fingers = [
        (MIDDLE_MCP, MIDDLE_PIP, MIDDLE_DIP, MIDDLE_TIP, 0.03),
        (RING_MCP, RING_PIP, RING_DIP, RING_TIP, 0.06),
        (PINKY_MCP, PINKY_PIP, PINKY_DIP, PINKY_TIP, 0.09),
    ];
    for (mcp, pip, dip, tip, offset) in fingers {
        let base = Landmark::new(points[INDEX_MCP].x + offset, points[INDEX_MCP].y);
        points[mcp] = base;
        points[pip] = Landmark::new(base.x, base.y - 0.05);
        points[dip] = Landmark::new(base.x, base.y - 0.03);
        points[tip] = Landmark::new(base.x, base.y);
    }

    HandLandmarks::new(points)
}

/// Hand whose thumb and index tips are exactly `gap_px` apart horizontally
/// once scaled to a `width` x `height` frame.
pub fn hand_with_gap(gap_px: u32, width: u32, height: u32) -> HandLandmarks {
    let (w, h) = (width as f32, height as f32);
    let cx = (width / 2) as f32;
    let cy = (height / 2) as f32;
    // Quarter-pixel nudge keeps truncation from landing one pixel short
    let thumb = Landmark::new((cx + 0.25) / w, (cy + 0.25) / h);
    let index = Landmark::new((cx + gap_px as f32 + 0.25) / w, (cy + 0.25) / h);
    synthetic_hand(thumb, index)
}

/// Detector whose thumb–index gap oscillates between two pixel distances.
pub struct SweepHandDetector {
    min_px: f32,
    max_px: f32,
    period_frames: u32,
    jitter_px: f32,
    rng: StdRng,
    frame: u64,
}

impl SweepHandDetector {
    pub fn new(min_px: u32, max_px: u32, period_frames: u32) -> Self {
        Self {
            min_px: min_px as f32,
            max_px: max_px as f32,
            period_frames: period_frames.max(1),
            jitter_px: 0.0,
            rng: StdRng::seed_from_u64(0),
            frame: 0,
        }
    }

    /// Add uniform landmark noise of up to `jitter_px` pixels, seeded.
    pub fn with_jitter(mut self, jitter_px: f32, seed: u64) -> Self {
        self.jitter_px = jitter_px.max(0.0);
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Gap in pixels at a given frame index (before jitter).
    pub fn gap_at(&self, frame: u64) -> f32 {
        let phase = (frame % u64::from(self.period_frames)) as f32 / self.period_frames as f32;
        let t = (1.0 - (2.0 * PI * phase).cos()) / 2.0;
        self.min_px + (self.max_px - self.min_px) * t
    }

    fn noise(&mut self) -> f32 {
        if self.jitter_px == 0.0 {
            0.0
        } else {
            self.rng.gen_range(-self.jitter_px..=self.jitter_px)
        }
    }
}

impl HandDetector for SweepHandDetector {
    fn detect(&mut self, frame: &Frame) -> Option<HandLandmarks> {
        let (w, h) = (frame.width() as f32, frame.height() as f32);
        let gap = self.gap_at(self.frame);
        self.frame += 1;

        let cx = w / 2.0;
        let cy = h / 2.0;
        let thumb = Landmark::new(
            (cx - gap / 2.0 + self.noise()) / w,
            (cy + self.noise()) / h,
        );
        let index = Landmark::new(
            (cx + gap / 2.0 + self.noise()) / w,
            (cy + self.noise()) / h,
        );
        Some(synthetic_hand(thumb, index))
    }
}

/// Detector replaying a fixed per-frame script; reports no hand once exhausted.
pub struct ScriptedHandDetector {
    script: VecDeque<Option<HandLandmarks>>,
}

impl ScriptedHandDetector {
    pub fn new(script: impl IntoIterator<Item = Option<HandLandmarks>>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    /// Script of thumb–index gaps in pixels for a `width` x `height` frame;
    /// `None` entries are frames without a hand.
    pub fn from_gaps(gaps: &[Option<u32>], width: u32, height: u32) -> Self {
        Self::new(
            gaps.iter()
                .map(|gap| gap.map(|px| hand_with_gap(px, width, height))),
        )
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl HandDetector for ScriptedHandDetector {
    fn detect(&mut self, _frame: &Frame) -> Option<HandLandmarks> {
        self.script.pop_front().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::measure_distance;

    fn small_config() -> CaptureConfig {
        CaptureConfig {
            width: 64,
            height: 48,
            ..CaptureConfig::default()
        }
    }

    #[test]
    fn test_zero_size_source_is_unavailable() {
        let config = CaptureConfig {
            width: 0,
            ..CaptureConfig::default()
        };
        assert!(matches!(
            SyntheticCamera::open(&config),
            Err(CaptureError::SourceUnavailable { .. })
        ));
    }

    #[test]
    fn test_camera_drops_and_disconnects() {
        let mut camera = SyntheticCamera::open(&small_config())
            .unwrap()
            .with_drop_every(3)
            .with_frame_limit(4);

        assert!(camera.acquire().is_ok());
        assert!(camera.acquire().is_ok());
        assert!(matches!(
            camera.acquire(),
            Err(CaptureError::FrameDropped { .. })
        ));
        assert!(camera.acquire().is_ok());
        assert!(camera.acquire().is_ok());
        assert!(matches!(camera.acquire(), Err(CaptureError::Disconnected)));
    }

    #[test]
    fn test_hand_with_gap_measures_exactly() {
        for gap in [0, 1, 17, 20, 30, 80, 110, 199, 200, 263] {
            let hand = hand_with_gap(gap, 640, 480);
            let thumb = hand.thumb_tip().to_pixel(640, 480);
            let index = hand.index_tip().to_pixel(640, 480);
            assert_eq!(measure_distance(thumb, index), gap, "gap {gap}");
        }
    }

    #[test]
    fn test_sweep_spans_configured_range() {
        let detector = SweepHandDetector::new(40, 160, 20);
        assert_eq!(detector.gap_at(0), 40.0);
        assert!((detector.gap_at(10) - 160.0).abs() < 1e-3);
        assert_eq!(detector.gap_at(20), 40.0);
    }

    #[test]
    fn test_sweep_detector_always_reports_a_hand() {
        let frame = Frame::new(640, 480);
        let mut detector = SweepHandDetector::new(40, 160, 20).with_jitter(2.0, 7);
        for _ in 0..30 {
            let hand = detector.detect(&frame).expect("hand");
            let d = measure_distance(
                hand.thumb_tip().to_pixel(640, 480),
                hand.index_tip().to_pixel(640, 480),
            );
            assert!(d <= 170, "gap {d} beyond sweep + jitter");
        }
    }

    #[test]
    fn test_scripted_detector_replays_then_goes_quiet() {
        let frame = Frame::new(640, 480);
        let mut detector = ScriptedHandDetector::from_gaps(&[Some(30), None, Some(80)], 640, 480);

        assert!(detector.detect(&frame).is_some());
        assert!(detector.detect(&frame).is_none());
        assert!(detector.detect(&frame).is_some());
        assert_eq!(detector.remaining(), 0);
        assert!(detector.detect(&frame).is_none());
    }
}
