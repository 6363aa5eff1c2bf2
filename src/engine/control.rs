//! Pure per-frame control computation.
//!
//! `ControlState::process_frame` takes one frame's landmarks (or none) and
//! advances calibration and smoothing, returning the level to apply and the
//! overlay to draw. It performs no I/O, so the whole gesture-to-volume path
//! can be driven deterministically in tests.

use crate::calibration::{CalibrationBounds, CalibrationStateMachine};
use crate::config::AppConfig;
use crate::gesture::{measure_distance, HandLandmarks};
use crate::mapping::{map_distance, DeviceRange};
use crate::smoothing::SmoothingFilter;
use crate::vision::Overlay;

/// Result of one control step
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutcome {
    /// Raw thumb–index distance in pixels, 0 without a hand
    pub distance: u32,
    /// Smoothed level in device units, `None` when volume stays unchanged
    pub volume: Option<f64>,
    pub overlay: Option<Overlay>,
}

impl FrameOutcome {
    fn no_hand() -> Self {
        Self {
            distance: 0,
            volume: None,
            overlay: None,
        }
    }
}

/// Calibration machine and smoothing window, mutated together.
///
/// Every bounds reset clears the window in the same call, so levels from two
/// gesture ranges never share a mean.
#[derive(Debug, Clone)]
pub struct ControlState {
    calibration: CalibrationStateMachine,
    smoothing: SmoothingFilter,
}

impl ControlState {
    pub fn new(defaults: CalibrationBounds, window: usize) -> Self {
        Self {
            calibration: CalibrationStateMachine::new(defaults),
            smoothing: SmoothingFilter::new(window),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            CalibrationBounds::new(
                config.calibration.default_min,
                config.calibration.default_max,
            ),
            config.smoothing.window,
        )
    }

    pub fn calibration(&self) -> &CalibrationStateMachine {
        &self.calibration
    }

    pub fn smoothing(&self) -> &SmoothingFilter {
        &self.smoothing
    }

    pub fn start_calibration(&mut self) -> CalibrationBounds {
        self.calibration.start();
        self.smoothing.clear();
        self.calibration.bounds()
    }

    pub fn stop_calibration(&mut self) -> CalibrationBounds {
        self.calibration.stop()
    }

    pub fn reset_calibration(&mut self) -> CalibrationBounds {
        let bounds = self.calibration.reset_to_default();
        self.smoothing.clear();
        bounds
    }

    /// Advance one frame.
    ///
    /// With a hand: measure, absorb while calibrating, map if the bounds are
    /// usable, smooth. Without a hand nothing changes and distance is 0.
    pub fn process_frame(
        &mut self,
        hand: Option<&HandLandmarks>,
        width: u32,
        height: u32,
        device: &DeviceRange,
    ) -> FrameOutcome {
        let Some(hand) = hand else {
            return FrameOutcome::no_hand();
        };

        let thumb = hand.thumb_tip().to_pixel(width, height);
        let index = hand.index_tip().to_pixel(width, height);
        let distance = measure_distance(thumb, index);

        self.calibration.absorb(distance);

        let volume = map_distance(distance, &self.calibration.bounds(), device)
            .map(|level| self.smoothing.push(level));

        let overlay = Overlay {
            landmarks: hand.to_pixels(width, height),
            thumb,
            index,
            midpoint: thumb.midpoint(index),
            distance,
        };

        FrameOutcome {
            distance,
            volume,
            overlay: Some(overlay),
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{APP_MAX, APP_MIN};
    use crate::vision::hand_with_gap;

    const W: u32 = 640;
    const H: u32 = 480;

    fn device() -> DeviceRange {
        DeviceRange::new(-65.25, 0.0).unwrap()
    }

    fn step(state: &mut ControlState, gap: Option<u32>) -> FrameOutcome {
        let hand = gap.map(|px| hand_with_gap(px, W, H));
        state.process_frame(hand.as_ref(), W, H, &device())
    }

    #[test]
    fn test_no_hand_leaves_everything_unchanged() {
        let mut state = ControlState::default();
        step(&mut state, Some(110));
        let before = state.smoothing().len();

        let outcome = step(&mut state, None);
        assert_eq!(outcome.distance, 0);
        assert_eq!(outcome.volume, None);
        assert!(outcome.overlay.is_none());
        assert_eq!(state.smoothing().len(), before);
    }

    #[test]
    fn test_default_range_maps_to_device_scale() {
        let mut state = ControlState::default();
        let outcome = step(&mut state, Some(20));
        assert_eq!(outcome.distance, 20);
        assert_eq!(outcome.volume, Some(-65.25));

        let mut state = ControlState::default();
        assert_eq!(step(&mut state, Some(200)).volume, Some(0.0));

        let mut state = ControlState::default();
        let level = step(&mut state, Some(110)).volume.unwrap();
        assert_eq!(device().to_percent(level), 50);
    }

    #[test]
    fn test_levels_are_smoothed() {
        let mut state = ControlState::default();
        step(&mut state, Some(20));
        let outcome = step(&mut state, Some(200));
        // Mean of -65.25 and 0.0
        assert_eq!(outcome.volume, Some(-32.625));
    }

    #[test]
    fn test_start_calibration_skips_mapping_until_range_opens() {
        let mut state = ControlState::default();
        step(&mut state, Some(150));
        state.start_calibration();
        assert!(state.smoothing().is_empty());

        // First sample seeds min == max: still no usable range
        assert_eq!(step(&mut state, Some(30)).volume, None);
        // Second distinct sample opens the range
        assert!(step(&mut state, Some(80)).volume.is_some());
    }

    #[test]
    fn test_calibration_scenario_30_to_80() {
        let mut state = ControlState::default();
        state.start_calibration();
        step(&mut state, Some(30));
        step(&mut state, Some(80));
        let bounds = state.stop_calibration();
        assert_eq!(bounds, CalibrationBounds::new(30, 80));

        state.reset_smoothing_for_test();
        let low = step(&mut state, Some(30)).volume.unwrap();
        assert_eq!(device().to_percent(low), 0);

        state.reset_smoothing_for_test();
        let high = step(&mut state, Some(80)).volume.unwrap();
        assert_eq!(device().to_percent(high), 100);
    }

    #[test]
    fn test_stop_without_samples_never_maps() {
        let mut state = ControlState::default();
        state.start_calibration();
        state.stop_calibration();

        for gap in [10, 50, 300] {
            let outcome = step(&mut state, Some(gap));
            assert_eq!(outcome.distance, gap);
            assert_eq!(outcome.volume, None);
        }
        assert!(state.smoothing().is_empty());
    }

    #[test]
    fn test_reset_restores_defaults_and_clears_window() {
        let mut state = ControlState::default();
        state.start_calibration();
        step(&mut state, Some(40));
        step(&mut state, Some(90));
        let bounds = state.reset_calibration();

        assert_eq!(bounds, CalibrationBounds::new(APP_MIN, APP_MAX));
        assert!(!state.calibration().is_active());
        assert!(state.smoothing().is_empty());
    }

    #[test]
    fn test_overlay_marks_tips_and_midpoint() {
        let mut state = ControlState::default();
        let overlay = step(&mut state, Some(100)).overlay.unwrap();
        assert_eq!(overlay.distance, 100);
        assert_eq!(overlay.index.x - overlay.thumb.x, 100);
        assert_eq!(overlay.midpoint.x, overlay.thumb.x + 50);
    }

    impl ControlState {
        fn reset_smoothing_for_test(&mut self) {
            self.smoothing.clear();
        }
    }
}
