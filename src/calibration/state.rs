// CalibrationStateMachine - Inactive/Active mode and the running accumulator
//
// Calibration is a running min/max accumulator rather than a fixed-duration
// sampler: while Active, every absorbed distance widens the bounds, so the
// user sweeps through their natural gesture range and then stops.

use serde::{Deserialize, Serialize};

use super::bounds::CalibrationBounds;

/// Calibration mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationMode {
    #[default]
    Inactive,
    Active,
}

/// Tracks the calibration mode and the learned gesture bounds
#[derive(Debug, Clone)]
pub struct CalibrationStateMachine {
    mode: CalibrationMode,
    bounds: CalibrationBounds,
    defaults: CalibrationBounds,
    /// Samples absorbed since the last start(); 0 means bounds hold the sentinel
    absorbed: u64,
}

impl CalibrationStateMachine {
    /// Create an Inactive machine whose bounds start at (and reset to) `defaults`
    pub fn new(defaults: CalibrationBounds) -> Self {
        Self {
            mode: CalibrationMode::Inactive,
            bounds: defaults,
            defaults,
            absorbed: 0,
        }
    }

    pub fn mode(&self) -> CalibrationMode {
        self.mode
    }

    pub fn is_active(&self) -> bool {
        self.mode == CalibrationMode::Active
    }

    pub fn bounds(&self) -> CalibrationBounds {
        self.bounds
    }

    pub fn defaults(&self) -> CalibrationBounds {
        self.defaults
    }

    /// Number of samples absorbed since the last start()
    pub fn absorbed(&self) -> u64 {
        self.absorbed
    }

    /// Enter Active and restart collection from the empty sentinel range.
    ///
    /// Calling this while already Active discards the samples gathered so far.
    pub fn start(&mut self) {
        self.mode = CalibrationMode::Active;
        self.bounds = CalibrationBounds::collecting();
        self.absorbed = 0;
    }

    /// Leave Active, keeping whatever bounds were learned.
    ///
    /// If nothing was absorbed the sentinel stays in place and mapping is
    /// skipped until the next calibration or reset.
    pub fn stop(&mut self) -> CalibrationBounds {
        self.mode = CalibrationMode::Inactive;
        self.bounds
    }

    /// Return to Inactive with the fixed default bounds from any state.
    pub fn reset_to_default(&mut self) -> CalibrationBounds {
        self.mode = CalibrationMode::Inactive;
        self.bounds = self.defaults;
        self.absorbed = 0;
        self.bounds
    }

    /// Widen the bounds with a new raw distance; no effect while Inactive.
    ///
    /// The first sample after start() seeds both bounds, so the result is
    /// exactly min/max of the absorbed samples whatever their magnitude.
    pub fn absorb(&mut self, raw_distance: u32) {
        if !self.is_active() {
            return;
        }

        if self.absorbed == 0 {
            self.bounds = CalibrationBounds::new(raw_distance, raw_distance);
        } else {
            self.bounds.widen(raw_distance);
        }
        self.absorbed += 1;
    }
}

impl Default for CalibrationStateMachine {
    fn default() -> Self {
        Self::new(CalibrationBounds::app_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{APP_MAX, APP_MIN, COLLECTING_MAX, COLLECTING_MIN};

    #[test]
    fn test_initial_state() {
        let machine = CalibrationStateMachine::default();
        assert_eq!(machine.mode(), CalibrationMode::Inactive);
        assert_eq!(machine.bounds(), CalibrationBounds::new(APP_MIN, APP_MAX));
    }

    #[test]
    fn test_start_switches_to_collecting_sentinel() {
        let mut machine = CalibrationStateMachine::default();
        machine.start();

        assert!(machine.is_active());
        assert_eq!(machine.bounds().min_distance, COLLECTING_MIN);
        assert_eq!(machine.bounds().max_distance, COLLECTING_MAX);
        assert!(!machine.bounds().is_valid());
    }

    #[test]
    fn test_absorb_tracks_min_and_max() {
        let samples = [57, 31, 120, 88, 31, 142, 64];
        let mut machine = CalibrationStateMachine::default();
        machine.start();
        for &d in &samples {
            machine.absorb(d);
        }

        assert_eq!(machine.bounds().min_distance, 31);
        assert_eq!(machine.bounds().max_distance, 142);
        assert_eq!(machine.absorbed(), samples.len() as u64);
    }

    #[test]
    fn test_absorb_beyond_sentinel_magnitude() {
        let mut machine = CalibrationStateMachine::default();
        machine.start();
        machine.absorb(1500);
        machine.absorb(1200);

        assert_eq!(machine.bounds(), CalibrationBounds::new(1200, 1500));
    }

    #[test]
    fn test_absorb_ignored_while_inactive() {
        let mut machine = CalibrationStateMachine::default();
        machine.absorb(5);
        machine.absorb(900);
        assert_eq!(machine.bounds(), CalibrationBounds::app_default());
    }

    #[test]
    fn test_start_while_active_restarts_collection() {
        let mut machine = CalibrationStateMachine::default();
        machine.start();
        machine.absorb(10);
        machine.absorb(300);
        machine.start();
        machine.absorb(60);
        machine.absorb(70);

        assert_eq!(machine.bounds(), CalibrationBounds::new(60, 70));
    }

    #[test]
    fn test_stop_keeps_learned_bounds() {
        let mut machine = CalibrationStateMachine::default();
        machine.start();
        machine.absorb(30);
        machine.absorb(80);
        let bounds = machine.stop();

        assert_eq!(bounds, CalibrationBounds::new(30, 80));
        assert_eq!(machine.mode(), CalibrationMode::Inactive);

        // No further widening once stopped
        machine.absorb(5);
        assert_eq!(machine.bounds(), CalibrationBounds::new(30, 80));
    }

    #[test]
    fn test_stop_without_samples_keeps_sentinel() {
        let mut machine = CalibrationStateMachine::default();
        machine.start();
        let bounds = machine.stop();

        assert_eq!(bounds, CalibrationBounds::collecting());
        assert!(!bounds.is_valid());
    }

    #[test]
    fn test_stop_while_inactive_is_noop() {
        let mut machine = CalibrationStateMachine::default();
        assert_eq!(machine.stop(), CalibrationBounds::app_default());
        assert_eq!(machine.mode(), CalibrationMode::Inactive);
    }

    #[test]
    fn test_reset_to_default_from_any_state() {
        let mut machine = CalibrationStateMachine::default();
        machine.start();
        machine.absorb(42);
        assert_eq!(machine.reset_to_default(), CalibrationBounds::app_default());
        assert_eq!(machine.mode(), CalibrationMode::Inactive);

        machine.start();
        machine.absorb(1);
        machine.absorb(2);
        machine.stop();
        machine.reset_to_default();
        assert_eq!(machine.bounds(), CalibrationBounds::new(APP_MIN, APP_MAX));
    }

    #[test]
    fn test_custom_defaults() {
        let mut machine = CalibrationStateMachine::new(CalibrationBounds::new(15, 250));
        machine.start();
        machine.absorb(100);
        machine.reset_to_default();
        assert_eq!(machine.bounds(), CalibrationBounds::new(15, 250));
    }
}
