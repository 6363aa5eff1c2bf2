// CalibrationBounds - the gesture distance range feeding the volume mapper
//
// Bounds are valid for mapping only while min_distance < max_distance. Any
// other pair (including the collecting sentinel) is the "not yet calibrated"
// state and volume mapping is skipped.

use serde::{Deserialize, Serialize};

/// Default lower gesture bound in pixels
pub const APP_MIN: u32 = 20;

/// Default upper gesture bound in pixels
pub const APP_MAX: u32 = 200;

/// Reported lower bound while collecting samples and none have arrived yet
pub const COLLECTING_MIN: u32 = 999;

/// Reported upper bound while collecting samples and none have arrived yet
pub const COLLECTING_MAX: u32 = 0;

/// Learned `[min_distance, max_distance]` gesture range in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationBounds {
    pub min_distance: u32,
    pub max_distance: u32,
}

impl CalibrationBounds {
    pub const fn new(min_distance: u32, max_distance: u32) -> Self {
        Self {
            min_distance,
            max_distance,
        }
    }

    /// Fixed range used before any calibration and after reset/default
    pub const fn app_default() -> Self {
        Self::new(APP_MIN, APP_MAX)
    }

    /// Empty range reported right after calibration starts
    pub const fn collecting() -> Self {
        Self::new(COLLECTING_MIN, COLLECTING_MAX)
    }

    /// Whether the range can be used as the mapper's domain
    pub fn is_valid(&self) -> bool {
        self.min_distance < self.max_distance
    }

    /// Clamp a raw distance into the range; caller must check `is_valid` first
    pub fn clamp(&self, raw_distance: u32) -> u32 {
        raw_distance.clamp(self.min_distance, self.max_distance)
    }

    /// Widen the range so it contains `raw_distance`
    pub(crate) fn widen(&mut self, raw_distance: u32) {
        self.min_distance = self.min_distance.min(raw_distance);
        self.max_distance = self.max_distance.max(raw_distance);
    }
}

impl Default for CalibrationBounds {
    fn default() -> Self {
        Self::app_default()
    }
}
