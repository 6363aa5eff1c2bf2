use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::VolumeError;
use crate::mapping::DeviceRange;

use super::VolumeEndpoint;

/// Most recent applied levels kept for inspection
pub const HISTORY_CAPACITY: usize = 256;

/// In-process endpoint used for headless runs and deterministic testing.
///
/// Clones share the same level history, so a test can keep one clone while
/// the controller owns another. Only the last [`HISTORY_CAPACITY`] levels are
/// retained.
#[derive(Clone)]
pub struct SimulatedEndpoint {
    min_vol: f64,
    max_vol: f64,
    available: bool,
    failing: Arc<AtomicBool>,
    applied: Arc<Mutex<VecDeque<f64>>>,
}

impl SimulatedEndpoint {
    pub fn new(min_vol: f64, max_vol: f64) -> Self {
        Self {
            min_vol,
            max_vol,
            available: true,
            failing: Arc::new(AtomicBool::new(false)),
            applied: Arc::new(Mutex::new(VecDeque::with_capacity(HISTORY_CAPACITY))),
        }
    }

    /// An endpoint whose range query fails, as when no output device exists.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new(-65.25, 0.0)
        }
    }

    /// Make subsequent `set_volume` calls fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Recently applied levels, oldest first.
    pub fn applied(&self) -> Vec<f64> {
        self.applied
            .lock()
            .map(|levels| levels.iter().copied().collect())
            .unwrap_or_default()
    }

    /// The level currently set on the simulated device.
    pub fn current(&self) -> Option<f64> {
        self.applied
            .lock()
            .ok()
            .and_then(|levels| levels.back().copied())
    }
}

impl VolumeEndpoint for SimulatedEndpoint {
    fn volume_range(&self) -> Result<DeviceRange, VolumeError> {
        if !self.available {
            return Err(VolumeError::EndpointUnavailable {
                reason: "simulated device has no output endpoint".to_string(),
            });
        }
        DeviceRange::new(self.min_vol, self.max_vol)
    }

    fn set_volume(&self, level: f64) -> Result<(), VolumeError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(VolumeError::ApplyFailed {
                reason: "simulated device rejected the level".to_string(),
            });
        }

        let mut applied = self
            .applied
            .lock()
            .map_err(|_| VolumeError::LockPoisoned {
                component: "simulated endpoint".to_string(),
            })?;
        if applied.len() == HISTORY_CAPACITY {
            applied.pop_front();
        }
        applied.push_back(level);
        Ok(())
    }
}
