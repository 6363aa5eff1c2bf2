//! Audio collaborator seam and the controller that owns it.
//!
//! The frame loop is the single writer of OS volume: it owns the
//! [`VolumeController`], which in turn exclusively owns the endpoint handle.

use log::info;

use crate::config::{AudioConfig, VolumeBackendKind};
use crate::error::VolumeError;
use crate::mapping::DeviceRange;

mod pactl;
mod simulated;

pub use pactl::PactlEndpoint;
pub use simulated::SimulatedEndpoint;

/// Trait implemented by OS volume endpoints.
///
/// `volume_range` is queried once at startup; `set_volume` receives levels
/// inside that range, in the endpoint's own units.
pub trait VolumeEndpoint: Send {
    fn volume_range(&self) -> Result<DeviceRange, VolumeError>;
    fn set_volume(&self, level: f64) -> Result<(), VolumeError>;
}

/// Open the endpoint selected in the audio config.
pub fn open_endpoint(config: &AudioConfig) -> Result<Box<dyn VolumeEndpoint>, VolumeError> {
    match config.backend {
        VolumeBackendKind::Simulated => Ok(Box::new(SimulatedEndpoint::new(
            config.simulated_min_vol,
            config.simulated_max_vol,
        ))),
        VolumeBackendKind::Pactl => Ok(Box::new(PactlEndpoint::connect()?)),
    }
}

/// Applies smoothed levels to the endpoint and reports them as percentages.
pub struct VolumeController {
    endpoint: Box<dyn VolumeEndpoint>,
    range: DeviceRange,
    last_percent: Option<u8>,
    last_level: Option<f64>,
}

impl VolumeController {
    /// Query the device range and take ownership of the endpoint.
    ///
    /// # Errors
    /// - `EndpointUnavailable` if the endpoint cannot be queried
    /// - `InvalidRange` if the endpoint reports `min_vol >= max_vol`
    pub fn new(endpoint: Box<dyn VolumeEndpoint>) -> Result<Self, VolumeError> {
        let range = endpoint.volume_range()?;
        let range = DeviceRange::new(range.min_vol, range.max_vol)?;
        info!(
            "[VolumeController] Device volume range [{}, {}]",
            range.min_vol, range.max_vol
        );
        Ok(Self {
            endpoint,
            range,
            last_percent: None,
            last_level: None,
        })
    }

    pub fn range(&self) -> DeviceRange {
        self.range
    }

    /// Forward a level to the endpoint and return it as a 0-100 percentage.
    ///
    /// On failure the previously reported percentage is left untouched.
    pub fn apply(&mut self, level: f64) -> Result<u8, VolumeError> {
        self.endpoint.set_volume(level)?;
        let percent = self.range.to_percent(level);
        self.last_level = Some(level);
        self.last_percent = Some(percent);
        Ok(percent)
    }

    /// Percentage of the last successfully applied level, 0 before any.
    pub fn last_percent(&self) -> u8 {
        self.last_percent.unwrap_or(0)
    }

    pub fn last_level(&self) -> Option<f64> {
        self.last_level
    }
}
