//! PulseAudio/PipeWire default-sink endpoint driven through the `pactl` CLI.

use std::process::Command;

use log::{debug, info};

use crate::error::VolumeError;
use crate::mapping::DeviceRange;

use super::VolumeEndpoint;

const DEFAULT_SINK: &str = "@DEFAULT_SINK@";

/// Sink volume in percent units
const SINK_RANGE: DeviceRange = DeviceRange {
    min_vol: 0.0,
    max_vol: 100.0,
};

/// Endpoint whose device units are sink volume percent (`[0, 100]`).
pub struct PactlEndpoint {
    sink: String,
}

impl PactlEndpoint {
    /// Query the sound server and bind to the default sink.
    ///
    /// # Errors
    /// `EndpointUnavailable` if `pactl` is missing or the server is not running.
    pub fn connect() -> Result<Self, VolumeError> {
        let output = Command::new("pactl").arg("info").output()?;
        if !output.status.success() {
            return Err(VolumeError::EndpointUnavailable {
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        info!("[PactlEndpoint] Connected to sound server, sink {}", DEFAULT_SINK);
        Ok(Self {
            sink: DEFAULT_SINK.to_string(),
        })
    }
}

impl VolumeEndpoint for PactlEndpoint {
    fn volume_range(&self) -> Result<DeviceRange, VolumeError> {
        Ok(SINK_RANGE)
    }

    fn set_volume(&self, level: f64) -> Result<(), VolumeError> {
        let percent = sink_percent(level);
        let output = Command::new("pactl")
            .args(["set-sink-volume", &self.sink, &format!("{percent}%")])
            .output()
            .map_err(|err| VolumeError::ApplyFailed {
                reason: err.to_string(),
            })?;

        if !output.status.success() {
            return Err(VolumeError::ApplyFailed {
                reason: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        debug!("[PactlEndpoint] {} -> {}%", self.sink, percent);
        Ok(())
    }
}

/// Whole sink percent for a level, truncated like the reported percentage.
fn sink_percent(level: f64) -> u8 {
    SINK_RANGE.to_percent(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sink_percent_matches_reported_percent() {
        for level in [0.0, 12.3, 49.7, 50.0, 99.99, 100.0] {
            assert_eq!(sink_percent(level), SINK_RANGE.to_percent(level));
        }
        assert_eq!(sink_percent(49.7), 49);
    }

    #[test]
    fn test_sink_percent_clamps() {
        assert_eq!(sink_percent(-5.0), 0);
        assert_eq!(sink_percent(140.0), 100);
    }
}
