//! Range mapping from gesture distance to the device volume scale.
//!
//! The device range is treated as opaque: it may be a logarithmic (dB) scale,
//! but values are linearly interpolated regardless, so equal finger movement
//! yields equal steps in device units rather than in perceived loudness.

use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationBounds;
use crate::error::VolumeError;

/// Fixed `[min_vol, max_vol]` range accepted by the audio endpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceRange {
    pub min_vol: f64,
    pub max_vol: f64,
}

impl DeviceRange {
    /// Build a range, rejecting empty or inverted pairs
    pub fn new(min_vol: f64, max_vol: f64) -> Result<Self, VolumeError> {
        let ordered = min_vol.is_finite() && max_vol.is_finite() && min_vol < max_vol;
        if !ordered {
            return Err(VolumeError::InvalidRange { min_vol, max_vol });
        }
        Ok(Self { min_vol, max_vol })
    }

    /// Convert a device-unit level into a 0-100 percentage (truncated)
    pub fn to_percent(&self, level: f64) -> u8 {
        let percent = interp(level, (self.min_vol, self.max_vol), (0.0, 100.0));
        percent.trunc().clamp(0.0, 100.0) as u8
    }
}

/// Piecewise-linear interpolation that holds the end values outside `from`.
///
/// `from` must be strictly increasing.
pub fn interp(x: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let (x0, x1) = from;
    let (y0, y1) = to;
    if x <= x0 {
        return y0;
    }
    if x >= x1 {
        return y1;
    }
    y0 + (x - x0) * (y1 - y0) / (x1 - x0)
}

/// Map a raw distance into device units using the current bounds.
///
/// Returns `None` when the bounds are not a usable range (`min >= max`);
/// the caller leaves the volume unchanged for that frame.
pub fn map_distance(
    raw_distance: u32,
    bounds: &CalibrationBounds,
    device: &DeviceRange,
) -> Option<f64> {
    if !bounds.is_valid() {
        return None;
    }

    let clamped = bounds.clamp(raw_distance);
    Some(interp(
        f64::from(clamped),
        (
            f64::from(bounds.min_distance),
            f64::from(bounds.max_distance),
        ),
        (device.min_vol, device.max_vol),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn windows_range() -> DeviceRange {
        DeviceRange::new(-65.25, 0.0).unwrap()
    }

    #[test]
    fn test_device_range_rejects_inverted() {
        assert!(DeviceRange::new(0.0, -65.25).is_err());
        assert!(DeviceRange::new(1.0, 1.0).is_err());
        assert!(DeviceRange::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_default_bounds_endpoints() {
        let bounds = CalibrationBounds::app_default();
        let device = windows_range();

        let low = map_distance(20, &bounds, &device).unwrap();
        let high = map_distance(200, &bounds, &device).unwrap();
        let mid = map_distance(110, &bounds, &device).unwrap();

        assert_eq!(low, -65.25);
        assert_eq!(high, 0.0);
        assert_eq!(device.to_percent(low), 0);
        assert_eq!(device.to_percent(high), 100);
        assert_eq!(device.to_percent(mid), 50);
    }

    #[test]
    fn test_out_of_range_distances_clamp() {
        let bounds = CalibrationBounds::app_default();
        let device = windows_range();

        assert_eq!(map_distance(0, &bounds, &device), Some(-65.25));
        assert_eq!(map_distance(5000, &bounds, &device), Some(0.0));
    }

    #[test]
    fn test_mapping_is_monotonic_and_bounded() {
        let device = windows_range();
        for bounds in [
            CalibrationBounds::app_default(),
            CalibrationBounds::new(30, 80),
            CalibrationBounds::new(0, 1),
        ] {
            let mut previous = f64::NEG_INFINITY;
            for d in 0..400 {
                let volume = map_distance(d, &bounds, &device).unwrap();
                assert!(volume >= previous, "not monotonic at d={d} for {bounds:?}");
                assert!(volume >= device.min_vol && volume <= device.max_vol);
                previous = volume;
            }
        }
    }

    #[test]
    fn test_invalid_bounds_skip_mapping() {
        let device = windows_range();
        assert_eq!(
            map_distance(50, &CalibrationBounds::collecting(), &device),
            None
        );
        assert_eq!(map_distance(50, &CalibrationBounds::new(60, 60), &device), None);
        assert_eq!(map_distance(50, &CalibrationBounds::new(90, 10), &device), None);
    }

    #[test]
    fn test_learned_bounds_scenario() {
        let bounds = CalibrationBounds::new(30, 80);
        let device = windows_range();

        let low = map_distance(30, &bounds, &device).unwrap();
        let high = map_distance(80, &bounds, &device).unwrap();
        assert_eq!(device.to_percent(low), 0);
        assert_eq!(device.to_percent(high), 100);
    }

    #[test]
    fn test_to_percent_truncates() {
        let device = DeviceRange::new(0.0, 3.0).unwrap();
        // 1/3 of the range = 33.33..%
        assert_eq!(device.to_percent(1.0), 33);
        assert_eq!(device.to_percent(-4.0), 0);
        assert_eq!(device.to_percent(9.0), 100);
    }
}
