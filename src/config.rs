//! Configuration management for the gesture volume controller
//!
//! This module provides runtime configuration loading from JSON files so the
//! calibration defaults, smoothing window, capture geometry and audio backend
//! can be adjusted without recompilation. Every section falls back to its
//! defaults when missing from the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::calibration::{APP_MAX, APP_MIN};

/// Default location of the JSON config file on desktop platforms
pub const DEFAULT_CONFIG_PATH: &str = "assets/gesture_config.json";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub calibration: CalibrationConfig,
    pub smoothing: SmoothingConfig,
    pub capture: CaptureConfig,
    pub audio: AudioConfig,
    pub http: HttpConfig,
}

/// Default gesture range restored by the reset/default commands
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Lower bound of the default gesture range in pixels
    pub default_min: u32,
    /// Upper bound of the default gesture range in pixels
    pub default_max: u32,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            default_min: APP_MIN,
            default_max: APP_MAX,
        }
    }
}

/// Rolling-mean filter parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// Number of recent volume levels averaged per frame
    pub window: usize,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self { window: 5 }
    }
}

/// Frame acquisition and stream encoding parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
    /// Flip frames horizontally before hand detection (selfie view)
    pub mirror: bool,
    /// Pause between loop iterations; 0 runs as fast as frames arrive
    pub frame_interval_ms: u64,
    /// JPEG quality for the video stream (1-100)
    pub jpeg_quality: u8,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 640,
            height: 480,
            mirror: true,
            frame_interval_ms: 33,
            jpeg_quality: 80,
        }
    }
}

/// Which audio collaborator receives volume levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum VolumeBackendKind {
    /// In-process endpoint that records applied levels
    #[default]
    Simulated,
    /// PulseAudio/PipeWire default sink driven through `pactl`
    Pactl,
}

/// Audio endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    pub backend: VolumeBackendKind,
    /// Device range reported by the simulated endpoint (dB-like units)
    pub simulated_min_vol: f64,
    pub simulated_max_vol: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            backend: VolumeBackendKind::Simulated,
            simulated_min_vol: -65.25,
            simulated_max_vol: 0.0,
        }
    }
}

/// HTTP surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub addr: SocketAddr,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
        }
    }
}

impl AppConfig {
    /// Load configuration from JSON file
    ///
    /// # Arguments
    /// * `path` - Path to JSON config file
    ///
    /// # Returns
    /// The parsed configuration, or defaults if the file doesn't exist or
    /// the JSON is invalid.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Self {
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    log::info!("[Config] Loaded configuration from {:?}", path.as_ref());
                    config
                }
                Err(err) => {
                    log::warn!(
                        "[Config] Failed to parse JSON from {:?}: {}. Using defaults.",
                        path.as_ref(),
                        err
                    );
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!(
                    "[Config] Failed to read config file {:?}: {}. Using defaults.",
                    path.as_ref(),
                    err
                );
                Self::default()
            }
        }
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        Self::load_from_file(DEFAULT_CONFIG_PATH)
    }
}
