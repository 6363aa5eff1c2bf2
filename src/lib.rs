// Gesture Volume - hand-gesture driven system volume control
// Per-frame control loop: thumb–index distance -> calibrated range -> smoothed volume

// Module declarations
pub mod calibration;
pub mod config;
pub mod engine;
pub mod error;
pub mod gesture;
pub mod http;
pub mod mapping;
pub mod smoothing;
pub mod vision;
pub mod volume;

// Re-exports for convenience
pub use config::AppConfig;
pub use engine::{CalibrationCommand, CalibrationReply, EngineHandle, FrameLoop, PublishedStatus};
pub use volume::{VolumeController, VolumeEndpoint};
