// Volume endpoint error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Volume endpoint error code constants
///
/// Error code range: 1001-1004
pub struct VolumeErrorCodes {}

impl VolumeErrorCodes {
    /// The OS volume endpoint could not be opened or queried
    pub const ENDPOINT_UNAVAILABLE: i32 = 1001;

    /// The endpoint reported an empty or inverted volume range
    pub const INVALID_RANGE: i32 = 1002;

    /// A volume level could not be applied
    pub const APPLY_FAILED: i32 = 1003;

    /// Mutex/RwLock was poisoned
    pub const LOCK_POISONED: i32 = 1004;
}

/// Log a volume endpoint error with structured context
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_volume_error(err: &VolumeError, context: &str) {
    error!(
        "Volume error in {}: code={}, component=VolumeController, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised by the audio collaborator
///
/// `EndpointUnavailable` and `InvalidRange` are fatal at startup; `ApplyFailed`
/// is tolerated inside the frame loop.
#[derive(Debug, Clone, PartialEq)]
pub enum VolumeError {
    /// The OS volume endpoint could not be opened or queried
    EndpointUnavailable { reason: String },

    /// The endpoint reported `min_vol >= max_vol`
    InvalidRange { min_vol: f64, max_vol: f64 },

    /// A volume level could not be applied
    ApplyFailed { reason: String },

    /// Mutex/RwLock was poisoned
    LockPoisoned { component: String },
}

impl ErrorCode for VolumeError {
    fn code(&self) -> i32 {
        match self {
            VolumeError::EndpointUnavailable { .. } => VolumeErrorCodes::ENDPOINT_UNAVAILABLE,
            VolumeError::InvalidRange { .. } => VolumeErrorCodes::INVALID_RANGE,
            VolumeError::ApplyFailed { .. } => VolumeErrorCodes::APPLY_FAILED,
            VolumeError::LockPoisoned { .. } => VolumeErrorCodes::LOCK_POISONED,
        }
    }

    fn message(&self) -> String {
        match self {
            VolumeError::EndpointUnavailable { reason } => {
                format!("Volume endpoint unavailable: {}", reason)
            }
            VolumeError::InvalidRange { min_vol, max_vol } => {
                format!(
                    "Volume range must satisfy min < max (got [{}, {}])",
                    min_vol, max_vol
                )
            }
            VolumeError::ApplyFailed { reason } => {
                format!("Failed to apply volume: {}", reason)
            }
            VolumeError::LockPoisoned { component } => {
                format!("Lock poisoned on {}", component)
            }
        }
    }
}

impl fmt::Display for VolumeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "VolumeError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for VolumeError {}

impl From<std::io::Error> for VolumeError {
    fn from(err: std::io::Error) -> Self {
        VolumeError::EndpointUnavailable {
            reason: err.to_string(),
        }
    }
}
