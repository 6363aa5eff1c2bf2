// Error types for the gesture volume controller
//
// This module defines custom error types for the audio endpoint, frame capture
// and calibration state, each carrying a stable numeric code for status
// payloads and logs.

mod calibration;
mod capture;
mod volume;

pub use calibration::{log_calibration_error, CalibrationError, CalibrationErrorCodes};
pub use capture::{log_capture_error, CaptureError, CaptureErrorCodes};
pub use volume::{log_volume_error, VolumeError, VolumeErrorCodes};

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, enabling consistent error handling across
/// the HTTP and CLI surfaces.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
