// Calibration error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Calibration error code constants
///
/// Error code range: 2001
pub struct CalibrationErrorCodes {}

impl CalibrationErrorCodes {
    /// Control state mutex was poisoned
    pub const STATE_POISONED: i32 = 2001;
}

/// Log a calibration error with structured context
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_calibration_error(err: &CalibrationError, context: &str) {
    error!(
        "Calibration error in {}: code={}, component=CalibrationStateMachine, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Calibration-related errors
///
/// Calibration transitions themselves cannot fail; the only failure is a
/// poisoned lock around the shared control state.
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Control state mutex was poisoned
    StatePoisoned,
}

impl ErrorCode for CalibrationError {
    fn code(&self) -> i32 {
        match self {
            CalibrationError::StatePoisoned => CalibrationErrorCodes::STATE_POISONED,
        }
    }

    fn message(&self) -> String {
        match self {
            CalibrationError::StatePoisoned => "Calibration state lock poisoned".to_string(),
        }
    }
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalibrationError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for CalibrationError {}
