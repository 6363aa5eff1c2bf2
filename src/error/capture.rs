// Frame capture error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Capture error code constants
///
/// Error code range: 3001-3003
pub struct CaptureErrorCodes {}

impl CaptureErrorCodes {
    /// The video source could not be opened
    pub const SOURCE_UNAVAILABLE: i32 = 3001;

    /// A single frame failed to arrive
    pub const FRAME_DROPPED: i32 = 3002;

    /// The video source went away for good
    pub const DISCONNECTED: i32 = 3003;
}

/// Log a capture error with structured context
pub fn log_capture_error(err: &CaptureError, context: &str) {
    error!(
        "Capture error in {}: code={}, component=FrameSource, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Errors raised by the vision collaborator
#[derive(Debug, Clone, PartialEq)]
pub enum CaptureError {
    /// The video source could not be opened (fatal at startup)
    SourceUnavailable { reason: String },

    /// A single frame failed to arrive; the next iteration retries
    FrameDropped { reason: String },

    /// The video source closed; the frame loop ends
    Disconnected,
}

impl CaptureError {
    /// Whether the frame loop should simply move on to the next iteration.
    pub fn is_transient(&self) -> bool {
        matches!(self, CaptureError::FrameDropped { .. })
    }
}

impl ErrorCode for CaptureError {
    fn code(&self) -> i32 {
        match self {
            CaptureError::SourceUnavailable { .. } => CaptureErrorCodes::SOURCE_UNAVAILABLE,
            CaptureError::FrameDropped { .. } => CaptureErrorCodes::FRAME_DROPPED,
            CaptureError::Disconnected => CaptureErrorCodes::DISCONNECTED,
        }
    }

    fn message(&self) -> String {
        match self {
            CaptureError::SourceUnavailable { reason } => {
                format!("Video source unavailable: {}", reason)
            }
            CaptureError::FrameDropped { reason } => format!("Frame dropped: {}", reason),
            CaptureError::Disconnected => "Video source disconnected".to_string(),
        }
    }
}

impl fmt::Display for CaptureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CaptureError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for CaptureError {}
