//! Vision collaborator seams: frame acquisition and hand landmark detection.
//!
//! Real camera capture and landmark models live outside this crate; they plug
//! in through [`FrameSource`] and [`HandDetector`]. The synthetic
//! implementations drive headless runs and tests.

use image::RgbImage;

use crate::error::CaptureError;
use crate::gesture::HandLandmarks;

pub mod encode;
pub mod font;
pub mod overlay;
pub mod synthetic;

pub use encode::encode_jpeg;
pub use overlay::{render_overlay, Overlay};
pub use synthetic::{hand_with_gap, synthetic_hand, ScriptedHandDetector, SweepHandDetector, SyntheticCamera};

/// A captured RGB video frame
pub type Frame = RgbImage;

/// Trait implemented by video sources.
///
/// `FrameDropped` errors are transient and skipped by the frame loop;
/// `Disconnected` ends it.
pub trait FrameSource: Send {
    fn acquire(&mut self) -> Result<Frame, CaptureError>;
}

/// Trait implemented by single-hand landmark detectors.
pub trait HandDetector: Send {
    fn detect(&mut self, frame: &Frame) -> Option<HandLandmarks>;
}
