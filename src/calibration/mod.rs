// Calibration module - learned gesture range and the calibration mode
//
// This module provides two main components:
// 1. CalibrationBounds: the [min, max] gesture distance range used by the mapper
// 2. CalibrationStateMachine: Inactive/Active mode plus the running min/max
//    accumulator that widens the bounds while Active
//
// The calibration workflow:
// 1. start() - bounds switch to the collecting sentinel
// 2. absorb() once per frame with a detected hand
// 3. stop() - learned bounds are kept for mapping

pub mod bounds;
pub mod state;

pub use bounds::{CalibrationBounds, APP_MAX, APP_MIN, COLLECTING_MAX, COLLECTING_MIN};
pub use state::{CalibrationMode, CalibrationStateMachine};
