//! Engine module housing the gesture-to-volume control loop.
//!
//! `control` holds the pure per-frame computation, `core` the shared
//! `EngineHandle` (control state, status snapshot, frame broadcast) and
//! `frame_loop` the I/O-bound driver that feeds frames through both.

pub mod control;
pub mod core;
pub mod frame_loop;
pub mod status;

pub use control::{ControlState, FrameOutcome};
pub use self::core::{EncodedFrame, EngineHandle};
pub use frame_loop::{FrameLoop, StepOutcome};
pub use status::{CalibrationCommand, CalibrationReply, CalibrationStatus, PublishedStatus};
