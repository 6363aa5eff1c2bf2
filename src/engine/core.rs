//! EngineHandle: shared state between the frame loop and the outer surfaces.
//!
//! The frame loop is the only writer of per-frame data; calibration commands
//! arrive from HTTP handlers or the CLI. Both go through one mutex around the
//! `ControlState`, so a bounds reset always happens-before the next absorb and
//! the loop never observes half-updated bounds. Readers get the latest
//! `PublishedStatus` from a `watch` channel, replaced as a whole value.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use log::info;
use tokio::sync::{broadcast, watch};

use crate::calibration::CalibrationBounds;
use crate::config::AppConfig;
use crate::error::{log_calibration_error, CalibrationError};
use crate::gesture::HandLandmarks;
use crate::mapping::DeviceRange;

use super::control::{ControlState, FrameOutcome};
use super::status::{CalibrationCommand, CalibrationReply, PublishedStatus};

/// JPEG bytes of one annotated frame, shared between stream subscribers
pub type EncodedFrame = Arc<Vec<u8>>;

const FRAME_CHANNEL_CAPACITY: usize = 4;

/// EngineHandle owns the control state and the published channels.
pub struct EngineHandle {
    config: AppConfig,
    control: Arc<Mutex<ControlState>>,
    status_tx: watch::Sender<PublishedStatus>,
    frames_tx: broadcast::Sender<EncodedFrame>,
    frames_processed: AtomicU64,
    frames_dropped: AtomicU64,
    loop_running: AtomicBool,
    start_instant: Instant,
}

impl EngineHandle {
    /// Create a handle with the default calibration range from `config`.
    pub fn new(config: AppConfig) -> Self {
        let control = ControlState::from_config(&config);
        let bounds = control.calibration().bounds();
        let (status_tx, _) = watch::channel(PublishedStatus {
            min: bounds.min_distance,
            max: bounds.max_distance,
            ..PublishedStatus::default()
        });
        let (frames_tx, _) = broadcast::channel(FRAME_CHANNEL_CAPACITY);

        Self {
            config,
            control: Arc::new(Mutex::new(control)),
            status_tx,
            frames_tx,
            frames_processed: AtomicU64::new(0),
            frames_dropped: AtomicU64::new(0),
            loop_running: AtomicBool::new(false),
            start_instant: Instant::now(),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ========================================================================
    // STATUS AND STREAM
    // ========================================================================

    /// Latest published snapshot.
    pub fn status(&self) -> PublishedStatus {
        *self.status_tx.borrow()
    }

    pub fn subscribe_status(&self) -> watch::Receiver<PublishedStatus> {
        self.status_tx.subscribe()
    }

    pub fn subscribe_frames(&self) -> broadcast::Receiver<EncodedFrame> {
        self.frames_tx.subscribe()
    }

    /// Whether anyone is watching the video stream (encoding can be skipped otherwise).
    pub fn has_frame_subscribers(&self) -> bool {
        self.frames_tx.receiver_count() > 0
    }

    pub(crate) fn publish_encoded_frame(&self, frame: EncodedFrame) {
        let _ = self.frames_tx.send(frame);
    }

    // ========================================================================
    // CALIBRATION COMMANDS
    // ========================================================================

    /// Apply a calibration command and publish the new bounds immediately.
    ///
    /// The frame loop observes the transition on its next frame.
    pub fn execute(&self, command: CalibrationCommand) -> Result<CalibrationReply, CalibrationError> {
        let mut control = self.lock_control().inspect_err(|err| {
            log_calibration_error(err, "execute_calibration_command");
        })?;

        let bounds = match command {
            CalibrationCommand::Start => control.start_calibration(),
            CalibrationCommand::Stop => control.stop_calibration(),
            CalibrationCommand::Reset | CalibrationCommand::Default => {
                control.reset_calibration()
            }
        };
        let calibrating = control.calibration().is_active();

        self.status_tx.send_modify(|status| {
            status.calibrating = calibrating;
            status.min = bounds.min_distance;
            status.max = bounds.max_distance;
        });

        info!(
            "[EngineHandle] Calibration {:?}: bounds [{}, {}]",
            command, bounds.min_distance, bounds.max_distance
        );
        Ok(CalibrationReply::new(command, bounds))
    }

    pub fn start_calibration(&self) -> Result<CalibrationReply, CalibrationError> {
        self.execute(CalibrationCommand::Start)
    }

    pub fn stop_calibration(&self) -> Result<CalibrationReply, CalibrationError> {
        self.execute(CalibrationCommand::Stop)
    }

    pub fn reset_calibration(&self) -> Result<CalibrationReply, CalibrationError> {
        self.execute(CalibrationCommand::Reset)
    }

    pub fn restore_default_calibration(&self) -> Result<CalibrationReply, CalibrationError> {
        self.execute(CalibrationCommand::Default)
    }

    pub fn calibration_bounds(&self) -> Result<CalibrationBounds, CalibrationError> {
        Ok(self.lock_control()?.calibration().bounds())
    }

    pub fn is_calibrating(&self) -> Result<bool, CalibrationError> {
        Ok(self.lock_control()?.calibration().is_active())
    }

    /// Number of levels currently held by the smoothing window.
    pub fn smoothing_len(&self) -> Result<usize, CalibrationError> {
        Ok(self.lock_control()?.smoothing().len())
    }

    // ========================================================================
    // FRAME LOOP ENTRY POINTS
    // ========================================================================

    pub(crate) fn process_frame(
        &self,
        hand: Option<&HandLandmarks>,
        width: u32,
        height: u32,
        device: &DeviceRange,
    ) -> Result<FrameOutcome, CalibrationError> {
        let mut control = self.lock_control()?;
        Ok(control.process_frame(hand, width, height, device))
    }

    /// Publish this frame's distance and volume alongside the current
    /// calibration state, read under the control lock.
    pub(crate) fn publish_frame_status(
        &self,
        distance: u32,
        volume: u8,
    ) -> Result<PublishedStatus, CalibrationError> {
        let control = self.lock_control()?;
        let bounds = control.calibration().bounds();
        let status = PublishedStatus {
            distance,
            volume,
            calibrating: control.calibration().is_active(),
            min: bounds.min_distance,
            max: bounds.max_distance,
        };
        self.status_tx.send_replace(status);
        self.frames_processed.fetch_add(1, Ordering::Relaxed);
        Ok(status)
    }

    pub(crate) fn record_dropped_frame(&self) {
        self.frames_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn set_loop_running(&self, running: bool) {
        self.loop_running.store(running, Ordering::SeqCst);
    }

    // ========================================================================
    // DIAGNOSTICS
    // ========================================================================

    pub fn is_loop_running(&self) -> bool {
        self.loop_running.load(Ordering::SeqCst)
    }

    pub fn frames_processed(&self) -> u64 {
        self.frames_processed.load(Ordering::Relaxed)
    }

    pub fn frames_dropped(&self) -> u64 {
        self.frames_dropped.load(Ordering::Relaxed)
    }

    pub fn uptime_ms(&self) -> u64 {
        self.start_instant.elapsed().as_millis() as u64
    }

    /// Safely acquire lock on the control state
    fn lock_control(&self) -> Result<MutexGuard<'_, ControlState>, CalibrationError> {
        self.control
            .lock()
            .map_err(|_| CalibrationError::StatePoisoned)
    }
}

impl Default for EngineHandle {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
