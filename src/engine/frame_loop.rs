//! FrameLoop: the per-frame driver wiring capture, control and output.
//!
//! One frame at a time, strictly sequential: acquire, detect, run the
//! control step, apply volume, publish status, then render and broadcast the
//! annotated frame. Transient capture failures skip the iteration; only a
//! disconnected source or the shutdown flag ends the loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use image::imageops::flip_horizontal_in_place;
use log::{info, warn};

use crate::error::{log_calibration_error, log_capture_error, log_volume_error};
use crate::vision::{encode_jpeg, render_overlay, FrameSource, HandDetector};
use crate::volume::VolumeController;

use super::core::EngineHandle;
use super::status::PublishedStatus;

/// What happened during one loop iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// A frame went through the pipeline and this status was published
    Processed(PublishedStatus),
    /// Transient failure; nothing was published
    Skipped,
    /// The source is gone; the loop should end
    Disconnected,
}

/// Drives the control loop against a frame source, detector and endpoint.
pub struct FrameLoop {
    handle: Arc<EngineHandle>,
    source: Box<dyn FrameSource>,
    detector: Box<dyn HandDetector>,
    volume: VolumeController,
    mirror: bool,
    jpeg_quality: u8,
    frame_interval: Duration,
}

impl FrameLoop {
    pub fn new(
        handle: Arc<EngineHandle>,
        source: Box<dyn FrameSource>,
        detector: Box<dyn HandDetector>,
        volume: VolumeController,
    ) -> Self {
        let capture = handle.config().capture.clone();
        Self {
            handle,
            source,
            detector,
            volume,
            mirror: capture.mirror,
            jpeg_quality: capture.jpeg_quality,
            frame_interval: Duration::from_millis(capture.frame_interval_ms),
        }
    }

    /// Override the pause between iterations (zero for as-fast-as-possible).
    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn handle(&self) -> &Arc<EngineHandle> {
        &self.handle
    }

    pub fn volume(&self) -> &VolumeController {
        &self.volume
    }

    /// Run one iteration of the loop.
    pub fn step(&mut self) -> StepOutcome {
        let mut frame = match self.source.acquire() {
            Ok(frame) => frame,
            Err(err) if err.is_transient() => {
                self.handle.record_dropped_frame();
                tracing::debug!("[FrameLoop] Skipping frame: {}", err);
                return StepOutcome::Skipped;
            }
            Err(err) => {
                log_capture_error(&err, "frame_loop_acquire");
                return StepOutcome::Disconnected;
            }
        };

        if self.mirror {
            flip_horizontal_in_place(&mut frame);
        }

        let hand = self.detector.detect(&frame);
        let (width, height) = frame.dimensions();
        let device = self.volume.range();

        let outcome = match self
            .handle
            .process_frame(hand.as_ref(), width, height, &device)
        {
            Ok(outcome) => outcome,
            Err(err) => {
                log_calibration_error(&err, "frame_loop_process");
                return StepOutcome::Skipped;
            }
        };

        let percent = match outcome.volume {
            Some(level) => match self.volume.apply(level) {
                Ok(percent) => percent,
                Err(err) => {
                    log_volume_error(&err, "frame_loop_apply");
                    self.volume.last_percent()
                }
            },
            None => self.volume.last_percent(),
        };

        let status = match self.handle.publish_frame_status(outcome.distance, percent) {
            Ok(status) => status,
            Err(err) => {
                log_calibration_error(&err, "frame_loop_publish");
                return StepOutcome::Skipped;
            }
        };

        tracing::debug!(
            distance = status.distance,
            volume = status.volume,
            calibrating = status.calibrating,
            "[FrameLoop] frame processed"
        );

        if self.handle.has_frame_subscribers() {
            if let Some(overlay) = &outcome.overlay {
                render_overlay(&mut frame, overlay);
            }
            match encode_jpeg(&frame, self.jpeg_quality) {
                Ok(jpeg) => self.handle.publish_encoded_frame(Arc::new(jpeg)),
                Err(err) => warn!("[FrameLoop] Failed to encode frame: {}", err),
            }
        }

        StepOutcome::Processed(status)
    }

    /// Loop until `shutdown` is raised or the source disconnects.
    ///
    /// Returns the number of frames processed.
    pub fn run(mut self, shutdown: Arc<AtomicBool>) -> u64 {
        self.handle.set_loop_running(true);
        info!("[FrameLoop] Started");

        let mut processed = 0u64;
        while !shutdown.load(Ordering::SeqCst) {
            match self.step() {
                StepOutcome::Processed(_) => processed += 1,
                StepOutcome::Skipped => {}
                StepOutcome::Disconnected => break,
            }

            if !self.frame_interval.is_zero() {
                thread::sleep(self.frame_interval);
            }
        }

        self.handle.set_loop_running(false);
        info!("[FrameLoop] Stopped after {} frames", processed);
        processed
    }

    /// Run the loop on a dedicated thread.
    pub fn spawn(self, shutdown: Arc<AtomicBool>) -> std::io::Result<JoinHandle<u64>> {
        thread::Builder::new()
            .name("frame-loop".to_string())
            .spawn(move || self.run(shutdown))
    }
}
