//! Snapshot and command payloads exchanged with the status/command surfaces.

use serde::{Deserialize, Serialize};

use crate::calibration::CalibrationBounds;

/// Per-frame status snapshot, replaced as a whole on every publish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PublishedStatus {
    /// Raw thumb–index distance in pixels (0 without a hand)
    pub distance: u32,
    /// Last applied volume as a 0-100 percentage
    pub volume: u8,
    pub calibrating: bool,
    pub min: u32,
    pub max: u32,
}

/// Calibration commands accepted from outside the frame loop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationCommand {
    /// Begin collecting a new gesture range
    Start,
    /// Stop collecting and keep the learned range
    Stop,
    /// Drop the learned range and return to the defaults
    Reset,
    /// Same transition as `Reset`, reported as "default"
    Default,
}

/// Outcome label reported back for each command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalibrationStatus {
    Started,
    Stopped,
    Reset,
    Default,
}

impl CalibrationCommand {
    pub fn status(self) -> CalibrationStatus {
        match self {
            CalibrationCommand::Start => CalibrationStatus::Started,
            CalibrationCommand::Stop => CalibrationStatus::Stopped,
            CalibrationCommand::Reset => CalibrationStatus::Reset,
            CalibrationCommand::Default => CalibrationStatus::Default,
        }
    }
}

/// Command acknowledgement; start carries no bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationReply {
    pub status: CalibrationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

impl CalibrationReply {
    pub fn new(command: CalibrationCommand, bounds: CalibrationBounds) -> Self {
        match command {
            CalibrationCommand::Start => Self {
                status: CalibrationStatus::Started,
                min: None,
                max: None,
            },
            _ => Self {
                status: command.status(),
                min: Some(bounds.min_distance),
                max: Some(bounds.max_distance),
            },
        }
    }
}
