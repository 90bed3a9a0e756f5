//! Time base and tick utilities.
//!
//! Every clip and cue boundary in Reelcut is stored as an integer frame
//! index. Seconds only appear at the edges (template payloads, export job
//! descriptions, subtitle files). This module provides:
//! - The closed set of supported frame rates
//! - Frame ⇄ second conversion
//! - A rate controller that paces playback ticks at `1/fps`
//!
//! Changing the frame rate does not rescale stored frames; callers that
//! need fps-independent content rescale explicitly.

use serde::{Deserialize, Serialize};

/// A frame index on the timeline.
pub type Frame = u64;

/// Supported timeline frame rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FrameRate {
    #[default]
    Fps30,
    Fps60,
}

/// Rejected frame rate value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported frame rate {0} (expected 30 or 60)")]
pub struct FrameRateError(pub u32);

impl FrameRate {
    /// Frames per second as an integer.
    pub fn as_u32(self) -> u32 {
        match self {
            FrameRate::Fps30 => 30,
            FrameRate::Fps60 => 60,
        }
    }

    /// Frames per second as a float, for time arithmetic.
    pub fn as_f64(self) -> f64 {
        self.as_u32() as f64
    }

    /// Convert seconds to the nearest frame at this rate.
    pub fn frames(self, secs: f64) -> Frame {
        frame_from_seconds(secs, self.as_u32())
    }

    /// Convert a frame index to seconds at this rate.
    pub fn seconds(self, frame: Frame) -> f64 {
        seconds_from_frame(frame, self.as_u32())
    }
}

impl TryFrom<u32> for FrameRate {
    type Error = FrameRateError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            30 => Ok(FrameRate::Fps30),
            60 => Ok(FrameRate::Fps60),
            other => Err(FrameRateError(other)),
        }
    }
}

impl From<FrameRate> for u32 {
    fn from(rate: FrameRate) -> Self {
        rate.as_u32()
    }
}

impl std::fmt::Display for FrameRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}fps", self.as_u32())
    }
}

/// `round(sec * fps)`, floored at frame 0. Non-finite input maps to 0.
pub fn frame_from_seconds(secs: f64, fps: u32) -> Frame {
    let frames = (secs * fps.max(1) as f64).round();
    if !frames.is_finite() || frames <= 0.0 {
        return 0;
    }
    frames as Frame
}

/// `frame / fps`.
pub fn seconds_from_frame(frame: Frame, fps: u32) -> f64 {
    frame as f64 / fps.max(1) as f64
}

/// Format seconds as `MM:SS` for timeline rulers and CLI output.
pub fn format_mmss(secs: f64) -> String {
    let total = if secs.is_finite() {
        secs.max(0.0).round() as u64
    } else {
        0
    };
    format!("{:02}:{:02}", total / 60, total % 60)
}

/// Paces playback so one tick fires per frame interval.
#[derive(Debug, Clone)]
pub struct RateController {
    target_interval_ns: u64,
    last_tick_ns: Option<u64>,
}

impl RateController {
    /// Create a controller ticking once per frame at the given rate.
    pub fn new(rate: FrameRate) -> Self {
        Self {
            target_interval_ns: 1_000_000_000 / rate.as_u32() as u64,
            last_tick_ns: None,
        }
    }

    /// Check if enough time has passed for the next tick.
    /// Returns true and updates internal state if ready.
    /// The first call always returns true.
    pub fn should_tick(&mut self, current_ns: u64) -> bool {
        match self.last_tick_ns {
            None => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            Some(last) if current_ns >= last + self.target_interval_ns => {
                self.last_tick_ns = Some(current_ns);
                true
            }
            _ => false,
        }
    }

    /// Forget the last tick so the next poll fires immediately.
    pub fn reset(&mut self) {
        self.last_tick_ns = None;
    }

    /// Target interval in nanoseconds.
    pub fn interval_ns(&self) -> u64 {
        self.target_interval_ns
    }
}
