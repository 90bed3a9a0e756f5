//! Span arithmetic shared by clip and cue editing.
//!
//! Pointer gestures arrive as pixel deltas. [`TimelineScale`] converts them
//! to frame deltas at the current zoom; the `plan_*` functions turn an
//! origin span plus a delta into a new span that respects the minimum
//! length and the timeline bounds, optionally pulled onto a nearby
//! boundary by a [`Snap`].

use serde::{Deserialize, Serialize};

use crate::easing::clamp_finite;
use crate::{Frame, FrameRate};

/// Timeline pixels per second at zoom 1.0.
pub const DEFAULT_PX_PER_SECOND: f64 = 42.0;

/// Snap distance in timeline pixels.
pub const DEFAULT_SNAP_THRESHOLD_PX: f64 = 8.0;

/// A half-open frame range `[start, start + duration)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Frame,
    pub duration: Frame,
}

impl Span {
    pub fn new(start: Frame, duration: Frame) -> Self {
        Self { start, duration }
    }

    pub fn end(&self) -> Frame {
        self.start.saturating_add(self.duration)
    }
}

/// Limits an edited span must satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditLimits {
    /// Timeline length; spans never end past it.
    pub total: Frame,
    /// Minimum span length.
    pub min_len: Frame,
}

/// Pixel ⇄ frame conversion at a zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineScale {
    pub px_per_second: f64,
    pub zoom: f64,
    pub fps: FrameRate,
    pub snap_threshold_px: f64,
}

impl TimelineScale {
    pub fn new(zoom: f64, fps: FrameRate) -> Self {
        Self {
            px_per_second: DEFAULT_PX_PER_SECOND,
            zoom,
            fps,
            snap_threshold_px: DEFAULT_SNAP_THRESHOLD_PX,
        }
    }

    pub fn with_px_per_second(mut self, px_per_second: f64) -> Self {
        self.px_per_second = px_per_second;
        self
    }

    pub fn with_snap_threshold_px(mut self, threshold_px: f64) -> Self {
        self.snap_threshold_px = threshold_px;
        self
    }

    /// Pixels covered by one frame, never below 0.001.
    pub fn px_per_frame(&self) -> f64 {
        let px_per_second = clamp_finite(self.px_per_second, 1.0, 10_000.0, DEFAULT_PX_PER_SECOND);
        let zoom = clamp_finite(self.zoom, 0.01, 100.0, 1.0);
        (px_per_second * zoom / self.fps.as_f64()).max(0.001)
    }

    /// Whole-frame delta for a horizontal pointer movement.
    pub fn frames_for_px(&self, dx_px: f64) -> i64 {
        if !dx_px.is_finite() {
            return 0;
        }
        (dx_px / self.px_per_frame()).round() as i64
    }

    /// The snap threshold expressed in frames.
    pub fn snap_threshold_frames(&self) -> f64 {
        clamp_finite(self.snap_threshold_px, 0.0, 1_000.0, DEFAULT_SNAP_THRESHOLD_PX)
            / self.px_per_frame()
    }
}

/// Candidate boundaries a dragged edge can be pulled onto.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snap {
    points: Vec<Frame>,
    threshold_frames: f64,
}

impl Snap {
    /// Boundaries of every sibling span, plus `0` and `total`.
    pub fn from_siblings(
        siblings: impl IntoIterator<Item = Span>,
        total: Frame,
        threshold_frames: f64,
    ) -> Self {
        let mut points: Vec<Frame> = siblings
            .into_iter()
            .flat_map(|s| [s.start, s.end()])
            .collect();
        points.push(0);
        points.push(total);
        Self {
            points,
            threshold_frames,
        }
    }

    /// Pull `value` onto the nearest candidate if it lies within the
    /// threshold; otherwise return it unchanged. Ties keep the earliest
    /// listed candidate.
    pub fn apply(&self, value: Frame) -> Frame {
        let mut best = value;
        let mut best_diff = f64::INFINITY;
        for &point in &self.points {
            let diff = (value as f64 - point as f64).abs();
            if diff < best_diff {
                best = point;
                best_diff = diff;
            }
        }
        if best_diff <= self.threshold_frames {
            best
        } else {
            value
        }
    }

    pub fn points(&self) -> &[Frame] {
        &self.points
    }
}

/// Clamp a signed frame into `[lo, hi]`; an inverted range collapses to `lo`.
fn clamp_frame(value: i64, lo: Frame, hi: Frame) -> Frame {
    let hi = hi.max(lo);
    value.clamp(lo as i64, hi as i64) as Frame
}

fn snapped(value: Frame, snap: Option<&Snap>) -> Frame {
    snap.map_or(value, |s| s.apply(value))
}

/// Shift the whole span, keeping its length.
pub fn plan_move(origin: Span, delta: i64, limits: EditLimits, snap: Option<&Snap>) -> Span {
    let max_start = limits.total.saturating_sub(origin.duration);
    let start = clamp_frame(origin.start as i64 + delta, 0, max_start);
    let start = snapped(start, snap).min(max_start);
    Span::new(start, origin.duration)
}

/// Move the start edge, keeping the end edge fixed.
pub fn plan_trim_start(origin: Span, delta: i64, limits: EditLimits, snap: Option<&Snap>) -> Span {
    let end = origin.end().min(limits.total);
    let max_start = end.saturating_sub(limits.min_len);
    let start = clamp_frame(origin.start as i64 + delta, 0, max_start);
    let start = snapped(start, snap).min(max_start);
    let duration = (end - start).max(limits.min_len);
    Span::new(start, duration.min(limits.total.saturating_sub(start)))
}

/// Move the end edge, keeping the start edge fixed. With snapping, the end
/// boundary is snapped and the duration re-derived.
pub fn plan_trim_end(origin: Span, delta: i64, limits: EditLimits, snap: Option<&Snap>) -> Span {
    let max_duration = limits.total.saturating_sub(origin.start);
    let duration = clamp_frame(origin.duration as i64 + delta, limits.min_len, max_duration);
    let duration = match snap {
        Some(snap) => {
            let end = snap.apply(origin.start.saturating_add(duration));
            end.saturating_sub(origin.start)
                .max(limits.min_len)
                .min(max_duration.max(limits.min_len))
        }
        None => duration,
    };
    Span::new(origin.start, duration)
}
