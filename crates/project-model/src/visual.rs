//! Overlay visuals for text and effect clips.
//!
//! A [`Visual`] is the static transform of an overlay on the canvas plus
//! the name of the animation preset evaluated on top of it during
//! playback. Positions and sizes are percentages of the canvas.

use serde::{Deserialize, Serialize};

use crate::Frame;

/// Named per-clip animation evaluated from clip-local progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationPreset {
    #[default]
    None,
    Fade,
    Slide,
    Scale,
    Bounce,
    Typing,
}

/// A recorded transform snapshot at one frame.
///
/// Keyframes are stored but not interpolated during playback; evaluation
/// uses the animation preset only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub frame: Frame,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub rotation: f64,
    pub opacity: f64,
}

/// Canvas transform and styling of a text/effect clip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visual {
    /// Center X (percent of canvas width).
    pub x: f64,
    /// Center Y (percent of canvas height).
    pub y: f64,
    /// Box width (percent).
    pub w: f64,
    /// Box height (percent).
    pub h: f64,
    pub scale: f64,
    /// Rotation in degrees.
    pub rotation: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    pub shadow: f64,
    pub stroke: f64,
    pub glow: f64,
    pub font_size: f64,
    /// Text color as hex string.
    pub color: String,
    pub animation: AnimationPreset,
    /// Sorted by frame, unique per frame.
    #[serde(default)]
    pub keyframes: Vec<Keyframe>,
}

/// A partial [`Visual`] as found in template `style` objects.
///
/// Any field left out keeps the type-specific default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisualStyle {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub w: Option<f64>,
    pub h: Option<f64>,
    pub scale: Option<f64>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    pub shadow: Option<f64>,
    pub stroke: Option<f64>,
    pub glow: Option<f64>,
    pub font_size: Option<f64>,
    pub color: Option<String>,
}

impl Visual {
    /// Default overlay: centered horizontally, upper fifth of the canvas.
    pub fn new(animation: AnimationPreset, color: impl Into<String>) -> Self {
        Self {
            x: 50.0,
            y: 20.0,
            w: 70.0,
            h: 20.0,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
            shadow: 2.0,
            stroke: 2.0,
            glow: 0.0,
            font_size: 48.0,
            color: color.into(),
            animation,
            keyframes: Vec::new(),
        }
    }

    /// Overlay every field present in `style`, ignoring non-finite numbers.
    pub fn apply_style(&mut self, style: &VisualStyle) {
        let numeric = [
            (&mut self.x, style.x),
            (&mut self.y, style.y),
            (&mut self.w, style.w),
            (&mut self.h, style.h),
            (&mut self.scale, style.scale),
            (&mut self.rotation, style.rotation),
            (&mut self.opacity, style.opacity),
            (&mut self.shadow, style.shadow),
            (&mut self.stroke, style.stroke),
            (&mut self.glow, style.glow),
            (&mut self.font_size, style.font_size),
        ];
        for (slot, value) in numeric {
            if let Some(v) = value.filter(|v| v.is_finite()) {
                *slot = v;
            }
        }
        if let Some(color) = &style.color {
            self.color = color.clone();
        }
    }

    /// Snapshot the current static transform as a keyframe at `frame`.
    pub fn capture_keyframe(&self, frame: Frame) -> Keyframe {
        Keyframe {
            frame,
            x: self.x,
            y: self.y,
            scale: self.scale,
            rotation: self.rotation,
            opacity: self.opacity,
        }
    }

    /// Insert a keyframe, replacing any existing one at the same frame.
    pub fn upsert_keyframe(&mut self, keyframe: Keyframe) {
        self.keyframes.retain(|k| k.frame != keyframe.frame);
        let idx = self.keyframes.partition_point(|k| k.frame < keyframe.frame);
        self.keyframes.insert(idx, keyframe);
    }

    /// Remove the keyframe at `frame`. Returns whether one existed.
    pub fn remove_keyframe(&mut self, frame: Frame) -> bool {
        let before = self.keyframes.len();
        self.keyframes.retain(|k| k.frame != frame);
        self.keyframes.len() != before
    }

    /// The keyframe recorded exactly at `frame`, if any.
    pub fn keyframe_at(&self, frame: Frame) -> Option<&Keyframe> {
        self.keyframes
            .binary_search_by_key(&frame, |k| k.frame)
            .ok()
            .map(|idx| &self.keyframes[idx])
    }
}

impl Default for Visual {
    fn default() -> Self {
        Self::new(AnimationPreset::None, "#FFFFFF")
    }
}
