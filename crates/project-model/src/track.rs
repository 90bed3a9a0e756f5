//! Tracks and clips.
//!
//! A project has exactly four typed tracks. Each owns an ordered list of
//! clips kept sorted by start frame. Track lists sit behind `Arc` so that
//! history snapshots share untouched tracks and a mutation only copies
//! the track it changes.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::visual::{AnimationPreset, Visual};
use crate::{new_id, Frame};

/// Shortest clip the editor will produce, in frames.
pub const MIN_CLIP_FRAMES: Frame = 4;

/// The lane a clip lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackType {
    Video,
    Audio,
    Text,
    Effect,
}

impl TrackType {
    /// All track types in display order.
    pub const ALL: [TrackType; 4] = [
        TrackType::Video,
        TrackType::Audio,
        TrackType::Text,
        TrackType::Effect,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TrackType::Video => "video",
            TrackType::Audio => "audio",
            TrackType::Text => "text",
            TrackType::Effect => "effect",
        }
    }

    /// Timeline block color for clips on this track.
    pub fn default_color(self) -> &'static str {
        match self {
            TrackType::Video => "#0ea5e9",
            TrackType::Audio => "#22c55e",
            TrackType::Text => "#facc15",
            TrackType::Effect => "#a855f7",
        }
    }

    /// Whether clips on this track carry a canvas [`Visual`].
    pub fn has_visual(self) -> bool {
        matches!(self, TrackType::Text | TrackType::Effect)
    }

    /// Whether clips on this track carry speed/volume media controls.
    pub fn has_media_controls(self) -> bool {
        matches!(self, TrackType::Video | TrackType::Audio)
    }
}

impl std::fmt::Display for TrackType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Color grade applied to a video clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipFilter {
    #[default]
    None,
    Cinematic,
    Bw,
    Warm,
}

/// A placed, frame-bounded unit on a track.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clip {
    pub id: String,
    pub track: TrackType,
    pub label: String,
    /// First frame covered by the clip.
    pub start: Frame,
    /// Length in frames, at least [`MIN_CLIP_FRAMES`].
    pub duration: Frame,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visual: Option<Visual>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<ClipFilter>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl Clip {
    /// Create a clip with the defaults for its track type: media controls
    /// for video/audio, a static visual for text/effect.
    pub fn new(track: TrackType, label: impl Into<String>, start: Frame, duration: Frame) -> Self {
        let (speed, filter, volume) = match track {
            TrackType::Video => (Some(1.0), Some(ClipFilter::None), Some(100.0)),
            TrackType::Audio => (Some(1.0), None, Some(100.0)),
            TrackType::Text | TrackType::Effect => (None, None, None),
        };
        Self {
            id: new_id(track.as_str()),
            track,
            label: label.into(),
            start,
            duration: duration.max(MIN_CLIP_FRAMES),
            color: track.default_color().to_string(),
            text: None,
            visual: track
                .has_visual()
                .then(|| Visual::new(AnimationPreset::None, "#FFFFFF")),
            speed,
            filter,
            volume,
        }
    }

    /// Builder: set overlay text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Builder: set the overlay visual.
    pub fn with_visual(mut self, visual: Visual) -> Self {
        self.visual = Some(visual);
        self
    }

    /// One past the last frame covered.
    pub fn end(&self) -> Frame {
        self.start.saturating_add(self.duration)
    }

    /// Whether the playhead at `frame` shows this clip (both edges inclusive).
    pub fn is_active_at(&self, frame: Frame) -> bool {
        frame >= self.start && frame <= self.end()
    }

    /// Whether `frame` lies strictly inside the clip, the valid range for a split.
    pub fn splits_at(&self, frame: Frame) -> bool {
        frame > self.start && frame < self.end()
    }
}

/// A boolean per track type (lock and collapse state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackFlags {
    pub video: bool,
    pub audio: bool,
    pub text: bool,
    pub effect: bool,
}

impl TrackFlags {
    pub fn get(&self, track: TrackType) -> bool {
        match track {
            TrackType::Video => self.video,
            TrackType::Audio => self.audio,
            TrackType::Text => self.text,
            TrackType::Effect => self.effect,
        }
    }

    pub fn set(&mut self, track: TrackType, value: bool) {
        match track {
            TrackType::Video => self.video = value,
            TrackType::Audio => self.audio = value,
            TrackType::Text => self.text = value,
            TrackType::Effect => self.effect = value,
        }
    }
}

/// The four track lists of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tracks {
    #[serde(default)]
    pub video: Arc<Vec<Clip>>,
    #[serde(default)]
    pub audio: Arc<Vec<Clip>>,
    #[serde(default)]
    pub text: Arc<Vec<Clip>>,
    #[serde(default)]
    pub effect: Arc<Vec<Clip>>,
}

impl Tracks {
    fn slot(&self, track: TrackType) -> &Arc<Vec<Clip>> {
        match track {
            TrackType::Video => &self.video,
            TrackType::Audio => &self.audio,
            TrackType::Text => &self.text,
            TrackType::Effect => &self.effect,
        }
    }

    fn slot_mut(&mut self, track: TrackType) -> &mut Arc<Vec<Clip>> {
        match track {
            TrackType::Video => &mut self.video,
            TrackType::Audio => &mut self.audio,
            TrackType::Text => &mut self.text,
            TrackType::Effect => &mut self.effect,
        }
    }

    /// Clips on a track, sorted by start.
    pub fn get(&self, track: TrackType) -> &[Clip] {
        self.slot(track).as_slice()
    }

    /// Mutable access to one track; copies the list only if a snapshot shares it.
    pub fn make_mut(&mut self, track: TrackType) -> &mut Vec<Clip> {
        Arc::make_mut(self.slot_mut(track))
    }

    /// Replace a whole track, sorting the new clips by start.
    pub fn replace(&mut self, track: TrackType, mut clips: Vec<Clip>) {
        sort_clips(&mut clips);
        *self.slot_mut(track) = Arc::new(clips);
    }

    /// Whether two track sets share the same storage for `track`.
    pub fn shares_storage(&self, other: &Tracks, track: TrackType) -> bool {
        Arc::ptr_eq(self.slot(track), other.slot(track))
    }

    /// Iterate tracks in display order.
    pub fn iter(&self) -> impl Iterator<Item = (TrackType, &[Clip])> {
        TrackType::ALL.into_iter().map(|t| (t, self.get(t)))
    }

    /// Find a clip and its track by id.
    pub fn find(&self, clip_id: &str) -> Option<(TrackType, &Clip)> {
        self.iter()
            .find_map(|(t, clips)| clips.iter().find(|c| c.id == clip_id).map(|c| (t, c)))
    }

    /// Latest clip end across every track.
    pub fn max_end(&self) -> Frame {
        self.iter()
            .flat_map(|(_, clips)| clips.iter().map(Clip::end))
            .max()
            .unwrap_or(0)
    }

    /// Total number of clips.
    pub fn clip_count(&self) -> usize {
        self.iter().map(|(_, clips)| clips.len()).sum()
    }
}

/// Stable sort by start frame.
pub fn sort_clips(clips: &mut [Clip]) {
    clips.sort_by_key(|c| c.start);
}
