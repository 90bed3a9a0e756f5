//! The project aggregate and its clip store.
//!
//! A project ties together the four typed tracks, the caption cue list,
//! caption styling, and export settings. Every store mutation keeps the
//! affected track sorted by start and clamps clips into the timeline
//! instead of failing. Mutations on a locked track are no-ops.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cue::{sort_cues, Cue};
use crate::timing::{EditLimits, Snap, Span, TimelineScale};
use crate::track::{sort_clips, Clip, TrackFlags, TrackType, Tracks, MIN_CLIP_FRAMES};
use crate::visual::{AnimationPreset, Visual};
use crate::{Frame, FrameRate};

/// Length of a fresh project timeline.
pub const DEFAULT_PROJECT_SECS: f64 = 40.0;

/// Shortest timeline the editor keeps after ripple deletes.
pub const MIN_PROJECT_FRAMES: Frame = 10;

/// Output canvas aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    /// 9:16 vertical.
    #[default]
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
}

impl AspectRatio {
    pub fn as_str(self) -> &'static str {
        match self {
            AspectRatio::Portrait => "9:16",
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
        }
    }

    /// Default output resolution for this ratio.
    pub fn resolution(self) -> (u32, u32) {
        match self {
            AspectRatio::Portrait => (1080, 1920),
            AspectRatio::Square => (1080, 1080),
            AspectRatio::Landscape => (1920, 1080),
        }
    }
}

/// Caption appearance, restorable independently of the timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CaptionStyle {
    pub font_size: f64,
    pub color: String,
    pub shadow: f64,
    pub stroke: f64,
    pub glow: f64,
    pub animation: AnimationPreset,
    pub background_box: bool,
    /// Maximum words per generated cue, clamped to `[2, 10]` on use.
    pub words_per_caption: u32,
}

impl Default for CaptionStyle {
    fn default() -> Self {
        Self {
            font_size: 38.0,
            color: "#FFFFFF".to_string(),
            shadow: 2.0,
            stroke: 2.0,
            glow: 0.0,
            animation: AnimationPreset::Fade,
            background_box: true,
            words_per_caption: 5,
        }
    }
}

/// Where the final render runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Server,
    Local,
}

/// Export hints handed to the external renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    pub width: u32,
    pub height: u32,
    /// Bitrate hint, e.g. `8M`.
    pub bitrate: String,
    pub mode: RenderMode,
    pub watermark: bool,
    pub watermark_text: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1920,
            bitrate: "8M".to_string(),
            mode: RenderMode::Server,
            watermark: false,
            watermark_text: "Shorts Maker".to_string(),
        }
    }
}

impl ExportSettings {
    /// `WIDTHxHEIGHT`.
    pub fn resolution(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// The aggregate root of the editor.
///
/// Invariants kept by every method here: `playhead <= duration`, clips
/// sorted by start within a track, and for every clip
/// `duration >= MIN_CLIP_FRAMES` and `start + duration <= self.duration`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub fps: FrameRate,
    #[serde(default)]
    pub ratio: AspectRatio,
    pub zoom: f64,
    /// Timeline length in frames.
    pub duration: Frame,
    pub playhead: Frame,
    pub snap: bool,
    #[serde(default)]
    pub track_locked: TrackFlags,
    #[serde(default)]
    pub track_collapsed: TrackFlags,
    #[serde(default)]
    pub tracks: Tracks,
    #[serde(default)]
    pub cues: Arc<Vec<Cue>>,
    #[serde(default)]
    pub caption: CaptionStyle,
    #[serde(default)]
    pub export: ExportSettings,
}

impl Default for Project {
    fn default() -> Self {
        Self::new(FrameRate::default())
    }
}

impl Project {
    /// An empty 40 second project.
    pub fn new(fps: FrameRate) -> Self {
        Self {
            fps,
            ratio: AspectRatio::default(),
            zoom: 1.0,
            duration: fps.frames(DEFAULT_PROJECT_SECS),
            playhead: 0,
            snap: true,
            track_locked: TrackFlags::default(),
            track_collapsed: TrackFlags::default(),
            tracks: Tracks::default(),
            cues: Arc::new(Vec::new()),
            caption: CaptionStyle::default(),
            export: ExportSettings::default(),
        }
    }

    /// A project seeded with a base video, narration, a title and a glow effect.
    pub fn starter(fps: FrameRate) -> Self {
        let mut project = Self::new(fps);
        let secs = |s: f64| fps.frames(s);
        project.tracks.replace(
            TrackType::Video,
            vec![Clip::new(TrackType::Video, "Base Video", 0, secs(12.0))],
        );
        project.tracks.replace(
            TrackType::Audio,
            vec![Clip::new(TrackType::Audio, "Narration", 0, secs(12.0))],
        );
        project.tracks.replace(
            TrackType::Text,
            vec![Clip::new(TrackType::Text, "Title", 0, secs(4.0))
                .with_text("{{title}}")
                .with_visual(Visual::new(AnimationPreset::Slide, "#FFFFFF"))],
        );
        project.tracks.replace(
            TrackType::Effect,
            vec![Clip::new(TrackType::Effect, "Glow", 0, secs(6.0))
                .with_text("Glow")
                .with_visual(Visual::new(AnimationPreset::Fade, "#FFFFFF"))],
        );
        project
    }

    /// Load a project from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ProjectError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ProjectError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&json).map_err(|e| ProjectError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Write the project as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ProjectError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ProjectError::IoError {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| ProjectError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;
        std::fs::write(path, json).map_err(|e| ProjectError::IoError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    // ---- Clip store ----

    /// Every track with its clips, in display order.
    pub fn list_tracks(&self) -> impl Iterator<Item = (TrackType, &[Clip])> {
        self.tracks.iter()
    }

    pub fn get_clip(&self, track: TrackType, clip_id: &str) -> Option<&Clip> {
        self.tracks.get(track).iter().find(|c| c.id == clip_id)
    }

    /// Mutable access to a clip. Only copies shared track storage when the
    /// clip exists.
    pub fn clip_mut(&mut self, track: TrackType, clip_id: &str) -> Option<&mut Clip> {
        self.get_clip(track, clip_id)?;
        self.tracks
            .make_mut(track)
            .iter_mut()
            .find(|c| c.id == clip_id)
    }

    /// Insert or replace a clip by id, clamped into the timeline.
    /// Returns `false` when the track is locked.
    pub fn upsert_clip(&mut self, track: TrackType, mut clip: Clip) -> bool {
        if self.is_locked(track) {
            tracing::debug!(%track, clip = %clip.id, "upsert ignored on locked track");
            return false;
        }
        clip.track = track;
        self.clamp_clip(&mut clip);
        let clips = self.tracks.make_mut(track);
        match clips.iter_mut().find(|c| c.id == clip.id) {
            Some(existing) => *existing = clip,
            None => clips.push(clip),
        }
        sort_clips(clips);
        true
    }

    /// Remove a clip by id. `None` if the track is locked or the id is unknown.
    pub fn remove_clip(&mut self, track: TrackType, clip_id: &str) -> Option<Clip> {
        if self.is_locked(track) {
            tracing::debug!(%track, clip = clip_id, "remove ignored on locked track");
            return None;
        }
        let idx = self.tracks.get(track).iter().position(|c| c.id == clip_id)?;
        Some(self.tracks.make_mut(track).remove(idx))
    }

    /// Force a clip into `[0, duration]` with at least the minimum length.
    pub fn clamp_clip(&self, clip: &mut Clip) {
        let max_len = self.duration.max(MIN_CLIP_FRAMES);
        clip.duration = clip.duration.clamp(MIN_CLIP_FRAMES, max_len);
        clip.start = clip.start.min(self.duration.saturating_sub(clip.duration));
    }

    // ---- Track state ----

    pub fn is_locked(&self, track: TrackType) -> bool {
        self.track_locked.get(track)
    }

    pub fn set_locked(&mut self, track: TrackType, locked: bool) {
        self.track_locked.set(track, locked);
    }

    pub fn toggle_locked(&mut self, track: TrackType) {
        self.track_locked.set(track, !self.is_locked(track));
    }

    pub fn toggle_collapsed(&mut self, track: TrackType) {
        let collapsed = self.track_collapsed.get(track);
        self.track_collapsed.set(track, !collapsed);
    }

    // ---- Transport & view ----

    /// Move the playhead, clamped to `[0, duration]`.
    pub fn set_playhead(&mut self, frame: Frame) {
        self.playhead = frame.min(self.duration);
    }

    /// Set timeline zoom, clamped to `[0.25, 8]`. Non-finite input resets to 1.
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = crate::easing::clamp_finite(zoom, 0.25, 8.0, 1.0);
    }

    /// Change the frame rate. Stored frames are not rescaled.
    pub fn set_fps(&mut self, fps: FrameRate) {
        self.fps = fps;
    }

    pub fn frames(&self, secs: f64) -> Frame {
        self.fps.frames(secs)
    }

    pub fn seconds(&self, frame: Frame) -> f64 {
        self.fps.seconds(frame)
    }

    /// Pixel scale at the current zoom.
    pub fn timeline_scale(&self) -> TimelineScale {
        TimelineScale::new(self.zoom, self.fps)
    }

    /// Bounds for clip edits on this timeline.
    pub fn clip_limits(&self) -> EditLimits {
        EditLimits {
            total: self.duration,
            min_len: MIN_CLIP_FRAMES,
        }
    }

    /// Snap candidates for editing `clip_id`: every other clip on the track
    /// plus the timeline ends.
    pub fn clip_snap(&self, track: TrackType, clip_id: &str, threshold_frames: f64) -> Snap {
        let siblings = self
            .tracks
            .get(track)
            .iter()
            .filter(|c| c.id != clip_id)
            .map(|c| Span::new(c.start, c.duration));
        Snap::from_siblings(siblings, self.duration, threshold_frames)
    }

    // ---- Cues ----

    pub fn cues(&self) -> &[Cue] {
        self.cues.as_slice()
    }

    /// Replace the cue list, sorting by start.
    pub fn set_cues(&mut self, mut cues: Vec<Cue>) {
        sort_cues(&mut cues);
        self.cues = Arc::new(cues);
    }

    /// Mutate cues in place; the list is re-sorted afterwards.
    pub fn update_cues<R>(&mut self, f: impl FnOnce(&mut Vec<Cue>) -> R) -> R {
        let cues = Arc::make_mut(&mut self.cues);
        let out = f(cues);
        sort_cues(cues);
        out
    }

    // ---- Validation ----

    /// Describe every broken invariant. Empty when the project is sound.
    pub fn violations(&self) -> Vec<String> {
        let mut errors = vec![];

        if self.playhead > self.duration {
            errors.push(format!(
                "playhead {} beyond duration {}",
                self.playhead, self.duration
            ));
        }

        for (track, clips) in self.list_tracks() {
            for clip in clips {
                if clip.track != track {
                    errors.push(format!("{track} clip {} tagged as {}", clip.id, clip.track));
                }
                if clip.duration < MIN_CLIP_FRAMES {
                    errors.push(format!(
                        "{track} clip {} shorter than {MIN_CLIP_FRAMES} frames",
                        clip.id
                    ));
                }
                if clip.end() > self.duration {
                    errors.push(format!(
                        "{track} clip {} ends at {} past duration {}",
                        clip.id,
                        clip.end(),
                        self.duration
                    ));
                }
            }
            if clips.windows(2).any(|w| w[0].start > w[1].start) {
                errors.push(format!("{track} track is not sorted by start"));
            }
        }

        for cue in self.cues() {
            if cue.end <= cue.start {
                errors.push(format!("cue {} has end <= start", cue.id));
            }
        }
        if self.cues.windows(2).any(|w| w[0].start > w[1].start) {
            errors.push("cues are not sorted by start".to_string());
        }

        errors
    }
}

/// Errors that can occur when reading or writing project files.
#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_defaults() {
        let project = Project::new(FrameRate::Fps30);
        assert_eq!(project.duration, 1200);
        assert_eq!(project.ratio, AspectRatio::Portrait);
        assert!(project.snap);
        assert_eq!(project.caption.words_per_caption, 5);
        assert_eq!(project.export.resolution(), "1080x1920");
        assert!(project.violations().is_empty());
    }

    #[test]
    fn test_starter_project() {
        let project = Project::starter(FrameRate::Fps30);
        assert_eq!(project.tracks.clip_count(), 4);
        let title = &project.tracks.get(TrackType::Text)[0];
        assert_eq!(title.text.as_deref(), Some("{{title}}"));
        assert_eq!(title.duration, 120);
        assert_eq!(
            title.visual.as_ref().map(|v| v.animation),
            Some(AnimationPreset::Slide)
        );
        assert_eq!(project.tracks.get(TrackType::Video)[0].duration, 360);
        assert!(project.violations().is_empty());
    }

    #[test]
    fn test_upsert_clamps_and_sorts() {
        let mut project = Project::new(FrameRate::Fps30);
        assert!(project.upsert_clip(TrackType::Video, Clip::new(TrackType::Video, "B", 1190, 60)));
        assert!(project.upsert_clip(TrackType::Video, Clip::new(TrackType::Video, "A", 0, 30)));

        let clips = project.tracks.get(TrackType::Video);
        assert_eq!(clips[0].label, "A");
        assert_eq!(clips[1].start, 1140);
        assert_eq!(clips[1].end(), 1200);
        assert!(project.violations().is_empty());
    }

    #[test]
    fn test_upsert_replaces_by_id() {
        let mut project = Project::new(FrameRate::Fps30);
        let mut clip = Clip::new(TrackType::Audio, "N", 0, 30);
        project.upsert_clip(TrackType::Audio, clip.clone());
        clip.start = 90;
        project.upsert_clip(TrackType::Audio, clip.clone());
        assert_eq!(project.tracks.get(TrackType::Audio).len(), 1);
        assert_eq!(project.get_clip(TrackType::Audio, &clip.id).unwrap().start, 90);
    }

    #[test]
    fn test_locked_track_is_noop() {
        let mut project = Project::starter(FrameRate::Fps30);
        let id = project.tracks.get(TrackType::Video)[0].id.clone();
        project.toggle_locked(TrackType::Video);

        assert!(!project.upsert_clip(TrackType::Video, Clip::new(TrackType::Video, "X", 0, 30)));
        assert!(project.remove_clip(TrackType::Video, &id).is_none());
        assert_eq!(project.tracks.get(TrackType::Video).len(), 1);

        project.set_locked(TrackType::Video, false);
        assert!(project.remove_clip(TrackType::Video, &id).is_some());
    }

    #[test]
    fn test_playhead_and_zoom_clamp() {
        let mut project = Project::new(FrameRate::Fps30);
        project.set_playhead(5_000);
        assert_eq!(project.playhead, 1200);
        project.set_zoom(20.0);
        assert_eq!(project.zoom, 8.0);
        project.set_zoom(f64::NAN);
        assert_eq!(project.zoom, 1.0);
    }

    #[test]
    fn test_set_fps_does_not_rescale() {
        let mut project = Project::starter(FrameRate::Fps30);
        project.set_fps(FrameRate::Fps60);
        assert_eq!(project.duration, 1200);
        assert!((project.seconds(project.duration) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_clip_snap_excludes_self() {
        let project = Project::starter(FrameRate::Fps30);
        let clip = &project.tracks.get(TrackType::Video)[0];
        let snap = project.clip_snap(TrackType::Video, &clip.id, 5.0);
        assert_eq!(snap.points(), &[0, 1200]);
    }

    #[test]
    fn test_violations_reported() {
        let mut project = Project::new(FrameRate::Fps30);
        let mut clip = Clip::new(TrackType::Video, "Long", 1100, 200);
        clip.track = TrackType::Audio;
        project.tracks.replace(TrackType::Video, vec![clip]);
        project.playhead = 2000;

        let errors = project.violations();
        assert!(errors.iter().any(|e| e.contains("playhead")));
        assert!(errors.iter().any(|e| e.contains("past duration")));
        assert!(errors.iter().any(|e| e.contains("tagged as audio")));
    }

    #[test]
    fn test_project_save_and_load() {
        let dir = std::env::temp_dir().join("reelcut_test_project");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("project.json");

        let project = Project::starter(FrameRate::Fps60);
        project.save(&path).unwrap();
        let loaded = Project::load(&path).unwrap();
        assert_eq!(loaded, project);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_project_deserialization_defaults_optional_sections() {
        let json = r#"{"fps": 30, "zoom": 1.0, "duration": 300, "playhead": 0, "snap": true}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.tracks.clip_count(), 0);
        assert_eq!(project.caption, CaptionStyle::default());
        assert_eq!(project.ratio, AspectRatio::Portrait);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Project::load("/nonexistent/reelcut/project.json").unwrap_err();
        assert!(matches!(err, ProjectError::IoError { .. }));
    }
}
