//! Engine settings derived from the application config.

use reelcut_captions::{CaptionOptions, DEFAULT_LANE_COUNT, MAX_LANE_COUNT};
use reelcut_common::config::AppConfig;
use reelcut_project_model::{clamp_finite, FrameRate, Project, TimelineScale};

use crate::motion::{MotionConfig, MotionPreset};

/// Upper bound on the undo depth.
pub const MAX_HISTORY_LIMIT: usize = 500;

/// Tunables for an editing session. Values are clamped when read.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSettings {
    /// Frame rate for new projects.
    pub fps: FrameRate,
    pub history_limit: usize,
    pub snap_threshold_px: f64,
    pub px_per_second: f64,
    /// Whether delete closes the gap by default.
    pub ripple_delete: bool,
    /// Words per caption for new projects.
    pub words_per_caption: u32,
    pub caption_delay_ms: i64,
    pub lane_count: usize,
    pub motion_preset: MotionPreset,
    pub motion: MotionConfig,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl EditorSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let motion_preset = config.motion.preset.parse().unwrap_or_else(|e| {
            tracing::warn!("{e}, using gentle_zoom");
            MotionPreset::GentleZoom
        });
        Self {
            fps: config.editor.fps,
            history_limit: config.editor.history_limit,
            snap_threshold_px: config.editor.snap_threshold_px,
            px_per_second: config.editor.px_per_second,
            ripple_delete: config.editor.ripple_delete,
            words_per_caption: config.captions.words_per_caption,
            caption_delay_ms: config.captions.subtitle_delay_ms,
            lane_count: config.captions.lane_count,
            motion_preset,
            motion: MotionConfig::from(&config.motion),
        }
    }

    /// History depth in `[1, MAX_HISTORY_LIMIT]`.
    pub fn history_limit(&self) -> usize {
        self.history_limit.clamp(1, MAX_HISTORY_LIMIT)
    }

    /// Lane count in `[1, MAX_LANE_COUNT]`, or the default when out of range.
    pub fn lane_count(&self) -> usize {
        if (1..=MAX_LANE_COUNT).contains(&self.lane_count) {
            self.lane_count
        } else {
            DEFAULT_LANE_COUNT
        }
    }

    /// Pixel scale for a project's timeline at its current zoom.
    pub fn timeline_scale(&self, project: &Project) -> TimelineScale {
        project
            .timeline_scale()
            .with_px_per_second(clamp_finite(self.px_per_second, 1.0, 10_000.0, 42.0))
            .with_snap_threshold_px(clamp_finite(self.snap_threshold_px, 0.0, 1_000.0, 8.0))
    }

    /// Caption generation options for a project.
    pub fn caption_options(&self, project: &Project) -> CaptionOptions {
        CaptionOptions::new(project.caption.words_per_caption, self.caption_delay_ms)
    }

    /// An empty project with these defaults.
    pub fn new_project(&self) -> Project {
        let mut project = Project::new(self.fps);
        project.caption.words_per_caption = self.words_per_caption.clamp(2, 10);
        project
    }
}
