//! Export job description.
//!
//! A read-only projection of a project for an external renderer: canvas
//! and encoder hints plus every clip and cue converted back to seconds.
//! This crate never renders pixels or audio itself.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use reelcut_common::error::ReelcutResult;
use reelcut_project_model::{
    AnimationPreset, AspectRatio, FrameRate, Project, RenderMode, TrackType, Visual,
};

/// Codec requested from the renderer.
pub const EXPORT_CODEC: &str = "H.264";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanvasSpec {
    pub ratio: AspectRatio,
    /// `WIDTHxHEIGHT`.
    pub resolution: String,
    pub fps: FrameRate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderSpec {
    pub mode: RenderMode,
    pub codec: String,
    pub bitrate: String,
    /// Watermark text, or `null` when disabled.
    pub watermark: Option<String>,
}

/// A clip, timed in seconds rounded to hundredths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportClip {
    #[serde(rename = "type")]
    pub track: TrackType,
    pub start: f64,
    pub duration: f64,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    pub animation: AnimationPreset,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<Visual>,
}

/// A caption cue, timed in seconds rounded to milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportCaption {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Everything a renderer needs to produce the final short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportJobDescription {
    pub canvas: CanvasSpec,
    pub render: RenderSpec,
    pub tracks: Vec<ExportClip>,
    pub captions: Vec<ExportCaption>,
    pub generated_at: DateTime<Utc>,
}

impl ExportJobDescription {
    pub fn from_project(project: &Project) -> Self {
        Self::from_project_at(project, Utc::now())
    }

    /// Same as [`from_project`](Self::from_project) with a fixed timestamp.
    pub fn from_project_at(project: &Project, generated_at: DateTime<Utc>) -> Self {
        let export = &project.export;
        let tracks = project
            .list_tracks()
            .flat_map(|(track, clips)| {
                clips.iter().map(move |clip| ExportClip {
                    track,
                    start: round_to(project.seconds(clip.start), 100.0),
                    duration: round_to(project.seconds(clip.duration), 100.0),
                    label: clip.label.clone(),
                    text: clip.text.clone(),
                    animation: clip.visual.as_ref().map_or(AnimationPreset::None, |v| v.animation),
                    style: clip.visual.clone(),
                })
            })
            .collect();
        let captions = project
            .cues()
            .iter()
            .map(|cue| ExportCaption {
                start: round_to(project.seconds(cue.start), 1000.0),
                end: round_to(project.seconds(cue.end), 1000.0),
                text: cue.text.clone(),
            })
            .collect();

        Self {
            canvas: CanvasSpec {
                ratio: project.ratio,
                resolution: export.resolution(),
                fps: project.fps,
            },
            render: RenderSpec {
                mode: export.mode,
                codec: EXPORT_CODEC.to_string(),
                bitrate: export.bitrate.clone(),
                watermark: export.watermark.then(|| export.watermark_text.clone()),
            },
            tracks,
            captions,
            generated_at,
        }
    }

    pub fn to_json_pretty(&self) -> ReelcutResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the description as pretty JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> ReelcutResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json_pretty()?)?;
        tracing::info!(
            path = %path.display(),
            clips = self.tracks.len(),
            captions = self.captions.len(),
            "Wrote export job description"
        );
        Ok(())
    }
}

fn round_to(value: f64, scale: f64) -> f64 {
    (value * scale).round() / scale
}
