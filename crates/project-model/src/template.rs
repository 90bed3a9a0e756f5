//! Declarative template payloads.
//!
//! A template is an external JSON description of tracks in seconds:
//!
//! ```json
//! { "tracks": [ { "type": "text", "start": 0, "duration": 3,
//!                 "text": "{{title}}", "animation": "slide",
//!                 "style": { "y": 18, "fontSize": 56 } } ] }
//! ```
//!
//! Parsing only requires `tracks` to be an array. Entries that do not
//! match the expected shape are skipped with a warning. Start and
//! duration are clamped to `[0, MAX_TEMPLATE_SECS]`.

use serde::{Deserialize, Serialize};

use crate::track::TrackType;
use crate::visual::{AnimationPreset, VisualStyle};

/// Longest start or duration a template entry may carry, in seconds.
pub const MAX_TEMPLATE_SECS: f64 = 3600.0;

/// One track entry of a template, timed in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateTrack {
    #[serde(rename = "type")]
    pub track: TrackType,
    pub start: f64,
    pub duration: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<AnimationPreset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<VisualStyle>,
}

/// A list of template tracks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemplatePayload {
    pub tracks: Vec<TemplateTrack>,
}

/// A named, stored template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preview_label: Option<String>,
    pub payload: TemplatePayload,
}

/// Errors raised while reading a template payload.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("Template JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Template payload has no `tracks` array")]
    MissingTracks,
}

/// Parse a payload, skipping malformed entries.
pub fn parse_template_payload(json: &str) -> Result<TemplatePayload, TemplateError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    template_payload_from_value(value)
}

/// Same as [`parse_template_payload`] for an already-decoded value.
pub fn template_payload_from_value(
    value: serde_json::Value,
) -> Result<TemplatePayload, TemplateError> {
    let serde_json::Value::Object(mut root) = value else {
        return Err(TemplateError::MissingTracks);
    };
    let Some(serde_json::Value::Array(entries)) = root.remove("tracks") else {
        return Err(TemplateError::MissingTracks);
    };

    let mut tracks = Vec::with_capacity(entries.len());
    for (idx, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<TemplateTrack>(entry) {
            Ok(track) if track.start.is_finite() && track.duration.is_finite() => {
                tracks.push(track.clamped())
            }
            Ok(_) => warn_skipped(idx, "non-finite timing"),
            Err(e) => warn_skipped(idx, &e.to_string()),
        }
    }
    Ok(TemplatePayload { tracks })
}

fn warn_skipped(idx: usize, reason: &str) {
    tracing::warn!(entry = idx, reason, "Skipping malformed template track");
}

impl TemplateTrack {
    /// Copy with start and duration clamped to `[0, MAX_TEMPLATE_SECS]`.
    pub fn clamped(mut self) -> Self {
        self.start = clamp_template_secs(self.start);
        self.duration = clamp_template_secs(self.duration);
        self
    }
}

/// Clamp a template time to `[0, MAX_TEMPLATE_SECS]`. NaN maps to 0.
pub fn clamp_template_secs(secs: f64) -> f64 {
    if secs.is_nan() {
        return 0.0;
    }
    secs.clamp(0.0, MAX_TEMPLATE_SECS)
}

impl TemplatePayload {
    /// Whether the payload contains any entry for `track`.
    pub fn has_track(&self, track: TrackType) -> bool {
        self.tracks.iter().any(|t| t.track == track)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_payload() {
        let payload = parse_template_payload(
            r#"{"tracks": [
                {"type": "video", "start": 0, "duration": 10},
                {"type": "text", "start": 0.5, "duration": 3, "text": "{{ title }}",
                 "animation": "slide", "style": {"y": 18, "fontSize": 56}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(payload.tracks.len(), 2);
        assert!(payload.has_track(TrackType::Video));
        assert!(!payload.has_track(TrackType::Audio));

        let text = &payload.tracks[1];
        assert_eq!(text.animation, Some(AnimationPreset::Slide));
        assert_eq!(text.style.as_ref().and_then(|s| s.font_size), Some(56.0));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let payload = parse_template_payload(
            r#"{"tracks": [
                {"type": "sticker", "start": 0, "duration": 1},
                {"type": "audio", "duration": 4},
                "not an object",
                {"type": "audio", "start": 1, "duration": 4}
            ]}"#,
        )
        .unwrap();
        assert_eq!(payload.tracks.len(), 1);
        assert_eq!(payload.tracks[0].track, TrackType::Audio);
    }

    #[test]
    fn test_oversized_timing_is_clamped() {
        let payload = parse_template_payload(
            r#"{"tracks": [
                {"type": "video", "start": 1e300, "duration": 5},
                {"type": "text", "start": -4, "duration": 1e12}
            ]}"#,
        )
        .unwrap();
        assert_eq!(payload.tracks[0].start, MAX_TEMPLATE_SECS);
        assert_eq!(payload.tracks[0].duration, 5.0);
        assert_eq!(payload.tracks[1].start, 0.0);
        assert_eq!(payload.tracks[1].duration, MAX_TEMPLATE_SECS);
        assert_eq!(clamp_template_secs(f64::NAN), 0.0);
    }

    #[test]
    fn test_missing_tracks_array() {
        assert!(matches!(
            parse_template_payload(r#"{"tracks": {}}"#),
            Err(TemplateError::MissingTracks)
        ));
        assert!(matches!(
            parse_template_payload("[]"),
            Err(TemplateError::MissingTracks)
        ));
        assert!(matches!(
            parse_template_payload("{not json"),
            Err(TemplateError::Json(_))
        ));
    }

    #[test]
    fn test_template_entry_camel_case() {
        let entry: TemplateEntry = serde_json::from_str(
            r#"{"id": "t1", "name": "Hook", "previewLabel": "Bold", "payload": {"tracks": []}}"#,
        )
        .unwrap();
        assert_eq!(entry.preview_label.as_deref(), Some("Bold"));
        assert!(entry.category.is_empty());
    }
}
