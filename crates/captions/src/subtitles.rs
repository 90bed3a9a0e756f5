//! Subtitle output in SRT and VTT formats.

use std::path::Path;

use reelcut_common::error::ReelcutResult;
use reelcut_project_model::{Cue, FrameRate};

use crate::generate::TimedCue;

/// Convert frame cues back to seconds.
pub fn timed_cues(cues: &[Cue], fps: FrameRate) -> Vec<TimedCue> {
    cues.iter()
        .map(|c| TimedCue {
            start_secs: fps.seconds(c.start),
            end_secs: fps.seconds(c.end),
            text: c.text.clone(),
        })
        .collect()
}

/// Generate SRT subtitle content.
pub fn generate_srt(cues: &[TimedCue]) -> String {
    let mut output = String::new();

    for (i, cue) in cues.iter().enumerate() {
        output.push_str(&format!("{}\n", i + 1));
        output.push_str(&format!(
            "{} --> {}\n",
            format_timestamp(cue.start_secs, ','),
            format_timestamp(cue.end_secs, ','),
        ));
        output.push_str(&cue.text);
        output.push_str("\n\n");
    }

    output
}

/// Generate WebVTT subtitle content.
pub fn generate_vtt(cues: &[TimedCue]) -> String {
    let mut output = String::from("WEBVTT\n\n");

    for cue in cues {
        output.push_str(&format!(
            "{} --> {}\n",
            format_timestamp(cue.start_secs, '.'),
            format_timestamp(cue.end_secs, '.'),
        ));
        output.push_str(&cue.text);
        output.push_str("\n\n");
    }

    output
}

/// `HH:MM:SS<sep>mmm`, rounded to the nearest millisecond.
fn format_timestamp(secs: f64, separator: char) -> String {
    let total_ms = if secs.is_finite() {
        (secs.max(0.0) * 1000.0).round() as u64
    } else {
        0
    };
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{seconds:02}{separator}{millis:03}")
}

/// Save project cues as subtitles; `.vtt` selects WebVTT, anything else SRT.
pub fn save_subtitles(cues: &[Cue], fps: FrameRate, path: &Path) -> ReelcutResult<()> {
    let timed = timed_cues(cues, fps);
    let content = match path.extension().and_then(|e| e.to_str()) {
        Some("vtt") => generate_vtt(&timed),
        _ => generate_srt(&timed),
    };
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), count = cues.len(), "Saved subtitles");
    Ok(())
}
