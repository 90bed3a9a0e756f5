//! Generate caption cues from a narration file.

use std::path::PathBuf;

use anyhow::Context;

use reelcut_captions::save_subtitles;
use reelcut_common::config::AppConfig;
use reelcut_engine::{Editor, EditorSettings};

pub fn run(
    config: &AppConfig,
    path: PathBuf,
    narration: PathBuf,
    words: Option<u32>,
    delay_ms: Option<i64>,
    srt: Option<PathBuf>,
) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&narration)
        .with_context(|| format!("Failed to read narration {}", narration.display()))?;

    let mut project = super::load_project(&path)?;
    if let Some(words) = words {
        project.caption.words_per_caption = words.clamp(2, 10);
    }
    let mut settings = EditorSettings::from_config(config);
    if let Some(delay_ms) = delay_ms {
        settings.caption_delay_ms = delay_ms;
    }

    let mut editor = Editor::new(project, settings);
    let count = editor.generate_captions(&text);
    let project = editor.into_project();
    super::save_project(&project, &path)?;

    println!("Generated {count} cue(s) into {}", path.display());
    for cue in project.cues() {
        println!(
            "  {:>7.2}s - {:>7.2}s  {}",
            project.seconds(cue.start),
            project.seconds(cue.end),
            cue.text
        );
    }

    if let Some(out) = srt {
        save_subtitles(project.cues(), project.fps, &out)
            .with_context(|| format!("Failed to write subtitles {}", out.display()))?;
        println!("Subtitles written to {}", out.display());
    }

    Ok(())
}
