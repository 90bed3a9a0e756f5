//! Apply a template payload to a project.

use std::path::PathBuf;

use anyhow::Context;

use reelcut_common::config::AppConfig;
use reelcut_engine::template::TemplateVars;
use reelcut_engine::{Editor, EditorSettings};
use reelcut_project_model::parse_template_payload;

pub fn run(
    config: &AppConfig,
    path: PathBuf,
    payload: PathBuf,
    name: String,
    title: String,
    topic: String,
) -> anyhow::Result<()> {
    let json = std::fs::read_to_string(&payload)
        .with_context(|| format!("Failed to read template {}", payload.display()))?;
    let payload = parse_template_payload(&json).context("Invalid template payload")?;

    let project = super::load_project(&path)?;
    let mut editor = Editor::new(project, EditorSettings::from_config(config));
    let replaced = editor.apply_template(&payload, &name, &TemplateVars::new(title, topic));
    let project = editor.into_project();
    super::save_project(&project, &path)?;

    println!(
        "Applied template '{name}': {} entr(ies), {replaced} track(s) replaced",
        payload.tracks.len()
    );
    for (track, clips) in project.list_tracks() {
        println!("  {track}: {} clip(s)", clips.len());
    }
    println!("  Duration: {} frames", project.duration);

    Ok(())
}
