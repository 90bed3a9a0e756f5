//! Check a project against the timeline invariants.

use std::path::PathBuf;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    println!("Validating project at: {}", path.display());

    let project = super::load_project(&path)?;
    println!("  Clips: {}", project.tracks.clip_count());
    println!("  Cues: {}", project.cues().len());

    let errors = project.violations();
    if errors.is_empty() {
        println!("\nProject is valid.");
        return Ok(());
    }

    println!("\nValidation issues:");
    for error in &errors {
        println!("  - {error}");
    }
    anyhow::bail!("{} issue(s) found", errors.len())
}
