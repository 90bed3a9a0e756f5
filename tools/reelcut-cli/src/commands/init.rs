//! Write a starter project.

use std::path::PathBuf;

use reelcut_common::clock::format_mmss;
use reelcut_project_model::{FrameRate, Project};

pub fn run(path: PathBuf, fps: FrameRate, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let project = Project::starter(fps);
    super::save_project(&project, &path)?;

    println!("Project created at {}", path.display());
    println!("  FPS: {}", fps.as_u32());
    println!(
        "  Duration: {} ({} frames)",
        format_mmss(project.seconds(project.duration)),
        project.duration
    );
    println!("  Clips: {}", project.tracks.clip_count());
    for (track, clips) in project.list_tracks() {
        for clip in clips {
            println!("  ├── {track}: {}", clip.label);
        }
    }

    Ok(())
}
