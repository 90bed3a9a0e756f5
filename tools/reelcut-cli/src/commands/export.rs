//! Write the export job description for an external renderer.

use std::path::PathBuf;

use anyhow::Context;

use reelcut_engine::export::ExportJobDescription;

pub fn run(path: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let project = super::load_project(&path)?;
    let job = ExportJobDescription::from_project(&project);

    match output {
        Some(out) => {
            job.save(&out)
                .with_context(|| format!("Failed to write {}", out.display()))?;
            println!("Export job written to {}", out.display());
            println!(
                "  Canvas: {} {} @ {}fps",
                job.canvas.ratio.as_str(),
                job.canvas.resolution,
                job.canvas.fps.as_u32()
            );
            println!("  Clips: {}, captions: {}", job.tracks.len(), job.captions.len());
        }
        None => println!("{}", job.to_json_pretty()?),
    }

    Ok(())
}
