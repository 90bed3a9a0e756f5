//! Plan segments and optionally place them onto a project.

use std::path::PathBuf;

use reelcut_common::config::AppConfig;
use reelcut_engine::segment::{SceneHeuristic, SegmentSource, SplitMode, SplitPlanner};
use reelcut_engine::{Editor, EditorSettings};

use crate::SegmentModeArg;

pub fn run(
    config: &AppConfig,
    total_sec: f64,
    mode: SegmentModeArg,
    split_count: u32,
    split_seconds: f64,
    apply: Option<PathBuf>,
) -> anyhow::Result<()> {
    let source: Box<dyn SegmentSource> = match mode {
        SegmentModeArg::Count => Box::new(SplitPlanner::new(SplitMode::Count { count: split_count })),
        SegmentModeArg::Seconds => Box::new(SplitPlanner::new(SplitMode::Seconds {
            seconds: split_seconds,
        })),
        SegmentModeArg::Silence => Box::new(SplitPlanner::new(SplitMode::Silence)),
        SegmentModeArg::Scene => Box::new(SceneHeuristic),
    };
    let segments = source.segments(total_sec);

    println!("Segments ({:?}, {total_sec}s):", mode);
    for seg in &segments {
        println!(
            "  {:>3}  {:>7.2}s - {:>7.2}s  ({:?})",
            seg.index, seg.start_sec, seg.end_sec, seg.reason
        );
    }

    let Some(path) = apply else {
        return Ok(());
    };
    let project = super::load_project(&path)?;
    let mut editor = Editor::new(project, EditorSettings::from_config(config));
    if !editor.apply_segments(&segments) {
        anyhow::bail!("No segments to place");
    }
    let project = editor.into_project();
    super::save_project(&project, &path)?;
    println!(
        "\nPlaced {} segment(s) into {} ({} clips, {} frames)",
        segments.len(),
        path.display(),
        project.tracks.clip_count(),
        project.duration
    );

    Ok(())
}
