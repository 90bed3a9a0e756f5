//! Show project information.

use std::path::PathBuf;

use reelcut_common::clock::format_mmss;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let p = super::load_project(&path)?;

    println!("Project: {}", path.display());
    println!(
        "  Canvas: {} ({}) @ {}fps",
        p.ratio.as_str(),
        p.export.resolution(),
        p.fps.as_u32()
    );
    println!(
        "  Duration: {} ({} frames)",
        format_mmss(p.seconds(p.duration)),
        p.duration
    );
    println!("  Playhead: {}", p.playhead);
    println!("  Zoom: {:.2}x, snap {}", p.zoom, if p.snap { "on" } else { "off" });
    println!();

    println!("Tracks:");
    for (track, clips) in p.list_tracks() {
        let mut flags = vec![];
        if p.is_locked(track) {
            flags.push("locked");
        }
        if p.track_collapsed.get(track) {
            flags.push("collapsed");
        }
        println!(
            "  {track}: {} clip(s){}",
            clips.len(),
            if flags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", flags.join(", "))
            }
        );
        for clip in clips {
            println!(
                "    {} {:>7.2}s +{:.2}s  {}",
                clip.id,
                p.seconds(clip.start),
                p.seconds(clip.duration),
                clip.label
            );
        }
    }
    println!();

    println!("Captions: {} cue(s)", p.cues().len());
    println!(
        "  Style: {}px {} ({:?}), {} words/caption",
        p.caption.font_size, p.caption.color, p.caption.animation, p.caption.words_per_caption
    );

    Ok(())
}
