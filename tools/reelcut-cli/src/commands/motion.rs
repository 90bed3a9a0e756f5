//! Print sampled scene camera motion.

use anyhow::Context;

use reelcut_common::config::AppConfig;
use reelcut_engine::motion::{simulate_scene_motion, MotionPreset};
use reelcut_engine::EditorSettings;

pub fn run(
    config: &AppConfig,
    preset: Option<String>,
    scene: u32,
    samples: usize,
) -> anyhow::Result<()> {
    let settings = EditorSettings::from_config(config);
    let preset = match preset {
        Some(name) => name.parse::<MotionPreset>().context("Invalid --preset")?,
        None => settings.motion_preset,
    };

    let samples = simulate_scene_motion(preset, scene, &settings.motion, samples);
    let resolved = samples.first().map_or(preset, |s| s.motion.preset);
    println!("Scene {scene}: {preset} -> {resolved}");
    for sample in &samples {
        let m = &sample.motion;
        println!(
            "  p={:.3}  zoom={:.4}  focus=({:.2}%, {:.2}%)  {}",
            sample.progress,
            m.zoom,
            m.focus.x,
            m.focus.y,
            m.css_transform()
        );
    }

    Ok(())
}
