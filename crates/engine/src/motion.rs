//! Scene camera motion.
//!
//! Each scene gets a slow pan/zoom driven by a motion preset, a focus
//! point, and how far the focus may drift. The computation is a pure
//! function of `(preset, scene, progress, config)`, so an interactive
//! preview and a final render that call it with the same inputs see the
//! same camera.
//!
//! # Algorithm
//!
//! 1. **Resolve** `random` by cycling gentle zoom, focus, up/down,
//!    left/right over scene numbers.
//! 2. **Ease** the scene progress, sped up by the speed percentage, with
//!    smoothstep.
//! 3. **Direction** alternates by scene parity: X flips every scene, Y
//!    every third scene.
//! 4. **Interpolate** the focus point (and zoom) for the preset, and
//!    derive the drift box shown by the focus picker.
//! 5. **Translate** so the focus point moves toward the canvas center,
//!    damped by zoom.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use reelcut_common::config::MotionDefaults;
use reelcut_project_model::{clamp_finite, smoothstep, PercentRect, Point2D};

/// How a scene's camera moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionPreset {
    /// Hold the focus point and zoom in slowly.
    #[default]
    GentleZoom,
    /// Pan vertically across the drift range.
    UpDown,
    /// Pan horizontally across the drift range.
    LeftRight,
    /// Glide the focus point diagonally at a fixed zoom.
    FocusSmooth,
    /// One of the other presets, chosen by scene number.
    Random,
}

const RANDOM_CYCLE: [MotionPreset; 4] = [
    MotionPreset::GentleZoom,
    MotionPreset::FocusSmooth,
    MotionPreset::UpDown,
    MotionPreset::LeftRight,
];

impl MotionPreset {
    pub fn as_str(self) -> &'static str {
        match self {
            MotionPreset::GentleZoom => "gentle_zoom",
            MotionPreset::UpDown => "up_down",
            MotionPreset::LeftRight => "left_right",
            MotionPreset::FocusSmooth => "focus_smooth",
            MotionPreset::Random => "random",
        }
    }

    /// The concrete preset used for a 1-based scene number.
    pub fn resolve(self, scene_number: u32) -> MotionPreset {
        match self {
            MotionPreset::Random => {
                let scene = scene_number.max(1) as usize;
                RANDOM_CYCLE[(scene - 1) % RANDOM_CYCLE.len()]
            }
            other => other,
        }
    }
}

impl FromStr for MotionPreset {
    type Err = UnknownMotionPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "gentle_zoom" => Ok(MotionPreset::GentleZoom),
            "up_down" => Ok(MotionPreset::UpDown),
            "left_right" => Ok(MotionPreset::LeftRight),
            "focus_smooth" => Ok(MotionPreset::FocusSmooth),
            "random" => Ok(MotionPreset::Random),
            _ => Err(UnknownMotionPreset(s.to_string())),
        }
    }
}

impl std::fmt::Display for MotionPreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected motion preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown motion preset `{0}`")]
pub struct UnknownMotionPreset(pub String);

/// Overlay settings for scene motion. Values are clamped on use.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MotionConfig {
    /// Speed multiplier in percent, `[60, 220]`.
    pub motion_speed_percent: f64,
    /// Focus point X in percent of the canvas, `[0, 100]`.
    pub focus_x_percent: f64,
    /// Focus point Y in percent of the canvas, `[0, 100]`.
    pub focus_y_percent: f64,
    /// Travel range around the focus point in percent, `[0, 20]`.
    pub focus_drift_percent: f64,
    /// Zoom gain in percent, `[3, 20]`.
    pub focus_zoom_percent: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            motion_speed_percent: 135.0,
            focus_x_percent: 50.0,
            focus_y_percent: 50.0,
            focus_drift_percent: 6.0,
            focus_zoom_percent: 9.0,
        }
    }
}

impl From<&MotionDefaults> for MotionConfig {
    fn from(defaults: &MotionDefaults) -> Self {
        Self {
            motion_speed_percent: defaults.motion_speed_percent,
            focus_x_percent: defaults.focus_x_percent,
            focus_y_percent: defaults.focus_y_percent,
            focus_drift_percent: defaults.focus_drift_percent,
            focus_zoom_percent: defaults.focus_zoom_percent,
        }
    }
}

/// The camera for one scene at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneMotion {
    /// The preset actually applied (never `Random`).
    pub preset: MotionPreset,
    pub zoom: f64,
    /// Horizontal shift in percent of the frame.
    pub translate_x_percent: f64,
    /// Vertical shift in percent of the frame.
    pub translate_y_percent: f64,
    /// Where the camera is looking, in percent.
    pub focus: Point2D,
    /// Region the focus travels through, in percent.
    pub focus_box: PercentRect,
}

impl SceneMotion {
    pub fn css_transform(&self) -> String {
        format!(
            "translate({:.3}%, {:.3}%) scale({:.4})",
            self.translate_x_percent, self.translate_y_percent, self.zoom
        )
    }
}

/// Compute the camera for `scene_number` (1-based) at `progress` in `[0, 1]`.
pub fn compute_scene_motion(
    preset: MotionPreset,
    scene_number: u32,
    progress: f64,
    config: &MotionConfig,
) -> SceneMotion {
    let scene = scene_number.max(1);
    let preset = preset.resolve(scene);

    let speed = clamp_finite(config.motion_speed_percent, 60.0, 220.0, 135.0) / 100.0;
    let ease = smoothstep(clamp_finite(progress * speed, 0.0, 1.0, 0.0));
    let focus_x = clamp_finite(config.focus_x_percent, 0.0, 100.0, 50.0) / 100.0;
    let focus_y = clamp_finite(config.focus_y_percent, 0.0, 100.0, 50.0) / 100.0;
    let drift = clamp_finite(config.focus_drift_percent, 0.0, 20.0, 6.0) / 100.0;
    let (drift_x, drift_y) = (drift, drift * 0.72);
    let gain = clamp_finite(config.focus_zoom_percent, 3.0, 20.0, 9.0) / 100.0;
    let dir_x = if scene % 2 == 1 { -1.0 } else { 1.0 };
    let dir_y = if scene % 3 == 0 { 1.0 } else { -1.0 };

    let (start_x, end_x) = travel(focus_x, drift_x * dir_x);
    let (start_y, end_y) = travel(focus_y, drift_y * dir_y);

    let mut current = (focus_x, focus_y);
    let mut zoom = 1.0 + gain * ease;
    let mut focus_box = PercentRect::new(
        percent(focus_x - drift_x),
        percent(focus_y - drift_y),
        (drift_x * 200.0).max(4.0),
        (drift_y * 200.0).max(4.0),
    );

    match preset {
        MotionPreset::FocusSmooth => {
            current = (lerp(start_x, end_x, ease), lerp(start_y, end_y, ease));
            focus_box = PercentRect::new(
                start_x.min(end_x) * 100.0,
                start_y.min(end_y) * 100.0,
                ((end_x - start_x).abs() * 100.0).max(4.0),
                ((end_y - start_y).abs() * 100.0).max(4.0),
            );
            // Fixed zoom: no in/out breathing while panning.
            zoom = 1.0 + gain;
        }
        MotionPreset::UpDown => {
            current.1 = lerp(start_y, end_y, ease);
            focus_box = PercentRect::new(
                percent(focus_x - drift_x * 0.6),
                start_y.min(end_y) * 100.0,
                (drift_x * 100.0).max(4.0),
                ((end_y - start_y).abs() * 100.0).max(4.0),
            );
        }
        MotionPreset::LeftRight => {
            current.0 = lerp(start_x, end_x, ease);
            focus_box = PercentRect::new(
                start_x.min(end_x) * 100.0,
                percent(focus_y - drift_y * 0.6),
                ((end_x - start_x).abs() * 100.0).max(4.0),
                (drift_y * 100.0).max(4.0),
            );
        }
        MotionPreset::GentleZoom | MotionPreset::Random => {}
    }

    let damping = zoom.max(1.0);
    SceneMotion {
        preset,
        zoom,
        translate_x_percent: (0.5 - current.0) * 85.0 / damping,
        translate_y_percent: (0.5 - current.1) * 85.0 / damping,
        focus: Point2D::new(current.0 * 100.0, current.1 * 100.0),
        focus_box,
    }
}

/// One sample of a simulated scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MotionSample {
    pub progress: f64,
    pub motion: SceneMotion,
}

/// Sample a scene's camera at `samples` evenly spaced progress values,
/// both ends included.
pub fn simulate_scene_motion(
    preset: MotionPreset,
    scene_number: u32,
    config: &MotionConfig,
    samples: usize,
) -> Vec<MotionSample> {
    let samples = samples.max(2);
    (0..samples)
        .map(|i| {
            let progress = i as f64 / (samples - 1) as f64;
            MotionSample {
                progress,
                motion: compute_scene_motion(preset, scene_number, progress, config),
            }
        })
        .collect()
}

/// Start and end of travel around `focus`, kept away from the canvas edge.
fn travel(focus: f64, offset: f64) -> (f64, f64) {
    (
        clamp_finite(focus - offset, 0.06, 0.94, focus),
        clamp_finite(focus + offset, 0.06, 0.94, focus),
    )
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

fn percent(fraction: f64) -> f64 {
    clamp_finite(fraction * 100.0, 0.0, 100.0, 50.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_random_cycles_by_scene() {
        let resolved: Vec<MotionPreset> = (1..=5).map(|s| MotionPreset::Random.resolve(s)).collect();
        assert_eq!(
            resolved,
            vec![
                MotionPreset::GentleZoom,
                MotionPreset::FocusSmooth,
                MotionPreset::UpDown,
                MotionPreset::LeftRight,
                MotionPreset::GentleZoom,
            ]
        );
        assert_eq!(MotionPreset::Random.resolve(0), MotionPreset::GentleZoom);
        assert_eq!(MotionPreset::UpDown.resolve(7), MotionPreset::UpDown);
    }

    #[test]
    fn test_gentle_zoom_defaults() {
        let config = MotionConfig::default();
        let start = compute_scene_motion(MotionPreset::GentleZoom, 1, 0.0, &config);
        assert!(approx(start.zoom, 1.0));
        assert!(approx(start.translate_x_percent, 0.0));
        assert_eq!(start.focus, Point2D::new(50.0, 50.0));
        assert!(approx(start.focus_box.left, 44.0));
        assert!(approx(start.focus_box.width, 12.0));

        // 135% speed saturates before the end of the scene.
        let end = compute_scene_motion(MotionPreset::GentleZoom, 1, 0.8, &config);
        assert!(approx(end.zoom, 1.09));
    }

    #[test]
    fn test_focus_smooth_holds_zoom_and_pans() {
        let config = MotionConfig::default();
        let a = compute_scene_motion(MotionPreset::FocusSmooth, 1, 0.0, &config);
        let b = compute_scene_motion(MotionPreset::FocusSmooth, 1, 1.0, &config);
        assert!(approx(a.zoom, 1.09));
        assert!(approx(b.zoom, 1.09));
        // Scene 1 pans X from right to left and Y from bottom to top.
        assert!(approx(a.focus.x, 56.0));
        assert!(approx(b.focus.x, 44.0));
        assert!(a.focus.y > b.focus.y);
        assert!(approx(a.focus_box.left, 44.0));
    }

    #[test]
    fn test_directions_alternate_by_scene() {
        let config = MotionConfig::default();
        let odd = compute_scene_motion(MotionPreset::LeftRight, 1, 1.0, &config);
        let even = compute_scene_motion(MotionPreset::LeftRight, 2, 1.0, &config);
        assert!(odd.focus.x < 50.0);
        assert!(even.focus.x > 50.0);

        let third = compute_scene_motion(MotionPreset::UpDown, 3, 1.0, &config);
        let first = compute_scene_motion(MotionPreset::UpDown, 1, 1.0, &config);
        assert!(third.focus.y > 50.0);
        assert!(first.focus.y < 50.0);
    }

    #[test]
    fn test_axis_presets_move_one_axis() {
        let config = MotionConfig::default();
        let up_down = compute_scene_motion(MotionPreset::UpDown, 2, 0.5, &config);
        assert!(approx(up_down.focus.x, 50.0));
        assert!(approx(up_down.focus_box.width, 6.0));

        let left_right = compute_scene_motion(MotionPreset::LeftRight, 2, 0.5, &config);
        assert!(approx(left_right.focus.y, 50.0));
    }

    #[test]
    fn test_out_of_range_config_is_clamped() {
        let wild = MotionConfig {
            motion_speed_percent: f64::NAN,
            focus_x_percent: 500.0,
            focus_y_percent: -20.0,
            focus_drift_percent: 90.0,
            focus_zoom_percent: f64::INFINITY,
        };
        let motion = compute_scene_motion(MotionPreset::FocusSmooth, 4, 0.5, &wild);
        assert!(motion.zoom.is_finite());
        assert!(motion.translate_x_percent.is_finite());
        assert!((6.0..=94.0).contains(&motion.focus.x));
        assert!((6.0..=94.0).contains(&motion.focus.y));
    }

    #[test]
    fn test_translate_points_focus_at_center() {
        let config = MotionConfig {
            focus_x_percent: 80.0,
            focus_y_percent: 20.0,
            ..MotionConfig::default()
        };
        let motion = compute_scene_motion(MotionPreset::GentleZoom, 1, 0.0, &config);
        assert!(approx(motion.translate_x_percent, -0.3 * 85.0));
        assert!(approx(motion.translate_y_percent, 0.3 * 85.0));
    }

    #[test]
    fn test_preset_parse_and_serde() {
        assert_eq!("focus-smooth".parse::<MotionPreset>(), Ok(MotionPreset::FocusSmooth));
        assert_eq!(" Random ".parse::<MotionPreset>(), Ok(MotionPreset::Random));
        assert!("spin".parse::<MotionPreset>().is_err());
        assert_eq!(
            serde_json::to_string(&MotionPreset::UpDown).unwrap(),
            "\"up_down\""
        );
    }

    #[test]
    fn test_simulation_covers_both_ends() {
        let samples = simulate_scene_motion(MotionPreset::Random, 3, &MotionConfig::default(), 5);
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0].progress, 0.0);
        assert_eq!(samples[4].progress, 1.0);
        assert!(samples.iter().all(|s| s.motion.preset == MotionPreset::UpDown));
    }

    #[test]
    fn test_css_transform_string_is_stable() {
        let motion = compute_scene_motion(MotionPreset::GentleZoom, 1, 1.0, &MotionConfig::default());
        assert_eq!(motion.css_transform(), "translate(0.000%, 0.000%) scale(1.0900)");
    }
}
