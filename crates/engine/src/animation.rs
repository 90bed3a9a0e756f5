//! Overlay animation presets.
//!
//! A preset is a pure function of a clip's local progress
//! `p = clamp((frame - start) / duration, 0, 1)` applied on top of the
//! clip's static [`Visual`]. Any frame can be evaluated directly without
//! replaying earlier frames.
//!
//! Recorded keyframes are not consulted here.

use std::f64::consts::PI;

use serde::Serialize;

use reelcut_project_model::{span_progress, AnimationPreset, Clip, Frame, Project, TrackType, Visual};

/// The transform an overlay is drawn with at one frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualFrame {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub scale: f64,
    pub rotation: f64,
    pub opacity: f64,
}

impl VisualFrame {
    /// The static transform, with no animation applied.
    pub fn from_visual(visual: &Visual) -> Self {
        Self {
            x: visual.x,
            y: visual.y,
            w: visual.w,
            h: visual.h,
            scale: visual.scale,
            rotation: visual.rotation,
            opacity: visual.opacity,
        }
    }
}

/// Progress of `frame` through a clip.
pub fn clip_progress(clip: &Clip, frame: Frame) -> f64 {
    span_progress(frame, clip.start, clip.duration)
}

/// Apply a visual's animation preset at `progress`.
pub fn animate_visual(visual: &Visual, progress: f64) -> VisualFrame {
    let p = progress.clamp(0.0, 1.0);
    let mut out = VisualFrame::from_visual(visual);
    match visual.animation {
        AnimationPreset::Fade => out.opacity *= (p * 2.0).min((1.0 - p) * 2.0).min(1.0),
        AnimationPreset::Slide => out.y += (1.0 - (p * 2.0).min(1.0)) * 8.0,
        AnimationPreset::Scale => out.scale *= 0.85 + (p * 2.0).min(1.0) * 0.15,
        AnimationPreset::Bounce => out.y += (p * PI * 2.2).sin() * 1.5,
        AnimationPreset::Typing | AnimationPreset::None => {}
    }
    out
}

/// The animated transform of a clip at `frame`, if it has a visual.
pub fn evaluate_clip(clip: &Clip, frame: Frame) -> Option<VisualFrame> {
    let visual = clip.visual.as_ref()?;
    Some(animate_visual(visual, clip_progress(clip, frame)))
}

/// Text shown for a clip at `frame`. The typing preset reveals
/// `floor(len * p)` characters; every other preset shows the full text.
pub fn clip_text_at(clip: &Clip, frame: Frame) -> Option<String> {
    let text = clip.text.as_deref()?;
    let typing = clip
        .visual
        .as_ref()
        .is_some_and(|v| v.animation == AnimationPreset::Typing);
    if !typing {
        return Some(text.to_string());
    }
    let len = text.chars().count();
    let shown = (len as f64 * clip_progress(clip, frame)).floor() as usize;
    Some(text.chars().take(shown).collect())
}

/// One overlay as drawn at a frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverlayFrame<'a> {
    pub track: TrackType,
    pub clip_id: &'a str,
    pub transform: VisualFrame,
    pub text: Option<String>,
}

/// Every text/effect overlay visible at `frame`, text track first.
pub fn overlays_at(project: &Project, frame: Frame) -> Vec<OverlayFrame<'_>> {
    [TrackType::Text, TrackType::Effect]
        .into_iter()
        .flat_map(|track| {
            project
                .tracks
                .get(track)
                .iter()
                .filter(move |clip| clip.is_active_at(frame))
                .filter_map(move |clip| {
                    Some(OverlayFrame {
                        track,
                        clip_id: clip.id.as_str(),
                        transform: evaluate_clip(clip, frame)?,
                        text: clip_text_at(clip, frame),
                    })
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn overlay(animation: AnimationPreset) -> Clip {
        Clip::new(TrackType::Text, "t", 100, 100)
            .with_text("hello world")
            .with_visual(Visual::new(animation, "#FFFFFF"))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_fade_ramps_in_and_out() {
        let clip = overlay(AnimationPreset::Fade);
        assert!(approx(evaluate_clip(&clip, 100).unwrap().opacity, 0.0));
        assert!(approx(evaluate_clip(&clip, 125).unwrap().opacity, 0.5));
        assert!(approx(evaluate_clip(&clip, 150).unwrap().opacity, 1.0));
        assert!(approx(evaluate_clip(&clip, 175).unwrap().opacity, 0.5));
        assert!(approx(evaluate_clip(&clip, 200).unwrap().opacity, 0.0));
    }

    #[test]
    fn test_slide_decays_to_rest() {
        let clip = overlay(AnimationPreset::Slide);
        assert!(approx(evaluate_clip(&clip, 100).unwrap().y, 28.0));
        assert!(approx(evaluate_clip(&clip, 125).unwrap().y, 24.0));
        assert!(approx(evaluate_clip(&clip, 160).unwrap().y, 20.0));
    }

    #[test]
    fn test_scale_grows_to_full() {
        let clip = overlay(AnimationPreset::Scale);
        assert!(approx(evaluate_clip(&clip, 100).unwrap().scale, 0.85));
        assert!(approx(evaluate_clip(&clip, 190).unwrap().scale, 1.0));
    }

    #[test]
    fn test_bounce_oscillates_around_rest() {
        let clip = overlay(AnimationPreset::Bounce);
        assert!(approx(evaluate_clip(&clip, 100).unwrap().y, 20.0));
        let peak = 20.0 + (0.25f64 * PI * 2.2).sin() * 1.5;
        assert!(approx(evaluate_clip(&clip, 125).unwrap().y, peak));
    }

    #[test]
    fn test_typing_truncates_text_only() {
        let clip = overlay(AnimationPreset::Typing);
        assert_eq!(clip_text_at(&clip, 100).as_deref(), Some(""));
        assert_eq!(clip_text_at(&clip, 150).as_deref(), Some("hello"));
        assert_eq!(clip_text_at(&clip, 200).as_deref(), Some("hello world"));
        let frame = evaluate_clip(&clip, 150).unwrap();
        assert_eq!(frame, VisualFrame::from_visual(clip.visual.as_ref().unwrap()));
    }

    #[test]
    fn test_evaluation_is_stateless() {
        let clip = overlay(AnimationPreset::Bounce);
        let a = evaluate_clip(&clip, 137);
        let _ = evaluate_clip(&clip, 180);
        assert_eq!(evaluate_clip(&clip, 137), a);
    }

    #[test]
    fn test_overlays_at_playhead() {
        let mut project = Project::new(reelcut_project_model::FrameRate::Fps30);
        project.tracks.replace(TrackType::Text, vec![overlay(AnimationPreset::Fade)]);
        project.tracks.replace(
            TrackType::Effect,
            vec![Clip::new(TrackType::Effect, "glow", 0, 50)],
        );
        project
            .tracks
            .replace(TrackType::Video, vec![Clip::new(TrackType::Video, "v", 0, 300)]);

        let effect_only = overlays_at(&project, 50);
        assert_eq!(effect_only.len(), 1);
        assert_eq!(effect_only[0].track, TrackType::Effect);
        assert!(overlays_at(&project, 60).is_empty());
        let text_only = overlays_at(&project, 150);
        assert_eq!(text_only.len(), 1);
        assert_eq!(text_only[0].track, TrackType::Text);
        assert_eq!(text_only[0].text.as_deref(), Some("hello world"));
    }
}
