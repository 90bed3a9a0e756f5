//! Clip edits: move, trim, split, and (ripple) delete.
//!
//! Every entry point is a no-op on a locked track or an unknown clip and
//! reports whether it changed anything. Spans are clamped into the
//! timeline instead of rejected, so the project stays valid whatever the
//! input.

use serde::{Deserialize, Serialize};

use reelcut_project_model::{
    new_id, plan_move, plan_trim_end, plan_trim_start, sort_clips, AnimationPreset, Clip, Frame,
    Project, Span, TimelineScale, TrackType, Visual, MIN_CLIP_FRAMES, MIN_PROJECT_FRAMES,
};

/// Length of a text clip added by hand, in seconds.
pub const NEW_TEXT_CLIP_SECS: f64 = 3.0;

/// Which part of a clip an edit moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClipEditMode {
    Move,
    TrimStart,
    TrimEnd,
}

/// Whether an edit snaps, and how close a boundary must be.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapPolicy {
    pub enabled: bool,
    pub threshold_frames: f64,
}

impl SnapPolicy {
    pub const OFF: SnapPolicy = SnapPolicy {
        enabled: false,
        threshold_frames: 0.0,
    };

    /// Snap per the project flag unless the bypass modifier is held.
    pub fn for_gesture(project: &Project, scale: &TimelineScale, bypass: bool) -> Self {
        Self {
            enabled: project.snap && !bypass,
            threshold_frames: scale.snap_threshold_frames(),
        }
    }
}

/// The span an edit of `clip_id` produces from its pre-gesture `origin`.
pub fn plan_clip_edit(
    project: &Project,
    track: TrackType,
    clip_id: &str,
    origin: Span,
    mode: ClipEditMode,
    delta: i64,
    policy: SnapPolicy,
) -> Span {
    let limits = project.clip_limits();
    let snap = policy
        .enabled
        .then(|| project.clip_snap(track, clip_id, policy.threshold_frames));
    let snap = snap.as_ref();
    match mode {
        ClipEditMode::Move => plan_move(origin, delta, limits, snap),
        ClipEditMode::TrimStart => plan_trim_start(origin, delta, limits, snap),
        ClipEditMode::TrimEnd => plan_trim_end(origin, delta, limits, snap),
    }
}

/// Apply an edit measured from `origin`. Returns whether the clip changed.
pub fn apply_clip_edit(
    project: &mut Project,
    track: TrackType,
    clip_id: &str,
    origin: Span,
    mode: ClipEditMode,
    delta: i64,
    policy: SnapPolicy,
) -> bool {
    if project.is_locked(track) {
        tracing::debug!(%track, clip = clip_id, "Edit ignored on locked track");
        return false;
    }
    let Some(current) = project.get_clip(track, clip_id).map(clip_span) else {
        return false;
    };
    let span = plan_clip_edit(project, track, clip_id, origin, mode, delta, policy);
    if span == current {
        return false;
    }
    let clips = project.tracks.make_mut(track);
    if let Some(clip) = clips.iter_mut().find(|c| c.id == clip_id) {
        clip.start = span.start;
        clip.duration = span.duration;
    }
    sort_clips(clips);
    true
}

/// Edit a clip relative to where it is now.
pub fn edit_clip(
    project: &mut Project,
    track: TrackType,
    clip_id: &str,
    mode: ClipEditMode,
    delta: i64,
    policy: SnapPolicy,
) -> bool {
    let Some(origin) = project.get_clip(track, clip_id).map(clip_span) else {
        return false;
    };
    apply_clip_edit(project, track, clip_id, origin, mode, delta, policy)
}

pub fn move_clip(
    project: &mut Project,
    track: TrackType,
    clip_id: &str,
    delta: i64,
    policy: SnapPolicy,
) -> bool {
    edit_clip(project, track, clip_id, ClipEditMode::Move, delta, policy)
}

pub fn trim_clip_start(
    project: &mut Project,
    track: TrackType,
    clip_id: &str,
    delta: i64,
    policy: SnapPolicy,
) -> bool {
    edit_clip(project, track, clip_id, ClipEditMode::TrimStart, delta, policy)
}

pub fn trim_clip_end(
    project: &mut Project,
    track: TrackType,
    clip_id: &str,
    delta: i64,
    policy: SnapPolicy,
) -> bool {
    edit_clip(project, track, clip_id, ClipEditMode::TrimEnd, delta, policy)
}

/// Split a clip at `at`. The left half keeps the id; the right half is a
/// copy with a fresh id, whose id is returned.
///
/// The cut must leave both halves at least [`MIN_CLIP_FRAMES`] long.
pub fn split_clip(
    project: &mut Project,
    track: TrackType,
    clip_id: &str,
    at: Frame,
) -> Option<String> {
    if project.is_locked(track) {
        tracing::debug!(%track, clip = clip_id, "Split ignored on locked track");
        return None;
    }
    let original = project.get_clip(track, clip_id)?.clone();
    let fits = original.splits_at(at)
        && at - original.start >= MIN_CLIP_FRAMES
        && original.end() - at >= MIN_CLIP_FRAMES;
    if !fits {
        tracing::debug!(
            clip = clip_id,
            at,
            start = original.start,
            end = original.end(),
            "Split ignored outside clip"
        );
        return None;
    }

    let right = Clip {
        id: new_id(track.as_str()),
        start: at,
        duration: original.end() - at,
        ..original.clone()
    };
    let right_id = right.id.clone();

    let clips = project.tracks.make_mut(track);
    if let Some(left) = clips.iter_mut().find(|c| c.id == clip_id) {
        left.duration = at - original.start;
    }
    clips.push(right);
    sort_clips(clips);
    Some(right_id)
}

/// Remove a clip. With `ripple`, later clips on the same track shift
/// earlier by its length and the timeline shrinks to match, never below
/// [`MIN_PROJECT_FRAMES`] or the last clip end on any track.
pub fn delete_clip(
    project: &mut Project,
    track: TrackType,
    clip_id: &str,
    ripple: bool,
) -> Option<Clip> {
    let removed = project.remove_clip(track, clip_id)?;
    if !ripple {
        return Some(removed);
    }

    let clips = project.tracks.make_mut(track);
    for clip in clips.iter_mut().filter(|c| c.start > removed.start) {
        clip.start = clip.start.saturating_sub(removed.duration);
    }
    sort_clips(clips);

    let shrunk = project
        .duration
        .saturating_sub(removed.duration)
        .max(MIN_PROJECT_FRAMES);
    project.duration = shrunk.max(project.tracks.max_end());
    project.set_playhead(project.playhead);
    tracing::debug!(
        %track,
        clip = clip_id,
        removed = removed.duration,
        duration = project.duration,
        "Ripple delete"
    );
    Some(removed)
}

// ---- Overlay clips ----

/// Add a text clip at the playhead. Returns its id, or `None` when the
/// text track is locked.
pub fn add_text_clip(project: &mut Project) -> Option<String> {
    let clip = Clip::new(
        TrackType::Text,
        "New text",
        project.playhead,
        project.frames(NEW_TEXT_CLIP_SECS),
    )
    .with_text("Enter text")
    .with_visual(Visual::new(AnimationPreset::Fade, "#FFFFFF"));
    let id = clip.id.clone();
    project.upsert_clip(TrackType::Text, clip).then_some(id)
}

/// Replace the text of a text/effect clip. Returns whether it changed.
pub fn set_clip_text(project: &mut Project, track: TrackType, clip_id: &str, text: &str) -> bool {
    let Some(clip) = overlay_clip_mut(project, track, clip_id) else {
        return false;
    };
    if clip.text.as_deref() == Some(text) {
        return false;
    }
    clip.text = Some(text.to_string());
    true
}

/// Record the clip's current static transform as a keyframe at the
/// playhead, replacing any keyframe already there.
pub fn add_keyframe(project: &mut Project, track: TrackType, clip_id: &str) -> bool {
    let frame = project.playhead;
    let Some(clip) = overlay_clip_mut(project, track, clip_id) else {
        return false;
    };
    let visual = clip.visual.get_or_insert_with(Visual::default);
    let keyframe = visual.capture_keyframe(frame);
    if visual.keyframe_at(frame) == Some(&keyframe) {
        return false;
    }
    visual.upsert_keyframe(keyframe);
    true
}

/// Drop the keyframe at the playhead, if any.
pub fn remove_keyframe(project: &mut Project, track: TrackType, clip_id: &str) -> bool {
    let frame = project.playhead;
    let has_keyframe = project
        .get_clip(track, clip_id)
        .and_then(|c| c.visual.as_ref())
        .is_some_and(|v| v.keyframe_at(frame).is_some());
    if !has_keyframe {
        return false;
    }
    overlay_clip_mut(project, track, clip_id)
        .and_then(|c| c.visual.as_mut())
        .is_some_and(|v| v.remove_keyframe(frame))
}

/// A text/effect clip on an unlocked track.
pub(crate) fn overlay_clip_mut<'a>(
    project: &'a mut Project,
    track: TrackType,
    clip_id: &str,
) -> Option<&'a mut Clip> {
    if !track.has_visual() {
        tracing::debug!(%track, clip = clip_id, "Overlay edit ignored on media track");
        return None;
    }
    if project.is_locked(track) {
        tracing::debug!(%track, clip = clip_id, "Overlay edit ignored on locked track");
        return None;
    }
    project.clip_mut(track, clip_id)
}

pub(crate) fn clip_span(clip: &Clip) -> Span {
    Span::new(clip.start, clip.duration)
}
