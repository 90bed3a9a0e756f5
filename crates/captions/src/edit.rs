//! Manual cue editing.
//!
//! Cue drags reuse the clip span primitives: the cue list is treated as a
//! single lane whose snap candidates are the other cues' boundaries plus
//! the timeline ends. Cues are never shorter than [`MIN_CUE_MS`].

use serde::{Deserialize, Serialize};

use reelcut_project_model::{
    plan_move, plan_trim_end, plan_trim_start, Cue, EditLimits, Frame, FrameRate, Project, Snap,
    Span,
};

/// Shortest manually edited cue, in milliseconds.
pub const MIN_CUE_MS: u64 = 100;

/// Length of a cue added by hand, in seconds.
pub const NEW_CUE_SECS: f64 = 1.5;

/// Which part of a cue a drag moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CueEditMode {
    Move,
    TrimStart,
    TrimEnd,
}

/// [`MIN_CUE_MS`] in frames, at least one.
pub fn min_cue_frames(fps: FrameRate) -> Frame {
    fps.frames(MIN_CUE_MS as f64 / 1000.0).max(1)
}

/// Bounds for cue edits on this project.
pub fn cue_limits(project: &Project) -> EditLimits {
    EditLimits {
        total: project.duration,
        min_len: min_cue_frames(project.fps),
    }
}

/// Snap candidates for editing `cue_id`.
pub fn cue_snap(project: &Project, cue_id: &str, threshold_frames: f64) -> Snap {
    let siblings = project
        .cues()
        .iter()
        .filter(|c| c.id != cue_id)
        .map(Cue::span);
    Snap::from_siblings(siblings, project.duration, threshold_frames)
}

/// Compute the span a cue drag produces from its pre-drag `origin`.
pub fn plan_cue_edit(
    project: &Project,
    origin: Span,
    mode: CueEditMode,
    delta: i64,
    snap: Option<&Snap>,
) -> Span {
    let limits = cue_limits(project);
    match mode {
        CueEditMode::Move => plan_move(origin, delta, limits, snap),
        CueEditMode::TrimStart => plan_trim_start(origin, delta, limits, snap),
        CueEditMode::TrimEnd => plan_trim_end(origin, delta, limits, snap),
    }
}

/// Write a span into a cue. Returns whether anything changed.
pub fn set_cue_span(project: &mut Project, cue_id: &str, span: Span) -> bool {
    let unchanged = project
        .cues()
        .iter()
        .find(|c| c.id == cue_id)
        .map_or(true, |c| c.span() == span);
    if unchanged {
        return false;
    }
    project.update_cues(|cues| {
        if let Some(cue) = cues.iter_mut().find(|c| c.id == cue_id) {
            cue.set_span(span);
        }
    });
    true
}

/// Append a cue right after the last one. Returns the new cue id.
pub fn add_cue(project: &mut Project, text: impl Into<String>) -> String {
    let min_len = min_cue_frames(project.fps);
    let tail_end = project.cues().last().map_or(0, |c| c.end);
    let start = tail_end.min(project.duration.saturating_sub(min_len));
    let end = (start + project.frames(NEW_CUE_SECS))
        .min(project.duration)
        .max(start + min_len);
    let cue = Cue::new(start, end, text);
    let id = cue.id.clone();
    project.update_cues(|cues| cues.push(cue));
    tracing::debug!(cue = %id, start, end, "Added cue");
    id
}

/// Remove a cue by id.
pub fn remove_cue(project: &mut Project, cue_id: &str) -> Option<Cue> {
    let idx = project.cues().iter().position(|c| c.id == cue_id)?;
    Some(project.update_cues(|cues| cues.remove(idx)))
}

/// Replace a cue's text. Returns whether the text changed.
pub fn set_cue_text(project: &mut Project, cue_id: &str, text: &str) -> bool {
    let current = project.cues().iter().find(|c| c.id == cue_id);
    if current.map_or(true, |c| c.text == text) {
        return false;
    }
    project.update_cues(|cues| {
        if let Some(cue) = cues.iter_mut().find(|c| c.id == cue_id) {
            cue.text = text.to_string();
        }
    });
    true
}

/// Shift every cue by `delta` frames, limited so that no cue leaves the
/// timeline. Returns the shift actually applied.
pub fn shift_all_cues(project: &mut Project, delta: i64) -> i64 {
    let cues = project.cues();
    let (Some(min_start), Some(max_end)) = (
        cues.iter().map(|c| c.start).min(),
        cues.iter().map(|c| c.end).max(),
    ) else {
        return 0;
    };
    let lower = -(min_start as i64);
    let upper = project.duration.saturating_sub(max_end) as i64;
    let allowed = delta.clamp(lower, upper.max(0));
    if allowed == 0 {
        return 0;
    }
    project.update_cues(|cues| {
        for cue in cues.iter_mut() {
            cue.start = (cue.start as i64 + allowed) as Frame;
            cue.end = (cue.end as i64 + allowed) as Frame;
        }
    });
    tracing::debug!(delta, allowed, "Shifted all cues");
    allowed
}

/// Shift all cues so the earliest starts at the playhead.
pub fn align_first_cue_to_playhead(project: &mut Project) -> i64 {
    let Some(first_start) = project.cues().first().map(|c| c.start) else {
        return 0;
    };
    let target = project.playhead.min(project.duration);
    shift_all_cues(project, target as i64 - first_start as i64)
}
