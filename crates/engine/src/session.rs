//! Pointer gestures over the timeline and the canvas.
//!
//! A gesture remembers the pre-drag state of what it edits and recomputes
//! every pointer move from that origin, so rounding never accumulates.
//! The project snapshot taken at the start is committed to history once,
//! on pointer-up, and only if the gesture changed something.

use serde::{Deserialize, Serialize};

use reelcut_captions::{cue_snap, plan_cue_edit, set_cue_span, CueEditMode};
use reelcut_project_model::{clamp_finite, Project, Span, TimelineScale, TrackType};

use crate::edit::{apply_clip_edit, clip_span, overlay_clip_mut, ClipEditMode, SnapPolicy};
use crate::history::HistoryManager;

/// Canvas units moved per pointer pixel.
pub const CANVAS_MOVE_PER_PX: f64 = 0.12;
/// Scale change per horizontal pointer pixel.
pub const CANVAS_SCALE_PER_PX: f64 = 0.01;
/// Degrees of rotation per horizontal pointer pixel.
pub const CANVAS_ROTATE_PER_PX: f64 = 0.5;

/// A clip move or trim in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct ClipDrag {
    pub track: TrackType,
    pub clip_id: String,
    pub mode: ClipEditMode,
    /// Clip span when the drag began.
    pub origin: Span,
    /// Pointer x when the drag began, in timeline pixels.
    pub pointer_x: f64,
}

/// What a canvas drag changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanvasDragMode {
    Move,
    Scale,
    Rotate,
}

/// A transform drag on a text/effect overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasDrag {
    pub track: TrackType,
    pub clip_id: String,
    pub mode: CanvasDragMode,
    pub origin_x: f64,
    pub origin_y: f64,
    pub origin_scale: f64,
    pub origin_rotation: f64,
    /// Pointer position when the drag began, in canvas pixels.
    pub pointer: (f64, f64),
}

/// A caption cue move or trim in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct CueDrag {
    pub cue_id: String,
    pub mode: CueEditMode,
    pub origin: Span,
    pub pointer_x: f64,
}

#[derive(Debug, Clone)]
struct Gesture<D> {
    drag: D,
    before: Project,
}

/// At most one active gesture per editor.
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    clip: Option<Gesture<ClipDrag>>,
    canvas: Option<Gesture<CanvasDrag>>,
    cue: Option<Gesture<CueDrag>>,
}

impl EditorSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.clip.is_some() || self.canvas.is_some() || self.cue.is_some()
    }

    pub fn clip_drag(&self) -> Option<&ClipDrag> {
        self.clip.as_ref().map(|g| &g.drag)
    }

    pub fn canvas_drag(&self) -> Option<&CanvasDrag> {
        self.canvas.as_ref().map(|g| &g.drag)
    }

    pub fn cue_drag(&self) -> Option<&CueDrag> {
        self.cue.as_ref().map(|g| &g.drag)
    }

    // ---- Clip drags ----

    /// Start moving or trimming a clip. Refused while another gesture is
    /// active, on a locked track, or for an unknown clip.
    pub fn begin_clip_drag(
        &mut self,
        project: &Project,
        track: TrackType,
        clip_id: &str,
        mode: ClipEditMode,
        pointer_x: f64,
    ) -> bool {
        if self.is_dragging() || project.is_locked(track) {
            return false;
        }
        let Some(origin) = project.get_clip(track, clip_id).map(clip_span) else {
            return false;
        };
        self.clip = Some(Gesture {
            drag: ClipDrag {
                track,
                clip_id: clip_id.to_string(),
                mode,
                origin,
                pointer_x,
            },
            before: project.clone(),
        });
        true
    }

    /// Follow the pointer. `bypass_snap` is the snap modifier key.
    pub fn drag_clip(
        &self,
        project: &mut Project,
        pointer_x: f64,
        scale: &TimelineScale,
        bypass_snap: bool,
    ) -> bool {
        let Some(Gesture { drag, .. }) = &self.clip else {
            return false;
        };
        let delta = scale.frames_for_px(pointer_x - drag.pointer_x);
        let policy = SnapPolicy::for_gesture(project, scale, bypass_snap);
        apply_clip_edit(
            project,
            drag.track,
            &drag.clip_id,
            drag.origin,
            drag.mode,
            delta,
            policy,
        )
    }

    /// Finish the clip drag. Returns whether a history entry was recorded.
    pub fn end_clip_drag(
        &mut self,
        project: &Project,
        history: &mut HistoryManager<Project>,
    ) -> bool {
        let Some(gesture) = self.clip.take() else {
            return false;
        };
        let label = match gesture.drag.mode {
            ClipEditMode::Move => "Move clip",
            ClipEditMode::TrimStart | ClipEditMode::TrimEnd => "Trim clip",
        };
        history.record(label, gesture.before, project)
    }

    // ---- Canvas drags ----

    /// Start transforming a text/effect overlay.
    pub fn begin_canvas_drag(
        &mut self,
        project: &Project,
        track: TrackType,
        clip_id: &str,
        mode: CanvasDragMode,
        pointer: (f64, f64),
    ) -> bool {
        if self.is_dragging() || !track.has_visual() || project.is_locked(track) {
            return false;
        }
        let Some(visual) = project.get_clip(track, clip_id).and_then(|c| c.visual.as_ref()) else {
            return false;
        };
        self.canvas = Some(Gesture {
            drag: CanvasDrag {
                track,
                clip_id: clip_id.to_string(),
                mode,
                origin_x: visual.x,
                origin_y: visual.y,
                origin_scale: visual.scale,
                origin_rotation: visual.rotation,
                pointer,
            },
            before: project.clone(),
        });
        true
    }

    pub fn drag_canvas(&self, project: &mut Project, pointer: (f64, f64)) -> bool {
        let Some(Gesture { drag, .. }) = &self.canvas else {
            return false;
        };
        let dx = pointer.0 - drag.pointer.0;
        let dy = pointer.1 - drag.pointer.1;
        let Some(visual) =
            overlay_clip_mut(project, drag.track, &drag.clip_id).and_then(|c| c.visual.as_mut())
        else {
            return false;
        };
        let before = (visual.x, visual.y, visual.scale, visual.rotation);
        match drag.mode {
            CanvasDragMode::Move => {
                let x = drag.origin_x + dx * CANVAS_MOVE_PER_PX;
                let y = drag.origin_y + dy * CANVAS_MOVE_PER_PX;
                visual.x = clamp_finite(x, 0.0, 100.0, drag.origin_x);
                visual.y = clamp_finite(y, 0.0, 100.0, drag.origin_y);
            }
            CanvasDragMode::Scale => {
                let scale = drag.origin_scale + dx * CANVAS_SCALE_PER_PX;
                visual.scale = clamp_finite(scale, 0.3, 3.0, drag.origin_scale);
            }
            CanvasDragMode::Rotate => {
                let rotation = drag.origin_rotation + dx * CANVAS_ROTATE_PER_PX;
                visual.rotation = clamp_finite(rotation, -180.0, 180.0, drag.origin_rotation);
            }
        }
        before != (visual.x, visual.y, visual.scale, visual.rotation)
    }

    pub fn end_canvas_drag(
        &mut self,
        project: &Project,
        history: &mut HistoryManager<Project>,
    ) -> bool {
        let Some(gesture) = self.canvas.take() else {
            return false;
        };
        history.record("Transform overlay", gesture.before, project)
    }

    // ---- Cue drags ----

    pub fn begin_cue_drag(
        &mut self,
        project: &Project,
        cue_id: &str,
        mode: CueEditMode,
        pointer_x: f64,
    ) -> bool {
        if self.is_dragging() {
            return false;
        }
        let Some(origin) = project.cues().iter().find(|c| c.id == cue_id).map(|c| c.span())
        else {
            return false;
        };
        self.cue = Some(Gesture {
            drag: CueDrag {
                cue_id: cue_id.to_string(),
                mode,
                origin,
                pointer_x,
            },
            before: project.clone(),
        });
        true
    }

    pub fn drag_cue(
        &self,
        project: &mut Project,
        pointer_x: f64,
        scale: &TimelineScale,
        bypass_snap: bool,
    ) -> bool {
        let Some(Gesture { drag, .. }) = &self.cue else {
            return false;
        };
        let delta = scale.frames_for_px(pointer_x - drag.pointer_x);
        let snap = (project.snap && !bypass_snap)
            .then(|| cue_snap(project, &drag.cue_id, scale.snap_threshold_frames()));
        let span = plan_cue_edit(project, drag.origin, drag.mode, delta, snap.as_ref());
        set_cue_span(project, &drag.cue_id, span)
    }

    pub fn end_cue_drag(
        &mut self,
        project: &Project,
        history: &mut HistoryManager<Project>,
    ) -> bool {
        let Some(gesture) = self.cue.take() else {
            return false;
        };
        history.record("Edit caption timing", gesture.before, project)
    }

    // ---- Any gesture ----

    /// End whichever gesture is active.
    pub fn pointer_up(
        &mut self,
        project: &Project,
        history: &mut HistoryManager<Project>,
    ) -> bool {
        self.end_clip_drag(project, history)
            | self.end_canvas_drag(project, history)
            | self.end_cue_drag(project, history)
    }

    /// Abandon the active gesture and restore the pre-drag project.
    pub fn cancel(&mut self, project: &mut Project) -> bool {
        let before = self
            .clip
            .take()
            .map(|g| g.before)
            .or_else(|| self.canvas.take().map(|g| g.before))
            .or_else(|| self.cue.take().map(|g| g.before));
        match before {
            Some(before) => {
                *project = before;
                true
            }
            None => false,
        }
    }
}
