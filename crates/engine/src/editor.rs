//! The editing aggregate.
//!
//! [`Editor`] owns the project together with its history, the active
//! pointer gesture, and the playback transport. Every project mutation
//! goes through it, so each user action lands in history at most once.

use reelcut_captions::{
    active_cue, add_cue, align_first_cue_to_playhead, generate_project_cues, pack_lanes,
    remove_cue, set_cue_text, shift_all_cues, CaptionStyleLibrary, CueEditMode, LaneAssignment,
};
use reelcut_common::config::AppConfig;
use reelcut_project_model::{
    Clip, Cue, Frame, FrameRate, Project, TemplatePayload, TimelineScale, TrackType,
};

use crate::animation::{overlays_at, OverlayFrame};
use crate::edit::{self, ClipEditMode, SnapPolicy};
use crate::export::ExportJobDescription;
use crate::history::HistoryManager;
use crate::motion::{compute_scene_motion, SceneMotion};
use crate::playback::Playback;
use crate::segment::{place_segments, Segment};
use crate::session::{CanvasDragMode, EditorSession};
use crate::settings::EditorSettings;
use crate::template::{apply_template, TemplateVars};

/// A project plus everything needed to edit it.
#[derive(Debug, Clone)]
pub struct Editor {
    project: Project,
    history: HistoryManager<Project>,
    session: EditorSession,
    playback: Playback,
    settings: EditorSettings,
}

impl Default for Editor {
    fn default() -> Self {
        let settings = EditorSettings::default();
        Self::new(settings.new_project(), settings)
    }
}

impl Editor {
    pub fn new(project: Project, settings: EditorSettings) -> Self {
        Self {
            history: HistoryManager::new(settings.history_limit()),
            session: EditorSession::new(),
            playback: Playback::new(project.fps),
            project,
            settings,
        }
    }

    /// An editor on a fresh project built from `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let settings = EditorSettings::from_config(config);
        Self::new(settings.new_project(), settings)
    }

    pub fn project(&self) -> &Project {
        &self.project
    }

    pub fn history(&self) -> &HistoryManager<Project> {
        &self.history
    }

    pub fn session(&self) -> &EditorSession {
        &self.session
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    /// Swap in another project, dropping history and any gesture.
    pub fn replace_project(&mut self, project: Project) {
        self.project = project;
        self.history.clear();
        self.session = EditorSession::new();
        self.playback = Playback::new(self.project.fps);
    }

    pub fn into_project(self) -> Project {
        self.project
    }

    fn timeline_scale(&self) -> TimelineScale {
        self.settings.timeline_scale(&self.project)
    }

    fn snap_policy(&self, bypass_snap: bool) -> SnapPolicy {
        SnapPolicy::for_gesture(&self.project, &self.timeline_scale(), bypass_snap)
    }

    /// Run `f` on the project and record one history entry if it changed
    /// anything.
    fn mutate<R>(&mut self, label: &str, f: impl FnOnce(&mut Project) -> R) -> R {
        let before = self.project.clone();
        let out = f(&mut self.project);
        self.history.record(label, before, &self.project);
        out
    }

    // ---- History ----

    pub fn can_undo(&self) -> bool {
        !self.session.is_dragging() && self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        !self.session.is_dragging() && self.history.can_redo()
    }

    /// Step back one entry. Ignored while a gesture is active.
    pub fn undo(&mut self) -> bool {
        if self.session.is_dragging() {
            tracing::debug!("Undo ignored during a drag");
            return false;
        }
        match self.history.undo(self.project.clone()) {
            Some(previous) => {
                self.project = previous;
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        if self.session.is_dragging() {
            tracing::debug!("Redo ignored during a drag");
            return false;
        }
        match self.history.redo(self.project.clone()) {
            Some(next) => {
                self.project = next;
                true
            }
            None => false,
        }
    }

    // ---- Clip edits ----

    pub fn move_clip(&mut self, track: TrackType, clip_id: &str, delta: i64, bypass_snap: bool) -> bool {
        let policy = self.snap_policy(bypass_snap);
        self.mutate("Move clip", |p| edit::move_clip(p, track, clip_id, delta, policy))
    }

    pub fn trim_clip_start(
        &mut self,
        track: TrackType,
        clip_id: &str,
        delta: i64,
        bypass_snap: bool,
    ) -> bool {
        let policy = self.snap_policy(bypass_snap);
        self.mutate("Trim clip", |p| edit::trim_clip_start(p, track, clip_id, delta, policy))
    }

    pub fn trim_clip_end(
        &mut self,
        track: TrackType,
        clip_id: &str,
        delta: i64,
        bypass_snap: bool,
    ) -> bool {
        let policy = self.snap_policy(bypass_snap);
        self.mutate("Trim clip", |p| edit::trim_clip_end(p, track, clip_id, delta, policy))
    }

    /// Split at `at`. Returns the id of the new right half.
    pub fn split_clip(&mut self, track: TrackType, clip_id: &str, at: Frame) -> Option<String> {
        self.mutate("Split clip", |p| edit::split_clip(p, track, clip_id, at))
    }

    pub fn split_at_playhead(&mut self, track: TrackType, clip_id: &str) -> Option<String> {
        self.split_clip(track, clip_id, self.project.playhead)
    }

    /// Delete a clip, rippling when the settings ask for it.
    pub fn delete_clip(&mut self, track: TrackType, clip_id: &str) -> Option<Clip> {
        self.delete_clip_with(track, clip_id, self.settings.ripple_delete)
    }

    pub fn delete_clip_with(&mut self, track: TrackType, clip_id: &str, ripple: bool) -> Option<Clip> {
        let label = if ripple { "Ripple delete" } else { "Delete clip" };
        self.mutate(label, |p| edit::delete_clip(p, track, clip_id, ripple))
    }

    pub fn add_text_clip(&mut self) -> Option<String> {
        self.mutate("Add text", edit::add_text_clip)
    }

    pub fn commit_text_edit(&mut self, track: TrackType, clip_id: &str, text: &str) -> bool {
        self.mutate("Edit text", |p| edit::set_clip_text(p, track, clip_id, text))
    }

    pub fn add_keyframe(&mut self, track: TrackType, clip_id: &str) -> bool {
        self.mutate("Add keyframe", |p| edit::add_keyframe(p, track, clip_id))
    }

    pub fn remove_keyframe(&mut self, track: TrackType, clip_id: &str) -> bool {
        self.mutate("Remove keyframe", |p| edit::remove_keyframe(p, track, clip_id))
    }

    // ---- Tracks and view ----

    pub fn toggle_track_lock(&mut self, track: TrackType) {
        self.mutate("Toggle track lock", |p| p.toggle_locked(track));
    }

    pub fn toggle_track_collapse(&mut self, track: TrackType) {
        self.project.toggle_collapsed(track);
    }

    pub fn set_snap(&mut self, enabled: bool) {
        self.project.snap = enabled;
    }

    pub fn set_playhead(&mut self, frame: Frame) {
        self.project.set_playhead(frame);
    }

    pub fn set_zoom(&mut self, zoom: f64) {
        self.project.set_zoom(zoom);
    }

    /// Change the frame rate. Frame values are kept as they are.
    pub fn set_fps(&mut self, fps: FrameRate) {
        self.mutate("Change frame rate", |p| p.set_fps(fps));
    }

    // ---- Bulk operations ----

    pub fn apply_segments(&mut self, segments: &[Segment]) -> bool {
        self.mutate("Apply segments", |p| place_segments(p, segments))
    }

    /// Returns the number of tracks the template replaced.
    pub fn apply_template(&mut self, payload: &TemplatePayload, name: &str, vars: &TemplateVars) -> usize {
        self.mutate("Apply template", |p| apply_template(p, payload, name, vars))
    }

    /// Replace all cues with ones generated from `narration`. Returns the
    /// number of cues.
    pub fn generate_captions(&mut self, narration: &str) -> usize {
        let options = self.settings.caption_options(&self.project);
        self.mutate("Generate captions", |p| {
            let cues = generate_project_cues(p, narration, options);
            let count = cues.len();
            p.set_cues(cues);
            count
        })
    }

    // ---- Cues ----

    pub fn add_cue(&mut self, text: &str) -> String {
        self.mutate("Add caption", |p| add_cue(p, text))
    }

    pub fn remove_cue(&mut self, cue_id: &str) -> Option<Cue> {
        self.mutate("Remove caption", |p| remove_cue(p, cue_id))
    }

    pub fn set_cue_text(&mut self, cue_id: &str, text: &str) -> bool {
        self.mutate("Edit caption", |p| set_cue_text(p, cue_id, text))
    }

    /// Returns the shift actually applied.
    pub fn shift_cues(&mut self, delta: i64) -> i64 {
        self.mutate("Shift captions", |p| shift_all_cues(p, delta))
    }

    pub fn align_cues_to_playhead(&mut self) -> i64 {
        self.mutate("Align captions", align_first_cue_to_playhead)
    }

    pub fn apply_caption_style(&mut self, library: &CaptionStyleLibrary, style_id: &str) -> bool {
        self.mutate("Apply caption style", |p| library.apply(style_id, p))
    }

    // ---- Gestures ----

    pub fn begin_clip_drag(&mut self, track: TrackType, clip_id: &str, mode: ClipEditMode, pointer_x: f64) -> bool {
        self.session
            .begin_clip_drag(&self.project, track, clip_id, mode, pointer_x)
    }

    pub fn drag_clip(&mut self, pointer_x: f64, bypass_snap: bool) -> bool {
        let scale = self.timeline_scale();
        self.session
            .drag_clip(&mut self.project, pointer_x, &scale, bypass_snap)
    }

    pub fn begin_canvas_drag(
        &mut self,
        track: TrackType,
        clip_id: &str,
        mode: CanvasDragMode,
        pointer: (f64, f64),
    ) -> bool {
        self.session
            .begin_canvas_drag(&self.project, track, clip_id, mode, pointer)
    }

    pub fn drag_canvas(&mut self, pointer: (f64, f64)) -> bool {
        self.session.drag_canvas(&mut self.project, pointer)
    }

    pub fn begin_cue_drag(&mut self, cue_id: &str, mode: CueEditMode, pointer_x: f64) -> bool {
        self.session
            .begin_cue_drag(&self.project, cue_id, mode, pointer_x)
    }

    pub fn drag_cue(&mut self, pointer_x: f64, bypass_snap: bool) -> bool {
        let scale = self.timeline_scale();
        self.session
            .drag_cue(&mut self.project, pointer_x, &scale, bypass_snap)
    }

    /// End the active gesture. Returns whether it was committed to history.
    pub fn pointer_up(&mut self) -> bool {
        self.session.pointer_up(&self.project, &mut self.history)
    }

    pub fn cancel_drag(&mut self) -> bool {
        self.session.cancel(&mut self.project)
    }

    // ---- Playback ----

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn play(&mut self) {
        self.playback.play(&mut self.project);
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    pub fn toggle_playback(&mut self) {
        self.playback.toggle(&mut self.project);
    }

    /// Advance one frame. Returns whether playback continues.
    pub fn tick(&mut self) -> bool {
        self.playback.tick(&mut self.project)
    }

    pub fn poll_playback(&mut self, now_ns: u64) -> bool {
        self.playback.poll(now_ns, &mut self.project)
    }

    // ---- Views ----

    /// Overlays visible at the playhead.
    pub fn overlays(&self) -> Vec<OverlayFrame<'_>> {
        overlays_at(&self.project, self.project.playhead)
    }

    pub fn caption_lanes(&self) -> Vec<LaneAssignment<'_>> {
        pack_lanes(self.project.cues(), self.settings.lane_count())
    }

    pub fn active_caption(&self) -> Option<&Cue> {
        active_cue(self.project.cues(), self.project.playhead)
    }

    /// Camera for a scene using the configured preset.
    pub fn scene_motion(&self, scene_number: u32, progress: f64) -> SceneMotion {
        compute_scene_motion(
            self.settings.motion_preset,
            scene_number,
            progress,
            &self.settings.motion,
        )
    }

    pub fn export_job(&self) -> ExportJobDescription {
        ExportJobDescription::from_project(&self.project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn starter() -> Editor {
        Editor::new(Project::starter(FrameRate::Fps30), EditorSettings::default())
    }

    fn first_id(editor: &Editor, track: TrackType) -> String {
        editor.project().tracks.get(track)[0].id.clone()
    }

    #[test]
    fn test_edit_undo_redo() {
        let mut editor = starter();
        let id = first_id(&editor, TrackType::Video);

        assert!(editor.move_clip(TrackType::Video, &id, 30, true));
        assert_eq!(editor.project().get_clip(TrackType::Video, &id).unwrap().start, 30);
        assert!(editor.can_undo());

        assert!(editor.undo());
        assert_eq!(editor.project().get_clip(TrackType::Video, &id).unwrap().start, 0);
        assert!(editor.redo());
        assert_eq!(editor.project().get_clip(TrackType::Video, &id).unwrap().start, 30);
        assert!(!editor.redo());
    }

    #[test]
    fn test_noop_edits_leave_history_empty() {
        let mut editor = starter();
        let id = first_id(&editor, TrackType::Video);

        assert!(!editor.move_clip(TrackType::Video, &id, 0, true));
        assert!(editor.split_clip(TrackType::Video, &id, 0).is_none());
        assert!(!editor.commit_text_edit(TrackType::Video, &id, "nope"));
        editor.set_playhead(50);
        editor.set_zoom(2.0);
        assert!(!editor.history().can_undo());
    }

    #[test]
    fn test_locked_track_blocks_edits() {
        let mut editor = starter();
        let id = first_id(&editor, TrackType::Audio);
        editor.toggle_track_lock(TrackType::Audio);

        assert!(!editor.move_clip(TrackType::Audio, &id, 10, true));
        assert!(editor.delete_clip(TrackType::Audio, &id).is_none());
        assert!(!editor.begin_clip_drag(TrackType::Audio, &id, ClipEditMode::Move, 0.0));
        assert_eq!(editor.history().undo_len(), 1);
    }

    #[test]
    fn test_undo_ignored_while_dragging() {
        let mut editor = starter();
        let id = first_id(&editor, TrackType::Video);
        editor.move_clip(TrackType::Video, &id, 10, true);

        assert!(editor.begin_clip_drag(TrackType::Video, &id, ClipEditMode::Move, 0.0));
        assert!(!editor.can_undo());
        assert!(!editor.undo());
        editor.drag_clip(140.0, true);
        assert!(editor.pointer_up());
        assert_eq!(editor.history().undo_len(), 2);
        assert!(editor.undo());
        assert_eq!(editor.project().get_clip(TrackType::Video, &id).unwrap().start, 10);
    }

    #[test]
    fn test_split_at_playhead() {
        let mut editor = starter();
        let id = first_id(&editor, TrackType::Video);
        editor.set_playhead(100);
        let right = editor.split_at_playhead(TrackType::Video, &id).unwrap();

        let clips = editor.project().tracks.get(TrackType::Video);
        assert_eq!(clips.len(), 2);
        assert_eq!(clips[1].id, right);
        assert_eq!(clips[0].duration + clips[1].duration, 360);
    }

    #[test]
    fn test_generate_captions_is_one_entry() {
        let mut editor = starter();
        let count = editor.generate_captions("Hello there. This is a short test of captions.");
        assert!(count > 0);
        assert_eq!(editor.project().cues().len(), count);
        assert_eq!(editor.history().undo_label(), Some("Generate captions"));

        let first_start = editor.project().cues()[0].start;
        editor.set_playhead(first_start);
        assert!(editor.active_caption().is_some());
        assert_eq!(editor.caption_lanes().len(), count);
    }

    #[test]
    fn test_playback_does_not_touch_history() {
        let mut editor = starter();
        editor.play();
        for _ in 0..10 {
            editor.tick();
        }
        assert_eq!(editor.project().playhead, 10);
        assert!(!editor.history().can_undo());
    }

    #[test]
    fn test_scene_motion_uses_settings() {
        let editor = starter();
        let a = editor.scene_motion(2, 0.5);
        let b = editor.scene_motion(2, 0.5);
        assert_eq!(a, b);
        assert_eq!(a.preset, editor.settings().motion_preset);
    }

    #[test]
    fn test_replace_project_clears_history() {
        let mut editor = starter();
        editor.add_text_clip();
        assert!(editor.can_undo());
        editor.replace_project(Project::new(FrameRate::Fps60));
        assert!(!editor.can_undo());
        assert_eq!(editor.project().fps, FrameRate::Fps60);
    }
}
