//! What the caption overlay shows at a given frame.

use reelcut_project_model::{span_progress, Cue, Frame};

/// The first cue showing at `frame`, if any.
pub fn active_cue(cues: &[Cue], frame: Frame) -> Option<&Cue> {
    cues.iter().find(|c| c.is_active_at(frame))
}

/// Progress through a cue, clamped to `[0, 1]`.
pub fn cue_progress(cue: &Cue, frame: Frame) -> f64 {
    span_progress(frame, cue.start, cue.duration())
}

/// Index of the word highlighted in karaoke mode.
pub fn karaoke_word_index(cue: &Cue, frame: Frame) -> Option<usize> {
    let words = cue.text.split_whitespace().count();
    if words == 0 {
        return None;
    }
    let idx = (cue_progress(cue, frame) * words as f64).floor() as usize;
    Some(idx.min(words - 1))
}

/// Text revealed so far in typing mode. Always shows at least one character.
pub fn typing_text(cue: &Cue, frame: Frame) -> String {
    let len = cue.text.chars().count();
    let shown = ((len as f64 * cue_progress(cue, frame)).floor() as usize).max(1);
    cue.text.chars().take(shown).collect()
}
