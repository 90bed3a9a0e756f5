//! Caption cues.

use serde::{Deserialize, Serialize};

use crate::timing::Span;
use crate::{new_id, Frame};

/// A timed caption entry. `end > start` holds below the last representable frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub id: String,
    pub start: Frame,
    pub end: Frame,
    pub text: String,
}

impl Cue {
    /// Create a cue, pushing `end` past `start` if needed.
    pub fn new(start: Frame, end: Frame, text: impl Into<String>) -> Self {
        Self {
            id: new_id("cue"),
            start,
            end: end.max(start.saturating_add(1)),
            text: text.into(),
        }
    }

    pub fn duration(&self) -> Frame {
        self.end.saturating_sub(self.start)
    }

    /// Whether the playhead at `frame` shows this cue (both edges inclusive).
    pub fn is_active_at(&self, frame: Frame) -> bool {
        frame >= self.start && frame <= self.end
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.duration())
    }

    pub fn set_span(&mut self, span: Span) {
        self.start = span.start;
        self.end = span.end();
    }
}

/// Stable sort by start frame.
pub fn sort_cues(cues: &mut [Cue]) {
    cues.sort_by_key(|c| c.start);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cue_never_empty() {
        let cue = Cue::new(30, 30, "hello");
        assert_eq!(cue.end, 31);
        assert_eq!(cue.duration(), 1);
    }

    #[test]
    fn test_cue_at_last_frame_does_not_overflow() {
        let cue = Cue::new(Frame::MAX, 0, "tail");
        assert_eq!(cue.end, Frame::MAX);
        assert_eq!(cue.duration(), 0);
    }

    #[test]
    fn test_cue_span_roundtrip() {
        let mut cue = Cue::new(10, 40, "hello");
        assert_eq!(cue.span(), Span::new(10, 30));
        cue.set_span(Span::new(20, 5));
        assert_eq!((cue.start, cue.end), (20, 25));
        assert!(cue.is_active_at(25));
        assert!(!cue.is_active_at(26));
    }

    #[test]
    fn test_sort_cues() {
        let mut cues = vec![Cue::new(50, 60, "b"), Cue::new(0, 10, "a")];
        sort_cues(&mut cues);
        assert_eq!(cues[0].text, "a");
    }
}
