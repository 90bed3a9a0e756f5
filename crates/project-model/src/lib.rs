//! Reelcut Project Model
//!
//! Defines the core data contracts for Reelcut projects:
//! - **Tracks:** Typed lanes (video/audio/text/effect) of frame-bounded clips
//! - **Visuals:** Per-clip overlay transforms, animation presets, keyframes
//! - **Cues:** Timed caption entries, independent of tracks
//! - **Timing:** Spans, snapping, and the clamped move/trim arithmetic shared
//!   by clip and cue editing
//! - **Templates:** Declarative track payloads with placeholder text
//!
//! All clip and cue boundaries are integer frames. Canvas positions are
//! percentages of the output canvas.

pub mod cue;
pub mod easing;
pub mod geometry;
pub mod project;
pub mod template;
pub mod timing;
pub mod track;
pub mod visual;

pub use cue::*;
pub use easing::*;
pub use geometry::*;
pub use project::*;
pub use template::*;
pub use timing::*;
pub use track::*;
pub use visual::*;

pub use reelcut_common::clock::{Frame, FrameRate};

/// Generate a short random identifier with a readable prefix (`video-3f9a…`).
pub fn new_id(prefix: &str) -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &raw[..12])
}
