//! Reelcut Engine
//!
//! The editing core that sits on top of the project model:
//!
//! - **Edit:** move, trim, split, and ripple delete with boundary snapping
//! - **History:** bounded snapshot undo/redo
//! - **Session:** pointer gestures that commit one history entry each
//! - **Animation:** preset overlay animation evaluated per frame
//! - **Motion:** scene camera pan/zoom/focus interpolation
//! - **Segments:** cut-point planners feeding the timeline
//! - **Templates:** declarative track payloads instantiated into clips
//! - **Playback:** frame-stepping transport
//! - **Export:** the job description handed to an external renderer
//!
//! Every operation is synchronous. Invalid requests are no-ops and
//! out-of-range input is clamped; nothing here returns an error for a
//! user edit.

pub mod animation;
pub mod edit;
pub mod editor;
pub mod export;
pub mod history;
pub mod motion;
pub mod playback;
pub mod segment;
pub mod session;
pub mod settings;
pub mod template;

pub use editor::Editor;
pub use history::HistoryManager;
pub use settings::EditorSettings;
