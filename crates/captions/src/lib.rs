//! Reelcut Captions
//!
//! Caption cues from narration text to the timeline:
//! - **Generation:** sentence/word chunking and proportional cue timing
//! - **Editing:** drag/trim with snapping, add/remove/shift/align
//! - **Lanes:** first-fit packing of overlapping cues into display lanes
//! - **Preview:** active cue, karaoke word, and typing reveal at a frame
//! - **Styles:** a bounded library of saved caption style snapshots
//! - **Subtitles:** SRT/VTT output

pub mod edit;
pub mod generate;
pub mod lanes;
pub mod preview;
pub mod style;
pub mod subtitles;

pub use edit::*;
pub use generate::*;
pub use lanes::*;
pub use preview::*;
pub use style::*;
pub use subtitles::*;
