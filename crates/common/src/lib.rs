//! Pieces every Reelcut crate leans on.
//!
//! [`clock`] fixes the time base: a timeline position is a [`Frame`] count
//! at a [`FrameRate`] of 30 or 60, converted to seconds only at the edges.
//! [`RateController`] paces playback ticks against a monotonic clock.
//!
//! [`config`] reads `config.json` from the user config directory, with
//! editor, caption, motion, and logging sections, and [`logging`] turns
//! the logging section into a `tracing` subscriber.
//!
//! [`error`] holds [`ReelcutError`], raised only where files and JSON are
//! read. Timeline edits clamp instead of failing.

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
