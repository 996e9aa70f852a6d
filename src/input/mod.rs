//! Keyboard input module
//!
//! Translates raw terminal key events into the core's event vocabulary.
//! Quitting is a process concern, not a game event, so it gets its own
//! check instead of a `GameEvent` variant.

pub mod map;

pub use map::{handle_key_event, should_quit};
