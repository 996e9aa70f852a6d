//! Terminal falling-block puzzle.
//!
//! The deterministic game core lives in [`core`]; [`term`] projects it onto
//! the terminal and the binary in `main.rs` drives the event loop.

pub mod core;
pub mod input;
pub mod term;
pub mod trace;
pub mod types;
