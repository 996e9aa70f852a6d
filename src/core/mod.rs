//! Core module - pure, deterministic game rules
//!
//! Everything here is deterministic and value-typed: the shape catalog,
//! the sequence generator, the well, scoring, and the transition function.
//! It has zero dependencies on UI, timers, or I/O.

pub mod game_state;
pub mod rng;
pub mod scoring;
pub mod shapes;
pub mod well;

// Re-export commonly used types
pub use game_state::GameState;
pub use rng::ShapeRng;
pub use well::Well;
