//! Terminal rendering layer.
//!
//! Renders into a plain glyph frame that is flushed to the terminal through
//! crossterm. The frame/view split keeps layout code pure while the renderer
//! owns all terminal I/O.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use fb::{Frame, Glyph, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::TerminalRenderer;
