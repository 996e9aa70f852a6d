//! RNG module - deterministic shape sequence
//!
//! Implements the classic trigonometric hash `fract(sin(n) * 10000)` over
//! an incrementing counter. Statistical quality is poor; what matters here
//! is determinism: one seed, one shape order.

use crate::types::ShapeKind;

/// Seeded trigonometric hash generator.
///
/// Owned value, never global: it lives inside the game state and advances
/// with it, so transitions stay pure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeRng {
    seed: u32,
}

impl ShapeRng {
    /// Create a new generator at the start of a sequence
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Current counter; advances by one per draw
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Next value in [0, 1).
    pub fn next_unit(&mut self) -> f64 {
        let raw = f64::from(self.seed).sin() * 10_000.0;
        self.seed = self.seed.wrapping_add(1);
        // Floor-based fract keeps negative sines inside [0, 1).
        raw - raw.floor()
    }

    /// Next catalog shape
    pub fn next_shape(&mut self) -> ShapeKind {
        let index = (self.next_unit() * ShapeKind::ALL.len() as f64) as usize;
        ShapeKind::ALL[index]
    }
}
