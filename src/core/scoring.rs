//! Scoring module - pure score calculations
//!
//! One rule: rows pay out at landing, a flat rate per row. The high score
//! folds in at game end only, and `level` never feeds back into scoring.

use crate::types::ROW_POINTS;

/// Points for a landing that cleared `rows` full rows
pub fn landing_points(rows: u32) -> u32 {
    ROW_POINTS * rows
}
