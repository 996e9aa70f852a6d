//! Shapes module - the catalog of falling pieces and their motion
//!
//! Templates live at the spawn columns; spawning only translates them
//! upward. Rotation is a fixed-pivot point rotation with no wall kicks.

use crate::types::{Cell, Piece, ShapeKind};

/// Vertical offset applied to a template when it spawns.
pub const SPAWN_DY: i8 = -2;

/// Template cells for a shape, positioned at the spawn columns.
/// Index 1 of every template is the rotation pivot.
pub fn template(kind: ShapeKind) -> Piece {
    match kind {
        ShapeKind::Square => cells([(4, 0), (5, 0), (4, 1), (5, 1)]),
        ShapeKind::Line => cells([(3, 0), (4, 0), (5, 0), (6, 0)]),
        // Row of three with an elbow on the top-right
        ShapeKind::L => cells([(3, 1), (4, 1), (5, 1), (5, 0)]),
        // Mirror of L: elbow on the top-left
        ShapeKind::ReverseL => cells([(5, 1), (4, 1), (3, 1), (3, 0)]),
        ShapeKind::T => cells([(3, 1), (4, 1), (5, 1), (4, 0)]),
        ShapeKind::Z => cells([(3, 0), (4, 0), (4, 1), (5, 1)]),
        ShapeKind::ReverseZ => cells([(5, 0), (4, 0), (4, 1), (3, 1)]),
    }
}

/// A shape's template translated to the spawn rows above the grid.
pub fn spawn(kind: ShapeKind) -> Piece {
    shifted(template(kind), 0, SPAWN_DY)
}

/// Every cell of a piece translated by (dx, dy).
pub fn shifted(piece: Piece, dx: i8, dy: i8) -> Piece {
    piece.map(|cell| cell.shifted(dx, dy))
}

/// The piece rotated 90 degrees clockwise about its pivot (index 1).
///
/// For pivot `p` and cell `q` the image is
/// `(p.x - (q.y - p.y), p.y + (q.x - p.x))`. All four cells rotate
/// together; callers drop the whole result if it collides.
pub fn rotated_cw(piece: Piece) -> Piece {
    let p = piece[1];
    piece.map(|q| {
        let dx = q.x - p.x;
        let dy = q.y - p.y;
        Cell::new(p.x - dy, p.y + dx)
    })
}

const fn cells(raw: [(i8, i8); 4]) -> Piece {
    [
        Cell::new(raw[0].0, raw[0].1),
        Cell::new(raw[1].0, raw[1].1),
        Cell::new(raw[2].0, raw[2].1),
        Cell::new(raw[3].0, raw[3].1),
    ]
}
