//! Well module - the settled cells and the rules that consult them
//!
//! The well is a list of unique cells, not a dense grid: pieces merge in
//! as loose coordinates and rows compact by rewriting each survivor.
//! Coordinates: x ranges 0..9 (left to right), y grows downward; y < 0 is
//! the hidden spawn area above the visible grid.

use arrayvec::ArrayVec;

use crate::types::{Cell, Piece, GRID_HEIGHT, GRID_WIDTH};

/// All cells left behind by landed pieces
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Well {
    cells: Vec<Cell>,
}

impl Well {
    /// Create a new empty well
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a well from loose coordinates, skipping duplicates.
    /// Intended for tests, benches and tooling.
    pub fn from_cells<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = (i8, i8)>,
    {
        let mut well = Self::new();
        for (x, y) in coords {
            let cell = Cell::new(x, y);
            if !well.contains(cell) {
                well.cells.push(cell);
            }
        }
        well
    }

    /// The settled cells, in merge order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Check whether a cell is settled
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Check whether shifting one cell by (dx, dy) runs it into a wall or
    /// a settled cell. The floor and the top are NOT checked here; the
    /// vertical bounds belong to `collides`.
    pub fn is_blocked(&self, cell: Cell, dx: i8, dy: i8) -> bool {
        let moved = cell.shifted(dx, dy);
        moved.x < 0 || moved.x >= GRID_WIDTH || self.contains(moved)
    }

    /// The authoritative placement check: true when any cell of the piece
    /// is past the floor, outside a side wall, or on a settled cell.
    pub fn collides(&self, piece: Piece) -> bool {
        piece.iter().any(|&cell| {
            cell.y >= GRID_HEIGHT
                || cell.x < 0
                || cell.x >= GRID_WIDTH
                || self.contains(cell)
        })
    }

    /// A new well with the piece's cells merged in
    pub fn merged(&self, piece: Piece) -> Well {
        let mut cells = self.cells.clone();
        cells.extend_from_slice(&piece);
        Well { cells }
    }

    /// Distinct y values whose settled-cell count spans the grid width,
    /// in discovery order (not sorted).
    ///
    /// Capacity 4 holds because a landing merges four cells and every
    /// earlier landing already cleared its full rows.
    pub fn full_rows(&self) -> ArrayVec<i8, 4> {
        let mut rows = ArrayVec::new();
        for cell in &self.cells {
            if rows.contains(&cell.y) {
                continue;
            }
            let count = self.cells.iter().filter(|c| c.y == cell.y).count();
            if count == GRID_WIDTH as usize {
                rows.push(cell.y);
            }
        }
        rows
    }

    /// A new well with the listed rows removed. Every surviving cell's y
    /// grows by the number of listed rows strictly below it (per-cell
    /// gravity compaction, not one global shift).
    pub fn cleared(&self, rows: &[i8]) -> Well {
        let cells = self
            .cells
            .iter()
            .filter(|cell| !rows.contains(&cell.y))
            .map(|cell| {
                let drop = rows.iter().filter(|&&row| row > cell.y).count() as i8;
                Cell::new(cell.x, cell.y + drop)
            })
            .collect();
        Well { cells }
    }

    /// True when any settled cell sits above the visible grid
    pub fn topped_out(&self) -> bool {
        self.cells.iter().any(|cell| cell.y < 0)
    }
}
