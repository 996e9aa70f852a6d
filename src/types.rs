//! Core types shared across the application
//! This module contains pure data types with no external dependencies

/// Grid dimensions
pub const GRID_WIDTH: i8 = 10;
pub const GRID_HEIGHT: i8 = 20;

/// Gravity interval in milliseconds (fixed; `level` does not pace it)
pub const TICK_MS: u64 = 500;

/// Points awarded per cleared row at a landing
pub const ROW_POINTS: u32 = 10;

/// One grid cell in absolute coordinates.
///
/// `x` stays inside `[0, GRID_WIDTH)` for any legal placement. `y` grows
/// downward and may be negative while a freshly spawned piece still hangs
/// above the visible grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i8,
    pub y: i8,
}

impl Cell {
    pub const fn new(x: i8, y: i8) -> Self {
        Self { x, y }
    }

    /// This cell translated by (dx, dy).
    pub const fn shifted(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// A falling piece: four absolute cells. Index 1 is the rotation pivot.
pub type Piece = [Cell; 4];

/// The seven catalog shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Square,
    Line,
    L,
    ReverseL,
    T,
    Z,
    ReverseZ,
}

impl ShapeKind {
    /// Catalog order; the sequence generator indexes into this.
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::Square,
        ShapeKind::Line,
        ShapeKind::L,
        ShapeKind::ReverseL,
        ShapeKind::T,
        ShapeKind::Z,
        ShapeKind::ReverseZ,
    ];

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Square => "square",
            ShapeKind::Line => "line",
            ShapeKind::L => "l",
            ShapeKind::ReverseL => "reverse_l",
            ShapeKind::T => "t",
            ShapeKind::Z => "z",
            ShapeKind::ReverseZ => "reverse_z",
        }
    }
}

/// Events consumed by the state transition function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Tick,
    MoveLeft,
    MoveRight,
    MoveDown,
    Rotate,
    Restart,
}

impl GameEvent {
    /// Convert to string (trace log vocabulary)
    pub fn as_str(&self) -> &'static str {
        match self {
            GameEvent::Tick => "tick",
            GameEvent::MoveLeft => "move_left",
            GameEvent::MoveRight => "move_right",
            GameEvent::MoveDown => "move_down",
            GameEvent::Rotate => "rotate",
            GameEvent::Restart => "restart",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_shifted() {
        let cell = Cell::new(4, -2);
        assert_eq!(cell.shifted(0, 1), Cell::new(4, -1));
        assert_eq!(cell.shifted(-1, 0), Cell::new(3, -2));
        assert_eq!(cell.shifted(1, 0), Cell::new(5, -2));
    }

    #[test]
    fn test_catalog_has_seven_distinct_shapes() {
        for (i, a) in ShapeKind::ALL.iter().enumerate() {
            for b in ShapeKind::ALL.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_shape_names_are_unique() {
        for (i, a) in ShapeKind::ALL.iter().enumerate() {
            for b in ShapeKind::ALL.iter().skip(i + 1) {
                assert_ne!(a.as_str(), b.as_str());
            }
        }
    }

    #[test]
    fn test_event_names() {
        assert_eq!(GameEvent::Tick.as_str(), "tick");
        assert_eq!(GameEvent::MoveLeft.as_str(), "move_left");
        assert_eq!(GameEvent::Restart.as_str(), "restart");
    }
}
