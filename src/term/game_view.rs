//! GameView: projects the core game state onto a terminal frame.
//!
//! Pure layout code, no I/O. Integration tests drive it directly.

use crate::core::shapes::template;
use crate::core::GameState;
use crate::term::fb::{Frame, Glyph, Rgb};
use crate::types::{Cell, ShapeKind, GRID_HEIGHT, GRID_WIDTH};

const MARGIN_X: u16 = 2;
const MARGIN_Y: u16 = 1;

const BORDER: Rgb = Rgb::new(200, 200, 200);
const GRID_DOT: Rgb = Rgb::new(70, 75, 85);
const SETTLED: Rgb = Rgb::new(150, 155, 165);
const ACTIVE: Rgb = Rgb::new(250, 204, 70);
const VALUE: Rgb = Rgb::new(200, 200, 200);
const HELP: Rgb = Rgb::new(130, 130, 130);

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Lays out the well, the side panel and the game over overlay.
pub struct GameView {
    /// Well cell width in terminal columns.
    cell_w: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // Two columns per cell compensates for terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl GameView {
    pub fn new(cell_w: u16) -> Self {
        Self { cell_w }
    }

    /// Render the current game state into a frame.
    pub fn render(&self, state: &GameState, viewport: Viewport) -> Frame {
        let mut frame = Frame::new(viewport.width, viewport.height);

        let well_w = (GRID_WIDTH as u16) * self.cell_w;
        let well_h = GRID_HEIGHT as u16;

        self.draw_well_border(&mut frame, well_w, well_h);
        self.draw_grid_dots(&mut frame);
        self.draw_cells(&mut frame, state.well().cells(), SETTLED, false);
        self.draw_cells(&mut frame, &state.active(), ACTIVE, true);
        self.draw_panel(&mut frame, state, viewport, well_w);

        if state.ended() {
            self.draw_game_over(&mut frame, well_w);
        }

        frame
    }

    fn draw_well_border(&self, frame: &mut Frame, well_w: u16, well_h: u16) {
        let x = MARGIN_X;
        let y = MARGIN_Y;
        let w = well_w + 2;
        let h = well_h + 2;

        frame.put(x, y, Glyph::new('┌', BORDER));
        frame.put(x + w - 1, y, Glyph::new('┐', BORDER));
        frame.put(x, y + h - 1, Glyph::new('└', BORDER));
        frame.put(x + w - 1, y + h - 1, Glyph::new('┘', BORDER));

        for dx in 1..w - 1 {
            frame.put(x + dx, y, Glyph::new('─', BORDER));
            frame.put(x + dx, y + h - 1, Glyph::new('─', BORDER));
        }
        for dy in 1..h - 1 {
            frame.put(x, y + dy, Glyph::new('│', BORDER));
            frame.put(x + w - 1, y + dy, Glyph::new('│', BORDER));
        }
    }

    fn draw_grid_dots(&self, frame: &mut Frame) {
        for y in 0..GRID_HEIGHT as u16 {
            for x in 0..GRID_WIDTH as u16 {
                let px = MARGIN_X + 1 + x * self.cell_w;
                let py = MARGIN_Y + 1 + y;
                frame.put(px, py, Glyph::new('·', GRID_DOT));
            }
        }
    }

    /// Paint grid cells; rows above the visible well are skipped.
    fn draw_cells(&self, frame: &mut Frame, cells: &[Cell], fg: Rgb, bold: bool) {
        for cell in cells {
            if cell.y < 0 || cell.x < 0 {
                continue;
            }
            let px = MARGIN_X + 1 + (cell.x as u16) * self.cell_w;
            let py = MARGIN_Y + 1 + cell.y as u16;
            for dx in 0..self.cell_w {
                let glyph = if bold {
                    Glyph::bold('█', fg)
                } else {
                    Glyph::new('█', fg)
                };
                frame.put(px + dx, py, glyph);
            }
        }
    }

    fn draw_panel(&self, frame: &mut Frame, state: &GameState, viewport: Viewport, well_w: u16) {
        let panel_x = MARGIN_X + well_w + 2 + 4;
        if panel_x.saturating_add(12) > viewport.width {
            return;
        }

        let mut y = MARGIN_Y + 1;
        frame.print_bold(panel_x, y, "SCORE", Rgb::TEXT);
        frame.print(panel_x, y + 1, &state.score().to_string(), VALUE);
        y += 3;

        frame.print_bold(panel_x, y, "HIGH", Rgb::TEXT);
        frame.print(panel_x, y + 1, &state.high_score().to_string(), VALUE);
        y += 3;

        frame.print_bold(panel_x, y, "LEVEL", Rgb::TEXT);
        frame.print(panel_x, y + 1, &state.level().to_string(), VALUE);
        y += 3;

        frame.print_bold(panel_x, y, "NEXT", Rgb::TEXT);
        self.draw_preview(frame, panel_x, y + 1, state.next_shape());
        y += 4;

        frame.print(panel_x, y, "←→  MOVE", HELP);
        frame.print(panel_x, y + 1, " ↓  DROP", HELP);
        frame.print(panel_x, y + 2, " ↑  ROTATE", HELP);
        frame.print(panel_x, y + 3, " Q  QUIT", HELP);
    }

    /// Draw the upcoming shape normalized to the panel origin.
    fn draw_preview(&self, frame: &mut Frame, x: u16, y: u16, kind: ShapeKind) {
        let cells = template(kind);
        let min_x = cells.iter().map(|c| c.x).min().unwrap_or(0);
        let min_y = cells.iter().map(|c| c.y).min().unwrap_or(0);
        let fg = shape_color(kind);

        for cell in &cells {
            let lx = (cell.x - min_x) as u16;
            let ly = (cell.y - min_y) as u16;
            for dx in 0..self.cell_w {
                frame.put(x + lx * self.cell_w + dx, y + ly, Glyph::new('█', fg));
            }
        }
    }

    fn draw_game_over(&self, frame: &mut Frame, well_w: u16) {
        let mid_y = MARGIN_Y + 1 + (GRID_HEIGHT as u16) / 2;
        self.center_on_well(frame, well_w, mid_y - 1, "GAME OVER", true);
        self.center_on_well(frame, well_w, mid_y + 1, "N: NEW GAME", false);
    }

    fn center_on_well(&self, frame: &mut Frame, well_w: u16, y: u16, text: &str, bold: bool) {
        let text_w = text.chars().count() as u16;
        let x = MARGIN_X + 1 + well_w.saturating_sub(text_w) / 2;
        let white = Rgb::new(255, 255, 255);
        if bold {
            frame.print_bold(x, y, text, white);
        } else {
            frame.print(x, y, text, white);
        }
    }
}

fn shape_color(kind: ShapeKind) -> Rgb {
    match kind {
        ShapeKind::Square => Rgb::new(240, 210, 80),
        ShapeKind::Line => Rgb::new(90, 210, 220),
        ShapeKind::L => Rgb::new(240, 160, 70),
        ShapeKind::ReverseL => Rgb::new(100, 140, 230),
        ShapeKind::T => Rgb::new(190, 120, 220),
        ShapeKind::Z => Rgb::new(225, 95, 95),
        ShapeKind::ReverseZ => Rgb::new(110, 210, 120),
    }
}
