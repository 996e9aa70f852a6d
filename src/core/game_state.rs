//! Game state module - the immutable state value and its transition function
//!
//! Ties together shapes, the well, the sequence generator and scoring.
//! Every event folds through `apply`, which returns a new state and never
//! mutates the old one; the generator advances inside the returned value.

use crate::core::rng::ShapeRng;
use crate::core::scoring::landing_points;
use crate::core::shapes::{rotated_cw, shifted, spawn};
use crate::core::well::Well;
use crate::types::{GameEvent, Piece, ShapeKind};

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    ended: bool,
    active: Piece,
    well: Well,
    /// Reserved for difficulty scaling; no current rule writes it.
    level: u32,
    score: u32,
    high_score: u32,
    next: ShapeKind,
    rng: ShapeRng,
}

impl GameState {
    /// Create a new game with the given sequence seed.
    ///
    /// The opening piece is always the square; the preview comes from the
    /// first generator draw.
    pub fn new(seed: u32) -> Self {
        Self::fresh(ShapeRng::new(seed), 0)
    }

    fn fresh(mut rng: ShapeRng, high_score: u32) -> Self {
        let next = rng.next_shape();
        Self {
            ended: false,
            active: spawn(ShapeKind::Square),
            well: Well::new(),
            level: 0,
            score: 0,
            high_score,
            next,
            rng,
        }
    }

    pub fn ended(&self) -> bool {
        self.ended
    }

    pub fn active(&self) -> Piece {
        self.active
    }

    pub fn well(&self) -> &Well {
        &self.well
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn next_shape(&self) -> ShapeKind {
        self.next
    }

    /// The transition function: fold one event into this state.
    ///
    /// After game end every event except `Restart` returns the state
    /// unchanged; while running, `Restart` is the no-op instead.
    pub fn apply(&self, event: GameEvent) -> GameState {
        if self.ended {
            return match event {
                GameEvent::Restart => Self::fresh(self.rng, self.high_score),
                _ => self.clone(),
            };
        }
        match event {
            GameEvent::Tick => self.gravity(),
            GameEvent::MoveLeft => self.moved(-1, 0),
            GameEvent::MoveRight => self.moved(1, 0),
            GameEvent::MoveDown => self.moved(0, 1),
            GameEvent::Rotate => self.rotated(),
            GameEvent::Restart => self.clone(),
        }
    }

    /// Directional move. The move is silently dropped when any cell is
    /// blocked by a wall or a settled cell; the blocked check does not see
    /// the floor, so a down move resting on settled cells is dropped while
    /// a down move resting on the floor falls through to a landing.
    fn moved(&self, dx: i8, dy: i8) -> GameState {
        let blocked = self
            .active
            .iter()
            .any(|&cell| self.well.is_blocked(cell, dx, dy));
        if blocked {
            return self.clone();
        }

        let candidate = shifted(self.active, dx, dy);
        if self.well.collides(candidate) {
            return self.landed();
        }
        self.with_active(candidate)
    }

    /// Gravity step: one row down with no blocked-cell precheck. A
    /// colliding candidate means the piece has landed.
    fn gravity(&self) -> GameState {
        let candidate = shifted(self.active, 0, 1);
        if self.well.collides(candidate) {
            return self.landed();
        }
        self.with_active(candidate)
    }

    /// Pivot rotation, applied atomically or not at all. No wall kicks.
    fn rotated(&self) -> GameState {
        let candidate = rotated_cw(self.active);
        if self.well.collides(candidate) {
            return self.clone();
        }
        self.with_active(candidate)
    }

    /// Merge the active piece, clear rows, score, spawn the preview.
    ///
    /// When the merged well still pokes above the grid the game ends
    /// instead: only `ended` and `high_score` change, the merge itself is
    /// not committed. The replacement preview is drawn before that check,
    /// so the generator advances either way.
    fn landed(&self) -> GameState {
        let mut out = self.clone();
        let spawned = spawn(self.next);
        let drawn = out.rng.next_shape();

        // The active piece never overlaps the well here: spawns sit in the
        // empty hidden rows and every later placement was collision checked.
        let merged = self.well.merged(self.active);
        if merged.topped_out() {
            out.ended = true;
            out.high_score = out.high_score.max(out.score);
            return out;
        }

        let rows = merged.full_rows();
        out.active = spawned;
        out.well = merged.cleared(&rows);
        out.score += landing_points(rows.len() as u32);
        out.next = drawn;
        out
    }

    fn with_active(&self, piece: Piece) -> GameState {
        let mut out = self.clone();
        out.active = piece;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::shapes::template;
    use crate::types::{Cell, GRID_HEIGHT, GRID_WIDTH};

    /// A running state with a chosen piece and well; generator pinned.
    fn state_with(active: Piece, well: Well) -> GameState {
        let mut state = GameState::new(0);
        state.active = active;
        state.well = well;
        state
    }

    fn piece_at(cells: [(i8, i8); 4]) -> Piece {
        cells.map(|(x, y)| Cell::new(x, y))
    }

    /// Nine settled cells on a row, leaving `gap_x` open.
    fn row_with_gap(y: i8, gap_x: i8) -> Vec<(i8, i8)> {
        (0..GRID_WIDTH).filter(|&x| x != gap_x).map(|x| (x, y)).collect()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(0);
        assert!(!state.ended());
        assert_eq!(state.active(), spawn(ShapeKind::Square));
        assert!(state.well().is_empty());
        assert_eq!(state.level(), 0);
        assert_eq!(state.score(), 0);
        assert_eq!(state.high_score(), 0);
        // Seed 0: sin(0) == 0, so the first preview is catalog slot 0.
        assert_eq!(state.next_shape(), ShapeKind::Square);
    }

    #[test]
    fn test_tick_moves_the_piece_down_one_row() {
        let state = GameState::new(1);
        let before = state.active();
        let after = state.apply(GameEvent::Tick);

        for (b, a) in before.iter().zip(after.active().iter()) {
            assert_eq!(a.x, b.x);
            assert_eq!(a.y, b.y + 1);
        }
        assert!(after.well().is_empty());
        assert_eq!(after.score(), 0);
    }

    #[test]
    fn test_four_ticks_drop_four_rows() {
        let initial = GameState::new(1);
        let mut state = initial.clone();
        for _ in 0..4 {
            state = state.apply(GameEvent::Tick);
        }

        for (b, a) in initial.active().iter().zip(state.active().iter()) {
            assert_eq!(a.y, b.y + 4);
        }
        assert!(state.well().is_empty());
        assert_eq!(state.score(), 0);
    }

    #[test]
    fn test_move_left_and_right() {
        let state = GameState::new(1);
        let left = state.apply(GameEvent::MoveLeft);
        let right = state.apply(GameEvent::MoveRight);

        for (b, a) in state.active().iter().zip(left.active().iter()) {
            assert_eq!(a.x, b.x - 1);
            assert_eq!(a.y, b.y);
        }
        for (b, a) in state.active().iter().zip(right.active().iter()) {
            assert_eq!(a.x, b.x + 1);
        }
    }

    #[test]
    fn test_move_into_the_wall_is_dropped() {
        let state = state_with(piece_at([(0, 5), (1, 5), (0, 6), (1, 6)]), Well::new());
        assert_eq!(state.apply(GameEvent::MoveLeft), state);

        let state = state_with(piece_at([(8, 5), (9, 5), (8, 6), (9, 6)]), Well::new());
        assert_eq!(state.apply(GameEvent::MoveRight), state);
    }

    #[test]
    fn test_move_into_settled_cells_is_dropped() {
        let well = Well::from_cells([(3, 6)]);
        let state = state_with(piece_at([(4, 5), (5, 5), (4, 6), (5, 6)]), well);
        assert_eq!(state.apply(GameEvent::MoveLeft), state);
    }

    #[test]
    fn test_soft_drop_onto_settled_cells_is_dropped() {
        // The blocked check catches settled cells below, so the down move
        // is absorbed without landing. Only a gravity tick lands here.
        let well = Well::from_cells([(4, 7), (5, 7)]);
        let state = state_with(piece_at([(4, 5), (5, 5), (4, 6), (5, 6)]), well);

        let after = state.apply(GameEvent::MoveDown);
        assert_eq!(after, state);
    }

    #[test]
    fn test_soft_drop_onto_the_floor_lands() {
        // The blocked check ignores the floor, so the same down move one
        // row above the floor reaches the collision check and lands.
        let state = state_with(
            piece_at([(4, 18), (5, 18), (4, 19), (5, 19)]),
            Well::new(),
        );

        let after = state.apply(GameEvent::MoveDown);
        assert_eq!(after.well().len(), 4);
        assert!(after.well().contains(Cell::new(4, 19)));
        assert_eq!(after.active(), spawn(state.next_shape()));
    }

    #[test]
    fn test_tick_onto_settled_cells_lands() {
        // Same well as the dropped soft drop above; gravity has no
        // blocked-cell precheck so it lands instead.
        let well = Well::from_cells([(4, 7), (5, 7)]);
        let state = state_with(piece_at([(4, 5), (5, 5), (4, 6), (5, 6)]), well);

        let after = state.apply(GameEvent::Tick);
        assert_eq!(after.well().len(), 6);
        assert!(after.well().contains(Cell::new(4, 6)));
    }

    #[test]
    fn test_landing_spawns_the_preview_and_redraws_it() {
        let state = state_with(
            piece_at([(4, 18), (5, 18), (4, 19), (5, 19)]),
            Well::new(),
        );
        let preview = state.next_shape();
        let seed_before = state.rng.seed();

        let after = state.apply(GameEvent::Tick);
        assert_eq!(after.active(), spawn(preview));
        assert_eq!(after.rng.seed(), seed_before + 1);
    }

    #[test]
    fn test_landing_clears_a_full_row_and_scores() {
        // Vertical bar in the open column; its bottom cell completes row 19.
        let well = Well::from_cells(row_with_gap(19, 9));
        let state = state_with(
            piece_at([(9, 16), (9, 17), (9, 18), (9, 19)]),
            well,
        );

        let after = state.apply(GameEvent::Tick);
        assert_eq!(after.score(), 10);
        // Row 19 went away; the rest of the bar shifted down one row.
        assert_eq!(after.well().len(), 3);
        assert!(after.well().contains(Cell::new(9, 17)));
        assert!(after.well().contains(Cell::new(9, 18)));
        assert!(after.well().contains(Cell::new(9, 19)));
    }

    #[test]
    fn test_landing_clears_two_rows_and_scores_twenty() {
        let mut coords = row_with_gap(18, 8);
        coords.retain(|&(x, _)| x != 9);
        let mut lower = row_with_gap(19, 8);
        lower.retain(|&(x, _)| x != 9);
        coords.extend(lower);
        let well = Well::from_cells(coords);

        let state = state_with(piece_at([(8, 18), (9, 18), (8, 19), (9, 19)]), well);
        let after = state.apply(GameEvent::Tick);

        assert_eq!(after.score(), 20);
        assert!(after.well().is_empty());
    }

    #[test]
    fn test_score_accumulates_across_landings() {
        let well = Well::from_cells(row_with_gap(19, 9));
        let mut state = state_with(piece_at([(9, 16), (9, 17), (9, 18), (9, 19)]), well);
        state.score = 30;

        let after = state.apply(GameEvent::Tick);
        assert_eq!(after.score(), 40);
    }

    #[test]
    fn test_landing_without_full_rows_scores_nothing() {
        let state = state_with(
            piece_at([(4, 18), (5, 18), (4, 19), (5, 19)]),
            Well::new(),
        );
        let after = state.apply(GameEvent::Tick);
        assert_eq!(after.score(), 0);
        assert_eq!(after.well().len(), 4);
    }

    #[test]
    fn test_game_ends_when_the_merge_stays_above_the_grid() {
        // The spawn rows are still occupied when the piece lands, so the
        // merged well pokes above the grid and the game ends.
        let well = Well::from_cells([(4, 0), (5, 0)]);
        let state = state_with(spawn(ShapeKind::Square), well.clone());

        let after = state.apply(GameEvent::Tick);
        assert!(after.ended());
        // Nothing but the flag and the high score changed.
        assert_eq!(after.active(), state.active());
        assert_eq!(after.well(), &well);
        assert_eq!(after.score(), state.score());
        assert_eq!(after.next_shape(), state.next_shape());
        // The wasted preview draw still advanced the generator.
        assert_eq!(after.rng.seed(), state.rng.seed() + 1);
    }

    #[test]
    fn test_game_end_folds_the_high_score() {
        let well = Well::from_cells([(4, 0), (5, 0)]);
        let mut state = state_with(spawn(ShapeKind::Square), well);
        state.score = 70;
        state.high_score = 40;

        let after = state.apply(GameEvent::Tick);
        assert!(after.ended());
        assert_eq!(after.high_score(), 70);
        assert_eq!(after.score(), 70);
    }

    #[test]
    fn test_game_end_keeps_a_larger_high_score() {
        let well = Well::from_cells([(4, 0), (5, 0)]);
        let mut state = state_with(spawn(ShapeKind::Square), well);
        state.score = 30;
        state.high_score = 90;

        let after = state.apply(GameEvent::Tick);
        assert_eq!(after.high_score(), 90);
    }

    #[test]
    fn test_high_score_is_untouched_while_running() {
        let well = Well::from_cells(row_with_gap(19, 9));
        let mut state = state_with(piece_at([(9, 16), (9, 17), (9, 18), (9, 19)]), well);
        state.high_score = 5;

        let after = state.apply(GameEvent::Tick);
        assert_eq!(after.score(), 10);
        assert_eq!(after.high_score(), 5);
    }

    #[test]
    fn test_events_after_game_end_are_no_ops() {
        let well = Well::from_cells([(4, 0), (5, 0)]);
        let ended = state_with(spawn(ShapeKind::Square), well).apply(GameEvent::Tick);
        assert!(ended.ended());

        for event in [
            GameEvent::Tick,
            GameEvent::MoveLeft,
            GameEvent::MoveRight,
            GameEvent::MoveDown,
            GameEvent::Rotate,
        ] {
            assert_eq!(ended.apply(event), ended);
        }
    }

    #[test]
    fn test_restart_only_after_game_end() {
        let running = GameState::new(3);
        assert_eq!(running.apply(GameEvent::Restart), running);
    }

    #[test]
    fn test_restart_resets_everything_but_the_high_score() {
        let well = Well::from_cells([(4, 0), (5, 0)]);
        let mut state = state_with(spawn(ShapeKind::Square), well);
        state.score = 120;

        let ended = state.apply(GameEvent::Tick);
        assert!(ended.ended());

        let restarted = ended.apply(GameEvent::Restart);
        assert!(!restarted.ended());
        assert_eq!(restarted.score(), 0);
        assert_eq!(restarted.level(), 0);
        assert!(restarted.well().is_empty());
        assert_eq!(restarted.active(), spawn(ShapeKind::Square));
        assert_eq!(restarted.high_score(), 120);
    }

    #[test]
    fn test_restart_continues_the_shape_sequence() {
        // The generator counter survives restarts; only `new` rewinds it.
        let well = Well::from_cells([(4, 0), (5, 0)]);
        let ended = state_with(spawn(ShapeKind::Square), well).apply(GameEvent::Tick);
        let seed_at_end = ended.rng.seed();

        let restarted = ended.apply(GameEvent::Restart);
        assert_eq!(restarted.rng.seed(), seed_at_end + 1);
    }

    #[test]
    fn test_rotation_applies_when_clear() {
        let state = state_with(shifted(template(ShapeKind::T), 0, 5), Well::new());
        let after = state.apply(GameEvent::Rotate);
        assert_eq!(after.active(), rotated_cw(state.active()));
        assert_eq!(after.well(), state.well());
    }

    #[test]
    fn test_rejected_rotation_returns_a_structurally_equal_state() {
        // A vertical bar hugging the left wall: its clockwise image
        // crosses the wall, so the rotation must change nothing at all.
        let state = state_with(
            piece_at([(0, 10), (0, 11), (0, 12), (0, 13)]),
            Well::new(),
        );
        assert!(state.well().collides(rotated_cw(state.active())));
        assert_eq!(state.apply(GameEvent::Rotate), state);
    }

    #[test]
    fn test_rotation_rejected_by_settled_cells() {
        let well = Well::from_cells([(5, 11)]);
        let state = state_with(piece_at([(4, 10), (4, 11), (4, 12), (4, 13)]), well);
        assert_eq!(state.apply(GameEvent::Rotate), state);
    }

    #[test]
    fn test_level_is_never_mutated() {
        let mut state = GameState::new(2);
        for _ in 0..200 {
            state = state.apply(GameEvent::Tick);
            assert_eq!(state.level(), 0);
        }
    }

    #[test]
    fn test_score_is_monotonic_within_a_game() {
        let script = [
            GameEvent::Tick,
            GameEvent::MoveLeft,
            GameEvent::Tick,
            GameEvent::Rotate,
            GameEvent::MoveRight,
            GameEvent::MoveDown,
        ];
        let mut state = GameState::new(9);
        let mut last_score = 0;
        for event in script.iter().cycle().take(600) {
            state = state.apply(*event);
            if state.ended() {
                break;
            }
            assert!(state.score() >= last_score);
            last_score = state.score();
        }
    }

    #[test]
    fn test_active_piece_always_has_four_cells_in_bounds_play() {
        let mut state = GameState::new(5);
        for _ in 0..300 {
            state = state.apply(GameEvent::Tick);
            if state.ended() {
                break;
            }
            let piece = state.active();
            for cell in piece {
                assert!(cell.x >= 0 && cell.x < GRID_WIDTH);
                assert!(cell.y < GRID_HEIGHT);
            }
        }
    }

    #[test]
    fn test_well_cells_stay_unique_over_a_long_run() {
        let script = [
            GameEvent::Tick,
            GameEvent::MoveRight,
            GameEvent::Tick,
            GameEvent::Rotate,
            GameEvent::Tick,
            GameEvent::MoveLeft,
        ];
        let mut state = GameState::new(11);
        for event in script.iter().cycle().take(900) {
            state = state.apply(*event);
            if state.ended() {
                break;
            }
            let cells = state.well().cells();
            for (i, a) in cells.iter().enumerate() {
                for b in cells.iter().skip(i + 1) {
                    assert_ne!(a, b, "duplicate settled cell {:?}", a);
                }
            }
        }
    }
}
