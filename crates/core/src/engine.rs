//! Engine module - sole authority over board mutation, legality and scoring
//!
//! The engine owns the board, the active and next piece, the 7-bag source and
//! all counters. An external driver polls input, calls the mutating
//! operations, and renders from [`Engine::snapshot`]. Everything is
//! synchronous and deterministic apart from the seeded bag shuffle.
//!
//! Illegal actions are reported through `bool`/`u32` return values, never
//! through errors: `false`/`0` means rejected or not applicable. The only
//! terminal condition is game over, entered when a lock writes above the
//! visible board or a fresh spawn immediately collides.

use blockfall_types::{BASE_GRAVITY_SECS, BOARD_HEIGHT, BOARD_WIDTH, ROTATION_COUNT};

use crate::board::Board;
use crate::bag::SevenBag;
use crate::pieces::{Piece, KICK_OFFSETS};
use crate::scoring::{gravity_interval_secs, level_for_lines, line_clear_points};
use crate::snapshot::EngineSnapshot;

/// What the most recent lock did. Consumed by drivers for cues
/// (line-clear flash, level-up sound) without re-deriving it from counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockOutcome {
    pub lines_cleared: u32,
    pub leveled_up: bool,
    pub topped_out: bool,
}

/// The rules engine for one game session.
#[derive(Debug, Clone)]
pub struct Engine {
    board: Board,
    bag: SevenBag,
    /// Active falling piece. None only transiently inside a lock.
    current: Option<Piece>,
    /// Preview of the next spawn, peeked from the bag without consuming.
    next: Piece,
    score: u32,
    level: u32,
    lines: u32,
    game_over: bool,
    base_gravity: f32,
    last_lock: Option<LockOutcome>,
}

impl Engine {
    /// Create a classic 10x20 engine with the given RNG seed.
    pub fn new(seed: u32) -> Self {
        Self::with_config(BOARD_WIDTH, BOARD_HEIGHT, BASE_GRAVITY_SECS, seed)
    }

    /// Create an engine with explicit board dimensions and base gravity.
    pub fn with_config(columns: u8, rows: u8, base_gravity: f32, seed: u32) -> Self {
        let board = Board::with_size(columns, rows);
        let mut bag = SevenBag::new(seed);
        let current = Piece::spawn(bag.draw(), columns);
        let next = Piece::spawn(bag.peek(), columns);

        let mut engine = Self {
            board,
            bag,
            current: Some(current),
            next,
            score: 0,
            level: 1,
            lines: 0,
            game_over: false,
            base_gravity,
            last_lock: None,
        };
        // A board too small for the spawn box is lost before the first move.
        if engine.collides(&current, None, 0, 0) {
            engine.game_over = true;
        }
        engine
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_piece(&self) -> Option<Piece> {
        self.current
    }

    pub fn next_piece(&self) -> Piece {
        self.next
    }

    /// Collision predicate - the single source of truth for legality.
    ///
    /// True if any cell of the piece, after the hypothetical rotation and
    /// offset, leaves the board horizontally, reaches the bottom, or overlaps
    /// a filled cell. Cells above the board (y < 0) are exempt from the
    /// overlap check but still bounds-checked horizontally. Never mutates.
    pub fn collides(&self, piece: &Piece, rot: Option<u8>, dx: i8, dy: i8) -> bool {
        for (x, y) in piece.cells(rot) {
            let nx = x + dx;
            let ny = y + dy;
            if nx < 0 || nx >= self.board.width() as i8 || ny >= self.board.height() as i8 {
                return true;
            }
            if ny >= 0 && self.board.is_occupied(nx, ny) {
                return true;
            }
        }
        false
    }

    /// Try to move the active piece by (dx, dy).
    /// Returns whether the offset was applied; never partially applies.
    pub fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if self.game_over {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        if self.collides(&piece, None, dx, dy) {
            return false;
        }

        self.current = Some(Piece {
            x: piece.x + dx,
            y: piece.y + dy,
            ..piece
        });
        true
    }

    /// Try to rotate the active piece one step (+1 clockwise, -1 counter-
    /// clockwise), walking the kick offsets in order. The first offset where
    /// the rotated piece fits commits rotation and shift together; if every
    /// kick collides the piece is left untouched.
    pub fn rotate(&mut self, direction: i8) -> bool {
        if self.game_over {
            return false;
        }
        let Some(piece) = self.current else {
            return false;
        };

        let new_rot = (piece.rot as i8 + direction).rem_euclid(ROTATION_COUNT as i8) as u8;

        for &(dx, dy) in KICK_OFFSETS.iter() {
            if !self.collides(&piece, Some(new_rot), dx, dy) {
                self.current = Some(Piece {
                    rot: new_rot,
                    x: piece.x + dx,
                    y: piece.y + dy,
                    ..piece
                });
                return true;
            }
        }
        false
    }

    /// Move the active piece one row down. Returns false once it has landed;
    /// the driver reacts by calling [`Engine::lock_piece`].
    pub fn soft_drop(&mut self) -> bool {
        self.try_move(0, 1)
    }

    /// Drop the active piece to the lowest legal position and lock it.
    /// Returns the number of rows descended.
    pub fn hard_drop(&mut self) -> u32 {
        if self.game_over {
            return 0;
        }
        let Some(piece) = self.current else {
            return 0;
        };

        let mut rows: i8 = 0;
        while !self.collides(&piece, None, 0, rows + 1) {
            rows += 1;
        }

        if rows > 0 {
            self.current = Some(Piece {
                y: piece.y + rows,
                ..piece
            });
        }

        self.lock_piece();
        rows as u32
    }

    /// Merge the active piece into the board, then clear lines, update
    /// scoring, and spawn the replacement.
    ///
    /// Public because the driver loop performs the lock when a gravity-tick
    /// soft drop reports a landing; input adapters must never call this.
    ///
    /// If any piece cell sits above the visible board the lock is a top-out:
    /// the board keeps the cells that did fit, the game ends, and neither
    /// line clear nor spawn runs.
    pub fn lock_piece(&mut self) {
        if self.game_over {
            return;
        }
        let Some(piece) = self.current else {
            return;
        };

        let mut topped_out = false;
        for (x, y) in piece.cells(None) {
            if y < 0 {
                topped_out = true;
                continue;
            }
            self.board.fill(x, y, piece.kind);
        }

        if topped_out {
            self.game_over = true;
            self.last_lock = Some(LockOutcome {
                lines_cleared: 0,
                leveled_up: false,
                topped_out: true,
            });
            return;
        }

        self.current = None;

        let cleared = self.board.clear_full_lines();
        let leveled_up = self.apply_clear(cleared);
        self.last_lock = Some(LockOutcome {
            lines_cleared: cleared as u32,
            leveled_up,
            topped_out: false,
        });

        self.spawn_piece();
    }

    /// Add points for a clear, bump the line counter, recompute the level.
    /// Returns whether the level increased.
    fn apply_clear(&mut self, cleared: usize) -> bool {
        self.score += line_clear_points(cleared);
        self.lines += cleared as u32;

        let previous = self.level;
        self.level = level_for_lines(self.lines);
        self.level > previous
    }

    /// Draw the next piece from the bag and refresh the preview. A spawn
    /// that immediately collides with the stack ends the game; the piece
    /// stays active for rendering but no further input is accepted.
    fn spawn_piece(&mut self) {
        let piece = Piece::spawn(self.bag.draw(), self.board.width());
        if self.collides(&piece, None, 0, 0) {
            self.game_over = true;
        }
        self.current = Some(piece);
        self.next = Piece::spawn(self.bag.peek(), self.board.width());
    }

    /// Take and clear the most recent lock outcome.
    pub fn take_last_lock(&mut self) -> Option<LockOutcome> {
        self.last_lock.take()
    }

    /// Seconds the driver should wait between gravity soft drops at the
    /// current level. Non-increasing as the level rises, floored at 0.1s.
    pub fn gravity_interval(&self) -> f32 {
        gravity_interval_secs(self.base_gravity, self.level)
    }

    /// Restart the session: empty board, reshuffled bag (the RNG stream
    /// continues), zeroed counters, level 1, fresh active and next pieces.
    pub fn reset(&mut self) {
        self.board.clear();
        self.bag.reset();
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.game_over = false;
        self.last_lock = None;
        self.spawn_piece();
    }

    /// Read-only projection for renderers. Everything is an owned copy;
    /// mutating the snapshot cannot corrupt the engine.
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            board: self.board.clone(),
            active: self.current,
            next: self.next,
            score: self.score,
            level: self.level,
            lines: self.lines,
            game_over: self.game_over,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_types::PieceKind;

    /// Deterministically find a seed whose first spawned piece has `kind`.
    fn engine_with_first_piece(kind: PieceKind) -> Engine {
        for seed in 0..1000 {
            let engine = Engine::new(seed);
            if engine.current_piece().map(|p| p.kind) == Some(kind) {
                return engine;
            }
        }
        panic!("no seed in 0..1000 spawns {:?} first", kind);
    }

    #[test]
    fn test_new_engine_steady_state() {
        let engine = Engine::new(12345);
        assert!(!engine.game_over());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.lines(), 0);
        assert!(engine.current_piece().is_some());
        assert_eq!(engine.board().filled_count(), 0);
    }

    #[test]
    fn test_next_preview_matches_following_spawn() {
        let mut engine = Engine::new(12345);
        let preview = engine.next_piece().kind;
        engine.hard_drop();
        assert_eq!(engine.current_piece().map(|p| p.kind), Some(preview));
    }

    #[test]
    fn test_collides_pure() {
        let engine = Engine::new(1);
        let piece = engine.current_piece().expect("active piece");
        let before = engine.snapshot();

        let _ = engine.collides(&piece, Some(2), -3, 5);
        let _ = engine.collides(&piece, None, 0, 50);

        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_collides_walls_and_floor() {
        let engine = Engine::new(1);
        let piece = engine.current_piece().expect("active piece");

        assert!(engine.collides(&piece, None, -10, 0)); // left wall
        assert!(engine.collides(&piece, None, 10, 0)); // right wall
        assert!(engine.collides(&piece, None, 0, 40)); // floor
        assert!(!engine.collides(&piece, None, 0, 0)); // spawn is free
    }

    #[test]
    fn test_cells_above_board_ignore_stack_but_not_walls() {
        let mut engine = Engine::new(1);
        // Fill the two top rows; the spawn box lives at y < 0 above them.
        for x in 0..10 {
            engine.board.set(x, 0, Some(PieceKind::Z));
            engine.board.set(x, 1, Some(PieceKind::Z));
        }
        let piece = engine.current_piece().expect("active piece");
        // The I piece at spawn occupies only y = -1: no overlap reported.
        if piece.kind == PieceKind::I {
            assert!(!engine.collides(&piece, None, 0, 0));
        }
        // Horizontal bounds still apply above the board.
        assert!(engine.collides(&piece, None, -10, -1));
    }

    #[test]
    fn test_move_failure_leaves_state_untouched() {
        let mut engine = Engine::new(12345);

        // Walk into the left wall.
        while engine.try_move(-1, 0) {}
        let stuck = engine.current_piece();
        let board_before = engine.board().clone();

        assert!(!engine.try_move(-1, 0));
        assert_eq!(engine.current_piece(), stuck);
        assert_eq!(*engine.board(), board_before);
    }

    #[test]
    fn test_rotation_wraps_through_four_states() {
        let mut engine = engine_with_first_piece(PieceKind::T);
        // Drop into open space so every rotation fits without kicks.
        for _ in 0..5 {
            engine.soft_drop();
        }
        let start = engine.current_piece().map(|p| p.rot);

        for _ in 0..4 {
            assert!(engine.rotate(1));
        }
        assert_eq!(engine.current_piece().map(|p| p.rot), start);

        assert!(engine.rotate(-1));
        assert_eq!(engine.current_piece().map(|p| p.rot), Some(3));
    }

    #[test]
    fn test_rotation_failure_leaves_state_untouched() {
        let mut engine = engine_with_first_piece(PieceKind::T);
        // Bury the piece's surroundings so every kick collides: drop to the
        // floor and wall it in on all sides.
        while engine.soft_drop() {}
        let piece = engine.current_piece().expect("active piece");
        for y in 0..engine.board().height() as i8 {
            for x in 0..engine.board().width() as i8 {
                if !piece.cells(None).contains(&(x, y)) {
                    engine.board.set(x, y, Some(PieceKind::Z));
                }
            }
        }

        let before = engine.current_piece();
        if !engine.rotate(1) {
            assert_eq!(engine.current_piece(), before);
        }
    }

    #[test]
    fn test_wall_kick_shifts_piece_off_the_wall() {
        let mut engine = engine_with_first_piece(PieceKind::I);
        // Vertical I against the left wall: rotating back to horizontal
        // cannot fit at (0,0) offset and must kick rightward.
        for _ in 0..6 {
            engine.soft_drop();
        }
        assert!(engine.rotate(1)); // vertical, occupies column x+2
        while engine.try_move(-1, 0) {}
        let x_before = engine.current_piece().map(|p| p.x).expect("active");

        assert!(engine.rotate(1)); // back to horizontal via kick
        let piece = engine.current_piece().expect("active");
        assert!(piece.cells(None).iter().all(|&(x, _)| x >= 0));
        assert!(piece.x > x_before - 3); // still near the wall, just nudged
    }

    #[test]
    fn test_hard_drop_i_piece_lands_on_bottom_row() {
        let mut engine = engine_with_first_piece(PieceKind::I);

        let dropped = engine.hard_drop();

        // Spawn box top-left is (3, -2); the horizontal I rides matrix row 1
        // and comes to rest with its cells on the bottom row.
        assert_eq!(dropped, 20);
        assert_eq!(engine.lines(), 0);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.board().filled_count(), 4);
        for x in 3..=6 {
            assert_eq!(engine.board().get(x, 19), Some(Some(PieceKind::I)));
        }
    }

    #[test]
    fn test_lock_clears_lines_and_scores() {
        let mut engine = engine_with_first_piece(PieceKind::I);
        // Complete the bottom row everywhere the I piece will not land.
        for x in 0..10 {
            if !(3..=6).contains(&x) {
                engine.board.set(x, 19, Some(PieceKind::O));
            }
        }

        engine.hard_drop();

        assert_eq!(engine.lines(), 1);
        assert_eq!(engine.score(), 100);
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.board().filled_count(), 0);

        let outcome = engine.take_last_lock().expect("lock outcome");
        assert_eq!(outcome.lines_cleared, 1);
        assert!(!outcome.leveled_up);
        assert!(!outcome.topped_out);
        assert_eq!(engine.take_last_lock(), None);
    }

    #[test]
    fn test_level_up_reported_once() {
        let mut engine = engine_with_first_piece(PieceKind::I);
        engine.lines = 9;
        // One more cleared line crosses the 10-line boundary.
        for x in 0..10 {
            if !(3..=6).contains(&x) {
                engine.board.set(x, 19, Some(PieceKind::O));
            }
        }

        engine.hard_drop();

        assert_eq!(engine.lines(), 10);
        assert_eq!(engine.level(), 2);
        let outcome = engine.take_last_lock().expect("lock outcome");
        assert!(outcome.leveled_up);
    }

    #[test]
    fn test_top_out_on_lock_ends_game() {
        let mut engine = Engine::new(12345);
        // Fill rows 0-3 completely; the fresh piece sits above them and any
        // lock writes above the visible board.
        for y in 0..4 {
            for x in 0..10 {
                engine.board.set(x, y, Some(PieceKind::J));
            }
        }

        engine.hard_drop();

        assert!(engine.game_over());
        let outcome = engine.take_last_lock().expect("lock outcome");
        assert!(outcome.topped_out);
        assert_eq!(outcome.lines_cleared, 0);

        // Terminal: every mutating operation is a rejected no-op.
        let frozen = engine.snapshot();
        assert!(!engine.try_move(-1, 0));
        assert!(!engine.rotate(1));
        assert!(!engine.soft_drop());
        assert_eq!(engine.hard_drop(), 0);
        engine.lock_piece();
        assert_eq!(engine.snapshot(), frozen);
    }

    #[test]
    fn test_spawn_collision_ends_game() {
        let mut engine = Engine::new(12345);
        // Stack center columns tall enough that pieces lock with cells in
        // bounds but the replacement spawn overlaps at y >= 0.
        let mut locks = 0;
        while !engine.game_over() && locks < 200 {
            engine.hard_drop();
            locks += 1;
        }
        assert!(engine.game_over(), "stacking in place must top out");
        // The colliding spawn stays visible as the active piece.
        assert!(engine.current_piece().is_some());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut engine = Engine::new(12345);
        while !engine.game_over() {
            engine.hard_drop();
        }

        engine.reset();

        assert!(!engine.game_over());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.level(), 1);
        assert_eq!(engine.lines(), 0);
        assert_eq!(engine.board().filled_count(), 0);
        assert!(engine.current_piece().is_some());
        assert_eq!(engine.take_last_lock(), None);

        // Play continues normally after a reset.
        assert!(engine.soft_drop());
    }

    #[test]
    fn test_gravity_follows_level() {
        let mut engine = Engine::new(1);
        assert!((engine.gravity_interval() - 0.8).abs() < 1e-6);
        engine.level = 2;
        assert!((engine.gravity_interval() - 0.72).abs() < 1e-6);
        engine.level = 50;
        assert!((engine.gravity_interval() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_custom_config_dimensions() {
        let engine = Engine::with_config(8, 16, 0.5, 9);
        assert_eq!(engine.board().width(), 8);
        assert_eq!(engine.board().height(), 16);
        assert_eq!(engine.current_piece().map(|p| p.x), Some(2));
        assert!((engine.gravity_interval() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_snapshot_is_detached_copy() {
        let engine = Engine::new(12345);
        let mut snap = engine.snapshot();
        snap.board.set(0, 0, Some(PieceKind::L));
        snap.score = 999;

        assert_eq!(engine.board().filled_count(), 0);
        assert_eq!(engine.score(), 0);
    }
}
