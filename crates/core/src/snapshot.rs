//! Snapshot module - read-only state projection for renderers
//!
//! The engine hands out owned copies, never references into its own state,
//! so a renderer (or any other consumer) can hold a snapshot across frames
//! without aliasing the live game.

use blockfall_types::PieceKind;

use crate::board::Board;
use crate::pieces::Piece;

/// One frame's view of the session. Everything is a copy.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSnapshot {
    pub board: Board,
    /// Active falling piece, if one exists at snapshot time.
    pub active: Option<Piece>,
    /// Preview of the upcoming piece, at spawn position.
    pub next: Piece,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub game_over: bool,
}

impl EngineSnapshot {
    /// Whether the session still accepts input.
    pub fn playable(&self) -> bool {
        !self.game_over
    }

    /// Kind of the active piece, when present. Convenience for HUDs.
    pub fn active_kind(&self) -> Option<PieceKind> {
        self.active.map(|p| p.kind)
    }
}
