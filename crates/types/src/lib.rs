//! Core types module - shared data structures and constants
//!
//! Everything here is pure data with no external dependencies, so it can be
//! consumed by the engine crate and by out-of-process collaborators (renderer,
//! input adapter, driver loop) without pulling in game logic.

/// Board width in columns (classic layout).
pub const BOARD_WIDTH: u8 = 10;

/// Board height in rows. Row 0 is the topmost visible row.
pub const BOARD_HEIGHT: u8 = 20;

/// Number of rotation states per piece. All pieces define exactly four,
/// including O, which repeats the same matrix at every index.
pub const ROTATION_COUNT: u8 = 4;

/// Default seconds between automatic downward steps at level 1.
pub const BASE_GRAVITY_SECS: f32 = 0.8;

/// Gravity multiplier applied per level above 1.
pub const GRAVITY_DECAY: f32 = 0.9;

/// Gravity never drops below this, no matter the level.
pub const GRAVITY_FLOOR_SECS: f32 = 0.1;

/// Cumulative cleared lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Points awarded per lock, indexed by lines cleared (0-4).
///
/// Flat per clear count, deliberately not level-multiplied.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Tetromino piece kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All seven kinds, in canonical order. One full bag is a permutation of this.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Parse piece kind from string (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "t" => Some(PieceKind::T),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            _ => None,
        }
    }

    /// Convert to lowercase string
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::T => "t",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
        }
    }
}

/// Cell on the board (None = empty, Some = filled with piece kind)
pub type Cell = Option<PieceKind>;
