//! Pieces module - tetromino shapes and the falling piece
//!
//! Shapes are 4x4 occupancy matrices, four rotation states per kind. The
//! tables are static and shared read-only by every [`Piece`]; a piece only
//! carries its kind, rotation index, and board offset.

use arrayvec::ArrayVec;
use blockfall_types::{PieceKind, ROTATION_COUNT};

/// One rotation state: a 4x4 occupancy matrix, row-major, 1 = filled.
pub type ShapeMatrix = [[u8; 4]; 4];

/// All four rotation states of a piece kind.
pub type ShapeTable = [ShapeMatrix; 4];

static I_SHAPES: ShapeTable = [
    [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0], [0, 0, 1, 0]],
    [[0, 0, 0, 0], [0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0]],
];

// O occupies the same cells at every index; the repeat keeps rotation
// arithmetic uniform across kinds.
static O_SHAPES: ShapeTable = [
    [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
];

static T_SHAPES: ShapeTable = [
    [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

static S_SHAPES: ShapeTable = [
    [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
    [[1, 0, 0, 0], [1, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

static Z_SHAPES: ShapeTable = [
    [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 1, 0], [0, 1, 1, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [1, 1, 0, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
];

static J_SHAPES: ShapeTable = [
    [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 1, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [0, 0, 1, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
];

static L_SHAPES: ShapeTable = [
    [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]],
    [[0, 1, 0, 0], [0, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
    [[0, 0, 0, 0], [1, 1, 1, 0], [1, 0, 0, 0], [0, 0, 0, 0]],
    [[1, 1, 0, 0], [0, 1, 0, 0], [0, 1, 0, 0], [0, 0, 0, 0]],
];

/// Get the shape matrix for a piece kind at a rotation index.
/// The index wraps modulo [`ROTATION_COUNT`].
pub fn shape(kind: PieceKind, rot: u8) -> &'static ShapeMatrix {
    let idx = (rot % ROTATION_COUNT) as usize;
    match kind {
        PieceKind::I => &I_SHAPES[idx],
        PieceKind::O => &O_SHAPES[idx],
        PieceKind::T => &T_SHAPES[idx],
        PieceKind::S => &S_SHAPES[idx],
        PieceKind::Z => &Z_SHAPES[idx],
        PieceKind::J => &J_SHAPES[idx],
        PieceKind::L => &L_SHAPES[idx],
    }
}

/// Kick offsets tried in order when a raw rotation collides.
///
/// Tie-break policy: no shift first, then single-step horizontal, then one
/// step up, then double-step horizontal.
pub const KICK_OFFSETS: [(i8, i8); 6] = [(0, 0), (-1, 0), (1, 0), (0, -1), (-2, 0), (2, 0)];

/// Vertical spawn offset. The 4x4 box starts partially above the visible board.
pub const SPAWN_Y: i8 = -2;

/// The falling piece: immutable shape, mutable position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    /// Rotation index in [0, 4), wrapping via modulo.
    pub rot: u8,
    /// Board x of the 4x4 bounding box top-left corner.
    pub x: i8,
    /// Board y of the 4x4 bounding box top-left corner. Negative at spawn.
    pub y: i8,
}

impl Piece {
    /// Create a new piece horizontally centered at the top of a board with
    /// the given number of columns.
    pub fn spawn(kind: PieceKind, columns: u8) -> Self {
        Self {
            kind,
            rot: 0,
            x: (columns as i8 - 4) / 2,
            y: SPAWN_Y,
        }
    }

    /// Absolute board coordinates of the filled cells at the given rotation
    /// (or the current one when `rot` is None). Always exactly 4 entries for
    /// the standard shape tables.
    pub fn cells(&self, rot: Option<u8>) -> ArrayVec<(i8, i8), 4> {
        let mat = shape(self.kind, rot.unwrap_or(self.rot));
        let mut out = ArrayVec::new();
        for (j, row) in mat.iter().enumerate() {
            for (i, &filled) in row.iter().enumerate() {
                if filled != 0 {
                    out.push((self.x + i as i8, self.y + j as i8));
                }
            }
        }
        out
    }
}
