//! Core game logic - pure, deterministic, and testable
//!
//! This crate is the complete rules engine of a falling-block puzzle game.
//! It has **zero dependencies** on UI, audio, or I/O, making it:
//!
//! - **Deterministic**: the seeded bag shuffle is the only nondeterminism,
//!   so the same seed replays the same game
//! - **Testable**: every rule is reachable through the public API
//! - **Portable**: runs in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`board`]: grid storage, row completion, in-place line compaction
//! - [`pieces`]: 4x4 shape tables and the falling [`Piece`](pieces::Piece)
//! - [`bag`]: seedable 7-bag piece source
//! - [`scoring`]: flat line-clear points, level formula, gravity curve
//! - [`engine`]: the [`Engine`](engine::Engine) - collision, movement,
//!   rotation kicks, locking, reset
//! - [`snapshot`]: owned read-only projection for renderers
//!
//! # Game Rules
//!
//! - **7-Bag Randomizer**: each bag is a shuffled permutation of all seven
//!   kinds, so droughts are bounded
//! - **Kick Rotation**: a raw rotation that collides retries a fixed offset
//!   sequence (none, single-step horizontal, one up, double-step horizontal)
//! - **Flat Scoring**: 100/300/500/800 points for 1-4 lines per lock,
//!   independent of level
//! - **Level Gravity**: the drop interval shrinks 10% per level with a
//!   0.1 second floor
//!
//! # Example
//!
//! ```
//! use blockfall_core::Engine;
//!
//! let mut engine = Engine::new(12345);
//! engine.try_move(1, 0);
//! engine.rotate(1);
//! let rows = engine.hard_drop();
//! assert!(rows > 0);
//!
//! let snapshot = engine.snapshot();
//! assert_eq!(snapshot.board.filled_count(), 4);
//! ```
//!
//! # Driving the engine
//!
//! The engine has no internal clock. An external driver owns timing: it
//! calls [`Engine::soft_drop`](engine::Engine::soft_drop) on a timer derived
//! from [`Engine::gravity_interval`](engine::Engine::gravity_interval) and
//! performs [`Engine::lock_piece`](engine::Engine::lock_piece) when the soft
//! drop reports a landing.

pub mod bag;
pub mod board;
pub mod engine;
pub mod pieces;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use bag::{SevenBag, SimpleRng};
pub use board::Board;
pub use engine::{Engine, LockOutcome};
pub use pieces::{shape, Piece, KICK_OFFSETS};
pub use snapshot::EngineSnapshot;
