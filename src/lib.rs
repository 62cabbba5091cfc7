//! Blockfall (workspace facade crate).
//!
//! This package keeps the `blockfall::{core,types}` public API in one place
//! while the implementation lives in dedicated crates under `crates/`.
//! Renderers, input adapters, and driver loops depend on this facade and
//! interact with the engine exclusively through its operations and
//! [`core::EngineSnapshot`].

pub use blockfall_core as core;
pub use blockfall_types as types;
