//! Trivia board engine
//!
//! This crate provides the core logic for a clue-reveal trivia board:
//! - Random sampling without replacement
//! - The board model: categories, clues, and their reveal state
//! - A pluggable category source and the setup routine that builds a board
//!
//! # Architecture
//!
//! The engine is platform-agnostic and runtime-agnostic. It can be compiled to:
//! - Native Rust for the WebSocket game server
//! - WebAssembly for a board driven entirely from the browser
//!
//! # Modules
//!
//! - [`sampler`]: Sampling without replacement
//! - [`board`]: Clues, categories, the board, and the reveal state machine
//! - [`source`]: Remote catalogue types and the [`CategorySource`] trait
//! - [`setup`]: Board setup and the per-player [`Game`]

pub mod board;
pub mod error;
pub mod sampler;
pub mod setup;
pub mod source;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use board::{Board, BoardView, Category, Clue, ClueAddress, ClueView, RevealState, HIDDEN_TEXT};
pub use error::TriviaError;
pub use sampler::sample;
pub use setup::{
    board_from_details, category_from_detail, load_category, sample_category_ids,
    select_category_ids, setup_board, BoardSettings, FetchStrategy, Game, CATEGORY_COUNT,
    CATEGORY_POOL_SIZE, CLUES_PER_CATEGORY,
};
pub use source::{CategoryDetail, CategoryId, CategorySource, CategorySummary, ClueRecord};
