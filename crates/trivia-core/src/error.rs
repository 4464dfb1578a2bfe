//! Errors produced while setting up a board or interacting with it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Everything that can go wrong in the trivia core
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TriviaError {
    /// A request to the category source failed
    #[error("Network failure: {0}")]
    Network(String),

    /// The source returned fewer items than we need to sample
    #[error("Not enough data: needed {required}, got {available}")]
    InsufficientData { required: usize, available: usize },

    /// An interaction addressed a clue outside the current board
    #[error("No clue at category {category}, clue {clue}")]
    InvalidAddress { category: usize, clue: usize },

    /// An interaction arrived before any board was set up
    #[error("No board has been set up yet")]
    NoBoard,
}

pub type Result<T> = std::result::Result<T, TriviaError>;
