//! Board model and the per-clue reveal state machine.
//!
//! This module contains:
//! - The three-step reveal state (hidden, question shown, answer shown)
//! - Clues, categories, and the board grid
//! - Structured clue addressing
//! - A serializable snapshot of the board for rendering

use crate::error::{Result, TriviaError};
use serde::{Deserialize, Serialize};

/// Text shown for a clue nobody has clicked yet
pub const HIDDEN_TEXT: &str = "?";

/// How much of a clue is currently visible
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RevealState {
    /// Nothing shown yet
    #[default]
    Hidden,
    /// The question is showing
    Question,
    /// The answer is showing; no further changes
    Answer,
}

impl RevealState {
    /// The state an interaction moves to, or `None` once the answer is up.
    pub fn next(self) -> Option<RevealState> {
        match self {
            RevealState::Hidden => Some(RevealState::Question),
            RevealState::Question => Some(RevealState::Answer),
            RevealState::Answer => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == RevealState::Answer
    }
}

/// A question/answer pair with its reveal state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clue {
    question: String,
    answer: String,
    state: RevealState,
}

impl Clue {
    /// Create a hidden clue
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            state: RevealState::Hidden,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Advance the reveal state by one step.
    ///
    /// Returns the text that should now be displayed, or `None` when the
    /// answer is already showing and the interaction changes nothing.
    pub fn interact(&mut self) -> Option<&str> {
        let next = self.state.next()?;
        self.state = next;
        Some(self.display_text())
    }

    /// Text to render for the clue in its current state
    pub fn display_text(&self) -> &str {
        match self.state {
            RevealState::Hidden => HIDDEN_TEXT,
            RevealState::Question => &self.question,
            RevealState::Answer => &self.answer,
        }
    }
}

/// A titled column of clues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    title: String,
    clues: Vec<Clue>,
}

impl Category {
    pub fn new(title: impl Into<String>, clues: Vec<Clue>) -> Self {
        Self {
            title: title.into(),
            clues,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }

    pub fn clue(&self, index: usize) -> Option<&Clue> {
        self.clues.get(index)
    }
}

/// Position of a clue on the board: category column, then clue row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClueAddress {
    pub category: usize,
    pub clue: usize,
}

impl ClueAddress {
    pub const fn new(category: usize, clue: usize) -> Self {
        Self { category, clue }
    }
}

impl From<(usize, usize)> for ClueAddress {
    fn from((category, clue): (usize, usize)) -> Self {
        Self::new(category, clue)
    }
}

/// The full grid for one round
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    categories: Vec<Category>,
}

impl Board {
    /// Build a board from already-sampled categories.
    ///
    /// Every category must hold the same number of clues. A ragged board is
    /// reported as [`TriviaError::InsufficientData`] with the longest column
    /// as `required` and the shortest as `available`.
    pub fn new(categories: Vec<Category>) -> Result<Self> {
        let lengths = categories.iter().map(|c| c.clues.len());
        if let (Some(shortest), Some(longest)) = (lengths.clone().min(), lengths.max()) {
            if shortest != longest {
                return Err(TriviaError::InsufficientData {
                    required: longest,
                    available: shortest,
                });
            }
        }
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Number of categories (columns)
    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Number of clues per category (rows)
    pub fn clues_per_category(&self) -> usize {
        self.categories.first().map_or(0, |c| c.clues.len())
    }

    /// Look up a clue by address
    pub fn clue(&self, addr: ClueAddress) -> Result<&Clue> {
        self.categories
            .get(addr.category)
            .and_then(|c| c.clues.get(addr.clue))
            .ok_or(TriviaError::InvalidAddress {
                category: addr.category,
                clue: addr.clue,
            })
    }

    fn clue_mut(&mut self, addr: ClueAddress) -> Result<&mut Clue> {
        self.categories
            .get_mut(addr.category)
            .and_then(|c| c.clues.get_mut(addr.clue))
            .ok_or(TriviaError::InvalidAddress {
                category: addr.category,
                clue: addr.clue,
            })
    }

    /// Handle a click on the clue at `addr`.
    ///
    /// Returns the newly displayed text, `Ok(None)` when the answer was
    /// already showing, or an error for an address outside the board.
    pub fn interact(&mut self, addr: ClueAddress) -> Result<Option<&str>> {
        Ok(self.clue_mut(addr)?.interact())
    }

    /// Whether every clue on the board has had its answer revealed
    pub fn is_exhausted(&self) -> bool {
        self.categories
            .iter()
            .flat_map(|c| c.clues.iter())
            .all(|clue| clue.state.is_terminal())
    }

    /// Snapshot for rendering. Hidden clues carry no question or answer text.
    pub fn view(&self) -> BoardView {
        BoardView {
            titles: self.categories.iter().map(|c| c.title.clone()).collect(),
            categories: self
                .categories
                .iter()
                .enumerate()
                .map(|(cat_idx, category)| {
                    category
                        .clues
                        .iter()
                        .enumerate()
                        .map(|(clue_idx, clue)| ClueView {
                            address: ClueAddress::new(cat_idx, clue_idx),
                            state: clue.state,
                            text: clue.display_text().to_string(),
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

/// What the renderer needs to know about one cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueView {
    pub address: ClueAddress,
    pub state: RevealState,
    pub text: String,
}

/// Read-only board snapshot: one header per category, one column of cells each
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub titles: Vec<String>,
    /// Indexed `[category][clue]`
    pub categories: Vec<Vec<ClueView>>,
}

impl BoardView {
    /// Cells laid out row by row (clue index), as a table body renders them
    pub fn rows(&self) -> Vec<Vec<&ClueView>> {
        let row_count = self.categories.first().map_or(0, Vec::len);
        (0..row_count)
            .map(|row| {
                self.categories
                    .iter()
                    .filter_map(|column| column.get(row))
                    .collect()
            })
            .collect()
    }
}
