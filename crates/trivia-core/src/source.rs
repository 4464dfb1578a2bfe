//! Where categories and clues come from.
//!
//! The core never talks to the network itself. A [`CategorySource`] hides the
//! remote API; the server crate implements it over HTTP and tests implement
//! it in memory.

use crate::error::Result;
use serde::{Deserialize, Deserializer, Serialize};
use std::future::Future;

/// Identifier the remote source assigns to a category
pub type CategoryId = u64;

/// One entry of the category listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
}

/// A raw question/answer pair as the source returns it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueRecord {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub answer: String,
}

impl ClueRecord {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// A category with its complete clue list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub id: CategoryId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default)]
    pub clues: Vec<ClueRecord>,
}

/// Read-only access to a remote trivia catalogue
pub trait CategorySource {
    /// Fetch a pool of up to `count` categories to sample from
    fn list_categories(
        &self,
        count: usize,
    ) -> impl Future<Output = Result<Vec<CategorySummary>>> + Send;

    /// Fetch one category with all of its clues
    fn category(&self, id: CategoryId) -> impl Future<Output = Result<CategoryDetail>> + Send;
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
