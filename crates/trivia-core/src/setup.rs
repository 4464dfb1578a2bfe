//! Board setup: pick categories, fetch their clues, and assemble a board.
//!
//! Setup is all-or-nothing. [`setup_board`] either returns a complete board
//! or an error, and [`Game::restart`] only swaps in the new board once
//! setup has fully succeeded.

use crate::board::{Board, Category, Clue, ClueAddress};
use crate::error::{Result, TriviaError};
use crate::sampler::sample;
use crate::source::{CategoryDetail, CategoryId, CategorySource, CategorySummary};
use futures_util::future::try_join_all;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// Categories on a board
pub const CATEGORY_COUNT: usize = 6;

/// Clues shown under each category
pub const CLUES_PER_CATEGORY: usize = 5;

/// Candidate categories requested before sampling (the most the API serves)
pub const CATEGORY_POOL_SIZE: usize = 100;

/// How per-category fetches are scheduled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FetchStrategy {
    /// One request at a time, in board order
    #[default]
    Sequential,
    /// All requests in flight together, joined before the board is built
    Concurrent,
}

/// Board shape and fetch behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSettings {
    pub categories: usize,
    pub clues_per_category: usize,
    pub category_pool: usize,
    pub fetch: FetchStrategy,
}

impl Default for BoardSettings {
    fn default() -> Self {
        Self {
            categories: CATEGORY_COUNT,
            clues_per_category: CLUES_PER_CATEGORY,
            category_pool: CATEGORY_POOL_SIZE,
            fetch: FetchStrategy::Sequential,
        }
    }
}

/// Request a pool of categories and pick `settings.categories` distinct ids.
pub async fn select_category_ids<S, R>(
    source: &S,
    settings: &BoardSettings,
    rng: &mut R,
) -> Result<Vec<CategoryId>>
where
    S: CategorySource,
    R: Rng + ?Sized,
{
    let pool = source.list_categories(settings.category_pool).await?;
    sample_category_ids(&pool, settings, rng)
}

/// Pick `settings.categories` distinct ids from an already-fetched listing.
///
/// Repeated ids in the listing count once, so a pool with fewer distinct
/// ids than the board needs is [`TriviaError::InsufficientData`].
pub fn sample_category_ids<R: Rng + ?Sized>(
    pool: &[CategorySummary],
    settings: &BoardSettings,
    rng: &mut R,
) -> Result<Vec<CategoryId>> {
    let mut seen = HashSet::new();
    let ids: Vec<CategoryId> = pool.iter().map(|c| c.id).filter(|id| seen.insert(*id)).collect();
    debug!(pool = ids.len(), wanted = settings.categories, "sampling category ids");
    sample(&ids, settings.categories, rng)
}

/// Turn a fetched category into a board column of `count` hidden clues.
pub fn category_from_detail<R: Rng + ?Sized>(
    detail: CategoryDetail,
    count: usize,
    rng: &mut R,
) -> Result<Category> {
    let clues = sample(&detail.clues, count, rng)?
        .into_iter()
        .map(|record| Clue::new(record.question, record.answer))
        .collect();
    Ok(Category::new(detail.title, clues))
}

/// Build a board from categories the caller already fetched.
///
/// Picks `settings.categories` of them at random when more were supplied,
/// then samples each one's clues. Too few categories, or a category with too
/// few clues, is [`TriviaError::InsufficientData`].
pub fn board_from_details<R: Rng + ?Sized>(
    details: Vec<CategoryDetail>,
    settings: &BoardSettings,
    rng: &mut R,
) -> Result<Board> {
    let categories = sample(&details, settings.categories, rng)?
        .into_iter()
        .map(|detail| category_from_detail(detail, settings.clues_per_category, rng))
        .collect::<Result<Vec<_>>>()?;
    Board::new(categories)
}

/// Fetch one category and sample its clues.
pub async fn load_category<S, R>(
    source: &S,
    id: CategoryId,
    settings: &BoardSettings,
    rng: &mut R,
) -> Result<Category>
where
    S: CategorySource,
    R: Rng + ?Sized,
{
    let detail = source.category(id).await?;
    debug!(id, clues = detail.clues.len(), "loaded category");
    category_from_detail(detail, settings.clues_per_category, rng)
}

/// Build a fresh board from the source.
///
/// Any failed request or short category fails the whole setup; nothing
/// partial is returned.
pub async fn setup_board<S, R>(source: &S, settings: &BoardSettings, rng: &mut R) -> Result<Board>
where
    S: CategorySource,
    R: Rng + ?Sized,
{
    let ids = select_category_ids(source, settings, rng).await?;

    let categories = match settings.fetch {
        FetchStrategy::Sequential => {
            let mut categories = Vec::with_capacity(ids.len());
            for id in ids {
                categories.push(load_category(source, id, settings, rng).await?);
            }
            categories
        }
        FetchStrategy::Concurrent => {
            let details = try_join_all(ids.iter().map(|&id| source.category(id))).await?;
            details
                .into_iter()
                .map(|detail| category_from_detail(detail, settings.clues_per_category, rng))
                .collect::<Result<Vec<_>>>()?
        }
    };

    Board::new(categories)
}

/// One player's game: the current board, if any, and how to build the next.
///
/// The board is owned here rather than held globally; callers keep a `Game`
/// per client and route every interaction through it.
#[derive(Debug, Clone, Default)]
pub struct Game {
    settings: BoardSettings,
    board: Option<Board>,
}

impl Game {
    pub fn new(settings: BoardSettings) -> Self {
        Self {
            settings,
            board: None,
        }
    }

    pub fn settings(&self) -> &BoardSettings {
        &self.settings
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    /// Install an already-built board, discarding the previous one
    pub fn replace_board(&mut self, board: Board) -> &Board {
        self.board.insert(board)
    }

    /// Set up a new board and make it current.
    ///
    /// On failure the previous board (or lack of one) is left in place.
    pub async fn restart<S, R>(&mut self, source: &S, rng: &mut R) -> Result<&Board>
    where
        S: CategorySource,
        R: Rng + ?Sized,
    {
        let board = setup_board(source, &self.settings, rng).await?;
        Ok(self.replace_board(board))
    }

    /// Advance the clue at `addr`; see [`Board::interact`].
    pub fn interact(&mut self, addr: ClueAddress) -> Result<Option<&str>> {
        self.board.as_mut().ok_or(TriviaError::NoBoard)?.interact(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::RevealState;
    use crate::source::ClueRecord;
    use futures::executor::block_on;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::future::{ready, Future};

    /// In-memory source with `pool` categories of `clues` clues each
    struct FixedSource {
        pool: usize,
        clues: usize,
    }

    impl CategorySource for FixedSource {
        fn list_categories(
            &self,
            count: usize,
        ) -> impl Future<Output = Result<Vec<CategorySummary>>> + Send {
            let summaries = (0..self.pool.min(count) as u64)
                .map(|id| CategorySummary {
                    id,
                    title: format!("Category {}", id),
                })
                .collect();
            ready(Ok(summaries))
        }

        fn category(&self, id: CategoryId) -> impl Future<Output = Result<CategoryDetail>> + Send {
            let clues = (0..self.clues)
                .map(|n| ClueRecord::new(format!("Q{}-{}", id, n), format!("A{}-{}", id, n)))
                .collect();
            ready(Ok(CategoryDetail {
                id,
                title: format!("Category {}", id),
                clues,
            }))
        }
    }

    #[test]
    fn test_select_category_ids() {
        let source = FixedSource { pool: 100, clues: 12 };
        let mut rng = StdRng::seed_from_u64(42);

        let ids = block_on(select_category_ids(&source, &BoardSettings::default(), &mut rng)).unwrap();
        assert_eq!(ids.len(), CATEGORY_COUNT);
        let mut unique = ids.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), CATEGORY_COUNT);
        assert!(ids.iter().all(|&id| id < 100));
    }

    #[test]
    fn test_select_category_ids_small_pool() {
        let source = FixedSource { pool: 4, clues: 12 };
        let mut rng = StdRng::seed_from_u64(42);

        let err = block_on(select_category_ids(&source, &BoardSettings::default(), &mut rng)).unwrap_err();
        assert_eq!(
            err,
            TriviaError::InsufficientData {
                required: 6,
                available: 4
            }
        );
    }

    /// Lists every category twice over, as a paged API sometimes does
    struct RepeatingSource {
        distinct: u64,
    }

    impl CategorySource for RepeatingSource {
        fn list_categories(
            &self,
            count: usize,
        ) -> impl Future<Output = Result<Vec<CategorySummary>>> + Send {
            let summaries = (0..count as u64)
                .map(|n| CategorySummary {
                    id: n % self.distinct,
                    title: format!("Category {}", n % self.distinct),
                })
                .collect();
            ready(Ok(summaries))
        }

        fn category(&self, id: CategoryId) -> impl Future<Output = Result<CategoryDetail>> + Send {
            ready(Ok(CategoryDetail {
                id,
                title: format!("Category {}", id),
                clues: vec![ClueRecord::new("q", "a"); 12],
            }))
        }
    }

    #[test]
    fn test_select_category_ids_skips_repeated_ids() {
        let source = RepeatingSource { distinct: 8 };
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut ids =
                block_on(select_category_ids(&source, &BoardSettings::default(), &mut rng)).unwrap();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), CATEGORY_COUNT);
        }
    }

    #[test]
    fn test_select_category_ids_too_few_distinct() {
        let source = RepeatingSource { distinct: 2 };
        let mut rng = StdRng::seed_from_u64(42);

        let err = block_on(select_category_ids(&source, &BoardSettings::default(), &mut rng)).unwrap_err();
        assert_eq!(
            err,
            TriviaError::InsufficientData {
                required: 6,
                available: 2
            }
        );
    }

    #[test]
    fn test_load_category_samples_hidden_clues() {
        let source = FixedSource { pool: 100, clues: 12 };
        let mut rng = StdRng::seed_from_u64(5);

        let category = block_on(load_category(&source, 17, &BoardSettings::default(), &mut rng)).unwrap();
        assert_eq!(category.title(), "Category 17");
        assert_eq!(category.clues().len(), CLUES_PER_CATEGORY);
        assert!(category
            .clues()
            .iter()
            .all(|c| c.state() == RevealState::Hidden && c.question().starts_with("Q17-")));
    }

    #[test]
    fn test_load_category_too_few_clues() {
        let source = FixedSource { pool: 100, clues: 3 };
        let mut rng = StdRng::seed_from_u64(5);

        let err = block_on(load_category(&source, 1, &BoardSettings::default(), &mut rng)).unwrap_err();
        assert_eq!(
            err,
            TriviaError::InsufficientData {
                required: 5,
                available: 3
            }
        );
    }

    #[test]
    fn test_setup_board_both_strategies() {
        let source = FixedSource { pool: 100, clues: 12 };
        for fetch in [FetchStrategy::Sequential, FetchStrategy::Concurrent] {
            let settings = BoardSettings {
                fetch,
                ..BoardSettings::default()
            };
            let mut rng = StdRng::seed_from_u64(9);

            let board = block_on(setup_board(&source, &settings, &mut rng)).unwrap();
            assert_eq!(board.category_count(), CATEGORY_COUNT);
            assert_eq!(board.clues_per_category(), CLUES_PER_CATEGORY);
        }
    }

    fn details(count: u64, clues: usize) -> Vec<CategoryDetail> {
        (0..count)
            .map(|id| CategoryDetail {
                id,
                title: format!("Category {}", id),
                clues: vec![ClueRecord::new("q", "a"); clues],
            })
            .collect()
    }

    #[test]
    fn test_board_from_details_samples_extra_categories() {
        let mut rng = StdRng::seed_from_u64(4);
        let board = board_from_details(details(7, 12), &BoardSettings::default(), &mut rng).unwrap();
        assert_eq!(board.category_count(), CATEGORY_COUNT);
        assert_eq!(board.clues_per_category(), CLUES_PER_CATEGORY);
    }

    #[test]
    fn test_board_from_details_too_few() {
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(
            board_from_details(details(5, 12), &BoardSettings::default(), &mut rng),
            Err(TriviaError::InsufficientData {
                required: 6,
                available: 5
            })
        );
        assert_eq!(
            board_from_details(details(6, 4), &BoardSettings::default(), &mut rng),
            Err(TriviaError::InsufficientData {
                required: 5,
                available: 4
            })
        );
    }

    #[test]
    fn test_game_interact_without_board() {
        let mut game = Game::default();
        assert_eq!(game.interact(ClueAddress::new(0, 0)), Err(TriviaError::NoBoard));
    }

    #[test]
    fn test_game_restart_keeps_old_board_on_failure() {
        let mut game = Game::default();
        let mut rng = StdRng::seed_from_u64(1);

        let good = FixedSource { pool: 100, clues: 12 };
        block_on(game.restart(&good, &mut rng)).unwrap();
        game.interact(ClueAddress::new(0, 0)).unwrap();
        let before = game.board().cloned();

        let bad = FixedSource { pool: 100, clues: 2 };
        assert!(block_on(game.restart(&bad, &mut rng)).is_err());
        assert_eq!(game.board().cloned(), before);
    }
}
