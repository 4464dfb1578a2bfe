//! Per-connection game sessions.

use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use trivia_core::{BoardSettings, BoardView, CategorySource, ClueAddress, Game, TriviaError};
use uuid::Uuid;

use crate::protocol::ServerMessage;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Could not set up a new board: {0}")]
    Setup(#[source] TriviaError),

    #[error("{0}")]
    Interaction(#[source] TriviaError),
}

/// One browser tab's game.
///
/// Each connection owns its session outright; nothing is shared between
/// connections except the category source.
pub struct GameSession {
    pub id: Uuid,
    game: Game,
    rng: StdRng,
    /// Boards successfully set up on this connection
    pub games_played: u32,
}

impl GameSession {
    pub fn new(id: Uuid, settings: BoardSettings) -> Self {
        Self::with_rng(id, settings, StdRng::from_entropy())
    }

    pub fn with_rng(id: Uuid, settings: BoardSettings, rng: StdRng) -> Self {
        Self {
            id,
            game: Game::new(settings),
            rng,
            games_played: 0,
        }
    }

    pub fn has_board(&self) -> bool {
        self.game.board().is_some()
    }

    /// Set up a fresh board, replacing the current one only on success.
    pub async fn start_new_game<S: CategorySource>(
        &mut self,
        source: &S,
    ) -> Result<BoardView, SessionError> {
        let board = self
            .game
            .restart(source, &mut self.rng)
            .await
            .map_err(SessionError::Setup)?;
        let view = board.view();
        self.games_played += 1;
        Ok(view)
    }

    /// Click a clue. `Ok(None)` means the answer was already showing.
    pub fn reveal(&mut self, category: usize, clue: usize) -> Result<Option<ServerMessage>, SessionError> {
        let addr = ClueAddress::new(category, clue);
        let text = match self.game.interact(addr).map_err(SessionError::Interaction)? {
            Some(text) => text.to_string(),
            None => return Ok(None),
        };
        let state = self
            .game
            .board()
            .and_then(|b| b.clue(addr).ok())
            .map(|c| c.state())
            .unwrap_or_default();

        Ok(Some(ServerMessage::ClueRevealed {
            category,
            clue,
            state,
            text,
        }))
    }

    pub fn board_view(&self) -> Result<BoardView, SessionError> {
        self.game
            .board()
            .map(|b| b.view())
            .ok_or(SessionError::Interaction(TriviaError::NoBoard))
    }
}
