//! WebSocket protocol messages for the trivia board.

use serde::{Deserialize, Serialize};
use trivia_core::{BoardView, RevealState};
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Throw away the current board and set up a new one
    NewGame,

    /// Click on a clue
    Reveal { category: usize, clue: usize },

    /// Ask for the current board again (e.g. after a page redraw)
    GetBoard,

    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Welcome message with the session's ID
    Welcome { session_id: Uuid },

    /// Setup has started; hide the board and show a spinner
    Loading,

    /// A new board is ready to render
    BoardReady { board: BoardView },

    /// A clue changed state
    ClueRevealed {
        category: usize,
        clue: usize,
        state: RevealState,
        text: String,
    },

    /// Setup failed; any previous board is still current
    SetupFailed { message: String },

    /// Error occurred
    Error { message: String },

    /// Pong response
    Pong,
}
