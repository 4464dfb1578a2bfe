//! WebSocket server and connection handling.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::session::GameSession;
use futures_util::{SinkExt, StreamExt};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{debug, error, info, warn};
use trivia_core::{BoardSettings, CategorySource};
use uuid::Uuid;

/// Server state shared across all connections.
pub struct ServerState<S> {
    /// Where every session fetches its categories from
    pub source: S,
    /// Board shape for new sessions
    pub settings: BoardSettings,
    /// Number of open connections
    pub active_sessions: AtomicUsize,
}

impl<S: CategorySource> ServerState<S> {
    pub fn new(source: S, settings: BoardSettings) -> Self {
        Self {
            source,
            settings,
            active_sessions: AtomicUsize::new(0),
        }
    }
}

/// Run the WebSocket server.
pub async fn run_server<S>(addr: SocketAddr, state: Arc<ServerState<S>>) -> anyhow::Result<()>
where
    S: CategorySource + Send + Sync + 'static,
{
    let listener = TcpListener::bind(addr).await?;
    info!("Trivia server listening on {}", addr);

    while let Ok((stream, peer_addr)) = listener.accept().await {
        let state = Arc::clone(&state);
        tokio::spawn(async move {
            if let Err(e) = handle_connection(stream, peer_addr, state).await {
                error!("Connection error from {}: {}", peer_addr, e);
            }
        });
    }

    Ok(())
}

/// Handle a single WebSocket connection.
async fn handle_connection<S>(
    stream: TcpStream,
    addr: SocketAddr,
    state: Arc<ServerState<S>>,
) -> anyhow::Result<()>
where
    S: CategorySource + Send + Sync + 'static,
{
    let ws_stream = accept_async(stream).await?;
    info!("New WebSocket connection from {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let session_id = Uuid::new_v4();
    let mut session = GameSession::new(session_id, state.settings);
    let open = state.active_sessions.fetch_add(1, Ordering::Relaxed) + 1;
    info!(%session_id, open, "session started");

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    // Send welcome message
    let welcome = ServerMessage::Welcome { session_id };
    let msg_text = serde_json::to_string(&welcome)?;
    ws_sender.send(Message::Text(msg_text.into())).await?;

    // Spawn task to forward messages from channel to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(text) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(text.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    // The page starts a round as soon as it loads
    new_game(&mut session, &state.source, &tx).await;

    // Handle incoming messages in order; a restart blocks clicks until it finishes
    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => handle_message(&mut session, client_msg, &state.source, &tx).await,
                Err(_) => warn!("Invalid message from {}: {}", session_id, text),
            },
            Ok(Message::Close(_)) => {
                info!("Client {} closing connection", session_id);
                break;
            }
            Ok(Message::Ping(_)) => {
                let _ = tx.send(ServerMessage::Pong);
            }
            Err(e) => {
                error!("WebSocket error from {}: {}", session_id, e);
                break;
            }
            _ => {}
        }
    }

    drop(tx);
    send_task.abort();
    state.active_sessions.fetch_sub(1, Ordering::Relaxed);

    info!(%session_id, games = session.games_played, "connection closed");
    Ok(())
}

/// Handle a client message.
async fn handle_message<S: CategorySource>(
    session: &mut GameSession,
    msg: ClientMessage,
    source: &S,
    tx: &mpsc::UnboundedSender<ServerMessage>,
) {
    match msg {
        ClientMessage::NewGame => new_game(session, source, tx).await,

        ClientMessage::Reveal { category, clue } => match session.reveal(category, clue) {
            Ok(Some(update)) => {
                let _ = tx.send(update);
            }
            // Answer already showing
            Ok(None) => {}
            Err(e) => {
                warn!(session_id = %session.id, category, clue, "rejected reveal: {}", e);
                let _ = tx.send(ServerMessage::Error {
                    message: e.to_string(),
                });
            }
        },

        ClientMessage::GetBoard => {
            let reply = match session.board_view() {
                Ok(board) => ServerMessage::BoardReady { board },
                Err(e) => ServerMessage::Error {
                    message: e.to_string(),
                },
            };
            let _ = tx.send(reply);
        }

        ClientMessage::Ping => {
            let _ = tx.send(ServerMessage::Pong);
        }
    }
}

/// Tell the client we're loading, then set up and publish a new board.
async fn new_game<S: CategorySource>(
    session: &mut GameSession,
    source: &S,
    tx: &mpsc::UnboundedSender<ServerMessage>,
) {
    let _ = tx.send(ServerMessage::Loading);
    debug!(session_id = %session.id, replacing = session.has_board(), "setting up board");

    match session.start_new_game(source).await {
        Ok(board) => {
            info!(session_id = %session.id, "board ready");
            let _ = tx.send(ServerMessage::BoardReady { board });
        }
        Err(e) => {
            error!(session_id = %session.id, "board setup failed: {}", e);
            let _ = tx.send(ServerMessage::SetupFailed {
                message: e.to_string(),
            });
        }
    }
}
