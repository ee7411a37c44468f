//! WebSocket server and connection handling.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::session::{BoardSession, PreparedBoard};
use dashmap::DashMap;
use futures_util::{SinkExt, StreamExt};
use hexboard_core::BoardConfig;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;
use tokio_tungstenite::{accept_async, tungstenite::Message};
use tracing::{error, info, warn};
use uuid::Uuid;

/// Server state shared across all connections.
pub struct ServerState {
    /// One board session per connected renderer
    pub sessions: DashMap<Uuid, BoardSession>,
    /// Mapping from session ID to its message sender
    pub senders: DashMap<Uuid, mpsc::UnboundedSender<ServerMessage>>,
    /// Settings used for the first board of every session
    pub default_config: BoardConfig,
}

impl ServerState {
    pub fn new(default_config: BoardConfig) -> Self {
        Self {
            sessions: DashMap::new(),
            senders: DashMap::new(),
            default_config,
        }
    }

    /// Send a message to a specific session.
    pub fn send_to(&self, session_id: Uuid, msg: ServerMessage) {
        if let Some(sender) = self.senders.get(&session_id) {
            let _ = sender.send(msg);
        }
    }

    /// Open a session with the default settings and generate its first board.
    pub async fn open_session(&self, session_id: Uuid) -> ServerMessage {
        let config = self.default_config.clone();
        self.sessions
            .insert(session_id, BoardSession::new(session_id, config.clone()));
        self.replace_board(session_id, config).await
    }

    pub fn close_session(&self, session_id: Uuid) {
        self.sessions.remove(&session_id);
        self.senders.remove(&session_id);
    }

    /// Build a board on the blocking pool, then swap it into the session.
    ///
    /// No session lock is held while the board is generated.
    async fn replace_board(&self, session_id: Uuid, config: BoardConfig) -> ServerMessage {
        let built = tokio::task::spawn_blocking(move || PreparedBoard::build(config)).await;
        let prepared = match built {
            Ok(Ok(prepared)) => prepared,
            Ok(Err(e)) => {
                warn!("Board generation failed for {}: {}", session_id, e);
                return ServerMessage::Error {
                    message: e.to_string(),
                };
            }
            Err(e) => {
                error!("Board generation task failed for {}: {}", session_id, e);
                return ServerMessage::Error {
                    message: "Board generation failed".to_string(),
                };
            }
        };

        let seed = prepared.seed();
        match self.sessions.get_mut(&session_id) {
            Some(mut session) => {
                let board = session.install(prepared);
                info!(
                    "Session {} now showing board {} (seed {})",
                    session.id,
                    session.generation(),
                    seed
                );
                ServerMessage::Board {
                    generation: session.generation(),
                    board: Box::new(board),
                }
            }
            None => no_session(),
        }
    }

    /// The session's current board, or why there is none
    fn current_board(&self, session_id: Uuid) -> ServerMessage {
        let Some(session) = self.sessions.get(&session_id) else {
            return no_session();
        };
        match session.snapshot() {
            Ok(board) => ServerMessage::Board {
                generation: session.generation(),
                board: Box::new(board),
            },
            Err(e) => ServerMessage::Error {
                message: e.to_string(),
            },
        }
    }
}

impl Default for ServerState {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

/// Run the WebSocket server.
pub async fn run_server(addr: SocketAddr, state: Arc<ServerState>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Board server listening on {}", addr);

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
async fn handle_connection(
    stream: TcpStream,
    addr: SocketAddr,
    state: Arc<ServerState>,
) -> anyhow::Result<()> {
    let ws_stream = accept_async(stream).await?;
    info!("New WebSocket connection from {}", addr);

    let (mut ws_sender, mut ws_receiver) = ws_stream.split();

    let session_id = Uuid::new_v4();

    // Create channel for outgoing messages
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();
    state.senders.insert(session_id, tx);

    let welcome = ServerMessage::Welcome { session_id };
    ws_sender
        .send(Message::Text(serde_json::to_string(&welcome)?))
        .await?;

    // Spawn task to forward messages from channel to WebSocket
    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(text) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
        }
    });

    let first = state.open_session(session_id).await;
    state.send_to(session_id, first);

    while let Some(msg) = ws_receiver.next().await {
        match msg {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => handle_message(session_id, client_msg, &state).await,
                Err(e) => {
                    warn!("Invalid message from {}: {}", session_id, e);
                    state.send_to(
                        session_id,
                        ServerMessage::Error {
                            message: format!("Invalid message: {}", e),
                        },
                    );
                }
            },
            Ok(Message::Close(_)) => {
                info!("Client {} closing connection", session_id);
                break;
            }
            Err(e) => {
                error!("WebSocket error from {}: {}", session_id, e);
                break;
            }
            _ => {}
        }
    }

    state.close_session(session_id);
    send_task.abort();

    info!("Connection closed for {}", session_id);
    Ok(())
}

/// Handle a client message.
pub async fn handle_message(session_id: Uuid, msg: ClientMessage, state: &ServerState) {
    let reply = match msg {
        ClientMessage::Ping => ServerMessage::Pong,

        ClientMessage::GetBoard => state.current_board(session_id),

        ClientMessage::Generate { config } => {
            info!(
                "Session {} generating span {} board",
                session_id, config.ring_span
            );
            state.replace_board(session_id, config).await
        }

        ClientMessage::Refresh => {
            let config = state
                .sessions
                .get(&session_id)
                .map(|session| session.config().clone());
            match config {
                Some(config) => state.replace_board(session_id, config).await,
                None => no_session(),
            }
        }
    };

    state.send_to(session_id, reply);
}

fn no_session() -> ServerMessage {
    ServerMessage::Error {
        message: "Session not found".to_string(),
    }
}
