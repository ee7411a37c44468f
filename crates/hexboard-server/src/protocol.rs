//! WebSocket protocol messages between renderers and the board server.

use hexboard_core::{BoardConfig, BoardSnapshot};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Messages sent from client to server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ClientMessage {
    /// Generate a new board with the given settings
    Generate { config: BoardConfig },

    /// Discard the current board and generate a new one with the same settings
    Refresh,

    /// Resend the current board
    GetBoard,

    /// Ping for keepalive
    Ping,
}

/// Messages sent from server to client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum ServerMessage {
    /// Welcome message with the assigned session ID
    Welcome { session_id: Uuid },

    /// The session's current board
    Board {
        /// Increments every time the board is replaced
        generation: u64,
        board: Box<BoardSnapshot>,
    },

    /// Error occurred
    Error { message: String },

    /// Pong response
    Pong,
}
