//! Renderer sessions: one board per connected client.

use hexboard_core::{generate_board, Board, BoardConfig, BoardError, BoardSnapshot};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("No board has been generated yet")]
    NoBoard,
}

/// A fully generated board and its snapshot, ready to be installed.
///
/// Building one runs the whole pipeline and touches no session, so it can
/// happen off the async workers.
pub struct PreparedBoard {
    config: BoardConfig,
    board: Board,
    snapshot: BoardSnapshot,
}

impl PreparedBoard {
    pub fn build(config: BoardConfig) -> Result<Self, SessionError> {
        let board = generate_board(&config)?;
        let snapshot = board.snapshot()?;
        Ok(Self {
            config,
            board,
            snapshot,
        })
    }

    pub fn seed(&self) -> u64 {
        self.board.seed()
    }
}

/// A renderer session holding the board it is currently showing.
///
/// Boards are replaced whole: a new board is installed only once it is fully
/// generated, so a failed generation leaves the current one untouched.
pub struct BoardSession {
    pub id: Uuid,
    config: BoardConfig,
    board: Option<Board>,
    generation: u64,
}

impl BoardSession {
    pub fn new(id: Uuid, config: BoardConfig) -> Self {
        Self {
            id,
            config,
            board: None,
            generation: 0,
        }
    }

    /// Settings of the current board, reused by refresh
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// How many boards this session has shown
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Make a prepared board current and return its snapshot
    pub fn install(&mut self, prepared: PreparedBoard) -> BoardSnapshot {
        self.config = prepared.config;
        self.board = Some(prepared.board);
        self.generation += 1;
        prepared.snapshot
    }

    /// Snapshot of the current board
    pub fn snapshot(&self) -> Result<BoardSnapshot, SessionError> {
        let board = self.board.as_ref().ok_or(SessionError::NoBoard)?;
        Ok(board.snapshot()?)
    }
}
