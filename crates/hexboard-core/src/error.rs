//! Errors surfaced by the board generation pipeline.

use crate::tile::TileId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Which token supply a [`BoardError::CountMismatch`] refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TokenKind {
    /// Resource-type tokens (one per tile)
    Resource,
    /// Number tokens (one per non-desert tile)
    Number,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Resource => write!(f, "resource"),
            TokenKind::Number => write!(f, "number"),
        }
    }
}

/// Errors that can occur while generating a board
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
pub enum BoardError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Ran out of tile labels: {available} available, {required} required")]
    ResourceExhausted { available: usize, required: usize },

    #[error("The {token} supply holds {supplied} tokens but {required} tiles need one")]
    CountMismatch {
        token: TokenKind,
        supplied: usize,
        required: usize,
    },

    #[error("Geometry inconsistency between tiles {first} and {second}: {detail}")]
    GeometryInconsistency {
        first: TileId,
        second: TileId,
        detail: String,
    },
}

pub type Result<T> = std::result::Result<T, BoardError>;
