//! Hexboard - a board generator for settlers-style hex games
//!
//! This crate provides the geometric core of board generation, including:
//! - Tile centers for a rings-around-center hex board of any odd span
//! - Tolerance-based vertex matching between tiles
//! - Dealing terrain and number tokens onto the tiles
//! - The tile adjacency graph, derived from geometry alone
//! - Scores for every corner where three tiles meet
//!
//! # Architecture
//!
//! The engine is a pure function of its configuration and seed: it holds no
//! global state and performs no I/O. It can be compiled to:
//! - Native Rust for server-side board hosting
//! - WebAssembly for in-browser renderers
//!
//! # Modules
//!
//! - [`geometry`]: Points, hexagon corners and tolerance matching
//! - [`tile`]: A single tile and pairwise adjacency tests
//! - [`layout`]: Tile centers and labels for a board
//! - [`tokens`]: Resource and number token supplies
//! - [`adjacency`]: The neighbor map
//! - [`scoring`]: Three-tile intersections and their scores
//! - [`board`]: The generation pipeline and the resulting board

pub mod adjacency;
pub mod board;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod scoring;
pub mod tile;
pub mod tokens;
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export commonly used types
pub use adjacency::{build_adjacency, AdjacencyMap};
pub use board::{generate_board, Board, BoardConfig, BoardSnapshot};
pub use error::{BoardError, TokenKind};
pub use geometry::{distance, hexagon_vertices, points_match, HexVertices, Point, VertexLabel, DEFAULT_TOLERANCE};
pub use layout::{expected_tile_count, generate_centers, generate_tiles, IdScheme};
pub use scoring::{compute_vertex_scores, weighted_probability, Intersection, VertexScores};
pub use tile::{ResourceType, Tile, TileId};
pub use tokens::{assign_tokens, assign_tokens_separating, TokenSupply};
