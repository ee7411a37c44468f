//! The generated board and the pipeline that builds it.
//!
//! This module contains:
//! - `BoardConfig`: everything a renderer chooses about a board
//! - `generate_board`: layout, adjacency and token dealing in one pass
//! - `Board`: the immutable result, with queries and a JSON-friendly snapshot
//!
//! A board is never edited after generation. Refreshing builds a new one.

use crate::adjacency::{build_adjacency, AdjacencyMap};
use crate::error::Result;
use crate::geometry::{Point, VertexLabel};
use crate::layout::{generate_tiles, validate_layout, IdScheme};
use crate::scoring::{compute_vertex_scores, Intersection, VertexScores};
use crate::tile::{ResourceType, Tile, TileId};
use crate::tokens::{assign_tokens, assign_tokens_separating, TokenSupply};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Board generation settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Center of the middle tile
    pub center: Point,
    /// Tiles along the central column; odd, normally 3 or more
    pub ring_span: u32,
    /// Edge length shared by every tile
    pub side_length: f64,
    /// Fixed seed for reproducible boards; drawn from the OS when absent
    pub seed: Option<u64>,
    /// How tile labels are produced
    pub id_scheme: IdScheme,
    /// Custom token supply; sized to the board when absent
    pub supply: Option<TokenSupply>,
    /// Keep 6s and 8s off adjacent tiles
    pub separate_red_numbers: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            center: Point::new(500.0, 400.0),
            ring_span: 5,
            side_length: 50.0,
            seed: None,
            id_scheme: IdScheme::Letters,
            supply: None,
            separate_red_numbers: false,
        }
    }
}

impl BoardConfig {
    /// Config with a fixed seed
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Check the settings without generating anything
    pub fn validate(&self) -> Result<()> {
        validate_layout(self.center, self.ring_span, self.side_length)?;
        if let Some(supply) = &self.supply {
            supply.validate()?;
        }
        Ok(())
    }
}

/// A fully generated board
#[derive(Debug, Clone)]
pub struct Board {
    config: BoardConfig,
    seed: u64,
    tiles: Vec<Tile>,
    supply: TokenSupply,
    adjacency: AdjacencyMap,
}

/// Generate a complete board from `config`.
///
/// Same config and seed always give the same board. Nothing is returned
/// unless every stage succeeds.
pub fn generate_board(config: &BoardConfig) -> Result<Board> {
    config.validate()?;

    let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);

    let mut tiles = generate_tiles(
        config.center,
        config.ring_span,
        config.side_length,
        config.id_scheme,
    )?;
    let supply = config
        .supply
        .clone()
        .unwrap_or_else(|| TokenSupply::for_tile_count(tiles.len()));

    let adjacency = build_adjacency(&tiles)?;
    if config.separate_red_numbers {
        assign_tokens_separating(&mut tiles, &supply, &adjacency, &mut rng)?;
    } else {
        assign_tokens(&mut tiles, &supply, &mut rng)?;
    }

    debug!(
        ring_span = config.ring_span,
        seed,
        tiles = tiles.len(),
        edges = adjacency.edge_count(),
        "Generated board"
    );

    Ok(Board {
        config: config.clone(),
        seed,
        tiles,
        supply,
        adjacency,
    })
}

impl Board {
    /// Create a board with the default configuration and a random seed
    pub fn standard() -> Result<Self> {
        generate_board(&BoardConfig::default())
    }

    /// Build a brand-new board from the same configuration.
    ///
    /// Without a fixed seed the new board uses a fresh one.
    pub fn refresh(&self) -> Result<Board> {
        generate_board(&self.config)
    }

    // ==================== Query Methods ====================

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// Seed the board was generated with (the configured one, or the drawn one)
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// All tiles in generation order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0).filter(|t| t.id() == id)
    }

    pub fn supply(&self) -> &TokenSupply {
        &self.supply
    }

    pub fn adjacency(&self) -> &AdjacencyMap {
        &self.adjacency
    }

    /// Tiles sharing an edge with `id`
    pub fn neighbors_of(&self, id: TileId) -> impl Iterator<Item = &Tile> + '_ {
        self.adjacency.neighbors(id).filter_map(move |n| self.tile(n))
    }

    /// Count of each terrain on the board
    pub fn resource_counts(&self) -> HashMap<ResourceType, usize> {
        let mut counts = HashMap::new();
        for resource in self.tiles.iter().filter_map(|t| t.resource()) {
            *counts.entry(resource).or_insert(0) += 1;
        }
        counts
    }

    /// Score every three-tile intersection (computed on each call)
    pub fn vertex_scores(&self) -> Result<VertexScores> {
        compute_vertex_scores(&self.tiles, &self.adjacency)
    }

    /// Convert to a JSON-friendly representation with arrays instead of maps.
    ///
    /// JSON cannot key objects by points, so corners and scores are listed.
    pub fn snapshot(&self) -> Result<BoardSnapshot> {
        let scores = self.vertex_scores()?;

        Ok(BoardSnapshot {
            seed: self.seed,
            config: self.config.clone(),
            tiles: self
                .tiles
                .iter()
                .map(|tile| TileJson {
                    id: tile.id(),
                    label: tile.label().to_string(),
                    x: tile.center().x,
                    y: tile.center().y,
                    resource: tile.resource(),
                    number: tile.number(),
                    color: tile.resource().map(|r| r.color().to_string()),
                    vertices: tile
                        .vertices()
                        .iter()
                        .map(|(label, p)| VertexJson {
                            label,
                            x: p.x,
                            y: p.y,
                        })
                        .collect(),
                })
                .collect(),
            adjacency: self
                .adjacency
                .iter()
                .map(|(tile, neighbors)| AdjacencyJson {
                    tile,
                    neighbors: neighbors.iter().copied().collect(),
                })
                .collect(),
            intersections: scores.iter().cloned().collect(),
        })
    }
}

/// JSON-friendly board representation handed to renderers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub seed: u64,
    pub config: BoardConfig,
    pub tiles: Vec<TileJson>,
    pub adjacency: Vec<AdjacencyJson>,
    pub intersections: Vec<Intersection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileJson {
    pub id: TileId,
    pub label: String,
    pub x: f64,
    pub y: f64,
    pub resource: Option<ResourceType>,
    pub number: Option<u8>,
    pub color: Option<String>,
    pub vertices: Vec<VertexJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexJson {
    pub label: VertexLabel,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjacencyJson {
    pub tile: TileId,
    pub neighbors: Vec<TileId>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{BoardError, TokenKind};

    #[test]
    fn test_standard_board_has_19_tiles() {
        let board = Board::standard().unwrap();
        assert_eq!(board.tiles().len(), 19);
    }

    #[test]
    fn test_standard_board_has_one_desert() {
        let board = Board::standard().unwrap();
        let deserts: Vec<_> = board.tiles().iter().filter(|t| t.is_desert()).collect();
        assert_eq!(deserts.len(), 1);
        assert!(deserts[0].number().is_none());
    }

    #[test]
    fn test_standard_board_has_correct_resource_counts() {
        let board = generate_board(&BoardConfig::seeded(11)).unwrap();
        let counts = board.resource_counts();

        assert_eq!(counts[&ResourceType::Forest], 4, "Should have 4 Forest tiles");
        assert_eq!(counts[&ResourceType::Pasture], 4, "Should have 4 Pasture tiles");
        assert_eq!(counts[&ResourceType::Field], 4, "Should have 4 Field tiles");
        assert_eq!(counts[&ResourceType::Hill], 3, "Should have 3 Hill tiles");
        assert_eq!(counts[&ResourceType::Mountain], 3, "Should have 3 Mountain tiles");
        assert_eq!(counts[&ResourceType::Desert], 1, "Should have 1 Desert tile");
    }

    #[test]
    fn test_standard_board_has_correct_number_distribution() {
        let board = generate_board(&BoardConfig::seeded(12)).unwrap();

        let mut number_counts: HashMap<u8, u32> = HashMap::new();
        for tile in board.tiles() {
            if let Some(num) = tile.number() {
                *number_counts.entry(num).or_insert(0) += 1;
            }
        }

        assert_eq!(number_counts.get(&2), Some(&1), "Should have one 2");
        for n in [3, 4, 5, 6, 8, 9, 10, 11] {
            assert_eq!(number_counts.get(&n), Some(&2), "Should have two {}s", n);
        }
        assert_eq!(number_counts.get(&7), None, "Should have no 7s");
        assert_eq!(number_counts.get(&12), Some(&1), "Should have one 12");
    }

    #[test]
    fn test_seed_is_recorded() {
        let board = generate_board(&BoardConfig::seeded(99)).unwrap();
        assert_eq!(board.seed(), 99);

        let random = Board::standard().unwrap();
        let replay = generate_board(&BoardConfig::seeded(random.seed())).unwrap();
        let deal = |b: &Board| {
            b.tiles()
                .iter()
                .map(|t| (t.resource(), t.number()))
                .collect::<Vec<_>>()
        };
        assert_eq!(deal(&random), deal(&replay));
    }

    #[test]
    fn test_refresh_keeps_configuration() {
        let config = BoardConfig {
            ring_span: 3,
            side_length: 20.0,
            ..BoardConfig::default()
        };
        let board = generate_board(&config).unwrap();
        let fresh = board.refresh().unwrap();

        assert_eq!(fresh.config().ring_span, 3);
        assert_eq!(fresh.config().side_length, 20.0);
        assert_eq!(fresh.tiles().len(), 7);
        assert!(fresh.tiles()[1].center().matches(&board.tiles()[1].center()));
    }

    #[test]
    fn test_board_randomization_produces_different_boards() {
        let deal = |b: &Board| {
            b.tiles()
                .iter()
                .map(|t| (t.resource(), t.number()))
                .collect::<Vec<_>>()
        };
        let first = deal(&Board::standard().unwrap());
        let found_different = (0..10).any(|_| deal(&Board::standard().unwrap()) != first);
        assert!(found_different, "Board generation should produce different boards");
    }

    #[test]
    fn test_invalid_config_rejected_before_generation() {
        let config = BoardConfig {
            ring_span: 4,
            ..BoardConfig::default()
        };
        assert!(matches!(
            generate_board(&config),
            Err(BoardError::InvalidConfiguration(_))
        ));

        let config = BoardConfig {
            side_length: 0.0,
            ..BoardConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BoardError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_custom_supply_must_fit() {
        let config = BoardConfig {
            ring_span: 3,
            supply: Some(TokenSupply::standard()),
            seed: Some(1),
            ..BoardConfig::default()
        };
        assert_eq!(
            generate_board(&config).unwrap_err(),
            BoardError::CountMismatch {
                token: TokenKind::Resource,
                supplied: 19,
                required: 7
            }
        );
    }

    #[test]
    fn test_neighbors_of_center() {
        let board = generate_board(&BoardConfig::seeded(5)).unwrap();
        let neighbors: Vec<&Tile> = board.neighbors_of(TileId(0)).collect();
        assert_eq!(neighbors.len(), 6);
        for n in neighbors {
            assert!(board.tile(TileId(0)).unwrap().is_adjacent_to(n));
        }
    }

    #[test]
    fn test_snapshot_shape() {
        let board = generate_board(&BoardConfig::seeded(3)).unwrap();
        let snapshot = board.snapshot().unwrap();

        assert_eq!(snapshot.seed, 3);
        assert_eq!(snapshot.tiles.len(), 19);
        assert!(snapshot.tiles.iter().all(|t| t.vertices.len() == 6));
        assert_eq!(snapshot.adjacency.len(), 19);
        assert_eq!(snapshot.intersections.len(), 24);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json["tiles"][0]["vertices"][0]["label"] == "A");
    }

    #[test]
    fn test_config_json_defaults() {
        let config: BoardConfig = serde_json::from_str(r#"{"ring_span": 3, "seed": 8}"#).unwrap();
        assert_eq!(config.ring_span, 3);
        assert_eq!(config.seed, Some(8));
        assert_eq!(config.side_length, 50.0);
        assert_eq!(config.id_scheme, IdScheme::Letters);
    }
}
