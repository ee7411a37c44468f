//! Tile adjacency derived purely from geometry.

use crate::error::{BoardError, Result};
use crate::tile::{Tile, TileId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Neighbor map: every tile id mapped to the ids it shares an edge with.
///
/// Symmetric and free of self loops; every tile of the board has an entry,
/// possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacencyMap {
    neighbors: BTreeMap<TileId, BTreeSet<TileId>>,
}

impl AdjacencyMap {
    fn with_tiles(tiles: &[Tile]) -> Self {
        Self {
            neighbors: tiles.iter().map(|t| (t.id(), BTreeSet::new())).collect(),
        }
    }

    pub(crate) fn link(&mut self, a: TileId, b: TileId) {
        self.neighbors.entry(a).or_default().insert(b);
        self.neighbors.entry(b).or_default().insert(a);
    }

    /// Neighbors of a tile in id order (empty for unknown ids)
    pub fn neighbors(&self, id: TileId) -> impl Iterator<Item = TileId> + '_ {
        self.neighbors.get(&id).into_iter().flatten().copied()
    }

    pub fn are_adjacent(&self, a: TileId, b: TileId) -> bool {
        self.neighbors.get(&a).is_some_and(|set| set.contains(&b))
    }

    pub fn degree(&self, id: TileId) -> usize {
        self.neighbors.get(&id).map_or(0, |set| set.len())
    }

    /// Number of tiles with an entry
    pub fn tile_count(&self) -> usize {
        self.neighbors.len()
    }

    /// Number of shared edges between tiles
    pub fn edge_count(&self) -> usize {
        self.edges().count()
    }

    /// Each adjacent pair once, as `(lower id, higher id)`
    pub fn edges(&self) -> impl Iterator<Item = (TileId, TileId)> + '_ {
        self.neighbors.iter().flat_map(|(a, set)| {
            set.iter()
                .filter(move |b| *b > a)
                .map(move |b| (*a, *b))
        })
    }

    /// Entries in tile id order
    pub fn iter(&self) -> impl Iterator<Item = (TileId, &BTreeSet<TileId>)> + '_ {
        self.neighbors.iter().map(|(id, set)| (*id, set))
    }

    /// Whether every link is recorded in both directions
    pub fn is_symmetric(&self) -> bool {
        self.neighbors
            .iter()
            .all(|(a, set)| set.iter().all(|b| self.are_adjacent(*b, *a)))
    }
}

/// Build the neighbor map by testing every unordered pair of tiles.
///
/// Distance alone does not make two tiles neighbors: a pair one tile-width
/// apart that shares no corner is off the honeycomb and stays unlinked. A
/// pair sharing a single corner, or more than two, means the layout or the
/// tolerance is broken and fails with `GeometryInconsistency`.
pub fn build_adjacency(tiles: &[Tile]) -> Result<AdjacencyMap> {
    let mut map = AdjacencyMap::with_tiles(tiles);

    for (i, tile) in tiles.iter().enumerate() {
        for other in &tiles[i + 1..] {
            if !tile.is_at_neighbor_distance(other) {
                continue;
            }
            let shared = tile.matching_vertices(other).len();
            if shared == 1 || shared > 2 {
                return Err(BoardError::GeometryInconsistency {
                    first: tile.id(),
                    second: other.id(),
                    detail: format!(
                        "centers are one tile-width apart but share {} corners",
                        shared
                    ),
                });
            }
            if tile.is_adjacent_to(other) {
                map.link(tile.id(), other.id());
            }
        }
    }

    Ok(map)
}
