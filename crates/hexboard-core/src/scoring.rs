//! Three-tile intersections and their roll-probability scores.
//!
//! Wherever three mutually adjacent tiles meet there is one shared corner,
//! the spot a settlement would collect from all three. Its score is the sum of
//! the three tiles' weighted roll probabilities, `ceil(P(n) * 36)`.

use crate::adjacency::AdjacencyMap;
use crate::error::{BoardError, Result};
use crate::geometry::{Point, PointMap, DEFAULT_TOLERANCE};
use crate::tile::{Tile, TileId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Number of two-dice combinations (out of 36) that roll `number`
pub fn dice_ways(number: u8) -> u32 {
    match number {
        2..=7 => (number - 1) as u32,
        8..=12 => (13 - number) as u32,
        _ => 0,
    }
}

/// `ceil(P(number) * 36)`; tiles without a number contribute 0.
///
/// `P * 36` is exactly the number of combinations, so the ceiling is taken
/// in integers.
pub fn weighted_probability(number: Option<u8>) -> u32 {
    number.map_or(0, dice_ways)
}

/// A corner shared by three mutually adjacent tiles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intersection {
    pub vertex: Point,
    /// The three tiles meeting at the corner, in id order
    pub tiles: [TileId; 3],
    pub score: u32,
}

/// Scores of every three-tile intersection on a board, keyed by corner
#[derive(Debug, Clone, Default)]
pub struct VertexScores {
    intersections: PointMap<Intersection>,
}

impl VertexScores {
    /// Score at the corner matching `vertex`
    pub fn get(&self, vertex: Point) -> Option<u32> {
        self.intersections.get(vertex).map(|i| i.score)
    }

    pub fn intersection(&self, vertex: Point) -> Option<&Intersection> {
        self.intersections.get(vertex)
    }

    pub fn len(&self) -> usize {
        self.intersections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    /// Intersections in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &Intersection> + '_ {
        self.intersections.values()
    }

    /// Intersections from best to worst score, ties broken by tile ids
    pub fn ranked(&self) -> Vec<&Intersection> {
        let mut ranked: Vec<&Intersection> = self.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score).then(a.tiles.cmp(&b.tiles)));
        ranked
    }
}

fn find_tile<'a>(index: &HashMap<TileId, &'a Tile>, id: TileId) -> Result<&'a Tile> {
    index
        .get(&id)
        .copied()
        .ok_or_else(|| BoardError::GeometryInconsistency {
            first: id,
            second: id,
            detail: "adjacency map refers to a tile that is not on the board".to_string(),
        })
}

/// The corner shared by all three tiles, if any
fn shared_vertex(a: &Tile, b: &Tile, c: &Tile) -> Option<Point> {
    let bc = b.matching_vertices(c);
    let ac = a.matching_vertices(c);
    a.matching_vertices(b).into_iter().find(|v| {
        bc.iter().any(|p| p.matches(v)) && ac.iter().any(|p| p.matches(v))
    })
}

/// Find every triangle of mutually adjacent tiles and score its shared corner.
///
/// Each unordered triangle is visited once (`a < b < c`), and corners are
/// additionally deduplicated under tolerance, so every physical corner is
/// scored exactly once.
pub fn compute_vertex_scores(tiles: &[Tile], adjacency: &AdjacencyMap) -> Result<VertexScores> {
    let index: HashMap<TileId, &Tile> = tiles.iter().map(|t| (t.id(), t)).collect();
    let mut intersections = PointMap::with_tolerance(DEFAULT_TOLERANCE);

    for (a_id, neighbors) in adjacency.iter() {
        let higher: Vec<TileId> = neighbors.iter().copied().filter(|b| *b > a_id).collect();

        for (i, &b_id) in higher.iter().enumerate() {
            for &c_id in &higher[i + 1..] {
                if !adjacency.are_adjacent(b_id, c_id) {
                    continue;
                }

                let a = find_tile(&index, a_id)?;
                let b = find_tile(&index, b_id)?;
                let c = find_tile(&index, c_id)?;

                let vertex = shared_vertex(a, b, c).ok_or_else(|| {
                    BoardError::GeometryInconsistency {
                        first: a_id,
                        second: c_id,
                        detail: format!(
                            "tiles {}, {} and {} touch pairwise but share no corner",
                            a_id, b_id, c_id
                        ),
                    }
                })?;

                let score = weighted_probability(a.number())
                    + weighted_probability(b.number())
                    + weighted_probability(c.number());

                let intersection = Intersection {
                    vertex,
                    tiles: [a_id, b_id, c_id],
                    score,
                };
                let (stored, inserted) = intersections.insert_if_absent(vertex, intersection);
                if !inserted && stored.score != score {
                    return Err(BoardError::GeometryInconsistency {
                        first: a_id,
                        second: c_id,
                        detail: format!("corner {} scored twice with different totals", vertex),
                    });
                }
            }
        }
    }

    Ok(VertexScores { intersections })
}
