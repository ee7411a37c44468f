//! A single hexagonal tile and the pairwise tests between tiles.

use crate::geometry::{distance, hexagon_vertices, points_match, HexVertices, Point, DEFAULT_TOLERANCE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Allowed deviation of a center distance from `sqrt(3) * side_length`
pub const NEIGHBOR_DISTANCE_TOLERANCE: f64 = 0.0001;

/// Terrain types dealt onto tiles.
///
/// Each productive terrain yields one kind of resource card:
/// - Forest: Lumber
/// - Pasture: Wool
/// - Field: Grain
/// - Hill: Brick
/// - Mountain: Ore
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceType {
    Forest,
    Pasture,
    Field,
    Hill,
    Mountain,
    /// Produces nothing and never carries a number token
    Desert,
}

impl ResourceType {
    /// All terrain types
    pub const ALL: [ResourceType; 6] = [
        ResourceType::Forest,
        ResourceType::Pasture,
        ResourceType::Field,
        ResourceType::Hill,
        ResourceType::Mountain,
        ResourceType::Desert,
    ];

    pub fn is_desert(&self) -> bool {
        matches!(self, ResourceType::Desert)
    }

    /// Name of the resource card this terrain produces
    pub fn produces(&self) -> Option<&'static str> {
        match self {
            ResourceType::Forest => Some("Lumber"),
            ResourceType::Pasture => Some("Wool"),
            ResourceType::Field => Some("Grain"),
            ResourceType::Hill => Some("Brick"),
            ResourceType::Mountain => Some("Ore"),
            ResourceType::Desert => None,
        }
    }

    /// Suggested fill color for renderers, as `#rrggbb`
    pub fn color(&self) -> &'static str {
        match self {
            ResourceType::Forest => "#006400",
            ResourceType::Pasture => "#7fff00",
            ResourceType::Field => "#ffff00",
            ResourceType::Hill => "#ff4500",
            ResourceType::Mountain => "#808080",
            ResourceType::Desert => "#f4a460",
        }
    }
}

/// Stable tile identifier: the tile's position in generation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileId(pub usize);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single hex tile on the board.
///
/// Position, size and corners are fixed at construction. The resource and
/// number are dealt once by the token assigner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    label: String,
    center: Point,
    side_length: f64,
    vertices: HexVertices,
    resource: Option<ResourceType>,
    number: Option<u8>,
}

impl Tile {
    /// Create a tile with no tokens dealt yet
    pub fn new(id: TileId, label: impl Into<String>, side_length: f64, center: Point) -> Self {
        Self {
            id,
            label: label.into(),
            center,
            side_length,
            vertices: hexagon_vertices(center, side_length),
            resource: None,
            number: None,
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    /// Human-readable label (e.g. "A" or "12")
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn side_length(&self) -> f64 {
        self.side_length
    }

    pub fn vertices(&self) -> &HexVertices {
        &self.vertices
    }

    /// Dealt terrain, `None` before token assignment
    pub fn resource(&self) -> Option<ResourceType> {
        self.resource
    }

    /// Dealt number token (2-12, never 7; `None` for desert or before assignment)
    pub fn number(&self) -> Option<u8> {
        self.number
    }

    pub fn is_desert(&self) -> bool {
        self.resource.is_some_and(|r| r.is_desert())
    }

    pub(crate) fn deal(&mut self, resource: ResourceType, number: Option<u8>) {
        self.resource = Some(resource);
        self.number = number;
    }

    /// Corners of `self` that coincide with some corner of `other`.
    ///
    /// Emitted in `self`'s vertex order, under [`DEFAULT_TOLERANCE`].
    pub fn matching_vertices(&self, other: &Tile) -> Vec<Point> {
        self.matching_vertices_within(other, DEFAULT_TOLERANCE)
    }

    /// Same as [`Tile::matching_vertices`] with a custom tolerance
    pub fn matching_vertices_within(&self, other: &Tile, tolerance: f64) -> Vec<Point> {
        self.vertices
            .points()
            .iter()
            .copied()
            .filter(|v1| {
                other
                    .vertices
                    .points()
                    .iter()
                    .any(|v2| points_match(*v1, *v2, tolerance))
            })
            .collect()
    }

    /// Whether the centers are one tile-width (`sqrt(3) * side_length`) apart
    pub fn is_at_neighbor_distance(&self, other: &Tile) -> bool {
        let expected = 3.0_f64.sqrt() * self.side_length;
        let actual = distance(self.center, other.center);
        (actual - expected).abs() <= NEIGHBOR_DISTANCE_TOLERANCE
    }

    /// Check if two tiles share an edge: neighbor distance and exactly two
    /// common corners.
    pub fn is_adjacent_to(&self, other: &Tile) -> bool {
        self.is_at_neighbor_distance(other) && self.matching_vertices(other).len() == 2
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tile {}", self.label)
    }
}
