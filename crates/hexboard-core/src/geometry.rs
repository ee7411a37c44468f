//! Plane geometry for hex tiles placed at floating-point centers.
//!
//! This module provides:
//! - `Point`: a position on the board plane
//! - `HexVertices`: the six labelled corners of one hexagon
//! - Tolerance-based point matching, which every adjacency and intersection
//!   test is built on
//!
//! The same corner computed from two different tile centers is never
//! bit-identical, so points are only ever compared through [`points_match`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Default tolerance for treating two points as the same vertex
pub const DEFAULT_TOLERANCE: f64 = 0.001;

/// A position on the board plane.
///
/// There is intentionally no `PartialEq`: use [`points_match`] or
/// [`Point::matches`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Offset this point by `(dx, dy)`
    pub fn offset(&self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Whether this point matches another under [`DEFAULT_TOLERANCE`]
    pub fn matches(&self, other: &Point) -> bool {
        points_match(*self, *other, DEFAULT_TOLERANCE)
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        distance(*self, *other)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

/// True iff both coordinate differences are strictly below `tolerance`.
pub fn points_match(p1: Point, p2: Point, tolerance: f64) -> bool {
    (p1.x - p2.x).abs() < tolerance && (p1.y - p2.y).abs() < tolerance
}

/// Euclidean distance between two points
pub fn distance(p1: Point, p2: Point) -> f64 {
    (p1.x - p2.x).hypot(p1.y - p2.y)
}

/// Label of a hexagon corner.
///
/// Labels run A to F starting at the bottom-left corner and going around the
/// hexagon with C and F on the horizontal axis through the center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VertexLabel {
    A,
    B,
    C,
    D,
    E,
    F,
}

impl VertexLabel {
    /// All labels in vertex order
    pub const ALL: [VertexLabel; 6] = [
        VertexLabel::A,
        VertexLabel::B,
        VertexLabel::C,
        VertexLabel::D,
        VertexLabel::E,
        VertexLabel::F,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for VertexLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The six corners of a hexagon, ordered by [`VertexLabel`]
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HexVertices([Point; 6]);

impl HexVertices {
    /// Corner with the given label
    pub fn get(&self, label: VertexLabel) -> Point {
        self.0[label.index()]
    }

    /// Corners paired with their labels, in label order
    pub fn iter(&self) -> impl Iterator<Item = (VertexLabel, Point)> + '_ {
        VertexLabel::ALL.into_iter().zip(self.0.iter().copied())
    }

    /// Corners in label order
    pub fn points(&self) -> &[Point; 6] {
        &self.0
    }

    /// Whether any corner matches `point` under `tolerance`
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        self.0.iter().any(|v| points_match(*v, point, tolerance))
    }
}

/// Compute the six corners of a regular hexagon around `center`.
///
/// C and F lie on the horizontal line through the center, so tiles stack in
/// columns: two hexagons whose centers are `sqrt(3) * side_length` apart,
/// either vertically or along the 30° diagonals, share exactly one edge.
pub fn hexagon_vertices(center: Point, side_length: f64) -> HexVertices {
    let x_offset = 0.5 * side_length;
    let y_offset = (3.0_f64.sqrt() / 2.0) * side_length;

    HexVertices([
        center.offset(-x_offset, -y_offset),
        center.offset(x_offset, -y_offset),
        center.offset(2.0 * x_offset, 0.0),
        center.offset(x_offset, y_offset),
        center.offset(-x_offset, y_offset),
        center.offset(-2.0 * x_offset, 0.0),
    ])
}

/// Insertion-ordered map keyed by points compared under a tolerance.
///
/// Lookups are linear; boards are small enough that this never matters.
#[derive(Debug, Clone)]
pub struct PointMap<V> {
    tolerance: f64,
    entries: Vec<(Point, V)>,
}

impl<V> PointMap<V> {
    /// Create an empty map using [`DEFAULT_TOLERANCE`]
    pub fn new() -> Self {
        Self::with_tolerance(DEFAULT_TOLERANCE)
    }

    /// Create an empty map with a custom tolerance
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            entries: Vec::new(),
        }
    }

    /// Value stored under a point matching `point`
    pub fn get(&self, point: Point) -> Option<&V> {
        self.entries
            .iter()
            .find(|(p, _)| points_match(*p, point, self.tolerance))
            .map(|(_, v)| v)
    }

    pub fn contains(&self, point: Point) -> bool {
        self.get(point).is_some()
    }

    /// Insert unless a matching point is already present.
    ///
    /// Returns the value now stored for that point and whether it was inserted.
    pub fn insert_if_absent(&mut self, point: Point, value: V) -> (&V, bool) {
        let tolerance = self.tolerance;
        match self
            .entries
            .iter()
            .position(|(p, _)| points_match(*p, point, tolerance))
        {
            Some(idx) => (&self.entries[idx].1, false),
            None => {
                self.entries.push((point, value));
                let last = self.entries.len() - 1;
                (&self.entries[last].1, true)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (Point, &V)> + '_ {
        self.entries.iter().map(|(p, v)| (*p, v))
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<V> Default for PointMap<V> {
    fn default() -> Self {
        Self::new()
    }
}
