//! Board layout: where every tile center goes for a board of a given span.
//!
//! A board is described by its `ring_span`, the number of tiles along the
//! central vertical column. The span must be odd so there is a single central
//! tile. Columns get one tile shorter for every step away from the center,
//! which yields the classic settlers shape (span 5 gives the 19-tile board).

use crate::error::{BoardError, Result};
use crate::geometry::Point;
use crate::tile::{Tile, TileId};
use serde::{Deserialize, Serialize};

/// Largest ring span accepted by the generator
pub const MAX_RING_SPAN: u32 = 51;

/// How tile labels are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum IdScheme {
    /// Single letters A-Z (at most 26 tiles)
    #[default]
    Letters,
    /// 1, 2, 3, ...
    Ordinal,
    /// A-Z, then AA, AB, ... like spreadsheet columns
    Spreadsheet,
}

impl IdScheme {
    /// How many distinct labels the scheme can produce (`None` = unbounded)
    pub fn capacity(&self) -> Option<usize> {
        match self {
            IdScheme::Letters => Some(26),
            IdScheme::Ordinal | IdScheme::Spreadsheet => None,
        }
    }

    /// Label for the tile at `index` (0-based)
    pub fn label(&self, index: usize) -> String {
        match self {
            IdScheme::Letters => letter(index % 26).to_string(),
            IdScheme::Ordinal => (index + 1).to_string(),
            IdScheme::Spreadsheet => {
                // Bijective base 26
                let mut n = index + 1;
                let mut chars = Vec::new();
                while n > 0 {
                    n -= 1;
                    chars.push(letter(n % 26));
                    n /= 26;
                }
                chars.iter().rev().collect()
            }
        }
    }
}

fn letter(i: usize) -> char {
    (b'A' + i as u8) as char
}

/// Tile count of a board with the given span: `3r(r+1) + 1` for `r = span / 2`
pub fn expected_tile_count(ring_span: u32) -> usize {
    let r = (ring_span / 2) as usize;
    3 * r * (r + 1) + 1
}

/// Check the layout parameters without generating anything
pub(crate) fn validate_layout(center: Point, ring_span: u32, side_length: f64) -> Result<()> {
    if ring_span == 0 || ring_span % 2 == 0 {
        return Err(BoardError::InvalidConfiguration(format!(
            "ring span must be odd and positive, got {}",
            ring_span
        )));
    }
    if ring_span > MAX_RING_SPAN {
        return Err(BoardError::InvalidConfiguration(format!(
            "ring span {} exceeds the maximum of {}",
            ring_span, MAX_RING_SPAN
        )));
    }
    if !side_length.is_finite() || side_length <= 0.0 {
        return Err(BoardError::InvalidConfiguration(format!(
            "side length must be a positive number, got {}",
            side_length
        )));
    }
    if !center.is_finite() {
        return Err(BoardError::InvalidConfiguration(format!(
            "board center must be finite, got {}",
            center
        )));
    }
    Ok(())
}

/// Compute every tile center for a board of `ring_span` around `center`.
///
/// Order: the central tile, then the central column outwards (below, above),
/// then the side columns from the innermost to the outermost.
pub fn generate_centers(center: Point, ring_span: u32, side_length: f64) -> Result<Vec<Point>> {
    validate_layout(center, ring_span, side_length)?;

    let span = ring_span as usize;
    let y_spacing = 3.0_f64.sqrt() * side_length;
    let mut centers = Vec::with_capacity(expected_tile_count(ring_span));

    centers.push(center);

    // Central column
    for k in 1..=span / 2 {
        let dy = y_spacing * k as f64;
        centers.push(center.offset(0.0, dy));
        centers.push(center.offset(0.0, -dy));
    }

    // Side columns, mirrored left and right. `column_len` is the number of
    // tiles in the column, which shrinks by one per step from the center.
    for column_len in (span / 2 + 1..span).rev() {
        let dx = 1.5 * side_length * (span - column_len) as f64;

        if column_len % 2 == 0 {
            // Even columns straddle the horizontal axis
            for i in 0..column_len / 2 {
                let dy = y_spacing * (i as f64 + 0.5);
                push_quad(&mut centers, center, dx, dy);
            }
        } else {
            centers.push(center.offset(dx, 0.0));
            centers.push(center.offset(-dx, 0.0));
            for i in 0..column_len / 2 {
                let dy = y_spacing * (i as f64 + 1.0);
                push_quad(&mut centers, center, dx, dy);
            }
        }
    }

    debug_assert_eq!(centers.len(), expected_tile_count(ring_span));
    Ok(centers)
}

fn push_quad(centers: &mut Vec<Point>, center: Point, dx: f64, dy: f64) {
    centers.push(center.offset(dx, dy));
    centers.push(center.offset(dx, -dy));
    centers.push(center.offset(-dx, dy));
    centers.push(center.offset(-dx, -dy));
}

/// Build the tiles of a board, labelled by `scheme`.
///
/// All checks run before the first tile is created.
pub fn generate_tiles(
    center: Point,
    ring_span: u32,
    side_length: f64,
    scheme: IdScheme,
) -> Result<Vec<Tile>> {
    validate_layout(center, ring_span, side_length)?;

    let required = expected_tile_count(ring_span);
    if let Some(available) = scheme.capacity() {
        if available < required {
            return Err(BoardError::ResourceExhausted {
                available,
                required,
            });
        }
    }

    let centers = generate_centers(center, ring_span, side_length)?;
    Ok(centers
        .into_iter()
        .enumerate()
        .map(|(i, c)| Tile::new(TileId(i), scheme.label(i), side_length, c))
        .collect())
}
