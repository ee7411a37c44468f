//! Token supplies and dealing them onto tiles.
//!
//! Two multisets are dealt independently: one terrain per tile and one number
//! token per non-desert tile. Both are shuffled with a uniform permutation
//! before dealing.

use crate::adjacency::AdjacencyMap;
use crate::error::{BoardError, Result, TokenKind};
use crate::tile::{ResourceType, Tile, TileId};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// Tiles on the standard board
const STANDARD_TILE_COUNT: usize = 19;

/// Order in which partial copies of the standard terrain set are drawn
const RESOURCE_PRIORITY: [ResourceType; 19] = [
    ResourceType::Desert,
    ResourceType::Forest,
    ResourceType::Pasture,
    ResourceType::Field,
    ResourceType::Hill,
    ResourceType::Mountain,
    ResourceType::Forest,
    ResourceType::Pasture,
    ResourceType::Field,
    ResourceType::Hill,
    ResourceType::Mountain,
    ResourceType::Forest,
    ResourceType::Pasture,
    ResourceType::Field,
    ResourceType::Hill,
    ResourceType::Mountain,
    ResourceType::Forest,
    ResourceType::Pasture,
    ResourceType::Field,
];

/// Order in which partial copies of the standard number set are drawn
const NUMBER_PRIORITY: [u8; 18] = [6, 8, 5, 9, 4, 10, 3, 11, 2, 12, 6, 8, 5, 9, 4, 10, 3, 11];

/// Attempts at a number deal that keeps 6s and 8s apart
const MAX_SEPARATION_ATTEMPTS: usize = 100;

/// Numbers whose tiles should not touch when separation is requested
fn is_red_number(number: u8) -> bool {
    number == 6 || number == 8
}

/// The resource and number multisets dealt onto a board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSupply {
    resources: Vec<ResourceType>,
    numbers: Vec<u8>,
}

impl TokenSupply {
    /// Custom supply. Numbers must lie in 2-12 and never be 7.
    pub fn new(resources: Vec<ResourceType>, numbers: Vec<u8>) -> Result<Self> {
        let supply = Self { resources, numbers };
        supply.validate()?;
        Ok(supply)
    }

    /// The standard 19-tile supply.
    ///
    /// 4 Forest, 4 Pasture, 4 Field, 3 Hill, 3 Mountain, 1 Desert, and one
    /// each of 2 and 12 with two of every other number except 7.
    pub fn standard() -> Self {
        let mut resources = Vec::with_capacity(STANDARD_TILE_COUNT);
        for (resource, count) in [
            (ResourceType::Forest, 4),
            (ResourceType::Pasture, 4),
            (ResourceType::Field, 4),
            (ResourceType::Hill, 3),
            (ResourceType::Mountain, 3),
            (ResourceType::Desert, 1),
        ] {
            resources.extend(std::iter::repeat(resource).take(count));
        }

        let numbers = vec![2, 3, 3, 4, 4, 5, 5, 6, 6, 8, 8, 9, 9, 10, 10, 11, 11, 12];

        Self { resources, numbers }
    }

    /// Supply sized for a board of `tile_count` tiles.
    ///
    /// Whole copies of the standard set, topped up from a fixed priority
    /// order so every board keeps a mix of terrains and numbers. For 19 tiles
    /// this is exactly the standard supply.
    pub fn for_tile_count(tile_count: usize) -> Self {
        let mut resources = Vec::with_capacity(tile_count);
        for _ in 0..tile_count / STANDARD_TILE_COUNT {
            resources.extend_from_slice(&RESOURCE_PRIORITY);
        }
        resources.extend_from_slice(&RESOURCE_PRIORITY[..tile_count % STANDARD_TILE_COUNT]);

        let productive = resources.iter().filter(|r| !r.is_desert()).count();
        let mut numbers = Vec::with_capacity(productive);
        for _ in 0..productive / NUMBER_PRIORITY.len() {
            numbers.extend_from_slice(&NUMBER_PRIORITY);
        }
        numbers.extend_from_slice(&NUMBER_PRIORITY[..productive % NUMBER_PRIORITY.len()]);

        Self { resources, numbers }
    }

    /// Check that every number token is a legal face value
    pub fn validate(&self) -> Result<()> {
        if let Some(bad) = self
            .numbers
            .iter()
            .find(|n| !(2..=12).contains(*n) || **n == 7)
        {
            return Err(BoardError::InvalidConfiguration(format!(
                "number token {} is not in 2-12 excluding 7",
                bad
            )));
        }
        Ok(())
    }

    pub fn resources(&self) -> &[ResourceType] {
        &self.resources
    }

    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    /// Count of each terrain in the supply
    pub fn resource_counts(&self) -> HashMap<ResourceType, usize> {
        let mut counts = HashMap::new();
        for r in &self.resources {
            *counts.entry(*r).or_insert(0) += 1;
        }
        counts
    }

    /// Number of tiles that will receive a number token
    pub fn productive_count(&self) -> usize {
        self.resources.iter().filter(|r| !r.is_desert()).count()
    }

    fn check_counts(&self, tiles: &[Tile]) -> Result<()> {
        if self.resources.len() != tiles.len() {
            return Err(BoardError::CountMismatch {
                token: TokenKind::Resource,
                supplied: self.resources.len(),
                required: tiles.len(),
            });
        }
        let productive = self.productive_count();
        if self.numbers.len() != productive {
            return Err(BoardError::CountMismatch {
                token: TokenKind::Number,
                supplied: self.numbers.len(),
                required: productive,
            });
        }
        Ok(())
    }
}

impl Default for TokenSupply {
    fn default() -> Self {
        Self::standard()
    }
}

/// Shuffle both supplies and deal them onto `tiles` in order.
///
/// Desert tiles receive no number. Fails with `CountMismatch` before any
/// tile is touched if the supply does not fit the tiles.
pub fn assign_tokens<R: Rng + ?Sized>(
    tiles: &mut [Tile],
    supply: &TokenSupply,
    rng: &mut R,
) -> Result<()> {
    supply.check_counts(tiles)?;

    let mut resources = supply.resources.clone();
    resources.shuffle(rng);
    let mut numbers = supply.numbers.clone();
    numbers.shuffle(rng);

    deal(tiles, &resources, &numbers);
    Ok(())
}

/// Like [`assign_tokens`], but reshuffles the numbers until no two adjacent
/// tiles both carry a 6 or an 8.
///
/// Gives up after a bounded number of attempts and keeps the last deal.
pub fn assign_tokens_separating<R: Rng + ?Sized>(
    tiles: &mut [Tile],
    supply: &TokenSupply,
    adjacency: &AdjacencyMap,
    rng: &mut R,
) -> Result<()> {
    supply.check_counts(tiles)?;

    let mut resources = supply.resources.clone();
    resources.shuffle(rng);
    let mut numbers = supply.numbers.clone();

    let mut separated = false;
    for _ in 0..MAX_SEPARATION_ATTEMPTS {
        numbers.shuffle(rng);
        if is_valid_number_placement(tiles, &resources, &numbers, adjacency) {
            separated = true;
            break;
        }
    }
    if !separated {
        warn!(
            attempts = MAX_SEPARATION_ATTEMPTS,
            "No number deal keeps red numbers apart, keeping the last one"
        );
    }

    deal(tiles, &resources, &numbers);
    Ok(())
}

fn deal(tiles: &mut [Tile], resources: &[ResourceType], numbers: &[u8]) {
    let mut numbers = numbers.iter().copied();
    for (tile, &resource) in tiles.iter_mut().zip(resources) {
        let number = if resource.is_desert() {
            None
        } else {
            numbers.next()
        };
        tile.deal(resource, number);
    }
}

/// Whether a deal keeps every pair of adjacent tiles from both carrying a red number
fn is_valid_number_placement(
    tiles: &[Tile],
    resources: &[ResourceType],
    numbers: &[u8],
    adjacency: &AdjacencyMap,
) -> bool {
    let mut numbers = numbers.iter().copied();
    let mut tile_numbers: HashMap<TileId, u8> = HashMap::new();
    for (tile, resource) in tiles.iter().zip(resources) {
        if !resource.is_desert() {
            if let Some(n) = numbers.next() {
                tile_numbers.insert(tile.id(), n);
            }
        }
    }

    adjacency.edges().all(|(a, b)| {
        let red = |id: TileId| tile_numbers.get(&id).is_some_and(|n| is_red_number(*n));
        !(red(a) && red(b))
    })
}
