//! Integration tests for the board generator.
//!
//! These tests drive the full pipeline from configuration to scored board.

use hexboard_core::*;
use pretty_assertions::assert_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;

/// Positions as exact bit patterns, for comparing boards built from the same seed
fn center_bits(board: &Board) -> Vec<(u64, u64)> {
    board
        .tiles()
        .iter()
        .map(|t| (t.center().x.to_bits(), t.center().y.to_bits()))
        .collect()
}

fn deal(board: &Board) -> Vec<(String, Option<ResourceType>, Option<u8>)> {
    board
        .tiles()
        .iter()
        .map(|t| (t.label().to_string(), t.resource(), t.number()))
        .collect()
}

fn config(ring_span: u32, seed: u64) -> BoardConfig {
    BoardConfig {
        ring_span,
        seed: Some(seed),
        id_scheme: IdScheme::Spreadsheet,
        ..BoardConfig::default()
    }
}

/// Check every structural property a finished board must satisfy
fn assert_board_invariants(board: &Board) {
    let tiles = board.tiles();
    assert_eq!(tiles.len(), expected_tile_count(board.config().ring_span));

    for a in tiles {
        for b in tiles {
            if a.id() == b.id() {
                continue;
            }
            let shared = a.matching_vertices(b).len();
            assert!(shared <= 2, "{} and {} share {} corners", a, b, shared);
            assert_eq!(a.is_adjacent_to(b), b.is_adjacent_to(a));
            if shared == 1 {
                assert!(!a.is_adjacent_to(b));
            }
            assert_eq!(
                board.adjacency().are_adjacent(a.id(), b.id()),
                a.is_adjacent_to(b)
            );
        }
    }
    assert!(board.adjacency().is_symmetric());

    // Token dealing is a bijection from the supply onto the tiles
    let mut dealt: HashMap<ResourceType, usize> = HashMap::new();
    for tile in tiles {
        *dealt.entry(tile.resource().expect("every tile is dealt a resource")).or_insert(0) += 1;
        match tile.number() {
            None => assert!(tile.is_desert(), "{} has no number but is not a desert", tile),
            Some(n) => {
                assert!(!tile.is_desert());
                assert!((2..=12).contains(&n) && n != 7, "{} carries {}", tile, n);
            }
        }
    }
    assert_eq!(dealt, board.supply().resource_counts());

    let mut numbers: Vec<u8> = tiles.iter().filter_map(|t| t.number()).collect();
    let mut supplied = board.supply().numbers().to_vec();
    numbers.sort();
    supplied.sort();
    assert_eq!(numbers, supplied);
}

#[test]
fn test_tile_counts_for_valid_spans() {
    for (span, count) in [(1, 1), (3, 7), (5, 19), (7, 37), (9, 61), (11, 91)] {
        let board = generate_board(&config(span, 1)).unwrap();
        assert_eq!(board.tiles().len(), count, "span {}", span);
    }
}

#[test]
fn test_generated_boards_hold_invariants() {
    for span in [3, 5, 7, 9] {
        for seed in 0..3 {
            let board = generate_board(&config(span, seed)).unwrap();
            assert_board_invariants(&board);
        }
    }
}

#[test]
fn test_same_seed_same_board() {
    let first = generate_board(&config(5, 2024)).unwrap();
    let second = generate_board(&config(5, 2024)).unwrap();

    assert_eq!(center_bits(&first), center_bits(&second));
    assert_eq!(deal(&first), deal(&second));
    assert_eq!(first.adjacency(), second.adjacency());
}

#[test]
fn test_different_seeds_differ() {
    let first = deal(&generate_board(&config(5, 1)).unwrap());
    let found_different =
        (2..12).any(|seed| deal(&generate_board(&config(5, seed)).unwrap()) != first);
    assert!(found_different);
}

#[test]
fn test_vertex_scores_sum_contributors() {
    let board = generate_board(&config(5, 77)).unwrap();
    let scores = board.vertex_scores().unwrap();

    assert_eq!(scores.len(), 24);
    for intersection in scores.iter() {
        let expected: u32 = intersection
            .tiles
            .iter()
            .map(|id| weighted_probability(board.tile(*id).unwrap().number()))
            .sum();
        assert_eq!(intersection.score, expected);
        assert_eq!(scores.get(intersection.vertex), Some(expected));

        let [a, b, c] = intersection.tiles;
        assert!(board.adjacency().are_adjacent(a, b));
        assert!(board.adjacency().are_adjacent(b, c));
        assert!(board.adjacency().are_adjacent(a, c));
    }
}

#[test]
fn test_six_eight_five_corner_scores_fourteen() {
    let supply = TokenSupply::new(
        vec![ResourceType::Field, ResourceType::Hill, ResourceType::Forest],
        vec![6, 8, 5],
    )
    .unwrap();
    // Three mutually adjacent tiles: center, the one below it, and the lower
    // right neighbor of both
    let spacing = 3.0_f64.sqrt() * 50.0;
    let mut tiles = vec![
        Tile::new(TileId(0), "A", 50.0, Point::new(0.0, 0.0)),
        Tile::new(TileId(1), "B", 50.0, Point::new(0.0, spacing)),
        Tile::new(TileId(2), "C", 50.0, Point::new(75.0, spacing / 2.0)),
    ];
    let mut rng = StdRng::seed_from_u64(9);
    assign_tokens(&mut tiles, &supply, &mut rng).unwrap();

    let adjacency = build_adjacency(&tiles).unwrap();
    let scores = compute_vertex_scores(&tiles, &adjacency).unwrap();

    assert_eq!(scores.len(), 1);
    assert_eq!(scores.iter().next().unwrap().score, 14);
}

#[test]
fn test_refresh_builds_independent_board() {
    let board = generate_board(&BoardConfig {
        ring_span: 5,
        ..BoardConfig::default()
    })
    .unwrap();
    let fresh = board.refresh().unwrap();

    assert_board_invariants(&fresh);
    assert_eq!(center_bits(&board), center_bits(&fresh));
    drop(board);
    assert_eq!(fresh.tiles().len(), 19);
}

#[test]
fn test_refresh_with_fixed_seed_reproduces_board() {
    let board = generate_board(&config(7, 5)).unwrap();
    let fresh = board.refresh().unwrap();
    assert_eq!(deal(&board), deal(&fresh));
    assert_eq!(board.adjacency(), fresh.adjacency());
}

#[test]
fn test_single_tile_board() {
    let board = generate_board(&config(1, 0)).unwrap();

    assert_eq!(board.tiles().len(), 1);
    assert_eq!(board.adjacency().edge_count(), 0);
    assert_eq!(board.neighbors_of(TileId(0)).count(), 0);
    assert!(board.vertex_scores().unwrap().is_empty());
}

#[test]
fn test_letter_labels_exhausted_on_large_board() {
    let config = BoardConfig {
        ring_span: 7,
        id_scheme: IdScheme::Letters,
        ..BoardConfig::default()
    };
    assert_eq!(
        generate_board(&config).unwrap_err(),
        BoardError::ResourceExhausted {
            available: 26,
            required: 37
        }
    );
}

#[test]
fn test_invalid_configurations() {
    for ring_span in [0, 2, 8] {
        let config = BoardConfig {
            ring_span,
            ..BoardConfig::default()
        };
        assert!(matches!(
            generate_board(&config),
            Err(BoardError::InvalidConfiguration(_))
        ));
    }

    let config = BoardConfig {
        side_length: -1.0,
        ..BoardConfig::default()
    };
    assert!(matches!(
        generate_board(&config),
        Err(BoardError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_number_supply_mismatch() {
    let supply = TokenSupply::new(vec![ResourceType::Desert; 7], vec![6]).unwrap();
    let config = BoardConfig {
        ring_span: 3,
        supply: Some(supply),
        ..BoardConfig::default()
    };
    assert_eq!(
        generate_board(&config).unwrap_err(),
        BoardError::CountMismatch {
            token: TokenKind::Number,
            supplied: 1,
            required: 0
        }
    );
}

#[test]
fn test_separated_red_numbers() {
    for seed in 0..5 {
        let board = generate_board(&BoardConfig {
            separate_red_numbers: true,
            ..BoardConfig::seeded(seed)
        })
        .unwrap();
        assert_board_invariants(&board);

        let red = |id: TileId| matches!(board.tile(id).unwrap().number(), Some(6) | Some(8));
        for (a, b) in board.adjacency().edges() {
            assert!(!(red(a) && red(b)), "red numbers touch on seed {}", seed);
        }
    }
}

#[test]
fn test_snapshot_serializes() {
    let board = generate_board(&config(5, 10)).unwrap();
    let snapshot = board.snapshot().unwrap();

    let json = serde_json::to_string(&snapshot).unwrap();
    let parsed: BoardSnapshot = serde_json::from_str(&json).unwrap();

    assert_eq!(parsed.seed, 10);
    assert_eq!(parsed.tiles.len(), 19);
    assert_eq!(parsed.intersections.len(), snapshot.intersections.len());

    let degrees: Vec<usize> = parsed.adjacency.iter().map(|a| a.neighbors.len()).collect();
    let expected: Vec<usize> = board
        .tiles()
        .iter()
        .map(|t| board.adjacency().degree(t.id()))
        .collect();
    assert_eq!(degrees, expected);
}
