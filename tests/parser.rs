use std::path::Path;

use glam::UVec2;
use pretty_assertions::assert_eq;
use speculoos::prelude::*;
use tile_pacman::{
    error::{GameError, MapError, ParseError},
    map::{parser::MapParser, tile::Tile},
};

#[test]
fn test_parse_dimensions() {
    let grid = MapParser::parse("17 15 17\n1 15 1\n").unwrap();

    assert_that(&grid.width()).is_equal_to(3);
    assert_that(&grid.height()).is_equal_to(2);
    assert_that(&grid.get(UVec2::new(0, 0))).is_equal_to(Some(Tile::Empty));
    assert_that(&grid.get(UVec2::new(1, 0))).is_equal_to(Some(Tile::Point));
    assert_that(&grid.get(UVec2::new(0, 1))).is_equal_to(Some(Tile::VerticalWall));
}

#[test]
fn test_parse_skips_blank_lines() {
    let grid = MapParser::parse("\n  \n15 15\n\n\t\n16 17\n").unwrap();

    let rows: Vec<Vec<Tile>> = grid.rows().map(|row| row.to_vec()).collect();
    assert_eq!(
        rows,
        vec![vec![Tile::Point, Tile::Point], vec![Tile::Strawberry, Tile::Empty]]
    );
}

#[test]
fn test_parse_mixed_whitespace() {
    let grid = MapParser::parse("0\t1   2\r\n3 4 5").unwrap();
    assert_that(&grid.height()).is_equal_to(2);
    assert_that(&grid.get(UVec2::new(2, 1))).is_equal_to(Some(Tile::BottomLeftCorner));
}

#[test]
fn test_parse_empty() {
    assert_that(&MapParser::parse("")).is_equal_to(Err(ParseError::Empty));
    assert_that(&MapParser::parse("\n   \n\n")).is_equal_to(Err(ParseError::Empty));
}

#[test]
fn test_parse_invalid_token() {
    let result = MapParser::parse("15 15\n15 x 15");
    assert_eq!(
        result,
        Err(ParseError::InvalidToken {
            row: 1,
            column: 1,
            token: "x".to_string()
        })
    );
}

#[test]
fn test_parse_unknown_code() {
    let result = MapParser::parse("15 18");
    assert_eq!(result, Err(ParseError::UnknownTile { row: 0, column: 1, code: 18 }));
}

#[test]
fn test_parse_ragged_rows() {
    let result = MapParser::parse("15 15 15\n15 15\n");
    assert_eq!(
        result,
        Err(ParseError::RaggedRow {
            row: 1,
            expected: 3,
            found: 2
        })
    );
}

#[test]
fn test_load_missing_file() {
    let result = MapParser::load("does/not/exist.map");
    assert!(matches!(result, Err(GameError::Map(MapError::Read { .. }))));
}

#[test]
fn test_load_default_map() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/maps/one.map");
    let grid = MapParser::load(&path).unwrap();

    assert_that(&grid.width()).is_equal_to(20);
    assert_that(&grid.height()).is_equal_to(15);
    assert_that(&grid.contains(Tile::Point)).is_true();
    assert_that(&grid.count(Tile::Strawberry)).is_equal_to(3);
}
