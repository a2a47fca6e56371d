//! This module defines the game map: tiles, the tile grid, and the map file parser.

pub mod direction;
pub mod grid;
pub mod parser;
pub mod tile;
