//! Map parsing functionality for converting text map resources into a tile grid.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{GameResult, MapError, ParseError};
use crate::map::grid::TileGrid;
use crate::map::tile::Tile;

/// Parser for the whitespace-delimited integer map format.
///
/// One row per line, one integer tile code per tile, blank lines ignored. The grid must be rectangular.
pub struct MapParser;

impl MapParser {
    /// Parses a single token into a tile.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a non-negative integer, or names no known tile.
    pub fn parse_token(token: &str, row: usize, column: usize) -> Result<Tile, ParseError> {
        let code: u32 = token.parse().map_err(|_| ParseError::InvalidToken {
            row,
            column,
            token: token.to_string(),
        })?;

        u8::try_from(code)
            .ok()
            .and_then(Tile::from_code)
            .ok_or(ParseError::UnknownTile { row, column, code })
    }

    /// Parses a map resource into a tile grid.
    ///
    /// The width is taken from the first non-blank line; every other row must match it.
    ///
    /// # Errors
    ///
    /// Returns an error if the map is empty, contains a malformed or unknown tile code,
    /// or has rows of differing lengths.
    pub fn parse(text: &str) -> Result<TileGrid, ParseError> {
        let mut tiles = Vec::new();
        let mut width = None;
        let mut height = 0;

        for (row, line) in text.lines().filter(|line| !line.trim().is_empty()).enumerate() {
            let start = tiles.len();
            for (column, token) in line.split_whitespace().enumerate() {
                tiles.push(Self::parse_token(token, row, column)?);
            }

            let found = tiles.len() - start;
            let expected = *width.get_or_insert(found);
            if found != expected {
                return Err(ParseError::RaggedRow { row, expected, found });
            }
            height += 1;
        }

        let width = width.ok_or(ParseError::Empty)?;
        debug!(width, height, "Parsed map");
        Ok(TileGrid::from_tiles(tiles, width, height))
    }

    /// Reads and parses a map file.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Map` if the file cannot be read, or `GameError::MapParse` if it is malformed.
    pub fn load(path: impl AsRef<Path>) -> GameResult<TileGrid> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| MapError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let grid = Self::parse(&text)?;
        info!(path = %path.display(), width = grid.width(), height = grid.height(), "Map loaded");
        Ok(grid)
    }
}
