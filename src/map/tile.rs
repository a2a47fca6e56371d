use strum_macros::{AsRefStr, EnumIter, FromRepr};

use crate::constants::mechanics::{POINT_SCORE, STRAWBERRY_SCORE};

/// A single cell of the maze, identified by its integer code in the map format.
///
/// The discriminants are the codes used in map files and the column of the tile in the tile sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter, FromRepr)]
#[repr(u8)]
pub enum Tile {
    HorizontalWall = 0,
    VerticalWall = 1,
    TopLeftCorner = 2,
    TopRightCorner = 3,
    BottomRightCorner = 4,
    BottomLeftCorner = 5,
    LeftSideWall = 6,
    RightSideWall = 7,
    BottomSideWall = 8,
    TopSideWall = 9,
    LeftEndWall = 10,
    RightEndWall = 11,
    BottomEndWall = 12,
    TopEndWall = 13,
    Apple = 14,
    Point = 15,
    Strawberry = 16,
    Empty = 17,
}

impl Tile {
    /// Returns the tile's code in the map format.
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Looks up a tile by its map code.
    pub fn from_code(code: u8) -> Option<Tile> {
        Tile::from_repr(code)
    }

    /// Whether an entity's bounding box may overlap this tile.
    pub const fn is_walkable(self) -> bool {
        matches!(self, Tile::Point | Tile::Strawberry | Tile::Empty)
    }

    /// Whether walking over this tile consumes it.
    pub const fn is_collectible(self) -> bool {
        matches!(self, Tile::Point | Tile::Strawberry)
    }

    /// Score awarded for consuming this tile, if it is collectible.
    pub const fn score_value(self) -> Option<u32> {
        match self {
            Tile::Point => Some(POINT_SCORE),
            Tile::Strawberry => Some(STRAWBERRY_SCORE),
            _ => None,
        }
    }
}
