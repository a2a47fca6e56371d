use bevy_ecs::resource::Resource;
use glam::{UVec2, Vec2};

use crate::constants::TILE_SIZE;
use crate::map::tile::Tile;

/// The maze: a rectangular grid of tiles, fixed in size once loaded.
///
/// Only collectible consumption mutates it, by replacing a tile with [`Tile::Empty`].
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    width: usize,
    height: usize,
}

impl TileGrid {
    /// Builds a grid from row-major tiles.
    ///
    /// Callers must ensure `tiles.len() == width * height`; the parser guarantees this.
    pub(crate) fn from_tiles(tiles: Vec<Tile>, width: usize, height: usize) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        Self { tiles, width, height }
    }

    /// Builds a grid from rows, or `None` if the rows are empty or ragged.
    pub fn from_rows(rows: Vec<Vec<Tile>>) -> Option<Self> {
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return None;
        }
        let height = rows.len();
        Some(Self::from_tiles(rows.into_iter().flatten().collect(), width, height))
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Board size in pixels.
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32) * TILE_SIZE
    }

    /// Returns the tile at a cell, or `None` outside the grid.
    pub fn get(&self, cell: UVec2) -> Option<Tile> {
        self.index(cell).map(|i| self.tiles[i])
    }

    /// Replaces the tile at a cell, returning the previous tile. Out-of-range cells are ignored.
    pub fn set(&mut self, cell: UVec2, tile: Tile) -> Option<Tile> {
        let i = self.index(cell)?;
        Some(std::mem::replace(&mut self.tiles[i], tile))
    }

    /// Maps a pixel coordinate to the cell containing it, or `None` if it lies outside the grid.
    pub fn cell_at(&self, pixel: Vec2) -> Option<UVec2> {
        let cell = (pixel / TILE_SIZE).floor();
        if cell.x < 0.0 || cell.y < 0.0 || cell.x >= self.width as f32 || cell.y >= self.height as f32 {
            return None;
        }
        Some(cell.as_uvec2())
    }

    /// Returns the tile under a pixel coordinate, or `None` outside the grid.
    pub fn tile_at(&self, pixel: Vec2) -> Option<Tile> {
        self.cell_at(pixel).and_then(|cell| self.get(cell))
    }

    /// Counts the tiles equal to `tile`.
    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// Whether any tile equals `tile`.
    pub fn contains(&self, tile: Tile) -> bool {
        self.tiles.contains(&tile)
    }

    /// Iterates over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        self.tiles.chunks(self.width)
    }

    /// Iterates over every cell with its tile, row by row.
    pub fn iter_cells(&self) -> impl Iterator<Item = (UVec2, Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, &tile)| (UVec2::new((i % self.width) as u32, (i / self.width) as u32), tile))
    }

    fn index(&self, cell: UVec2) -> Option<usize> {
        let (x, y) = (cell.x as usize, cell.y as usize);
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }
}
