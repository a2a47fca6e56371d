//! Draws the board, the entities, and the HUD through a [`RenderSurface`].
//!
//! The surface is a `NonSend` [`RenderResource`]; worlds without one (tests, headless runs) skip
//! rendering. The SDL2 canvas backend in [`canvas`] is only built with the `sdl` feature.

use bevy_ecs::{
    event::EventWriter,
    query::With,
    system::{NonSendMut, Query, Res},
};
use glam::Vec2;
use smallvec::SmallVec;
use thousands::Separable;

use crate::constants::{HUD_OFFSET, TILE_SIZE};
use crate::error::{GameError, TextureError};
use crate::map::{grid::TileGrid, tile::Tile};
use crate::systems::{
    animation::SpriteAnimation,
    audio::AudioState,
    components::{Ghost, PlayerControlled, Position, ScoreResource},
    state::{GameStage, PauseState},
};

/// Sprite sheets holding entity frames, one `TILE_SIZE` square per frame laid out horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteSheet {
    /// Twelve walking frames, three per direction.
    Player,
    /// One frame per ghost.
    Ghosts,
}

/// A drawing target, cleared and presented once per tick.
pub trait RenderSurface {
    fn clear(&mut self);
    /// Draws a map tile with its top-left corner at `position`.
    fn draw_tile(&mut self, tile: Tile, position: Vec2) -> Result<(), TextureError>;
    /// Draws one frame of a sprite sheet with its top-left corner at `position`.
    fn draw_sprite(&mut self, sheet: SpriteSheet, frame: u32, position: Vec2) -> Result<(), TextureError>;
    fn draw_text(&mut self, text: &str, position: Vec2) -> Result<(), TextureError>;
    fn present(&mut self);
}

/// Non-send resource wrapper for the drawing target.
pub struct RenderResource(pub Box<dyn RenderSurface>);

/// The HUD lines shown below the board, left to right.
pub fn hud_text(score: u32, muted: bool, paused: bool) -> SmallVec<[String; 3]> {
    let mut lines = SmallVec::new();
    lines.push(format!("SCORE {}", score.separate_with_commas()));
    if muted {
        lines.push("MUTED".to_string());
    }
    if paused {
        lines.push("PAUSED".to_string());
    }
    lines
}

/// Top-left pixel of the grid cell at `(column, row)`.
pub fn cell_origin(column: u32, row: u32) -> Vec2 {
    Vec2::new(column as f32, row as f32) * TILE_SIZE
}

#[allow(clippy::too_many_arguments)]
pub fn render_system(
    render: Option<NonSendMut<RenderResource>>,
    grid: Res<TileGrid>,
    score: Res<ScoreResource>,
    audio_state: Res<AudioState>,
    pause: Res<PauseState>,
    stage: Res<GameStage>,
    player: Query<(&Position, &SpriteAnimation), With<PlayerControlled>>,
    ghosts: Query<(&Position, &Ghost)>,
    mut errors: EventWriter<GameError>,
) {
    let Some(mut render) = render else {
        return;
    };
    let surface = render.0.as_mut();
    // At most one failure per layer; the frame is still presented
    let mut failures: SmallVec<[TextureError; 4]> = SmallVec::new();

    surface.clear();

    for (cell, tile) in grid.iter_cells() {
        if let Err(e) = surface.draw_tile(tile, cell_origin(cell.x, cell.y)) {
            failures.push(e);
            break;
        }
    }

    for (position, animation) in player.iter() {
        if let Err(e) = surface.draw_sprite(SpriteSheet::Player, animation.frame, position.0) {
            failures.push(e);
            break;
        }
    }

    for (position, ghost) in ghosts.iter() {
        if let Err(e) = surface.draw_sprite(SpriteSheet::Ghosts, u32::from(ghost.0), position.0) {
            failures.push(e);
            break;
        }
    }

    let hud_origin = Vec2::new(0.0, grid.height() as f32 * TILE_SIZE) + HUD_OFFSET;
    let mut cursor = hud_origin;
    let lines = hud_text(score.0, audio_state.muted, pause.active() && !stage.is_terminal());
    for line in &lines {
        if let Err(e) = surface.draw_text(line, cursor) {
            failures.push(e);
            break;
        }
        cursor.x += (line.len() as f32 + 2.0) * (TILE_SIZE / 2.0);
    }

    surface.present();

    for failure in failures {
        errors.write(failure.into());
    }
}

#[cfg(feature = "sdl")]
pub mod canvas {
    use std::collections::HashMap;
    use std::path::Path;

    use glam::Vec2;
    use sdl2::image::LoadTexture;
    use sdl2::pixels::Color;
    use sdl2::rect::Rect;
    use sdl2::render::{Canvas, Texture, TextureCreator};
    use sdl2::ttf::{Font, Sdl2TtfContext};
    use sdl2::video::{Window, WindowContext};
    use tracing::{trace, warn};

    use super::{RenderSurface, SpriteSheet};
    use crate::constants::{assets, HUD_FONT_SIZE, TILE_SIZE};
    use crate::error::TextureError;
    use crate::map::tile::Tile;

    const SPRITE_SIZE: u32 = TILE_SIZE as u32;

    /// Renders onto an SDL2 window canvas using the PNG sprite sheets from the asset directory.
    pub struct SdlRenderer {
        canvas: Canvas<Window>,
        texture_creator: TextureCreator<WindowContext>,
        tiles: Texture,
        player: Texture,
        ghosts: Texture,
        /// Text is skipped entirely if the font could not be loaded.
        font: Option<Font<'static, 'static>>,
        /// Rendered glyphs, keyed by character. Bounded by the HUD's character set.
        glyphs: HashMap<char, Texture>,
    }

    impl SdlRenderer {
        /// Loads the sprite sheets and HUD font.
        ///
        /// # Errors
        ///
        /// Returns `TextureError::LoadFailed` if a sprite sheet cannot be loaded. A missing font
        /// only disables the HUD text.
        pub fn new(canvas: Canvas<Window>, ttf_context: &'static Sdl2TtfContext, asset_dir: &Path) -> Result<Self, TextureError> {
            let texture_creator = canvas.texture_creator();

            let load = |name: &str| -> Result<Texture, TextureError> {
                let path = asset_dir.join(name);
                trace!(path = %path.display(), "Loading sprite sheet");
                texture_creator
                    .load_texture(&path)
                    .map_err(|reason| TextureError::LoadFailed { path, reason })
            };

            let tiles = load(assets::TILE_SHEET)?;
            let player = load(assets::PLAYER_SHEET)?;
            let ghosts = load(assets::GHOST_SHEET)?;

            let font_path = asset_dir.join(assets::FONT);
            let font = match ttf_context.load_font(&font_path, HUD_FONT_SIZE) {
                Ok(font) => Some(font),
                Err(e) => {
                    warn!(path = %font_path.display(), "Failed to load font, HUD text disabled: {}", e);
                    None
                }
            };

            Ok(Self {
                canvas,
                texture_creator,
                tiles,
                player,
                ghosts,
                font,
                glyphs: HashMap::new(),
            })
        }

        fn copy_frame(&mut self, sheet: Sheet, frame: u32, position: Vec2) -> Result<(), TextureError> {
            let texture = match sheet {
                Sheet::Tiles => &self.tiles,
                Sheet::Player => &self.player,
                Sheet::Ghosts => &self.ghosts,
            };
            let src = Rect::new((frame * SPRITE_SIZE) as i32, 0, SPRITE_SIZE, SPRITE_SIZE);
            let dest = Rect::new(position.x as i32, position.y as i32, SPRITE_SIZE, SPRITE_SIZE);
            self.canvas
                .copy(texture, src, dest)
                .map_err(TextureError::RenderFailed)
        }

        fn glyph(&mut self, c: char) -> Result<Option<&Texture>, TextureError> {
            let Some(font) = &self.font else {
                return Ok(None);
            };

            if !self.glyphs.contains_key(&c) {
                let surface = font
                    .render(&c.to_string())
                    .blended(Color::WHITE)
                    .map_err(|e| TextureError::RenderFailed(e.to_string()))?;
                let texture = self
                    .texture_creator
                    .create_texture_from_surface(&surface)
                    .map_err(|e| TextureError::RenderFailed(e.to_string()))?;
                self.glyphs.insert(c, texture);
            }

            Ok(self.glyphs.get(&c))
        }
    }

    #[derive(Clone, Copy)]
    enum Sheet {
        Tiles,
        Player,
        Ghosts,
    }

    impl RenderSurface for SdlRenderer {
        fn clear(&mut self) {
            self.canvas.set_draw_color(Color::BLACK);
            self.canvas.clear();
        }

        fn draw_tile(&mut self, tile: Tile, position: Vec2) -> Result<(), TextureError> {
            self.copy_frame(Sheet::Tiles, tile.code() as u32, position)
        }

        fn draw_sprite(&mut self, sheet: SpriteSheet, frame: u32, position: Vec2) -> Result<(), TextureError> {
            let sheet = match sheet {
                SpriteSheet::Player => Sheet::Player,
                SpriteSheet::Ghosts => Sheet::Ghosts,
            };
            self.copy_frame(sheet, frame, position)
        }

        fn draw_text(&mut self, text: &str, position: Vec2) -> Result<(), TextureError> {
            let mut x = position.x as i32;
            for c in text.chars() {
                if c == ' ' {
                    x += SPRITE_SIZE as i32 / 2;
                    continue;
                }

                let Some(glyph) = self.glyph(c)? else {
                    return Ok(());
                };
                let query = glyph.query();
                let dest = Rect::new(x, position.y as i32, query.width, query.height);
                // Re-borrow through the map so the canvas can be borrowed mutably
                if let Some(glyph) = self.glyphs.get(&c) {
                    self.canvas.copy(glyph, None, dest).map_err(TextureError::RenderFailed)?;
                }
                x += query.width as i32;
            }
            Ok(())
        }

        fn present(&mut self) {
            self.canvas.present();
        }
    }
}
