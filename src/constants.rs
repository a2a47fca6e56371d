//! This module contains all the constants used in the game.

use std::time::Duration;

use glam::Vec2;

pub const LOOP_TIME: Duration = Duration::from_nanos((1_000_000_000.0 / 60.0) as u64);

/// The size of each tile, in pixels. Shared by the renderer and the collision engine.
pub const TILE_SIZE: f32 = 16.0;

/// Inset applied to the far edges of a bounding box so that a box flush against a cell
/// boundary does not sample the neighbouring cell.
pub const COLLISION_INSET: f32 = 0.5;

/// Gameplay tuning values.
pub mod mechanics {
    use std::time::Duration;

    /// Distance travelled by the player each tick, in pixels.
    pub const PLAYER_SPEED: f32 = 2.0;
    /// Side length of the player's and ghosts' bounding boxes, in pixels.
    pub const ENTITY_SIZE: f32 = super::TILE_SIZE;

    pub const POINT_SCORE: u32 = 10;
    pub const STRAWBERRY_SCORE: u32 = 50;
    /// Awarded for touching a ghost while power mode is active.
    pub const GHOST_BONUS: u32 = 200;

    /// How long a strawberry keeps power mode active, in game-clock time.
    pub const POWER_MODE_DURATION: Duration = Duration::from_secs(5);
}

/// Sprite animation timing.
pub mod animation {
    /// Number of ticks between animation frame changes.
    pub const ANIMATION_SPEED: u32 = 8;
    /// Each direction owns a contiguous window of this many frames in the sprite sheet.
    pub const FRAMES_PER_DIRECTION: u32 = 3;
}

/// Fixed spawn coordinates, in pixels.
pub mod spawn {
    use glam::Vec2;

    pub const PLAYER: Vec2 = Vec2::new(16.0, 16.0);

    /// Ghosts never move, so these are also their permanent positions.
    pub const GHOSTS: [Vec2; 4] = [
        Vec2::new(160.0, 160.0),
        Vec2::new(176.0, 160.0),
        Vec2::new(192.0, 160.0),
        Vec2::new(208.0, 160.0),
    ];
}

pub mod audio {
    /// Music volume, in the range `0.0..=1.0`.
    pub const MUSIC_VOLUME: f32 = 0.5;
}

/// Asset file names, relative to the configured asset directory.
pub mod assets {
    pub const DEFAULT_ASSET_DIR: &str = "assets";
    pub const DEFAULT_MAP: &str = "assets/maps/one.map";

    pub const PLAYER_SHEET: &str = "player.png";
    pub const GHOST_SHEET: &str = "ghosts.png";
    pub const TILE_SHEET: &str = "tile.png";
    pub const FONT: &str = "font.ttf";
    pub const MUSIC: &str = "music.wav";
    pub const DEATH_SOUND: &str = "death.wav";
    pub const CHOMP_SOUND: &str = "chomp.wav";
}

/// Position of the score line, relative to the bottom-left of the board.
pub const HUD_OFFSET: Vec2 = Vec2::new(4.0, 2.0);
/// Height reserved below the board for the score and mute indicator, in pixels.
pub const HUD_HEIGHT: u32 = 20;
/// Point size of the HUD font.
pub const HUD_FONT_SIZE: u16 = 12;
