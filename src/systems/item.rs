use bevy_ecs::{
    event::EventWriter,
    query::With,
    system::{Query, Res, ResMut},
};
use glam::Vec2;
use tracing::{debug, trace};

use crate::audio::Sound;
use crate::map::{grid::TileGrid, tile::Tile};
use crate::systems::{
    audio::AudioEvent,
    components::{GameClock, PlayerControlled, Position, ScoreResource},
    power::PowerMode,
};

/// Consumes the collectible under `position` (the cell holding the entity's top-left pixel).
///
/// The tile becomes [`Tile::Empty`] and is returned. Walls, empty tiles, and positions outside
/// the grid are left untouched and yield `None`, so consuming the same spot twice scores once.
pub fn consume_tile(grid: &mut TileGrid, position: Vec2) -> Option<Tile> {
    let cell = grid.cell_at(position)?;
    let tile = grid.get(cell)?;
    if !tile.is_collectible() {
        return None;
    }
    grid.set(cell, Tile::Empty);
    Some(tile)
}

/// Lets the player eat whatever collectible it is standing on.
///
/// Points and strawberries add to the score; a strawberry also (re)starts power mode.
pub fn consume_system(
    mut grid: ResMut<TileGrid>,
    mut score: ResMut<ScoreResource>,
    clock: Res<GameClock>,
    mut player: Query<(&Position, &mut PowerMode), With<PlayerControlled>>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    for (position, mut power) in player.iter_mut() {
        let Some(tile) = consume_tile(&mut grid, position.0) else {
            continue;
        };

        let value = tile.score_value().unwrap_or_default();
        score.0 += value;
        trace!(tile = tile.as_ref(), value, score = score.0, "Collectible consumed");

        if tile == Tile::Strawberry {
            power.activate(clock.elapsed);
            debug!(expires_at = ?power.expires_at, "Power mode activated");
        }

        audio_events.write(AudioEvent::PlaySound(Sound::Chomp));
    }
}
