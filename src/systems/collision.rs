use bevy_ecs::{
    entity::Entity,
    event::EventWriter,
    query::With,
    system::{Commands, Query, Res, ResMut},
};
use glam::Vec2;
use smallvec::SmallVec;
use tracing::{debug, info};

use crate::audio::Sound;
use crate::constants::{mechanics::GHOST_BONUS, COLLISION_INSET};
use crate::map::grid::TileGrid;
use crate::systems::{
    audio::AudioEvent,
    components::{GameClock, Ghost, PlayerControlled, Position, ScoreResource},
    power::PowerMode,
    state::GameStage,
};

/// Returns the four corners of a `box_size` square anchored at `position`.
///
/// The far edges are pulled in by half a pixel so that a box flush with a cell boundary
/// stays within its own cells.
pub fn bounding_corners(position: Vec2, box_size: f32) -> [Vec2; 4] {
    let far = box_size - COLLISION_INSET;
    [
        position,
        position + Vec2::new(far, 0.0),
        position + Vec2::new(0.0, far),
        position + Vec2::new(far, far),
    ]
}

/// Whether a `box_size` square at `position` overlaps anything an entity cannot occupy.
///
/// A corner outside the grid counts as blocked, as does a corner on a non-walkable tile.
pub fn is_blocked(grid: &TileGrid, position: Vec2, box_size: f32) -> bool {
    bounding_corners(position, box_size)
        .into_iter()
        .any(|corner| !grid.tile_at(corner).is_some_and(|tile| tile.is_walkable()))
}

/// Resolves contact between the player and ghosts.
///
/// Contact means identical pixel positions. While power mode is active the ghost is eaten for a
/// bonus and removed from play; otherwise the game is lost.
#[allow(clippy::too_many_arguments)]
pub fn ghost_contact_system(
    mut commands: Commands,
    mut stage: ResMut<GameStage>,
    mut score: ResMut<ScoreResource>,
    clock: Res<GameClock>,
    player: Query<(&Position, &PowerMode), With<PlayerControlled>>,
    ghosts: Query<(Entity, &Position, &Ghost)>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    if *stage != GameStage::Playing {
        return;
    }

    let Ok((player_position, power)) = player.single() else {
        return;
    };

    let contacts: SmallVec<[(Entity, Ghost); 4]> = ghosts
        .iter()
        .filter(|(_, position, _)| position.0 == player_position.0)
        .map(|(entity, _, ghost)| (entity, *ghost))
        .collect();

    for (entity, ghost) in contacts {
        if power.is_active(clock.elapsed) {
            score.0 += GHOST_BONUS;
            commands.entity(entity).despawn();
            audio_events.write(AudioEvent::PlaySound(Sound::Chomp));
            debug!(ghost = ghost.0, score = score.0, "Ghost eaten");
        } else {
            info!(ghost = ghost.0, position = ?player_position.0, score = score.0, "Player caught by ghost");
            *stage = GameStage::Lost;
            audio_events.write(AudioEvent::StopMusic);
            audio_events.write(AudioEvent::PlaySound(Sound::Death));
            return;
        }
    }
}
