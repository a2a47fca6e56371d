use bevy_ecs::{
    event::EventWriter,
    resource::Resource,
    system::{NonSend, Res, ResMut},
};
use tracing::info;

use crate::audio::Sound;
use crate::map::{grid::TileGrid, tile::Tile};
use crate::systems::{
    audio::{AudioEvent, AudioResource},
    components::{GlobalState, ScoreResource},
};

/// A resource to track the overall stage of the game from a high-level perspective.
#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum GameStage {
    /// The main gameplay loop is active.
    #[default]
    Playing,
    /// Every point has been eaten.
    Won,
    /// The player touched a ghost outside of power mode.
    Lost,
}

impl GameStage {
    /// Whether the game has ended, successfully or not.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStage::Playing)
    }
}

#[derive(Resource, Debug, Default, PartialEq, Eq, Clone, Copy)]
pub enum PauseState {
    #[default]
    Inactive,
    Active,
}

impl PauseState {
    pub fn active(&self) -> bool {
        matches!(self, PauseState::Active)
    }

    pub fn toggle(&mut self) {
        *self = match self {
            PauseState::Active => PauseState::Inactive,
            PauseState::Inactive => PauseState::Active,
        };
    }
}

/// Whether no point tiles remain on the board. Strawberries do not count.
pub fn all_points_consumed(grid: &TileGrid) -> bool {
    !grid.contains(Tile::Point)
}

/// Ends the game as a win once the board has been cleared.
pub fn stage_system(
    grid: Res<TileGrid>,
    score: Res<ScoreResource>,
    mut stage: ResMut<GameStage>,
    mut audio_events: EventWriter<AudioEvent>,
) {
    if *stage == GameStage::Playing && all_points_consumed(&grid) {
        info!(score = score.0, "All points consumed, game won");
        *stage = GameStage::Won;
        audio_events.write(AudioEvent::StopMusic);
    }
}

/// Requests exit once the game has ended.
///
/// After a loss the request waits for the death sound to finish playing.
pub fn exit_system(stage: Res<GameStage>, audio: Option<NonSend<AudioResource>>, mut state: ResMut<GlobalState>) {
    let finished = match *stage {
        GameStage::Playing => false,
        GameStage::Won => true,
        GameStage::Lost => !audio.is_some_and(|audio| audio.0.is_playing(Sound::Death)),
    };

    if finished && !state.exit {
        info!(stage = ?*stage, "Game over, exiting");
        state.exit = true;
    }
}
