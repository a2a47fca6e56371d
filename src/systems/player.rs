use bevy_ecs::{
    event::{EventReader, EventWriter},
    query::With,
    system::{Query, ResMut},
};
use tracing::debug;

use crate::{
    error::GameError,
    events::{GameCommand, GameEvent},
    systems::{
        audio::AudioState,
        components::{BufferedDirection, GlobalState, PlayerControlled},
        state::PauseState,
    },
};

/// Processes player input commands and updates game state accordingly.
///
/// Movement commands only replace the buffered direction; the movement system decides when the
/// turn can actually be taken. Non-movement commands immediately modify global game state.
pub fn player_control_system(
    mut events: EventReader<GameEvent>,
    mut state: ResMut<GlobalState>,
    mut audio_state: ResMut<AudioState>,
    mut pause: ResMut<PauseState>,
    mut players: Query<&mut BufferedDirection, With<PlayerControlled>>,
    mut errors: EventWriter<GameError>,
) {
    for event in events.read() {
        let GameEvent::Command(command) = event;
        match command {
            GameCommand::MovePlayer(direction) => match players.single_mut() {
                Ok(mut buffered) => {
                    if buffered.0 != *direction {
                        buffered.0 = *direction;
                    }
                }
                Err(e) => {
                    errors.write(GameError::InvalidState(format!(
                        "No/multiple entities queried for player system: {}",
                        e
                    )));
                }
            },
            GameCommand::Exit => {
                state.exit = true;
            }
            GameCommand::ToggleMute => {
                audio_state.muted = !audio_state.muted;
                debug!(muted = audio_state.muted, "Mute toggled");
            }
            GameCommand::TogglePause => {
                pause.toggle();
                debug!(paused = pause.active(), "Pause toggled");
            }
        }
    }
}
