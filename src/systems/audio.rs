//! Audio system for handling sound playback in the game.
//!
//! The audio device is stored as a `NonSend` resource so that backends tied to the main thread
//! (SDL2_mixer) can be used from the ECS. Worlds without a device skip playback entirely.

use bevy_ecs::{
    event::{Event, EventReader},
    resource::Resource,
    system::{NonSendMut, Res},
};
use tracing::{debug, trace};

use crate::audio::{AudioSink, Sound};

/// Resource for tracking audio state
#[derive(Resource, Debug, Clone, Default)]
pub struct AudioState {
    /// Whether audio is currently muted
    pub muted: bool,
}

/// Events for triggering audio playback
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioEvent {
    /// Play a specific sound effect
    PlaySound(Sound),
    /// Stop the background music
    StopMusic,
}

/// Non-send resource wrapper for the audio device.
pub struct AudioResource(pub Box<dyn AudioSink>);

/// Keeps the device's mute state in sync, advances the music stream, and plays queued sounds.
///
/// Muting stops the stream from advancing and drops sound effects; it never affects game logic.
pub fn audio_system(
    audio: Option<NonSendMut<AudioResource>>,
    state: Res<AudioState>,
    mut events: EventReader<AudioEvent>,
    mut last_muted: bevy_ecs::system::Local<Option<bool>>,
) {
    let Some(mut audio) = audio else {
        // No device: drain the events so they do not pile up
        events.clear();
        return;
    };

    if *last_muted != Some(state.muted) {
        debug!(muted = state.muted, "Audio mute state changed");
        audio.0.set_muted(state.muted);
        *last_muted = Some(state.muted);
    }

    if !state.muted {
        audio.0.update_stream();
    }

    for event in events.read() {
        match event {
            AudioEvent::PlaySound(sound) => {
                if !state.muted {
                    trace!(?sound, "Playing sound");
                    audio.0.play(*sound);
                } else {
                    trace!(?sound, "Skipping sound while muted");
                }
            }
            AudioEvent::StopMusic => {
                debug!("Stopping music");
                audio.0.stop_music();
            }
        }
    }
}
