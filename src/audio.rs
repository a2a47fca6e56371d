//! This module handles the audio playback for the game.
//!
//! Game logic talks to audio through the [`AudioSink`] trait; the SDL2_mixer backend lives in
//! [`sdl`] and is only built with the `sdl` feature.

use strum_macros::{AsRefStr, EnumIter};

use crate::constants::assets;

/// One-shot sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
pub enum Sound {
    /// Eating a collectible or a ghost.
    Chomp,
    /// Caught by a ghost. The game exits once this finishes playing.
    Death,
}

impl Sound {
    /// File name of the sound, relative to the asset directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Sound::Chomp => assets::CHOMP_SOUND,
            Sound::Death => assets::DEATH_SOUND,
        }
    }
}

/// The audio device, as seen by the game.
///
/// Implementations must never fail loudly: an unavailable device simply plays nothing.
pub trait AudioSink {
    /// Starts the looping background music from the beginning.
    fn play_music(&mut self);
    fn stop_music(&mut self);
    /// Sets the music volume, in the range `0.0..=1.0`.
    fn set_volume(&mut self, volume: f32);
    /// Advances the music stream by one tick. Not called while muted.
    fn update_stream(&mut self);
    /// Silences or restores all output.
    fn set_muted(&mut self, muted: bool);
    fn play(&mut self, sound: Sound);
    fn is_playing(&self, sound: Sound) -> bool;
}

/// An audio sink that discards everything, used when no device is wanted.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn play_music(&mut self) {}
    fn stop_music(&mut self) {}
    fn set_volume(&mut self, _volume: f32) {}
    fn update_stream(&mut self) {}
    fn set_muted(&mut self, _muted: bool) {}
    fn play(&mut self, _sound: Sound) {}
    fn is_playing(&self, _sound: Sound) -> bool {
        false
    }
}

#[cfg(feature = "sdl")]
pub mod sdl {
    use std::collections::HashMap;
    use std::path::Path;

    use anyhow::{anyhow, Result};
    use sdl2::mixer::{self, Channel, Chunk, Music, AUDIO_S16LSB, MAX_VOLUME};
    use strum::IntoEnumIterator;

    use super::{AudioSink, Sound};
    use crate::constants::assets;

    const AUDIO_FREQUENCY: i32 = 44_100;
    const AUDIO_CHANNELS: i32 = 4;
    const CHUNK_SIZE: i32 = 1024;

    /// SDL2_mixer backed audio.
    ///
    /// If audio fails to initialize, it will be disabled and all functions will silently do nothing.
    pub struct SdlAudio {
        music: Option<Music<'static>>,
        sounds: HashMap<Sound, Chunk>,
        playing: HashMap<Sound, Channel>,
        state: AudioState,
    }

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum AudioState {
        Enabled { volume: f32 },
        Muted { previous_volume: f32 },
        Disabled,
    }

    impl SdlAudio {
        /// Opens the audio device and loads the music and sound effects from `asset_dir`.
        ///
        /// If audio fails to initialize, the audio system will be disabled and
        /// all functions will silently do nothing.
        pub fn new(asset_dir: &Path) -> Self {
            match Self::try_new(asset_dir) {
                Ok(audio) => audio,
                Err(e) => {
                    tracing::warn!("Failed to initialize audio: {}. Audio will be disabled.", e);
                    Self {
                        music: None,
                        sounds: HashMap::new(),
                        playing: HashMap::new(),
                        state: AudioState::Disabled,
                    }
                }
            }
        }

        fn try_new(asset_dir: &Path) -> Result<Self> {
            mixer::open_audio(AUDIO_FREQUENCY, AUDIO_S16LSB, 2, CHUNK_SIZE)
                .map_err(|e| anyhow!("Failed to open audio: {}", e))?;
            mixer::allocate_channels(AUDIO_CHANNELS);
            // WAV decoding is built into SDL_mixer; no optional decoder needs `mixer::init`

            let music_path = asset_dir.join(assets::MUSIC);
            let music = match Music::from_file(&music_path) {
                Ok(music) => Some(music),
                Err(e) => {
                    tracing::warn!(path = %music_path.display(), "Failed to load music: {}", e);
                    None
                }
            };

            // Missing effects are tolerated individually
            let sounds: HashMap<Sound, Chunk> = Sound::iter()
                .filter_map(|sound| {
                    let path = asset_dir.join(sound.file_name());
                    match Chunk::from_file(&path) {
                        Ok(chunk) => Some((sound, chunk)),
                        Err(e) => {
                            tracing::warn!(path = %path.display(), "Failed to load sound {:?}: {}", sound, e);
                            None
                        }
                    }
                })
                .collect();

            if music.is_none() && sounds.is_empty() {
                return Err(anyhow!("No audio assets loaded successfully"));
            }

            Ok(Self {
                music,
                sounds,
                playing: HashMap::new(),
                state: AudioState::Enabled { volume: 1.0 },
            })
        }

        fn apply_volume(volume: f32) {
            let level = (volume.clamp(0.0, 1.0) * MAX_VOLUME as f32).round() as i32;
            Music::set_volume(level);
            for i in 0..AUDIO_CHANNELS {
                Channel(i).set_volume(level);
            }
        }

        /// Returns whether the audio system failed to initialize and is non-functional.
        pub fn is_disabled(&self) -> bool {
            matches!(self.state, AudioState::Disabled)
        }
    }

    impl AudioSink for SdlAudio {
        fn play_music(&mut self) {
            if self.is_disabled() {
                return;
            }
            if let Some(music) = &self.music {
                if let Err(e) = music.play(-1) {
                    tracing::warn!("Could not play music: {}", e);
                }
            }
        }

        fn stop_music(&mut self) {
            if !self.is_disabled() {
                Music::halt();
            }
        }

        fn set_volume(&mut self, volume: f32) {
            match self.state {
                AudioState::Enabled { .. } => {
                    self.state = AudioState::Enabled { volume };
                    Self::apply_volume(volume);
                }
                AudioState::Muted { .. } => self.state = AudioState::Muted { previous_volume: volume },
                AudioState::Disabled => {}
            }
        }

        fn update_stream(&mut self) {
            // SDL_mixer streams on its own thread; resuming here undoes the pause applied while muted
            if matches!(self.state, AudioState::Enabled { .. }) && Music::is_paused() {
                Music::resume();
            }
        }

        fn set_muted(&mut self, muted: bool) {
            match (muted, self.state) {
                (true, AudioState::Enabled { volume }) => {
                    self.state = AudioState::Muted { previous_volume: volume };
                    Music::pause();
                    Self::apply_volume(0.0);
                }
                (false, AudioState::Muted { previous_volume }) => {
                    self.state = AudioState::Enabled { volume: previous_volume };
                    Self::apply_volume(previous_volume);
                }
                _ => {}
            }
        }

        fn play(&mut self, sound: Sound) {
            if !matches!(self.state, AudioState::Enabled { .. }) {
                return;
            }

            if let Some(chunk) = self.sounds.get(&sound) {
                match Channel::all().play(chunk, 0) {
                    Ok(channel) => {
                        tracing::trace!(?sound, ?channel, "Playing sound");
                        self.playing.insert(sound, channel);
                    }
                    Err(e) => tracing::warn!("Could not play sound {:?}: {}", sound, e),
                }
            }
        }

        fn is_playing(&self, sound: Sound) -> bool {
            self.playing.get(&sound).is_some_and(|channel| channel.is_playing())
        }
    }
}
