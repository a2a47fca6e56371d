//! Translates raw input into [`GameEvent`]s.
//!
//! The input device is a `NonSend` [`InputResource`] wrapping any [`InputSource`]. The keyboard
//! backend in [`keyboard`] is only built with the `sdl` feature.

use bevy_ecs::{event::EventWriter, system::NonSendMut};
use tracing::trace;

use crate::{
    events::{GameCommand, GameEvent},
    map::direction::Direction,
};

/// A source of player input, polled once per tick.
pub trait InputSource {
    /// Gathers everything that happened since the previous poll.
    fn poll(&mut self);
    /// Whether the key for `direction` is currently held down.
    fn is_direction_held(&self, direction: Direction) -> bool;
    /// Whether the mute key was pressed since the previous poll.
    fn mute_toggled(&self) -> bool;
    /// Whether the pause key was pressed since the previous poll.
    fn pause_toggled(&self) -> bool;
    /// Whether the window was closed or an exit key was pressed.
    fn quit_requested(&self) -> bool;
}

/// Non-send resource wrapper for the input device.
pub struct InputResource(pub Box<dyn InputSource>);

/// The direction requested this tick, if any.
///
/// When several direction keys are held, the last one in [`Direction::DIRECTIONS`] order wins.
pub fn requested_direction(input: &dyn InputSource) -> Option<Direction> {
    Direction::DIRECTIONS.into_iter().rev().find(|d| input.is_direction_held(*d))
}

pub fn input_system(input: Option<NonSendMut<InputResource>>, mut writer: EventWriter<GameEvent>) {
    let Some(mut input) = input else {
        return;
    };
    input.0.poll();

    if input.0.quit_requested() {
        writer.write(GameCommand::Exit.into());
    }
    if input.0.mute_toggled() {
        writer.write(GameCommand::ToggleMute.into());
    }
    if input.0.pause_toggled() {
        writer.write(GameCommand::TogglePause.into());
    }

    // Releasing every key keeps the previous request buffered
    if let Some(direction) = requested_direction(input.0.as_ref()) {
        trace!(direction = direction.as_ref(), "Direction requested");
        writer.write(GameCommand::MovePlayer(direction).into());
    }
}

#[cfg(feature = "sdl")]
pub mod keyboard {
    use sdl2::{
        event::Event,
        keyboard::{Keycode, Scancode},
        EventPump,
    };

    use super::InputSource;
    use crate::map::direction::Direction;

    /// Keyboard input read from the SDL event pump.
    ///
    /// Directions are read from the live keyboard state; toggles and exit are edge-triggered
    /// key presses.
    pub struct KeyboardInput {
        pump: EventPump,
        mute: bool,
        pause: bool,
        quit: bool,
    }

    impl KeyboardInput {
        pub fn new(pump: EventPump) -> Self {
            Self {
                pump,
                mute: false,
                pause: false,
                quit: false,
            }
        }

        fn scancode(direction: Direction) -> Scancode {
            match direction {
                Direction::Right => Scancode::Right,
                Direction::Left => Scancode::Left,
                Direction::Up => Scancode::Up,
                Direction::Down => Scancode::Down,
            }
        }
    }

    impl InputSource for KeyboardInput {
        fn poll(&mut self) {
            self.mute = false;
            self.pause = false;

            for event in self.pump.poll_iter() {
                match event {
                    Event::Quit { .. } => self.quit = true,
                    Event::KeyDown {
                        keycode: Some(key),
                        repeat: false,
                        ..
                    } => match key {
                        Keycode::Escape | Keycode::Q => self.quit = true,
                        Keycode::M => self.mute = true,
                        Keycode::P => self.pause = true,
                        _ => {}
                    },
                    _ => {}
                }
            }
        }

        fn is_direction_held(&self, direction: Direction) -> bool {
            self.pump.keyboard_state().is_scancode_pressed(Self::scancode(direction))
        }

        fn mute_toggled(&self) -> bool {
            self.mute
        }

        fn pause_toggled(&self) -> bool {
            self.pause
        }

        fn quit_requested(&self) -> bool {
            self.quit
        }
    }
}
