use bevy_ecs::{
    component::Component,
    system::{Query, Res},
};

use crate::constants::animation::{ANIMATION_SPEED, FRAMES_PER_DIRECTION};
use crate::map::direction::Direction;
use crate::systems::{components::Velocity, state::GameStage};

/// Returns the first sprite-sheet frame of a direction's walk cycle.
pub const fn frame_window_start(direction: Direction) -> u32 {
    direction.as_usize() as u32 * FRAMES_PER_DIRECTION
}

/// Ping-pong walk cycle over the three frames belonging to the current direction.
///
/// Right uses frames 0-2, Left 3-5, Up 6-8 and Down 9-11.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteAnimation {
    pub frame: u32,
    pub forward: bool,
    /// Ticks seen so far; the frame advances whenever this is a multiple of the frame duration.
    pub ticker: u32,
    /// Never zero; only set through [`SpriteAnimation::new`].
    frame_duration: u32,
}

impl Default for SpriteAnimation {
    fn default() -> Self {
        Self::new(Direction::default(), ANIMATION_SPEED)
    }
}

impl SpriteAnimation {
    pub fn new(direction: Direction, frame_duration: u32) -> Self {
        Self {
            frame: frame_window_start(direction),
            forward: true,
            ticker: 0,
            frame_duration: frame_duration.max(1),
        }
    }

    /// Ticks between frame changes.
    pub fn frame_duration(&self) -> u32 {
        self.frame_duration
    }

    /// Jumps to the start of a direction's window, walking forwards.
    pub fn reset(&mut self, direction: Direction) {
        self.frame = frame_window_start(direction);
        self.forward = true;
    }

    /// Advances one tick, stepping the frame on every `frame_duration`-th tick (starting with the first).
    pub fn tick(&mut self, direction: Direction) {
        let start = frame_window_start(direction);
        let end = start + FRAMES_PER_DIRECTION - 1;

        if !(start..=end).contains(&self.frame) {
            self.reset(direction);
        }

        if self.ticker % self.frame_duration == 0 {
            if self.forward {
                self.frame += 1;
                if self.frame >= end {
                    self.forward = false;
                }
            } else {
                self.frame -= 1;
                if self.frame <= start {
                    self.forward = true;
                }
            }
        }

        self.ticker = self.ticker.wrapping_add(1);
    }

    /// Index of the current frame within its direction's window (0-2).
    pub fn window_offset(&self) -> u32 {
        self.frame % FRAMES_PER_DIRECTION
    }
}

/// Advances every animated entity's walk cycle for the direction it is facing.
pub fn animation_system(stage: Res<GameStage>, mut query: Query<(&Velocity, &mut SpriteAnimation)>) {
    if stage.is_terminal() {
        return;
    }

    for (velocity, mut animation) in query.iter_mut() {
        animation.tick(velocity.direction);
    }
}
