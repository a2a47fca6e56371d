use std::time::Duration;

use bevy_ecs::{bundle::Bundle, component::Component, resource::Resource};
use glam::Vec2;

use crate::map::direction::Direction;
use crate::systems::{animation::SpriteAnimation, power::PowerMode};

/// A tag component for entities that are controlled by the player.
#[derive(Default, Component)]
pub struct PlayerControlled;

/// A ghost, identified by its row in the ghost sprite sheet.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ghost(pub u8);

/// Top-left corner of an entity's bounding box, in pixels.
#[derive(Component, Debug, Clone, Copy, PartialEq, Default)]
pub struct Position(pub Vec2);

/// The committed travel direction and the distance covered per tick.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Velocity {
    pub direction: Direction,
    pub speed: f32,
}

/// The most recently requested direction, kept until the entity can turn into it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferedDirection(pub Direction);

/// Square bounding box used for wall collision.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub size: f32,
}

#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: PlayerControlled,
    pub position: Position,
    pub velocity: Velocity,
    pub buffered_direction: BufferedDirection,
    pub animation: SpriteAnimation,
    pub collider: Collider,
    pub power_mode: PowerMode,
}

/// Ghosts never move, so they carry no velocity and are skipped by the movement system.
#[derive(Bundle)]
pub struct GhostBundle {
    pub ghost: Ghost,
    pub position: Position,
    pub collider: Collider,
}

#[derive(Resource, Debug, Default)]
pub struct GlobalState {
    pub exit: bool,
}

#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScoreResource(pub u32);

/// Seconds elapsed since the previous tick.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct DeltaTime(pub f32);

/// Game time elapsed since the world was created, advanced once per tick.
///
/// Timed effects store deadlines against this clock rather than the wall clock, so pausing
/// the game pauses them too.
#[derive(Resource, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    pub elapsed: Duration,
}

impl GameClock {
    pub fn advance(&mut self, delta: Duration) {
        self.elapsed += delta;
    }
}
