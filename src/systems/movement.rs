use bevy_ecs::system::{Query, Res};
use glam::Vec2;
use tracing::trace;

use crate::map::{direction::Direction, grid::TileGrid};
use crate::systems::{
    animation::SpriteAnimation,
    collision::is_blocked,
    components::{BufferedDirection, Collider, Position, Velocity},
};

/// What happened to an entity during one movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MovementOutcome {
    /// The buffered direction was committed this tick.
    pub turned: bool,
    /// The entity advanced by its full speed.
    pub moved: bool,
}

/// The position one step of `speed` pixels away in `direction`.
pub fn step(position: Vec2, direction: Direction, speed: f32) -> Vec2 {
    position + direction.as_vec2() * speed
}

/// Runs one tick of the direction state machine for a single entity.
///
/// A buffered direction that differs from the current one is committed only if a step in it is
/// free; otherwise it stays buffered and is retried next tick. The entity then takes one full step
/// in its committed direction, or stays put if that step is blocked.
pub fn advance(
    grid: &TileGrid,
    position: &mut Vec2,
    velocity: &mut Velocity,
    buffered: Direction,
    box_size: f32,
) -> MovementOutcome {
    let mut outcome = MovementOutcome::default();

    if buffered != velocity.direction && !is_blocked(grid, step(*position, buffered, velocity.speed), box_size) {
        velocity.direction = buffered;
        outcome.turned = true;
    }

    let next = step(*position, velocity.direction, velocity.speed);
    if !is_blocked(grid, next, box_size) {
        *position = next;
        outcome.moved = true;
    }

    outcome
}

/// Moves every entity that takes directional input, resetting its walk cycle when it turns.
pub fn movement_system(
    grid: Res<TileGrid>,
    mut query: Query<(
        &mut Position,
        &mut Velocity,
        &BufferedDirection,
        &Collider,
        Option<&mut SpriteAnimation>,
    )>,
) {
    for (mut position, mut velocity, buffered, collider, animation) in query.iter_mut() {
        let outcome = advance(&grid, &mut position.0, &mut velocity, buffered.0, collider.size);

        if outcome.turned {
            trace!(direction = velocity.direction.as_ref(), position = ?position.0, "Direction committed");
            if let Some(mut animation) = animation {
                animation.reset(velocity.direction);
            }
        }
    }
}
