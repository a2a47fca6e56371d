use std::time::Duration;

use bevy_ecs::{
    component::Component,
    system::{Query, Res, ResMut},
};
use tracing::debug;

use crate::constants::mechanics::POWER_MODE_DURATION;
use crate::systems::components::{DeltaTime, GameClock};

/// Power mode, during which touching a ghost eats it instead of ending the game.
///
/// Expiry is a deadline on the [`GameClock`]; [`PowerMode::is_active`] compares against it
/// directly, so an expired power mode reads as inactive even before the expiry system runs.
#[derive(Component, Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PowerMode {
    pub expires_at: Option<Duration>,
}

impl PowerMode {
    /// Activates power mode for the standard duration, replacing any existing deadline.
    pub fn activate(&mut self, now: Duration) {
        self.expires_at = Some(now + POWER_MODE_DURATION);
    }

    pub fn deactivate(&mut self) {
        self.expires_at = None;
    }

    pub fn is_active(&self, now: Duration) -> bool {
        self.expires_at.is_some_and(|deadline| now < deadline)
    }
}

/// Advances the game clock by this tick's delta time.
pub fn clock_system(delta_time: Res<DeltaTime>, mut clock: ResMut<GameClock>) {
    clock.advance(Duration::from_secs_f32(delta_time.0.max(0.0)));
}

/// Clears power mode once its deadline has passed.
pub fn power_expiry_system(clock: Res<GameClock>, mut query: Query<&mut PowerMode>) {
    for mut power in query.iter_mut() {
        if power.expires_at.is_some() && !power.is_active(clock.elapsed) {
            debug!(elapsed = ?clock.elapsed, "Power mode expired");
            power.deactivate();
        }
    }
}
