//! The Entity-Component-System (ECS) module.
//!
//! This module contains all the ECS-related logic, including components, systems,
//! and resources.

pub mod animation;
pub mod audio;
pub mod collision;
pub mod components;
pub mod input;
pub mod item;
pub mod movement;
pub mod player;
pub mod power;
pub mod render;
pub mod state;

pub use self::animation::*;
pub use self::audio::*;
pub use self::collision::*;
pub use self::components::*;
pub use self::input::*;
pub use self::item::*;
pub use self::movement::*;
pub use self::player::*;
pub use self::power::*;
pub use self::render::*;
pub use self::state::*;
