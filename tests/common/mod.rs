#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use bevy_ecs::{entity::Entity, event::Events, world::World};
use glam::Vec2;
use tile_pacman::{
    audio::{AudioSink, Sound},
    constants::{
        mechanics::{ENTITY_SIZE, PLAYER_SPEED},
        LOOP_TIME,
    },
    error::{GameError, TextureError},
    events::GameEvent,
    map::{direction::Direction, grid::TileGrid, parser::MapParser, tile::Tile},
    systems::{
        AudioEvent, AudioState, BufferedDirection, Collider, DeltaTime, GameClock, GameStage, Ghost, GhostBundle, GlobalState,
        InputSource, PauseState, PlayerBundle, PlayerControlled, Position, PowerMode, RenderSurface, ScoreResource, SpriteAnimation,
        SpriteSheet, Velocity,
    },
};

/// Parses a map literal, panicking on malformed input.
pub fn grid(text: &str) -> TileGrid {
    MapParser::parse(text).expect("test map should parse")
}

/// A `width` x `height` grid with a wall border and an empty interior.
pub fn open_grid(width: usize, height: usize) -> TileGrid {
    let rows = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                        Tile::VerticalWall
                    } else {
                        Tile::Empty
                    }
                })
                .collect()
        })
        .collect();
    TileGrid::from_rows(rows).expect("test grid should be rectangular")
}

/// Creates a basic test world with required resources for ECS systems
pub fn create_test_world(grid: TileGrid) -> World {
    let mut world = World::new();

    world.insert_resource(Events::<GameEvent>::default());
    world.insert_resource(Events::<GameError>::default());
    world.insert_resource(Events::<AudioEvent>::default());
    world.insert_resource(ScoreResource(0));
    world.insert_resource(AudioState::default());
    world.insert_resource(GlobalState { exit: false });
    world.insert_resource(GameStage::default());
    world.insert_resource(PauseState::default());
    world.insert_resource(GameClock::default());
    world.insert_resource(DeltaTime(LOOP_TIME.as_secs_f32()));
    world.insert_resource(grid);

    world
}

/// Spawns a controllable player with the standard speed and bounding box.
pub fn spawn_test_player(world: &mut World, position: Vec2) -> Entity {
    world
        .spawn(PlayerBundle {
            player: PlayerControlled,
            position: Position(position),
            velocity: Velocity {
                direction: Direction::Right,
                speed: PLAYER_SPEED,
            },
            buffered_direction: BufferedDirection(Direction::Right),
            animation: SpriteAnimation::default(),
            collider: Collider { size: ENTITY_SIZE },
            power_mode: PowerMode::default(),
        })
        .id()
}

pub fn spawn_test_ghost(world: &mut World, position: Vec2, id: u8) -> Entity {
    world
        .spawn(GhostBundle {
            ghost: Ghost(id),
            position: Position(position),
            collider: Collider { size: ENTITY_SIZE },
        })
        .id()
}

/// Sends a game event to the world
pub fn send_game_event(world: &mut World, event: impl Into<GameEvent>) {
    world.resource_mut::<Events<GameEvent>>().send(event.into());
}

/// Audio events written since the last update.
pub fn audio_events(world: &World) -> Vec<AudioEvent> {
    world
        .resource::<Events<AudioEvent>>()
        .iter_current_update_events()
        .copied()
        .collect()
}

pub fn player_position(world: &mut World) -> Vec2 {
    world
        .query_filtered::<&Position, bevy_ecs::query::With<PlayerControlled>>()
        .single(world)
        .expect("exactly one player")
        .0
}

/// Everything a [`RecordingAudio`] was asked to do.
#[derive(Debug, Default)]
pub struct AudioLog {
    pub played: Vec<Sound>,
    pub music_started: usize,
    pub music_stopped: usize,
    pub stream_updates: usize,
    pub volume: Option<f32>,
    pub muted: bool,
    /// Sounds reported as still playing by `is_playing`.
    pub still_playing: Vec<Sound>,
}

/// An audio sink that records calls into a shared log.
#[derive(Clone, Default)]
pub struct RecordingAudio(pub Rc<RefCell<AudioLog>>);

impl AudioSink for RecordingAudio {
    fn play_music(&mut self) {
        self.0.borrow_mut().music_started += 1;
    }
    fn stop_music(&mut self) {
        self.0.borrow_mut().music_stopped += 1;
    }
    fn set_volume(&mut self, volume: f32) {
        self.0.borrow_mut().volume = Some(volume);
    }
    fn update_stream(&mut self) {
        self.0.borrow_mut().stream_updates += 1;
    }
    fn set_muted(&mut self, muted: bool) {
        self.0.borrow_mut().muted = muted;
    }
    fn play(&mut self, sound: Sound) {
        let mut log = self.0.borrow_mut();
        log.played.push(sound);
        log.still_playing.push(sound);
    }
    fn is_playing(&self, sound: Sound) -> bool {
        self.0.borrow().still_playing.contains(&sound)
    }
}

/// What the scripted keyboard reports on the next poll.
#[derive(Debug, Default)]
pub struct InputScript {
    pub held: Vec<Direction>,
    pub mute: bool,
    pub pause: bool,
    pub quit: bool,
    pub polls: usize,
}

/// An input source driven by a shared script. Toggles fire once and are then cleared.
#[derive(Clone, Default)]
pub struct ScriptedInput {
    pub script: Rc<RefCell<InputScript>>,
    mute: bool,
    pause: bool,
    quit: bool,
}

impl ScriptedInput {
    pub fn new(script: Rc<RefCell<InputScript>>) -> Self {
        Self {
            script,
            ..Default::default()
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) {
        let mut script = self.script.borrow_mut();
        script.polls += 1;
        self.mute = std::mem::take(&mut script.mute);
        self.pause = std::mem::take(&mut script.pause);
        self.quit = script.quit;
    }
    fn is_direction_held(&self, direction: Direction) -> bool {
        self.script.borrow().held.contains(&direction)
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

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Tile(Tile, Vec2),
    Sprite(SpriteSheet, u32, Vec2),
    Text(String, Vec2),
    Present,
}

/// A drawing target that records every call. Optionally fails on sprites or text.
#[derive(Clone, Default)]
pub struct RecordingSurface {
    pub calls: Rc<RefCell<Vec<DrawCall>>>,
    pub fail_sprites: bool,
    pub fail_text: bool,
}

impl RenderSurface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.borrow_mut().push(DrawCall::Clear);
    }
    fn draw_tile(&mut self, tile: Tile, position: Vec2) -> Result<(), TextureError> {
        self.calls.borrow_mut().push(DrawCall::Tile(tile, position));
        Ok(())
    }
    fn draw_sprite(&mut self, sheet: SpriteSheet, frame: u32, position: Vec2) -> Result<(), TextureError> {
        if self.fail_sprites {
            return Err(TextureError::RenderFailed("no sprite sheet".to_string()));
        }
        self.calls.borrow_mut().push(DrawCall::Sprite(sheet, frame, position));
        Ok(())
    }
    fn draw_text(&mut self, text: &str, position: Vec2) -> Result<(), TextureError> {
        if self.fail_text {
            return Err(TextureError::RenderFailed("no font".to_string()));
        }
        self.calls.borrow_mut().push(DrawCall::Text(text.to_string(), position));
        Ok(())
    }
    fn present(&mut self) {
        self.calls.borrow_mut().push(DrawCall::Present);
    }
}
