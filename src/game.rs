//! This module contains the main game logic and state.

use bevy_ecs::event::{EventRegistry, Events};
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::World;
use glam::Vec2;
use tracing::{debug, error, info, trace};

use crate::audio::AudioSink;
use crate::constants::{
    audio::MUSIC_VOLUME,
    mechanics::{ENTITY_SIZE, PLAYER_SPEED},
    spawn, LOOP_TIME,
};
use crate::error::GameError;
use crate::events::GameEvent;
use crate::map::{direction::Direction, grid::TileGrid};
use crate::systems::{
    self, AudioEvent, AudioResource, AudioState, BufferedDirection, Collider, DeltaTime, GameClock, GameStage, Ghost,
    GhostBundle, GlobalState, InputResource, InputSource, PauseState, PlayerBundle, PlayerControlled, Position, PowerMode,
    RenderResource, RenderSurface, ScoreResource, SpriteAnimation, Velocity,
};

/// System set for all gameplay systems to ensure they run after input processing
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
enum GameplaySet {
    /// Turns raw input into commands and applies them
    Input,
    /// Advances the simulation; frozen while paused or once the game has ended
    Update,
    /// Plays audio and decides whether to exit
    Respond,
}

/// System set for drawing, which runs every tick regardless of pause or game stage
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
struct RenderSet;

/// Core game state manager built on the Bevy ECS architecture.
///
/// The `World` is the single owner of all game state: the tile grid, score, clock, stage, and
/// every entity. The `Schedule` defines the per-tick system order. Input, audio, and rendering
/// devices are optional `NonSend` resources, so a `Game` runs headless unless they are attached.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Creates a game on `grid` with the player and ghosts at their standard spawn points.
    pub fn new(grid: TileGrid, start_muted: bool) -> Game {
        Self::with_spawns(grid, spawn::PLAYER, &spawn::GHOSTS, start_muted)
    }

    /// Creates a game with explicit spawn points, one ghost per entry in `ghosts`.
    pub fn with_spawns(grid: TileGrid, player: Vec2, ghosts: &[Vec2], start_muted: bool) -> Game {
        info!(
            width = grid.width(),
            height = grid.height(),
            ghosts = ghosts.len(),
            "Starting game initialization"
        );

        let mut world = World::default();
        let mut schedule = Schedule::default();
        schedule.set_executor_kind(ExecutorKind::SingleThreaded);

        debug!("Setting up ECS event registry");
        Self::setup_ecs(&mut world);

        debug!("Inserting resources into ECS world");
        world.insert_resource(grid);
        world.insert_resource(GlobalState { exit: false });
        world.insert_resource(ScoreResource(0));
        world.insert_resource(GameStage::default());
        world.insert_resource(PauseState::default());
        world.insert_resource(GameClock::default());
        world.insert_resource(DeltaTime(LOOP_TIME.as_secs_f32()));
        world.insert_resource(AudioState { muted: start_muted });

        debug!("Configuring system execution schedule");
        Self::configure_schedule(&mut schedule);

        debug!(position = ?player, "Spawning player entity");
        world.spawn(PlayerBundle {
            player: PlayerControlled,
            position: Position(player),
            velocity: Velocity {
                direction: Direction::default(),
                speed: PLAYER_SPEED,
            },
            buffered_direction: BufferedDirection(Direction::default()),
            animation: SpriteAnimation::default(),
            collider: Collider { size: ENTITY_SIZE },
            power_mode: PowerMode::default(),
        });

        for (index, position) in ghosts.iter().enumerate() {
            trace!(ghost = index, position = ?position, "Spawning ghost");
            world.spawn(GhostBundle {
                ghost: Ghost(index as u8),
                position: Position(*position),
                collider: Collider { size: ENTITY_SIZE },
            });
        }

        info!("Game initialization completed successfully");
        Game { world, schedule }
    }

    fn setup_ecs(world: &mut World) {
        EventRegistry::register_event::<GameError>(world);
        EventRegistry::register_event::<GameEvent>(world);
        EventRegistry::register_event::<AudioEvent>(world);
    }

    fn configure_schedule(schedule: &mut Schedule) {
        let playing = |stage: Res<GameStage>, paused: Res<PauseState>| !stage.is_terminal() && !paused.active();

        schedule
            .add_systems((
                (systems::input_system, systems::player_control_system)
                    .chain()
                    .in_set(GameplaySet::Input),
                (
                    systems::clock_system,
                    systems::consume_system,
                    systems::movement_system,
                    systems::animation_system,
                    systems::ghost_contact_system,
                    systems::power_expiry_system,
                    systems::stage_system,
                )
                    .chain()
                    .in_set(GameplaySet::Update),
                (systems::audio_system, systems::exit_system)
                    .chain()
                    .in_set(GameplaySet::Respond),
                systems::render_system.in_set(RenderSet),
            ))
            .configure_sets(
                (
                    GameplaySet::Input,
                    GameplaySet::Update.run_if(playing),
                    GameplaySet::Respond,
                    RenderSet,
                )
                    .chain(),
            );
    }

    /// Attaches an audio device and starts the background music.
    pub fn attach_audio(&mut self, mut audio: Box<dyn AudioSink>) {
        audio.set_volume(MUSIC_VOLUME);
        audio.play_music();
        self.world.insert_non_send_resource(AudioResource(audio));
    }

    pub fn attach_input(&mut self, input: Box<dyn InputSource>) {
        self.world.insert_non_send_resource(InputResource(input));
    }

    pub fn attach_renderer(&mut self, surface: Box<dyn RenderSurface>) {
        self.world.insert_non_send_resource(RenderResource(surface));
    }

    /// Executes one tick of game logic by running all scheduled ECS systems.
    ///
    /// # Arguments
    ///
    /// * `dt` - Tick delta time in seconds, used to advance the game clock
    ///
    /// # Returns
    ///
    /// `true` if the game should terminate (exit command received or game over), `false` to continue
    pub fn tick(&mut self, dt: f32) -> bool {
        self.world.insert_resource(DeltaTime(dt));
        self.schedule.run(&mut self.world);

        for error in self.world.resource_mut::<Events<GameError>>().drain() {
            error!("{}", error);
        }
        self.world.resource_mut::<Events<GameEvent>>().update();
        self.world.resource_mut::<Events<AudioEvent>>().update();

        self.world.get_resource::<GlobalState>().is_some_and(|state| state.exit)
    }

    /// The current stage; terminal once the game has been won or lost.
    pub fn outcome(&self) -> GameStage {
        self.world.get_resource::<GameStage>().copied().unwrap_or_default()
    }

    pub fn score(&self) -> u32 {
        self.world.get_resource::<ScoreResource>().map_or(0, |score| score.0)
    }

    pub fn grid(&self) -> &TileGrid {
        self.world.resource::<TileGrid>()
    }

    /// The player's current top-left position, in pixels.
    pub fn player_position(&mut self) -> Option<Vec2> {
        self.world
            .query_filtered::<&Position, bevy_ecs::query::With<PlayerControlled>>()
            .single(&self.world)
            .ok()
            .map(|position| position.0)
    }
}
