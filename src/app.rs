use std::time::Instant;

use sdl2::ttf::Sdl2TtfContext;
use sdl2::{AudioSubsystem, Sdl};
use tracing::{debug, info, trace};

use crate::audio::sdl::SdlAudio;
use crate::config::GameConfig;
use crate::constants::{HUD_HEIGHT, LOOP_TIME};
use crate::error::{GameError, GameResult};
use crate::formatter;
use crate::game::Game;
use crate::map::grid::TileGrid;
use crate::platform;
use crate::systems::{canvas::SdlRenderer, keyboard::KeyboardInput};

/// Main application wrapper that manages SDL initialization, window lifecycle, and the game loop.
pub struct App {
    pub game: Game,
    last_tick: Instant,
    // Keep SDL alive for the app lifetime so subsystems (audio) are not shut down
    _sdl_context: Sdl,
    _audio_subsystem: AudioSubsystem,
}

impl App {
    /// Initializes SDL subsystems, creates a window sized to the map, and sets up the game state.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Sdl` if any SDL initialization step fails, or `GameError::Texture`
    /// if a sprite sheet cannot be loaded. Audio failures only disable sound.
    pub fn new(config: &GameConfig, grid: TileGrid) -> GameResult<Self> {
        info!("Initializing SDL2 application");
        let sdl_context = sdl2::init().map_err(GameError::Sdl)?;

        debug!("Initializing SDL2 subsystems");
        let ttf_context = sdl2::ttf::init().map_err(|e| GameError::Sdl(e.to_string()))?;
        let video_subsystem = sdl_context.video().map_err(GameError::Sdl)?;
        let audio_subsystem = sdl_context.audio().map_err(GameError::Sdl)?;
        let event_pump = sdl_context.event_pump().map_err(GameError::Sdl)?;

        // Fonts borrow the TTF context, and the renderer lives as long as the process
        let ttf_context: &'static Sdl2TtfContext = Box::leak(Box::new(ttf_context));

        let size = grid.pixel_size();
        let (width, height) = (size.x as u32, size.y as u32 + HUD_HEIGHT);
        trace!(width, height, "Creating game window");
        let window = video_subsystem
            .window("Pac-Man", width, height)
            .position_centered()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;

        trace!("Creating hardware-accelerated canvas");
        let canvas = window
            .into_canvas()
            .accelerated()
            .build()
            .map_err(|e| GameError::Sdl(e.to_string()))?;
        debug!(renderer = canvas.info().name, "Canvas renderer initialized");

        let renderer = SdlRenderer::new(canvas, ttf_context, &config.asset_dir)?;
        let audio = SdlAudio::new(&config.asset_dir);

        let mut game = Game::new(grid, config.start_muted);
        game.attach_renderer(Box::new(renderer));
        game.attach_input(Box::new(KeyboardInput::new(event_pump)));
        game.attach_audio(Box::new(audio));

        info!("Application initialization completed successfully");
        Ok(App {
            game,
            last_tick: Instant::now(),
            _sdl_context: sdl_context,
            _audio_subsystem: audio_subsystem,
        })
    }

    /// Executes a single frame of the game loop, sleeping out whatever is left of `LOOP_TIME`.
    ///
    /// # Returns
    ///
    /// `true` if the game should continue running, `false` if the game requested exit.
    pub fn run(&mut self) -> bool {
        let start = Instant::now();

        let dt = self.last_tick.elapsed().as_secs_f32();
        self.last_tick = start;

        // Increment the global tick counter for tracing
        formatter::increment_tick();

        if self.game.tick(dt) {
            return false;
        }

        match platform::frame_remaining(LOOP_TIME, start.elapsed()) {
            Some(time) => platform::sleep(time, true),
            None => trace!(behind = ?start.elapsed().saturating_sub(LOOP_TIME), "Frame over budget"),
        }

        true
    }
}
