use std::process::ExitCode;

use tile_pacman::{app::App, config::GameConfig, constants::LOOP_TIME, logging, map::parser::MapParser};
use tracing::{error, info};

/// The main entry point of the application.
///
/// Reads the configuration, loads the map, opens the window, and runs the game loop until the
/// player quits or the game ends. A map that cannot be loaded is fatal.
pub fn main() -> ExitCode {
    let config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            // Logging is not set up yet
            eprintln!("{e}");
            eprintln!("Usage: tile-pacman [--map <path>] [--assets <dir>] [--mute] [--verbose]");
            return ExitCode::from(2);
        }
    };

    logging::setup_logging(config.verbose);

    let grid = match MapParser::load(&config.map_path) {
        Ok(grid) => grid,
        Err(e) => {
            error!("Failed to load map: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut app = match App::new(&config, grid) {
        Ok(app) => app,
        Err(e) => {
            error!("Could not create app: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(loop_time = ?LOOP_TIME, "Starting game loop");
    while app.run() {}

    info!(outcome = ?app.game.outcome(), score = app.game.score(), "Game finished");
    ExitCode::SUCCESS
}
