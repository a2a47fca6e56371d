//! Runtime configuration, read from the command line.

use std::env;
use std::path::PathBuf;

use crate::constants::assets;
use crate::error::{ConfigError, GameResult};

/// Environment variable consulted for the map path when `--map` is not given.
pub const MAP_ENV_VAR: &str = "PACMAN_MAP";

/// Main application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Map file to load
    pub map_path: PathBuf,
    /// Directory holding sprite sheets, the font, and sounds
    pub asset_dir: PathBuf,
    /// Start with audio muted
    pub start_muted: bool,
    /// Log at debug level by default
    pub verbose: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map_path: PathBuf::from(assets::DEFAULT_MAP),
            asset_dir: PathBuf::from(assets::DEFAULT_ASSET_DIR),
            start_muted: false,
            verbose: false,
        }
    }
}

impl GameConfig {
    /// Builds the configuration from the process arguments and environment.
    ///
    /// # Errors
    ///
    /// Returns `GameError::Config` if the arguments are malformed.
    pub fn from_env() -> GameResult<Self> {
        Ok(Self::from_args(env::args().skip(1), env::var(MAP_ENV_VAR).ok())?)
    }

    /// Builds the configuration from command-line arguments (without the program name).
    ///
    /// `env_map` is the fallback map path, used only when `--map` is absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnknownArgument` for unrecognised flags and
    /// `ConfigError::MissingValue` when a flag that takes a value ends the argument list.
    pub fn from_args<I>(args: I, env_map: Option<String>) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut config = Self::default();
        let mut map_flag = None;
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--map" => map_flag = Some(args.next().ok_or(ConfigError::MissingValue("--map"))?),
                "--assets" => config.asset_dir = PathBuf::from(args.next().ok_or(ConfigError::MissingValue("--assets"))?),
                "--mute" => config.start_muted = true,
                "--verbose" | "-v" => config.verbose = true,
                _ => return Err(ConfigError::UnknownArgument(arg)),
            }
        }

        if let Some(path) = map_flag.or(env_map.filter(|p| !p.is_empty())) {
            config.map_path = PathBuf::from(path);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::from_args(Vec::<String>::new(), None).unwrap();
        assert_eq!(config, GameConfig::default());
        assert_eq!(config.map_path, PathBuf::from("assets/maps/one.map"));
    }

    #[test]
    fn test_flags() {
        let config = GameConfig::from_args(["--map", "level.map", "--assets", "res", "--mute", "-v"], None).unwrap();
        assert_eq!(config.map_path, PathBuf::from("level.map"));
        assert_eq!(config.asset_dir, PathBuf::from("res"));
        assert!(config.start_muted);
        assert!(config.verbose);
    }

    #[test]
    fn test_env_fallback() {
        let config = GameConfig::from_args(Vec::<String>::new(), Some("env.map".to_string())).unwrap();
        assert_eq!(config.map_path, PathBuf::from("env.map"));

        let config = GameConfig::from_args(["--map", "flag.map"], Some("env.map".to_string())).unwrap();
        assert_eq!(config.map_path, PathBuf::from("flag.map"));
    }

    #[test]
    fn test_errors() {
        assert_eq!(
            GameConfig::from_args(["--map"], None),
            Err(ConfigError::MissingValue("--map"))
        );
        assert_eq!(
            GameConfig::from_args(["--fullscreen"], None),
            Err(ConfigError::UnknownArgument("--fullscreen".to_string()))
        );
    }

    #[test]
    fn test_errors_surface_as_game_errors() {
        let error: crate::error::GameError = GameConfig::from_args(["--assets"], None).unwrap_err().into();
        assert!(matches!(
            error,
            crate::error::GameError::Config(ConfigError::MissingValue("--assets"))
        ));
        assert_eq!(error.to_string(), "Configuration error: Missing value for --assets");
    }
}
