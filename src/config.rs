use crate::consts;
use crate::game::Bounds;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct Config {
    /// Playing field & timing settings
    #[serde(default)]
    pub(crate) grid: GridConfig,

    /// File to write logs to
    #[serde(default)]
    pub(crate) log_file: Option<PathBuf>,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("gridsnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Validate the configuration and resolve it into the values the game
    /// runs with
    pub(crate) fn settings(&self) -> Result<Settings, ConfigError> {
        let bounds =
            Bounds::new(self.grid.width, self.grid.height).ok_or(ConfigError::EmptyGrid)?;
        if self.grid.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        Ok(Settings {
            bounds,
            tick_period: Duration::from_millis(self.grid.tick_ms),
            seed: self.grid.seed,
            log_file: self.log_file.clone(),
        })
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub(crate) struct GridConfig {
    /// Width of the grid in cells
    pub(crate) width: u16,

    /// Height of the grid in cells
    pub(crate) height: u16,

    /// Milliseconds between movements of the snake
    pub(crate) tick_ms: u64,

    /// Seed for the random number generator that places food
    pub(crate) seed: Option<u64>,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            width: consts::GRID_WIDTH,
            height: consts::GRID_HEIGHT,
            tick_ms: consts::TICK_MILLIS,
            seed: None,
        }
    }
}

/// Validated configuration, after command-line overrides
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Settings {
    pub(crate) bounds: Bounds,
    pub(crate) tick_period: Duration,
    pub(crate) seed: Option<u64>,
    pub(crate) log_file: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("grid width and height must both be at least 1")]
    EmptyGrid,
    #[error("tick-ms must be at least 1")]
    ZeroTick,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn default_settings() {
        let settings = Config::default().settings().unwrap();
        assert_eq!(
            settings,
            Settings {
                bounds: Bounds::new(40, 20).unwrap(),
                tick_period: Duration::from_millis(100),
                seed: None,
                log_file: None,
            }
        );
    }

    #[test]
    fn parse_full() {
        let cfg: Config = toml::from_str(concat!(
            "log-file = \"/tmp/gridsnake.log\"\n",
            "\n",
            "[grid]\n",
            "width = 10\n",
            "height = 8\n",
            "tick-ms = 250\n",
            "seed = 42\n",
        ))
        .unwrap();
        assert_eq!(
            cfg,
            Config {
                grid: GridConfig {
                    width: 10,
                    height: 8,
                    tick_ms: 250,
                    seed: Some(42),
                },
                log_file: Some(PathBuf::from("/tmp/gridsnake.log")),
            }
        );
    }

    #[test]
    fn parse_partial_grid() {
        let cfg: Config = toml::from_str("[grid]\nheight = 30\n").unwrap();
        assert_eq!(
            cfg.grid,
            GridConfig {
                height: 30,
                ..GridConfig::default()
            }
        );
        assert_eq!(cfg.log_file, None);
    }

    #[test]
    fn parse_empty() {
        let cfg: Config = toml::from_str("").unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn unknown_key() {
        let r = toml::from_str::<Config>("[grid]\ndepth = 3\n");
        assert!(r.is_err());
    }

    #[test]
    fn zero_width() {
        let cfg: Config = toml::from_str("[grid]\nwidth = 0\n").unwrap();
        assert!(matches!(cfg.settings(), Err(ConfigError::EmptyGrid)));
    }

    #[test]
    fn zero_tick() {
        let cfg: Config = toml::from_str("[grid]\ntick-ms = 0\n").unwrap();
        assert!(matches!(cfg.settings(), Err(ConfigError::ZeroTick)));
    }

    #[test]
    fn load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[grid]\nwidth = 12\nheight = 6").unwrap();
        let cfg = Config::load(file.path(), false).unwrap();
        assert_eq!(cfg.settings().unwrap().bounds, Bounds::new(12, 6).unwrap());
    }

    #[test]
    fn load_missing_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load(&dir.path().join("config.toml"), true).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn load_missing_not_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let r = Config::load(&dir.path().join("config.toml"), false);
        assert!(matches!(r, Err(ConfigError::Read(_))));
    }

    #[test]
    fn load_invalid() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[grid]\nwidth = \"wide\"").unwrap();
        let r = Config::load(file.path(), false);
        assert!(matches!(r, Err(ConfigError::Parse(_))));
    }
}
