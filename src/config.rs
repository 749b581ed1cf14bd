use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::game::{SessionSettings, Theme};

/// Game settings: which board to deal and how long a finished pair stays visible.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub theme: Theme,
    pub pair_count: usize,
    pub reveal_delay_ms: u64,
    /// Fixed shuffle seed; omit for a fresh shuffle every run
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            theme: Theme::Fruits,
            pair_count: 2,
            reveal_delay_ms: 1000,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            theme: self.theme,
            pair_count: self.pair_count,
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
        }
    }
}

/// Where log output goes. The terminal belongs to the UI, so logging is off
/// unless a file is given.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub file: Option<PathBuf>,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            file: None,
            level: "info".to_string(),
        }
    }
}

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub game: GameConfig,
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            eprintln!("Warning: config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    ///
    /// Pair counts above what the theme holds are not rejected here; the deck
    /// builder clamps them.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.pair_count == 0 {
            return Err(ConfigError::Validation(
                "game.pair_count must be > 0".into(),
            ));
        }
        if self.game.reveal_delay_ms == 0 {
            return Err(ConfigError::Validation(
                "game.reveal_delay_ms must be > 0".into(),
            ));
        }
        if log::LevelFilter::from_str(&self.logging.level).is_err() {
            return Err(ConfigError::Validation(format!(
                "logging.level '{}' is not one of off, error, warn, info, debug, trace",
                self.logging.level
            )));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
