//! Configuration loading and typed config structures for the Waypoint engine.
//!
//! The canonical configuration lives in `waypoint-config.yaml` at the
//! project root. Every section and field has a default, so an empty file
//! (or no file at all) yields a playable configuration.

use std::path::Path;

use serde::Deserialize;

/// Environment variable that overrides the configuration file path.
pub const CONFIG_PATH_ENV: &str = "WAYPOINT_CONFIG";

/// Default configuration file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "waypoint-config.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is outside its allowed range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `waypoint-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Tick driver settings.
    #[serde(default)]
    pub session: SessionConfig,

    /// Gameplay rules applied to fresh and loaded games.
    #[serde(default)]
    pub rules: RulesConfig,

    /// Game content source.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Save file settings.
    #[serde(default)]
    pub persistence: PersistenceConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not to an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.session.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "session.tick_interval_ms",
                reason: "must be greater than zero".to_owned(),
            });
        }
        if !self.rules.starting_energy.is_finite() || self.rules.starting_energy <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "rules.starting_energy",
                reason: format!("must be positive, got {}", self.rules.starting_energy),
            });
        }
        if !self.rules.progress_multiplier.is_finite() || self.rules.progress_multiplier <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "rules.progress_multiplier",
                reason: format!("must be positive, got {}", self.rules.progress_multiplier),
            });
        }
        Ok(())
    }
}

/// Tick driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionConfig {
    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many ticks. Zero runs until interrupted.
    #[serde(default)]
    pub max_ticks: u64,

    /// Perform an energy reset automatically when energy runs out.
    #[serde(default = "default_true")]
    pub auto_reset: bool,

    /// Let the headless autopilot pick tasks when none is active.
    #[serde(default = "default_true")]
    pub autopilot: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: 0,
            auto_reset: true,
            autopilot: true,
        }
    }
}

/// Gameplay rules.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RulesConfig {
    /// Current and maximum energy of a fresh game.
    #[serde(default = "default_starting_energy")]
    pub starting_energy: f64,

    /// Global task throughput multiplier. Never persisted.
    #[serde(default = "default_progress_multiplier")]
    pub progress_multiplier: f64,

    /// Whether a finished repetition keeps the task selected.
    #[serde(default = "default_true")]
    pub repeat_tasks: bool,

    /// Consume held items automatically at the start of every tick.
    #[serde(default)]
    pub auto_use_items: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            starting_energy: default_starting_energy(),
            progress_multiplier: default_progress_multiplier(),
            repeat_tasks: true,
            auto_use_items: false,
        }
    }
}

/// Game content configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CatalogConfig {
    /// YAML catalog to load instead of the built-in content.
    #[serde(default)]
    pub path: Option<String>,
}

/// Save file configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PersistenceConfig {
    /// Whether to read and write the save file at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Path of the JSON save file.
    #[serde(default = "default_save_path")]
    pub save_path: String,
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            save_path: default_save_path(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive (trace, debug, info, warn, error).
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

const fn default_tick_interval_ms() -> u64 {
    100
}

const fn default_true() -> bool {
    true
}

const fn default_starting_energy() -> f64 {
    100.0
}

const fn default_progress_multiplier() -> f64 {
    1.0
}

fn default_save_path() -> String {
    "saves/incrementalGameSave.json".to_owned()
}

fn default_log_level() -> String {
    "info".to_owned()
}
