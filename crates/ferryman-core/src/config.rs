//! Configuration loading and typed config structures for the Ferryman game.
//!
//! The canonical configuration lives in `ferryman-config.yaml` next to the
//! binary. Every section and field is optional; anything left out takes
//! the default documented on its field.

use std::collections::BTreeMap;
use std::path::Path;

use ferryman_shades::SpawnerConfig;
use ferryman_types::{OLYMPIANS, ResourceKind};
use serde::Deserialize;

/// Environment variable that overrides `engine.save_path`.
pub const SAVE_PATH_ENV: &str = "FERRYMAN_SAVE_PATH";

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

    /// The values parsed but make no sense together.
    #[error("invalid configuration: {reason}")]
    Invalid {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level game configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct GameConfig {
    /// Day clock settings.
    #[serde(default)]
    pub clock: ClockConfig,

    /// Docks throughput.
    #[serde(default)]
    pub docks: DocksConfig,

    /// Ledger cast and starting balances.
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// Shade spawner settings.
    #[serde(default)]
    pub spawner: SpawnerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Headless engine settings.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl GameConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `FERRYMAN_SAVE_PATH` overrides `engine.save_path` when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if validation fails.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.engine.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| {
            Err(ConfigError::Invalid {
                reason: reason.to_owned(),
            })
        };

        if self.clock.max_days == 0 {
            return invalid("clock.max_days must be at least 1");
        }
        if self.clock.starting_day > self.clock.max_days {
            return invalid("clock.starting_day must not exceed clock.max_days");
        }
        if self.docks.daily_processing_limit == 0 {
            return invalid("docks.daily_processing_limit must be at least 1");
        }
        if self.spawner.batch_size == 0 {
            return invalid("spawner.batch_size must be at least 1");
        }
        if self.ledger.starting_resources.values().any(|&v| v < 0) {
            return invalid("ledger.starting_resources must not be negative");
        }
        if !(0.0..=1.0).contains(&self.engine.sort_accuracy) {
            return invalid("engine.sort_accuracy must be between 0 and 1");
        }
        Ok(())
    }
}

/// Day clock configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ClockConfig {
    /// Length of a run in days. Advancing past this day ends the game.
    #[serde(default = "default_max_days")]
    pub max_days: u32,

    /// Day number the clock starts on.
    #[serde(default)]
    pub starting_day: u32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_days: default_max_days(),
            starting_day: 0,
        }
    }
}

/// Docks configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocksConfig {
    /// Maximum shades ferried per drain.
    #[serde(default = "default_daily_processing_limit")]
    pub daily_processing_limit: u32,
}

impl Default for DocksConfig {
    fn default() -> Self {
        Self {
            daily_processing_limit: default_daily_processing_limit(),
        }
    }
}

/// Ledger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LedgerConfig {
    /// Cast members whose relationships are tracked.
    #[serde(default = "default_cast")]
    pub cast: Vec<String>,

    /// Opening balances; unlisted resources start at zero.
    #[serde(default)]
    pub starting_resources: BTreeMap<ResourceKind, i64>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            cast: default_cast(),
            starting_resources: BTreeMap::new(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
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

/// Headless engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EngineConfig {
    /// Where the final save is written.
    #[serde(default = "default_save_path")]
    pub save_path: String,

    /// Probability that the scripted sorter picks the correct afterlife.
    #[serde(default = "default_sort_accuracy")]
    pub sort_accuracy: f64,

    /// Shades the scripted player hires each day before sorting the rest.
    #[serde(default = "default_hires_per_day")]
    pub hires_per_day: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            save_path: default_save_path(),
            sort_accuracy: default_sort_accuracy(),
            hires_per_day: default_hires_per_day(),
        }
    }
}

impl EngineConfig {
    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(path) = std::env::var(SAVE_PATH_ENV) {
            self.save_path = path;
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_max_days() -> u32 {
    30
}

const fn default_daily_processing_limit() -> u32 {
    5
}

fn default_cast() -> Vec<String> {
    OLYMPIANS.iter().map(|&name| name.to_owned()).collect()
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_save_path() -> String {
    "ferryman-save.json".to_owned()
}

const fn default_sort_accuracy() -> f64 {
    0.8
}

const fn default_hires_per_day() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_design_values() {
        let config = GameConfig::default();
        assert_eq!(config.clock.max_days, 30);
        assert_eq!(config.clock.starting_day, 0);
        assert_eq!(config.docks.daily_processing_limit, 5);
        assert_eq!(config.spawner.batch_size, 5);
        assert_eq!(config.ledger.cast.len(), OLYMPIANS.len());
        assert!(config.ledger.starting_resources.is_empty());
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
clock:
  max_days: 10
  starting_day: 2

docks:
  daily_processing_limit: 3

ledger:
  cast:
    - Hades
    - Persephone
  starting_resources:
    Obols: 25
    Herbs: 4

spawner:
  batch_size: 6
  max_spawnable_level: 4
  seed: 99

logging:
  level: debug

engine:
  sort_accuracy: 0.5
  hires_per_day: 0
";

        let config = GameConfig::parse(yaml);
        assert!(config.is_ok(), "{config:?}");
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.clock.max_days, 10);
        assert_eq!(config.clock.starting_day, 2);
        assert_eq!(config.docks.daily_processing_limit, 3);
        assert_eq!(config.ledger.cast, vec!["Hades", "Persephone"]);
        assert_eq!(
            config.ledger.starting_resources.get(&ResourceKind::Obols),
            Some(&25)
        );
        assert_eq!(config.spawner.batch_size, 6);
        assert_eq!(config.spawner.seed, Some(99));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.engine.hires_per_day, 0);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = GameConfig::parse("docks:\n  daily_processing_limit: 8\n");
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.docks.daily_processing_limit, 8);
        assert_eq!(config.clock.max_days, 30);
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(GameConfig::parse("").is_ok());
    }

    #[test]
    fn zero_processing_limit_is_invalid() {
        let result = GameConfig::parse("docks:\n  daily_processing_limit: 0\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn starting_day_past_the_end_is_invalid() {
        let result = GameConfig::parse("clock:\n  max_days: 3\n  starting_day: 4\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn negative_starting_balance_is_invalid() {
        let result = GameConfig::parse("ledger:\n  starting_resources:\n    Gemstones: -1\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn accuracy_out_of_range_is_invalid() {
        let result = GameConfig::parse("engine:\n  sort_accuracy: 1.5\n");
        assert!(matches!(result, Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn unknown_resource_kind_is_a_yaml_error() {
        let result = GameConfig::parse("ledger:\n  starting_resources:\n    Ambrosia: 1\n");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("ferryman-config.yaml");
        if path.exists() {
            let config = GameConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
