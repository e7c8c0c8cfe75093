//! Configuration loading and typed config structures for the shell.
//!
//! Configuration is an optional YAML file. Every field has a default, so an
//! empty or missing file yields the stock 21 x 21 world centred on the
//! origin. A few environment variables override the file:
//!
//! - `EVENTGRID_SEED` -- fixed world seed (`world.seed`)
//! - `EVENTGRID_RESULT_LIMIT` -- results per search (`search.result_limit`)
//! - `EVENTGRID_FORMAT` -- `text` or `json` (`display.format`)

use std::path::Path;
use std::str::FromStr;

use eventgrid_world::generator::{
    DEFAULT_EVENT_FREQUENCY, DEFAULT_MAX_TICKET_PRICE, DEFAULT_MAX_TICKETS,
};
use eventgrid_world::{Bounds, DEFAULT_RESULT_LIMIT, GenerationSettings, WorldError};
use serde::Deserialize;

/// Environment variable naming the config file to load.
pub const CONFIG_PATH_ENV: &str = "EVENTGRID_CONFIG";

/// Config file looked for in the working directory when
/// [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "eventgrid.yaml";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file named by `EVENTGRID_CONFIG`, or `eventgrid.yaml`, could not
    /// be read.
    #[error("cannot read eventgrid config: {source}")]
    Io {
        /// Read failure reported by the filesystem.
        #[from]
        source: std::io::Error,
    },

    /// The config file is not a valid world/tickets/search/display/logging
    /// document.
    #[error("malformed eventgrid config: {source}")]
    Yaml {
        /// Parser diagnostic, with line and column.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value for {name}: {reason}")]
    Override {
        /// The environment variable.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// The configured world or generation settings are unusable.
    #[error("invalid world settings: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: WorldError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level shell configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ShellConfig {
    /// World bounds, seed, and event density.
    #[serde(default)]
    pub world: WorldConfig,

    /// Ticket generation parameters.
    #[serde(default)]
    pub tickets: TicketConfig,

    /// Search parameters.
    #[serde(default)]
    pub search: SearchConfig,

    /// Output settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShellConfig {
    /// Load configuration from a YAML file and apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Override`] if an override variable is malformed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let mut config = Self::parse(&contents)?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string. No overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit rather than a mapping.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Apply overrides from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Override`] if a variable is set to an
    /// unparseable value.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Override`] if a variable is set to an
    /// unparseable value.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(seed) = parse_override::<u64>(&lookup, "EVENTGRID_SEED")? {
            self.world.seed = Some(seed);
        }
        if let Some(limit) = parse_override::<usize>(&lookup, "EVENTGRID_RESULT_LIMIT")? {
            self.search.result_limit = limit;
        }
        if let Some(format) = parse_override::<OutputFormat>(&lookup, "EVENTGRID_FORMAT")? {
            self.display.format = format;
        }
        Ok(())
    }

    /// Check the world bounds and generation settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::World`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bounds()?;
        self.generation_settings().validate()?;
        Ok(())
    }

    /// The configured world bounds.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBounds`] if a minimum exceeds its
    /// maximum.
    pub const fn bounds(&self) -> Result<Bounds, WorldError> {
        Bounds::new(
            self.world.min_x,
            self.world.min_y,
            self.world.max_x,
            self.world.max_y,
        )
    }

    /// The configured generation settings.
    pub const fn generation_settings(&self) -> GenerationSettings {
        GenerationSettings {
            max_tickets: self.tickets.max_tickets,
            max_ticket_price: self.tickets.max_price,
            event_frequency: self.world.event_frequency,
        }
    }
}

/// Read and parse one override variable, if set.
fn parse_override<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    T::Err: core::fmt::Display,
{
    lookup(name)
        .map(|raw| {
            raw.trim().parse::<T>().map_err(|e| ConfigError::Override {
                name,
                reason: format!("{raw:?}: {e}"),
            })
        })
        .transpose()
}

/// World bounds and population settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WorldConfig {
    /// Smallest x coordinate (default: -10).
    #[serde(default = "default_min")]
    pub min_x: i32,
    /// Smallest y coordinate (default: -10).
    #[serde(default = "default_min")]
    pub min_y: i32,
    /// Largest x coordinate (default: 10).
    #[serde(default = "default_max")]
    pub max_x: i32,
    /// Largest y coordinate (default: 10).
    #[serde(default = "default_max")]
    pub max_y: i32,
    /// Fixed random seed. Unset means a fresh world every run.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Probability that a cell hosts an event (default: 1.0).
    #[serde(default = "default_event_frequency")]
    pub event_frequency: f64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            min_x: default_min(),
            min_y: default_min(),
            max_x: default_max(),
            max_y: default_max(),
            seed: None,
            event_frequency: default_event_frequency(),
        }
    }
}

/// Ticket generation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TicketConfig {
    /// Exclusive upper bound on tickets per event (default: 5).
    #[serde(default = "default_max_tickets")]
    pub max_tickets: u32,
    /// Exclusive upper bound on drawn prices (default: 99.99).
    #[serde(default = "default_max_price")]
    pub max_price: f64,
}

impl Default for TicketConfig {
    fn default() -> Self {
        Self {
            max_tickets: default_max_tickets(),
            max_price: default_max_price(),
        }
    }
}

/// Search settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchConfig {
    /// Maximum results per search (default: 5).
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            result_limit: default_result_limit(),
        }
    }
}

/// How results are written to the terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per result.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    /// Output format (default: text).
    #[serde(default)]
    pub format: OutputFormat,
    /// Pause and clear the screen between queries when attached to a
    /// terminal (default: true).
    #[serde(default = "default_true")]
    pub clear_screen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            clear_screen: true,
        }
    }
}

/// Logging settings. `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset (default: `warn`).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit JSON log lines instead of plain text (default: false).
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

const fn default_min() -> i32 {
    -10
}

const fn default_max() -> i32 {
    10
}

const fn default_event_frequency() -> f64 {
    DEFAULT_EVENT_FREQUENCY
}

const fn default_max_tickets() -> u32 {
    DEFAULT_MAX_TICKETS
}

const fn default_max_price() -> f64 {
    DEFAULT_MAX_TICKET_PRICE
}

const fn default_result_limit() -> usize {
    DEFAULT_RESULT_LIMIT
}

fn default_log_level() -> String {
    "warn".to_owned()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = vars
            .iter()
            .map(|&(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn default_config_matches_stock_world() {
        let config = ShellConfig::default();
        assert_eq!(config.bounds().unwrap(), Bounds::default());
        assert_eq!(config.world.seed, None);
        assert_eq!(config.tickets.max_tickets, 5);
        assert_eq!(config.search.result_limit, 5);
        assert_eq!(config.display.format, OutputFormat::Text);
        assert!(config.display.clear_screen);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
world:
  min_x: -3
  min_y: -4
  max_x: 5
  max_y: 6
  seed: 99
  event_frequency: 0.25
tickets:
  max_tickets: 3
  max_price: 250.0
search:
  result_limit: 8
display:
  format: json
  clear_screen: false
logging:
  level: debug
  json: true
";
        let config = ShellConfig::parse(yaml).unwrap();
        assert_eq!(config.bounds().unwrap(), Bounds::new(-3, -4, 5, 6).unwrap());
        assert_eq!(config.world.seed, Some(99));
        assert!((config.world.event_frequency - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.tickets.max_tickets, 3);
        assert!((config.tickets.max_price - 250.0).abs() < f64::EPSILON);
        assert_eq!(config.search.result_limit, 8);
        assert_eq!(config.display.format, OutputFormat::Json);
        assert!(!config.display.clear_screen);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = ShellConfig::parse("world:\n  seed: 7\n").unwrap();
        assert_eq!(config.world.seed, Some(7));
        assert_eq!(config.world.min_x, -10);
        assert_eq!(config.search.result_limit, 5);
    }

    #[test]
    fn parse_empty_yaml() {
        assert_eq!(ShellConfig::parse("").unwrap(), ShellConfig::default());
    }

    #[test]
    fn parse_rejects_malformed_yaml() {
        let result = ShellConfig::parse("world: [1, 2");
        assert!(matches!(result, Err(ConfigError::Yaml { .. })));
    }

    #[test]
    fn load_errors_name_the_eventgrid_config() {
        let yaml = ShellConfig::parse("world: [1, 2").unwrap_err();
        assert!(yaml.to_string().starts_with("malformed eventgrid config: "));

        let missing = ShellConfig::from_file(Path::new("/nonexistent/eventgrid.yaml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
        assert!(missing.to_string().starts_with("cannot read eventgrid config: "));
    }

    #[test]
    fn validate_rejects_inverted_bounds() {
        let config = ShellConfig::parse("world:\n  min_x: 4\n  max_x: 2\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::World {
                source: WorldError::InvalidBounds { .. }
            })
        ));
    }

    #[test]
    fn validate_rejects_non_positive_price() {
        let config = ShellConfig::parse("tickets:\n  max_price: 0.0\n").unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::World {
                source: WorldError::InvalidSettings(_)
            })
        ));
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = ShellConfig::default();
        config
            .apply_overrides(lookup(&[
                ("EVENTGRID_SEED", "1234"),
                ("EVENTGRID_RESULT_LIMIT", " 2 "),
                ("EVENTGRID_FORMAT", "JSON"),
            ]))
            .unwrap();
        assert_eq!(config.world.seed, Some(1234));
        assert_eq!(config.search.result_limit, 2);
        assert_eq!(config.display.format, OutputFormat::Json);
    }

    #[test]
    fn absent_overrides_change_nothing() {
        let mut config = ShellConfig::default();
        config.apply_overrides(lookup(&[])).unwrap();
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn malformed_override_names_the_variable() {
        let mut config = ShellConfig::default();
        let err = config
            .apply_overrides(lookup(&[("EVENTGRID_SEED", "soon")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Override {
                name: "EVENTGRID_SEED",
                ..
            }
        ));
    }

    #[test]
    fn generation_settings_follow_config() {
        let config = ShellConfig::parse("tickets:\n  max_tickets: 0\n").unwrap();
        let settings = config.generation_settings();
        assert_eq!(settings.max_tickets, 0);
        assert!((settings.event_frequency - 1.0).abs() < f64::EPSILON);
    }
}
