use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_mood_index_path")]
    pub mood_index_path: String,
    #[serde(default = "default_venues_path")]
    pub venues_path: String,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            mood_index_path: default_mood_index_path(),
            venues_path: default_venues_path(),
        }
    }
}

fn default_mood_index_path() -> String {
    "data/mood_index.json".to_string()
}

fn default_venues_path() -> String {
    "data/venues.json".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Result cap for the matcher and drawer.
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Minimum similarity for a fuzzy synonym hit.
    #[serde(default = "default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,
    /// Below this confidence the service asks for clarification.
    #[serde(default = "default_low_confidence")]
    pub low_confidence: f64,
    /// Below this confidence the service proceeds but logs a warning.
    #[serde(default = "default_moderate_confidence")]
    pub moderate_confidence: f64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            fuzzy_threshold: default_fuzzy_threshold(),
            low_confidence: default_low_confidence(),
            moderate_confidence: default_moderate_confidence(),
        }
    }
}

fn default_max_results() -> usize {
    3
}
fn default_fuzzy_threshold() -> f64 {
    0.75
}
fn default_low_confidence() -> f64 {
    0.3
}
fn default_moderate_confidence() -> f64 {
    0.5
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with LARK_)
    ///    e.g. LARK_SERVER__PORT -> server.port
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::with_prefix("LARK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("LARK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
