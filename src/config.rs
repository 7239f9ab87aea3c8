use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::merge::{DEFAULT_RIDE_GEOFENCE, DEFAULT_RIDE_LINK_BASE};
use crate::core::recommender::DEFAULT_RESULT_LIMIT;
use crate::models::{GeoBox, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub ride_hailing: RideHailingSettings,
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
pub struct CatalogSettings {
    /// JSON file holding the place catalog
    pub path: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_result_limit")]
    pub result_limit: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            result_limit: default_result_limit(),
        }
    }
}

fn default_result_limit() -> usize { DEFAULT_RESULT_LIMIT }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_mood_match_weight")]
    pub mood_match: f64,
    #[serde(default = "default_rating_multiplier")]
    pub rating_multiplier: f64,
    #[serde(default = "default_open_bonus")]
    pub open_bonus: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            mood_match: default_mood_match_weight(),
            rating_multiplier: default_rating_multiplier(),
            open_bonus: default_open_bonus(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            mood_match: config.mood_match,
            rating_multiplier: config.rating_multiplier,
            open_bonus: config.open_bonus,
        }
    }
}

fn default_mood_match_weight() -> f64 { 30.0 }
fn default_rating_multiplier() -> f64 { 10.0 }
fn default_open_bonus() -> f64 { 10.0 }

#[derive(Debug, Clone, Deserialize)]
pub struct RideHailingSettings {
    #[serde(default = "default_geofence")]
    pub geofence: GeoBox,
    #[serde(default = "default_link_base")]
    pub link_base: String,
}

impl Default for RideHailingSettings {
    fn default() -> Self {
        Self {
            geofence: default_geofence(),
            link_base: default_link_base(),
        }
    }
}

fn default_geofence() -> GeoBox { DEFAULT_RIDE_GEOFENCE }
fn default_link_base() -> String { DEFAULT_RIDE_LINK_BASE.to_string() }

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

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with NOMAD)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., NOMAD__SERVER__PORT -> server.port
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(env_source())
            .build()?
            .try_deserialize()
    }
}

fn env_source() -> Environment {
    Environment::with_prefix("NOMAD")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.mood_match, 30.0);
        assert_eq!(weights.rating_multiplier, 10.0);
        assert_eq!(weights.open_bonus, 10.0);
        assert_eq!(ScoringWeights::from(&weights), ScoringWeights::default());
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_minimal_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nhost = \"127.0.0.1\"\nport = 8080\n\n[catalog]\npath = \"data/places.json\""
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.catalog.path, "data/places.json");
        assert_eq!(settings.recommendation.result_limit, DEFAULT_RESULT_LIMIT);
        assert_eq!(settings.ride_hailing.geofence, DEFAULT_RIDE_GEOFENCE);
        assert_eq!(settings.ride_hailing.link_base, DEFAULT_RIDE_LINK_BASE);
        assert_eq!(settings.logging.format, "json");
    }

    #[test]
    fn test_load_from_file_with_logging_section() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nhost = \"127.0.0.1\"\nport = 8080\n\n[catalog]\npath = \"data/places.json\"\n\n[logging]\nlevel = \"debug\"\nformat = \"pretty\""
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.logging.format, "pretty");
    }
}
