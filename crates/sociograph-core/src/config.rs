//! Configuration loading for sociograph.
//!
//! Settings are read from (in priority order):
//! 1. Environment variables (`SOCIOGRAPH__` prefix, e.g.
//!    `SOCIOGRAPH__NEO4J__URI`)
//! 2. Config file (`sociograph.toml` by default)
//! 3. Hard defaults

use crate::error::ConfigError;
use crate::types::AttributeName;

/// Immutable application configuration, built once at startup and passed to
/// the graph access layer by value. Never stored as global state.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bolt endpoint of the graph store.
    pub uri: String,
    pub user: String,
    pub password: String,
    /// Custom attribute name, when supplied via config or environment.
    /// `None` means the console prompts the operator for one.
    pub custom_attribute: Option<AttributeName>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "sociograph-dev".to_string(),
            custom_attribute: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from `<file_prefix>.toml` (optional) and the
    /// environment, falling back to defaults field by field.
    pub fn load(file_prefix: &str) -> Result<Self, ConfigError> {
        let cfg = config::Config::builder()
            .add_source(config::File::with_name(file_prefix).required(false))
            .add_source(
                config::Environment::with_prefix("SOCIOGRAPH")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let defaults = Self::default();
        let custom_attribute = match cfg.get_string("graph.custom_attribute") {
            Ok(raw) => Some(AttributeName::new(&raw)?),
            Err(_) => None,
        };

        let uri = match cfg.get_string("neo4j.uri") {
            Ok(uri) => uri,
            Err(_) => {
                tracing::debug!(uri = %defaults.uri, "No neo4j.uri configured, using default");
                defaults.uri
            }
        };

        Ok(Self {
            uri,
            user: cfg.get_string("neo4j.user").unwrap_or(defaults.user),
            password: cfg
                .get_string("neo4j.password")
                .unwrap_or(defaults.password),
            custom_attribute,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_without_file_or_env_falls_back_to_defaults() {
        let config = AppConfig::load("no_such_config_file").unwrap();
        let defaults = AppConfig::default();
        assert_eq!(config.uri, defaults.uri);
        assert_eq!(config.user, defaults.user);
        assert_eq!(config.password, defaults.password);
        assert!(config.custom_attribute.is_none());
    }

    #[test]
    fn default_config_points_at_local_bolt() {
        let config = AppConfig::default();
        assert_eq!(config.uri, "bolt://localhost:7687");
        assert_eq!(config.user, "neo4j");
        assert!(config.custom_attribute.is_none());
    }
}
