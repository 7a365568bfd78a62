//! Error types for configuration and startup.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid custom attribute name {name:?}: must match [A-Za-z_][A-Za-z0-9_]*")]
    InvalidAttribute { name: String },

    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}
