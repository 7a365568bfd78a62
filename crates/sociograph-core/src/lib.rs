//! sociograph-core: shared types, configuration, and error handling.
//!
//! This crate provides the foundation used by the graph access layer and the
//! console front-end:
//! - `PersonRecord` / `GraphStats` result types
//! - `AttributeName`, the validated custom-attribute identifier
//! - `AppConfig` loaded from file, environment, and defaults

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::ConfigError;
pub use types::{AttributeName, GraphStats, PersonRecord};
