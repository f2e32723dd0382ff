//! Engine error types

use lexgraph_module::ModuleError;
use thiserror::Error;

/// Errors surfaced by the hybrid search engine.
///
/// "No answer" is never an error; queries that find nothing return a
/// zero-score response. These variants cover malformed input and broken
/// configuration only.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The query was rejected before any work happened
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// A module failed while reasoning
    #[error("module error: {0}")]
    Module(#[from] ModuleError),
}

/// Errors loading engine configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value was outside its allowed range
    #[error("invalid configuration value: {0}")]
    InvalidValue(String),
}
