//! Engine error types

use fieldcheck_verifier::VerifierError;
use thiserror::Error;

/// Errors raised while building an engine
///
/// Verification calls never return these; a built engine always produces a
/// report.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failed to read a config file
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse config TOML
    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// Failed to render config TOML
    #[error("Failed to serialize config TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// Verifier setup error
    #[error(transparent)]
    Verifier(#[from] VerifierError),
}
