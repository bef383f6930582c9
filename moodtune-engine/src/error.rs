//! Error types for the moodtune engine

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Engine errors
///
/// Evaluation itself never fails. Every variant here is raised while a rule
/// table is being read, parsed or validated, before a `FuzzyEngine` exists.
#[derive(Error, Debug)]
pub enum Error {
    /// Rule table failed validation (bad shape, unknown term, bad weight...)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rule table file is not valid TOML or does not match the schema
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Rule table could not be serialized
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested preset or resource not found
    #[error("Not found: {0}")]
    NotFound(String),
}
