use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum VeriscanError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Cannot access {path}")]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    #[error("CSV serialization error: {0}")]
    CsvSerialize(#[from] csv::Error),

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(String),

    #[error("Scan cancelled before completion")]
    Cancelled,
}

impl VeriscanError {
    /// Returns true for faults that map to the INACCESSIBLE status.
    #[must_use]
    pub const fn is_access(&self) -> bool {
        matches!(self, Self::Access { .. })
    }
}

pub type Result<T> = std::result::Result<T, VeriscanError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
