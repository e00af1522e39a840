//! Windward: a resilient harvester for sailing-vessel listings
//!
//! This crate fetches listing pages from a web catalog that actively resists
//! automated access and converts each page into a fixed-schema record appended
//! to a durable CSV table. Fetching rotates simulated client identities with
//! adaptive backoff; extraction maps a loosely-structured document tree onto a
//! fixed-width column set with explicit-null semantics.

pub mod config;
pub mod extract;
pub mod fetch;
pub mod identity;
pub mod input;
pub mod output;
pub mod runner;

use thiserror::Error;

/// Main error type for Windward operations
#[derive(Debug, Error)]
pub enum WindwardError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Input source {path} has no '{column}' column")]
    MissingColumn { path: String, column: String },

    #[error("Record is missing column '{column}'")]
    IncompleteRecord { column: String },

    #[error("Invalid selector '{0}'")]
    Selector(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for Windward operations
pub type Result<T> = std::result::Result<T, WindwardError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::{ExtractOutcome, Extractor, Record, SkipReason};
pub use fetch::{FetchCompletion, FetchOutcome, Fetcher};
pub use identity::{Identity, IdentityPool};
