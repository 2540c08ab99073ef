//! Maxi-Market: incremental athlete-market extraction and merge pipeline
//!
//! This crate crawls an authenticated athlete-market site, converts its HTML
//! pages into typed records, and merges those records into durable CSV
//! datasets without duplication or data loss across repeated daily runs.

pub mod config;
pub mod jobs;
pub mod merge;
pub mod scrape;
pub mod session;
pub mod store;

use thiserror::Error;

/// Main error type for Maxi-Market operations
#[derive(Debug, Error)]
pub enum MarketError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Login failed with HTTP status {status}")]
    LoginFailed { status: u16 },

    #[error("Request to {url} failed after {attempts} attempts: {last_error}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last_error: String,
    },

    #[error("Expected results table not found on {page}; response preview: {excerpt}")]
    MissingResultsTable { page: String, excerpt: String },

    #[error("Missing baseline snapshot: {0}")]
    MissingBaseline(String),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

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

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Maxi-Market operations
pub type Result<T> = std::result::Result<T, MarketError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use scrape::{AthleteRecord, AthleteSummary, PhysicalProfile, TestResult};
pub use session::{RetryPolicy, Session};
