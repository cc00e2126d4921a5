//! Topic-Trawl: a forum topic harvester
//!
//! This crate crawls a paginated forum listing, fetches each topic page and
//! turns the markup into typed topics, authors and nested comments. Results can
//! be cached in a local SQLite database.

pub mod config;
pub mod crawler;
pub mod dom;
pub mod extract;
pub mod model;
pub mod output;
pub mod storage;

use thiserror::Error;

/// Main error type for Topic-Trawl operations
#[derive(Debug, Error)]
pub enum TrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTML parse error for {url}: {message}")]
    Parse { url: String, message: String },

    #[error("Extraction error: {0}")]
    Query(#[from] dom::QueryError),

    #[error("Unknown subforum: {0}")]
    UnknownSubforum(String),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Worker task failed: {0}")]
    Task(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TrawlError {
    /// Returns true for network/transport failures (including HTTP status errors)
    pub fn is_fetch_error(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::HttpStatus { .. })
    }
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

/// Result type alias for Topic-Trawl operations
pub type Result<T> = std::result::Result<T, TrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{ClientProfile, Crawler, HttpPageSource, PageSource};
pub use model::{Author, Comment, Topic, TopicHead};
