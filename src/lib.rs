//! Shelf-Scrape: a book catalog scraper
//!
//! This crate walks the paginated catalog of a book shop site, follows every
//! listed book to its detail page, and turns each page into a normalized
//! [`BookRecord`]. Records can be written to a flat text file, either on demand
//! or once a day on a schedule.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod record;

use thiserror::Error;

/// Main error type for Shelf-Scrape operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Malformed page: {0}")]
    MalformedPage(String),

    #[error("Invalid page range: {0}")]
    InvalidRange(#[from] RangeError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl ScrapeError {
    /// Shorthand for a [`ScrapeError::MalformedPage`] with the given reason
    pub fn malformed(reason: impl Into<String>) -> Self {
        ScrapeError::MalformedPage(reason.into())
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

/// Errors raised while fetching a page over HTTP
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}")]
    Connect { url: String },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },
}

/// Errors raised when a requested page interval does not fit the catalog
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("from_page must be at least 1, got {from}")]
    BelowFirstPage { from: u32 },

    #[error("from_page ({from}) must not be greater than to_page ({to})")]
    Inverted { from: u32, to: u32 },

    #[error("to_page ({to}) exceeds the last catalog page ({max})")]
    BeyondLastPage { to: u32, max: u32 },
}

/// Result type alias for Shelf-Scrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{PageInterval, Scraper};
pub use extract::{extract_book, extract_links, parse_page_count};
pub use record::{BookRecord, FieldValue};
