//! Catalog-Harvest: a product catalog scraper
//!
//! This crate walks the paginated catalog of a single e-commerce site,
//! collects product detail-page URLs, extracts a fixed set of product fields
//! from each page and exports the records as CSV and JSON.

pub mod config;
pub mod crawler;
pub mod output;
pub mod url;

use thiserror::Error;

/// Main error type for Catalog-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

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

    #[error("Invalid page range '{input}': {reason}")]
    InvalidRange { input: String, reason: String },
}

/// Why a single GET request did not produce a page body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchCause {
    Timeout,
    Connect,
    Status(u16),
    Body(String),
    Request(String),
}

impl std::fmt::Display for FetchCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Timeout => write!(f, "request timed out"),
            Self::Connect => write!(f, "connection failed"),
            Self::Status(code) => write!(f, "HTTP status {}", code),
            Self::Body(msg) => write!(f, "failed to read body: {}", msg),
            Self::Request(msg) => write!(f, "{}", msg),
        }
    }
}

/// A failed fetch, tagged with the URL that was requested
#[derive(Debug, Clone, Error)]
#[error("Failed to fetch {url}: {cause}")]
pub struct FetchError {
    pub url: String,
    pub cause: FetchCause,
}

/// Result type alias for Catalog-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, PageRange};
pub use crawler::{CatalogWalker, Coordinator, FieldExtractor, PageFetcher};
pub use output::ProductRecord;
