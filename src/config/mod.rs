//! Configuration module for Catalog-Harvest
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file, plus the page range given on the command line.
//!
//! # Example
//!
//! ```no_run
//! use catalog_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("harvest.toml")).unwrap();
//! println!("Crawler will use {} workers", config.crawler.workers);
//! ```

mod parser;
mod range;
mod types;
mod validation;

// Re-export types
pub use range::PageRange;
pub use types::{Config, CrawlerConfig, ExtractionConfig, OutputConfig, SiteConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
