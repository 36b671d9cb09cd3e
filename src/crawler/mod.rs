//! Crawler module for catalog walking and product extraction
//!
//! This module contains the core harvesting logic, including:
//! - HTTP fetching with a fixed timeout
//! - Catalog pagination and product link discovery
//! - Per-page field extraction
//! - Bounded-concurrency crawl coordination

mod catalog;
mod coordinator;
mod events;
mod extract;
mod fetcher;
mod keywords;
mod parser;

pub use catalog::{CatalogWalk, CatalogWalker};
pub use coordinator::{run_harvest, Coordinator};
pub use events::{CrawlEvent, EventSink, MemorySink, NullSink, TracingSink};
pub use extract::{format_spec_row, FieldExtractor};
pub use fetcher::{build_http_client, fetch_url, PageFetcher};
pub use keywords::{clean_lines, KeywordBoundaries};
pub use parser::{extract_links, parse_document, stripped_text};
