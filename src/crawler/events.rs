//! Crawl progress events and the sinks that receive them
//!
//! Components report progress through an injected [`EventSink`] instead of
//! logging directly, so they can be exercised in tests without console output
//! and their reporting can be asserted on.

use std::sync::Mutex;

/// Something that happened during a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrawlEvent {
    /// A GET request returned a body
    Fetched { url: String, bytes: usize },

    /// A GET request failed
    FetchFailed { url: String, error: String },

    /// A catalog listing page is about to be requested
    CatalogPage { page: u32, url: String },

    /// A catalog listing page yielded no links because it failed to fetch or parse
    CatalogPageFailed { page: u32, url: String, error: String },

    /// The catalog walk finished
    CatalogWalked { pages: usize, product_urls: usize },

    /// A product page was turned into a record
    Extracted { url: String, images: usize },

    /// A fetched product page could not be turned into a record
    ExtractFailed { url: String, error: String },

    /// Product crawling started
    CrawlStarted { urls: usize, workers: usize },

    /// Product crawling finished
    CrawlFinished { records: usize, skipped: usize },
}

/// Receives crawl events
///
/// Implementations must be thread-safe; events may arrive from concurrently
/// running workers.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: CrawlEvent);
}

/// Forwards events to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: CrawlEvent) {
        match event {
            CrawlEvent::Fetched { url, bytes } => {
                tracing::info!("Fetched {} ({} bytes)", url, bytes)
            }
            CrawlEvent::FetchFailed { url, error } => {
                tracing::error!("Fetch failed for {}: {}", url, error)
            }
            CrawlEvent::CatalogPage { page, url } => {
                tracing::info!("Processing catalog page {}: {}", page, url)
            }
            CrawlEvent::CatalogPageFailed { page, url, error } => {
                tracing::error!("Skipping catalog page {} ({}): {}", page, url, error)
            }
            CrawlEvent::CatalogWalked {
                pages,
                product_urls,
            } => tracing::info!(
                "Catalog walk complete: {} product URLs from {} pages",
                product_urls,
                pages
            ),
            CrawlEvent::Extracted { url, images } => {
                tracing::debug!("Extracted {} ({} images)", url, images)
            }
            CrawlEvent::ExtractFailed { url, error } => {
                tracing::error!("Extraction failed for {}: {}", url, error)
            }
            CrawlEvent::CrawlStarted { urls, workers } => {
                tracing::info!("Crawling {} product pages with {} workers", urls, workers)
            }
            CrawlEvent::CrawlFinished { records, skipped } => {
                tracing::info!("Crawl finished: {} records, {} skipped", records, skipped)
            }
        }
    }
}

/// Discards every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: CrawlEvent) {}
}

/// Keeps every event in memory, in arrival order
#[derive(Debug, Default)]
pub struct MemorySink {
    events: Mutex<Vec<CrawlEvent>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the events received so far
    pub fn events(&self) -> Vec<CrawlEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Counts events matching a predicate
    pub fn count<F>(&self, predicate: F) -> usize
    where
        F: Fn(&CrawlEvent) -> bool,
    {
        self.events().iter().filter(|event| predicate(event)).count()
    }
}

impl EventSink for MemorySink {
    fn emit(&self, event: CrawlEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
