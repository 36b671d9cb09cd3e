//! Crawler coordinator - product page orchestration
//!
//! This module fetches and extracts every discovered product page through a
//! bounded worker pool:
//! - `workers == 1` runs one page at a time in input order, pausing between
//!   requests
//! - `workers > 1` keeps up to that many pages in flight with no pause and
//!   yields records in completion order
//!
//! A page that fails to fetch or parse is reported and skipped; it never
//! stops the remaining pages.

use crate::config::{Config, PageRange};
use crate::crawler::catalog::CatalogWalker;
use crate::crawler::events::{CrawlEvent, EventSink, TracingSink};
use crate::crawler::extract::FieldExtractor;
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::keywords::KeywordBoundaries;
use crate::output::{CrawlReport, ProductRecord};
use crate::HarvestError;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::{Duration, Instant};
use url::Url;

/// Drives the catalog walk and the product crawl
pub struct Coordinator {
    walker: CatalogWalker,
    fetcher: PageFetcher,
    extractor: FieldExtractor,
    workers: usize,
    delay: Duration,
    sink: Arc<dyn EventSink>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The harvest configuration
    /// * `sink` - Receiver of progress events
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Successfully created coordinator
    /// * `Err(HarvestError)` - Failed to build the HTTP client or parse the catalog URL
    pub fn new(config: &Config, sink: Arc<dyn EventSink>) -> Result<Self, HarvestError> {
        let fetcher = PageFetcher::from_config(&config.crawler, sink.clone())?;
        let delay = Duration::from_millis(config.crawler.request_delay_ms);
        let walker = CatalogWalker::new(&config.site, fetcher.clone(), delay, sink.clone())?;
        let extractor =
            FieldExtractor::new(KeywordBoundaries::new(config.extraction.keywords.clone()))?;

        Ok(Self {
            walker,
            fetcher,
            extractor,
            workers: config.crawler.workers.max(1),
            delay,
            sink,
        })
    }

    /// Number of product pages kept in flight
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Walks the catalog over `range`, then crawls every product found
    pub async fn run(&self, range: PageRange) -> (Vec<ProductRecord>, CrawlReport) {
        let start_time = Instant::now();

        let walk = self.walker.walk(range).await;
        let product_urls: Vec<String> = walk.product_urls.into_iter().collect();
        let discovered = product_urls.len();

        let records = self.crawl(product_urls).await;

        let report = CrawlReport {
            catalog_pages: walk.pages_requested,
            catalog_failures: walk.pages_failed,
            product_urls: discovered,
            records: records.len(),
            product_failures: discovered - records.len(),
            elapsed: start_time.elapsed(),
        };

        (records, report)
    }

    /// Fetches and extracts every URL, returning the records that succeeded
    ///
    /// Records come back in input order when `workers == 1` and in completion
    /// order otherwise.
    pub async fn crawl(&self, product_urls: Vec<String>) -> Vec<ProductRecord> {
        let total = product_urls.len();
        self.sink.emit(CrawlEvent::CrawlStarted {
            urls: total,
            workers: self.workers,
        });

        // Only the sequential pool paces itself
        let pause = if self.workers == 1 {
            self.delay
        } else {
            Duration::ZERO
        };

        let records: Vec<ProductRecord> = stream::iter(product_urls.into_iter().enumerate())
            .map(|(index, url)| async move {
                if index > 0 && !pause.is_zero() {
                    tokio::time::sleep(pause).await;
                }
                self.process_url(&url).await
            })
            .buffer_unordered(self.workers)
            .filter_map(|record| async move { record })
            .collect()
            .await;

        self.sink.emit(CrawlEvent::CrawlFinished {
            records: records.len(),
            skipped: total - records.len(),
        });

        records
    }

    /// Fetches and extracts a single product page
    ///
    /// Returns None when any stage fails; the failure has already been
    /// reported to the sink.
    async fn process_url(&self, url: &str) -> Option<ProductRecord> {
        let source_url = match Url::parse(url) {
            Ok(u) => u,
            Err(e) => {
                self.sink.emit(CrawlEvent::ExtractFailed {
                    url: url.to_string(),
                    error: e.to_string(),
                });
                return None;
            }
        };

        // The fetcher reports its own failures
        let body = self.fetcher.fetch(url).await.ok()?;

        match self.extractor.extract_page(&body, &source_url) {
            Ok(record) => {
                self.sink.emit(CrawlEvent::Extracted {
                    url: url.to_string(),
                    images: record.images.len(),
                });
                Some(record)
            }
            Err(e) => {
                self.sink.emit(CrawlEvent::ExtractFailed {
                    url: url.to_string(),
                    error: e.to_string(),
                });
                None
            }
        }
    }
}

/// Runs a complete harvest with progress forwarded to `tracing`
///
/// # Example
///
/// ```no_run
/// use catalog_harvest::config::{Config, PageRange};
/// use catalog_harvest::crawler::run_harvest;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let (records, report) = run_harvest(&Config::default(), PageRange::new(1, 2)).await?;
/// println!("{} records from {} pages", records.len(), report.catalog_pages);
/// # Ok(())
/// # }
/// ```
pub async fn run_harvest(
    config: &Config,
    range: PageRange,
) -> Result<(Vec<ProductRecord>, CrawlReport), HarvestError> {
    let coordinator = Coordinator::new(config, Arc::new(TracingSink))?;
    Ok(coordinator.run(range).await)
}
