//! Catalog walker
//!
//! Walks the catalog listing pages in order and collects the product
//! detail-page URLs they link to.

use crate::config::{PageRange, SiteConfig};
use crate::crawler::events::{CrawlEvent, EventSink};
use crate::crawler::fetcher::PageFetcher;
use crate::crawler::parser::{compile_selector, extract_links, parse_document};
use crate::url::{catalog_page_url, is_product_url};
use crate::HarvestError;
use scraper::Selector;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Outcome of one catalog walk
#[derive(Debug, Clone, Default)]
pub struct CatalogWalk {
    /// Distinct product URLs, in no particular order
    pub product_urls: HashSet<String>,

    /// Catalog pages requested
    pub pages_requested: usize,

    /// Catalog pages that failed to fetch or parse
    pub pages_failed: usize,
}

/// Walks catalog listing pages and collects product URLs
pub struct CatalogWalker {
    fetcher: PageFetcher,
    catalog_url: Url,
    product_prefix: String,
    page_param: String,
    delay: Duration,
    anchor: Selector,
    sink: Arc<dyn EventSink>,
}

impl CatalogWalker {
    /// Creates a walker for the configured site
    ///
    /// `delay` separates consecutive catalog page requests.
    pub fn new(
        site: &SiteConfig,
        fetcher: PageFetcher,
        delay: Duration,
        sink: Arc<dyn EventSink>,
    ) -> Result<Self, HarvestError> {
        Ok(Self {
            fetcher,
            catalog_url: Url::parse(&site.catalog_url)?,
            product_prefix: site.product_prefix.clone(),
            page_param: site.page_param.clone(),
            delay,
            anchor: compile_selector("a[href]")?,
            sink,
        })
    }

    /// Fetches every page in `range` and returns the product URLs found
    ///
    /// Pages are fetched one at a time, in ascending order, with the
    /// configured delay between requests. A page that fails is skipped. An
    /// inverted range visits no pages.
    pub async fn walk(&self, range: PageRange) -> CatalogWalk {
        let mut walk = CatalogWalk::default();

        for page in range.pages() {
            if walk.pages_requested > 0 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let page_url = catalog_page_url(&self.catalog_url, &self.page_param, page);
            self.sink.emit(CrawlEvent::CatalogPage {
                page,
                url: page_url.to_string(),
            });
            walk.pages_requested += 1;

            match self.page_product_urls(page_url.as_str()).await {
                Ok(urls) => walk.product_urls.extend(urls),
                Err(e) => {
                    self.sink.emit(CrawlEvent::CatalogPageFailed {
                        page,
                        url: page_url.to_string(),
                        error: e.to_string(),
                    });
                    walk.pages_failed += 1;
                }
            }
        }

        self.sink.emit(CrawlEvent::CatalogWalked {
            pages: walk.pages_requested,
            product_urls: walk.product_urls.len(),
        });

        walk
    }

    /// Fetches one catalog page and returns the product links on it
    async fn page_product_urls(&self, page_url: &str) -> Result<Vec<String>, HarvestError> {
        let body = self.fetcher.fetch(page_url).await?;
        let document = parse_document(&body, page_url)?;

        // Links resolve against the catalog root, not the paginated URL
        Ok(extract_links(&document, &self.anchor, &self.catalog_url)
            .into_iter()
            .map(String::from)
            .filter(|url| is_product_url(url, &self.product_prefix))
            .collect())
    }
}
