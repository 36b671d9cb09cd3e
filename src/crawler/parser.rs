//! HTML parsing helpers shared by the catalog walker and the field extractor
//!
//! This module handles:
//! - Turning a fetched body into a document tree
//! - Extracting links from `<a href>` elements
//! - Reading element text the way the extractor expects it

use crate::url::resolve_link;
use crate::HarvestError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Parses a fetched body into a document tree
///
/// The HTML parser recovers from any malformed markup, so the only body that
/// cannot yield a document is one with no content at all.
///
/// # Example
///
/// ```
/// use catalog_harvest::crawler::parse_document;
///
/// assert!(parse_document("<p>ok</p>", "https://zumus.ru/").is_ok());
/// assert!(parse_document("  \n", "https://zumus.ru/").is_err());
/// ```
pub fn parse_document(body: &str, url: &str) -> Result<Html, HarvestError> {
    if body.trim().is_empty() {
        return Err(HarvestError::HtmlParse {
            url: url.to_string(),
            message: "empty document".to_string(),
        });
    }

    Ok(Html::parse_document(body))
}

/// Compiles a CSS selector, naming the selector in the error
pub fn compile_selector(selector: &str) -> Result<Selector, HarvestError> {
    Selector::parse(selector).map_err(|e| HarvestError::Selector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Extracts every resolvable `<a href>` link from the document
///
/// Links are resolved against `base_url` and returned in document order,
/// duplicates included.
pub fn extract_links(document: &Html, anchor: &Selector, base_url: &Url) -> Vec<Url> {
    document
        .select(anchor)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, base_url))
        .collect()
}

/// Text of an element with every text node trimmed and blank nodes dropped
///
/// The remaining pieces are concatenated without a separator.
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Raw text of an element, all text nodes concatenated as-is
pub fn raw_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}
