//! Product field extraction
//!
//! Turns one parsed product page into a [`ProductRecord`]. Each field is
//! located independently; a field the page does not carry falls back to its
//! sentinel without affecting the others.
//!
//! | Field | Markup |
//! |-------|--------|
//! | category | `span[itemprop=name]` breadcrumb items, joined with " / " |
//! | name | `h1#pagetitle` |
//! | price | `span.price_value` |
//! | images | `li` with id `photo-<n>`, first `img`, `data-src` before `src` |
//! | characteristics | `div.top_props`, repaired with keyword boundaries |
//! | sku | `div.article.iblock[itemprop=additionalProperty]` |
//! | description | `p, li, h2, h3` inside `div.descr-outer-wrapper` |
//! | extended description | `td` cells of `tr[valign=top]` rows |

use crate::crawler::keywords::{clean_lines, KeywordBoundaries};
use crate::crawler::parser::{compile_selector, parse_document, raw_text, stripped_text};
use crate::output::{
    ProductRecord, CATEGORY_MISSING, CHARACTERISTICS_MISSING, DESCRIPTION_MISSING,
    EXTENDED_DESCRIPTION_MISSING, NAME_MISSING, PRICE_MISSING, SKU_MISSING,
};
use crate::url::resolve_image_src;
use crate::HarvestError;
use regex::Regex;
use scraper::{Html, Selector};
use url::Url;

/// Breadcrumb text from this marker onward is the SKU label, not a category
const SKU_LABEL_MARKER: &str = " / Артикул";

/// Numbered photo list item ids (`photo-0`, `gallery-photo-12`, ...)
const PHOTO_ID_PATTERN: &str = r"photo-\d";

/// Compiled selectors for every extracted field
struct Selectors {
    breadcrumb: Selector,
    title: Selector,
    price: Selector,
    photo_item: Selector,
    photo_id: Regex,
    image: Selector,
    characteristics: Selector,
    sku: Selector,
    description: Selector,
    description_text: Selector,
    spec_row: Selector,
    cell: Selector,
}

impl Selectors {
    fn compile() -> Result<Self, HarvestError> {
        Ok(Self {
            breadcrumb: compile_selector(r#"span[itemprop="name"]"#)?,
            title: compile_selector("h1#pagetitle")?,
            price: compile_selector("span.price_value")?,
            photo_item: compile_selector("li[id]")?,
            photo_id: Regex::new(PHOTO_ID_PATTERN)?,
            image: compile_selector("img")?,
            characteristics: compile_selector("div.top_props")?,
            sku: compile_selector(r#"div.article.iblock[itemprop="additionalProperty"]"#)?,
            description: compile_selector("div.descr-outer-wrapper")?,
            description_text: compile_selector("p, li, h2, h3")?,
            spec_row: compile_selector(r#"tr[valign="top"]"#)?,
            cell: compile_selector("td")?,
        })
    }
}

/// Extracts product records from product detail pages
pub struct FieldExtractor {
    selectors: Selectors,
    boundaries: KeywordBoundaries,
}

impl FieldExtractor {
    /// Creates an extractor using `boundaries` to repair characteristics text
    pub fn new(boundaries: KeywordBoundaries) -> Result<Self, HarvestError> {
        Ok(Self {
            selectors: Selectors::compile()?,
            boundaries,
        })
    }

    /// Parses a fetched product page and extracts its record
    ///
    /// Fails only when the body cannot be parsed into a document.
    pub fn extract_page(&self, body: &str, source_url: &Url) -> Result<ProductRecord, HarvestError> {
        let document = parse_document(body, source_url.as_str())?;
        Ok(self.extract(&document, source_url))
    }

    /// Extracts all fields from a parsed product page
    pub fn extract(&self, document: &Html, source_url: &Url) -> ProductRecord {
        ProductRecord {
            category: self.category(document),
            name: self
                .first_text(document, &self.selectors.title)
                .unwrap_or_else(|| NAME_MISSING.to_string()),
            price: self
                .first_text(document, &self.selectors.price)
                .unwrap_or_else(|| PRICE_MISSING.to_string()),
            images: self.images(document, source_url),
            characteristics: self.characteristics(document),
            sku: self
                .first_text(document, &self.selectors.sku)
                .unwrap_or_else(|| SKU_MISSING.to_string()),
            description: self.description(document),
            extended_description: self.extended_description(document),
        }
    }

    fn first_text(&self, document: &Html, selector: &Selector) -> Option<String> {
        document.select(selector).next().map(stripped_text)
    }

    fn category(&self, document: &Html) -> String {
        let items: Vec<String> = document
            .select(&self.selectors.breadcrumb)
            .map(stripped_text)
            .collect();

        if items.is_empty() {
            return CATEGORY_MISSING.to_string();
        }

        let mut category = items.join(" / ");
        if let Some(index) = category.find(SKU_LABEL_MARKER) {
            category.truncate(index);
        }
        category
    }

    fn images(&self, document: &Html, source_url: &Url) -> Vec<String> {
        document
            .select(&self.selectors.photo_item)
            .filter(|item| {
                item.value()
                    .id()
                    .is_some_and(|id| self.selectors.photo_id.is_match(id))
            })
            .filter_map(|item| item.select(&self.selectors.image).next())
            .filter_map(|img| {
                let element = img.value();
                element
                    .attr("data-src")
                    .filter(|src| !src.trim().is_empty())
                    .or_else(|| element.attr("src"))
            })
            .filter_map(|src| resolve_image_src(src, source_url))
            .collect()
    }

    fn characteristics(&self, document: &Html) -> String {
        match document.select(&self.selectors.characteristics).next() {
            Some(block) => self.boundaries.apply(&clean_lines(&raw_text(block))),
            None => CHARACTERISTICS_MISSING.to_string(),
        }
    }

    fn description(&self, document: &Html) -> String {
        let Some(block) = document.select(&self.selectors.description).next() else {
            return DESCRIPTION_MISSING.to_string();
        };

        block
            .select(&self.selectors.description_text)
            .map(stripped_text)
            .filter(|text| !text.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn extended_description(&self, document: &Html) -> String {
        let lines: Vec<String> = document
            .select(&self.selectors.spec_row)
            .filter_map(|row| {
                let cells: Vec<String> = row.select(&self.selectors.cell).map(stripped_text).collect();
                format_spec_row(&cells)
            })
            .collect();

        if lines.is_empty() {
            EXTENDED_DESCRIPTION_MISSING.to_string()
        } else {
            lines.join("\n")
        }
    }
}

/// Formats one nutrition/spec table row
///
/// Rows with one, two or three cells become `key: `, `key: value` and
/// `key: value (percent)`; any other shape is skipped.
pub fn format_spec_row(cells: &[String]) -> Option<String> {
    match cells {
        [key] => Some(format!("{}: ", key)),
        [key, value] => Some(format!("{}: {}", key, value)),
        [key, value, percent] => Some(format!("{}: {} ({})", key, value, percent)),
        _ => None,
    }
}
