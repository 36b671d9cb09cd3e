//! URL handling module for Catalog-Harvest
//!
//! This module provides link resolution, product-prefix matching and catalog
//! page URL construction.

mod matcher;
mod resolve;

pub use matcher::is_product_url;
pub use resolve::{catalog_page_url, resolve_image_src, resolve_link};
