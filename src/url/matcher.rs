/// Checks whether an absolute URL belongs to the product section of the site
///
/// Matching is a plain string prefix test against the configured product
/// prefix, so the scheme and host are part of the comparison.
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::is_product_url;
///
/// let prefix = "https://zumus.ru/product/";
/// assert!(is_product_url("https://zumus.ru/product/whey-protein/", prefix));
/// assert!(!is_product_url("https://zumus.ru/catalog/?PAGEN_1=2", prefix));
/// assert!(!is_product_url("https://other.ru/product/whey-protein/", prefix));
/// ```
pub fn is_product_url(candidate: &str, product_prefix: &str) -> bool {
    !product_prefix.is_empty() && candidate.starts_with(product_prefix)
}
