use url::Url;

/// Resolves a link href to an absolute URL
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - Fragment-only links
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://zumus.ru/catalog").unwrap();
/// let resolved = resolve_link("/product/bcaa/", &base).unwrap();
/// assert_eq!(resolved.as_str(), "https://zumus.ru/product/bcaa/");
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    let absolute_url = base_url.join(href).ok()?;
    if absolute_url.scheme() == "http" || absolute_url.scheme() == "https" {
        Some(absolute_url)
    } else {
        None
    }
}

/// Resolves an image source against the page it was found on
///
/// Already-absolute sources are returned unchanged (byte for byte); relative
/// and root-relative paths are joined with `page_url`. Joined paths come back
/// percent-encoded, so a Cyrillic or space-bearing file name is written as
/// `%D1%84...` / `%20` rather than raw.
pub fn resolve_image_src(src: &str, page_url: &Url) -> Option<String> {
    let src = src.trim();
    if src.is_empty() {
        return None;
    }

    if Url::parse(src).is_ok() {
        return Some(src.to_string());
    }

    page_url.join(src).ok().map(String::from)
}

/// Builds the URL of one catalog listing page
///
/// The page number is appended as a query parameter, keeping any query the
/// catalog URL already carries.
///
/// # Examples
///
/// ```
/// use catalog_harvest::url::catalog_page_url;
/// use url::Url;
///
/// let catalog = Url::parse("https://zumus.ru/catalog").unwrap();
/// let page = catalog_page_url(&catalog, "PAGEN_1", 3);
/// assert_eq!(page.as_str(), "https://zumus.ru/catalog?PAGEN_1=3");
/// ```
pub fn catalog_page_url(catalog_url: &Url, page_param: &str, page: u32) -> Url {
    let mut url = catalog_url.clone();
    url.query_pairs_mut()
        .append_pair(page_param, &page.to_string());
    url
}
