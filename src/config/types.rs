use serde::Deserialize;

/// Main configuration structure for Catalog-Harvest
///
/// Every section is optional in the TOML file; missing sections fall back to
/// the defaults for the zumus.ru catalog.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub output: OutputConfig,
    pub extraction: ExtractionConfig,
}

/// The single site being harvested
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Catalog listing URL; page numbers are appended as a query parameter
    #[serde(rename = "catalog-url")]
    pub catalog_url: String,

    /// Absolute URL prefix every product detail page starts with
    #[serde(rename = "product-prefix")]
    pub product_prefix: String,

    /// Name of the page-number query parameter
    #[serde(rename = "page-param")]
    pub page_param: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            catalog_url: "https://zumus.ru/catalog".to_string(),
            product_prefix: "https://zumus.ru/product/".to_string(),
            page_param: "PAGEN_1".to_string(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of product pages fetched concurrently (1 = sequential and paced)
    pub workers: usize,

    /// Delay between catalog pages, and between product pages when sequential (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            workers: 10,
            request_delay_ms: 1000,
            timeout_secs: 10,
            user_agent: format!("catalog-harvest/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the CSV export
    #[serde(rename = "csv-path")]
    pub csv_path: String,

    /// Path of the JSON export
    #[serde(rename = "json-path")]
    pub json_path: String,

    /// Log file used by detached runs
    #[serde(rename = "log-path")]
    pub log_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: "products.csv".to_string(),
            json_path: "products.json".to_string(),
            log_path: "output.log".to_string(),
        }
    }
}

/// Field extraction tuning
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Ordered labels that must start a new line in the characteristics block
    pub keywords: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            keywords: ["Вес", "Размер упаковки", "Доступные варианты", "Фасовка", "UPC Код"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}
