use crate::config::types::{Config, CrawlerConfig, ExtractionConfig, OutputConfig, SiteConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_extraction_config(&config.extraction)?;
    Ok(())
}

/// Validates the site section
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("catalog-url", &config.catalog_url)?;
    validate_http_url("product-prefix", &config.product_prefix)?;

    if config.page_param.is_empty() {
        return Err(ConfigError::Validation(
            "page-param cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.workers < 1 || config.workers > 100 {
        return Err(ConfigError::Validation(format!(
            "workers must be between 1 and 100, got {}",
            config.workers
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("csv-path", &config.csv_path),
        ("json-path", &config.json_path),
        ("log-path", &config.log_path),
    ] {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    Ok(())
}

/// Validates the keyword boundary list
fn validate_extraction_config(config: &ExtractionConfig) -> Result<(), ConfigError> {
    if let Some(position) = config.keywords.iter().position(|k| k.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "keywords[{}] cannot be blank",
            position
        )));
    }

    Ok(())
}

/// Checks that a value parses as an absolute http(s) URL
fn validate_http_url(name: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", name, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            name, value
        )));
    }

    Ok(())
}
