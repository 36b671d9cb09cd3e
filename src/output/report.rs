//! End-of-run crawl report

use std::time::Duration;

/// Counters describing one harvest run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlReport {
    /// Catalog pages requested
    pub catalog_pages: usize,

    /// Catalog pages that failed to fetch
    pub catalog_failures: usize,

    /// Distinct product URLs discovered across the catalog walk
    pub product_urls: usize,

    /// Records extracted successfully
    pub records: usize,

    /// Product pages skipped because of a fetch or parse failure
    pub product_failures: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl CrawlReport {
    /// Returns the product success rate as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.product_urls == 0 {
            return 0.0;
        }
        (self.records as f64 / self.product_urls as f64) * 100.0
    }
}

/// Prints the report to stdout
pub fn print_report(report: &CrawlReport, outputs: &[&str]) {
    println!("\n=== Catalog-Harvest Report ===\n");
    println!(
        "Catalog pages:   {} ({} failed)",
        report.catalog_pages, report.catalog_failures
    );
    println!("Product URLs:    {}", report.product_urls);
    println!(
        "Records:         {} ({:.1}% success)",
        report.records,
        report.success_rate()
    );
    println!("Skipped:         {}", report.product_failures);
    println!("Elapsed:         {:.2?}", report.elapsed);

    if !outputs.is_empty() {
        println!("\nOutput files:");
        for path in outputs {
            println!("  - {}", path);
        }
    }
}
