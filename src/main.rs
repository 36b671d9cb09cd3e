//! Catalog-Harvest main entry point
//!
//! This is the command-line interface for the Catalog-Harvest product scraper.

use catalog_harvest::config::{self, Config, PageRange};
use catalog_harvest::crawler::run_harvest;
use catalog_harvest::output::{export_all, print_report, CsvExporter, Exporter, JsonExporter};
use catalog_harvest::ConfigError;
use clap::Parser;
use std::io::{BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing_subscriber::EnvFilter;

/// Catalog-Harvest: a product catalog scraper
///
/// Walks the catalog pages START through END, extracts every product page
/// they link to and writes the records as CSV and JSON.
#[derive(Parser, Debug)]
#[command(name = "catalog-harvest")]
#[command(version)]
#[command(about = "A product catalog scraper", long_about = None)]
struct Cli {
    /// Catalog page range, e.g. 1:5 (prompted for when omitted)
    #[arg(value_name = "START:END")]
    pages: Option<String>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Product pages fetched concurrently (1 = sequential with pauses)
    #[arg(short, long)]
    workers: Option<usize>,

    /// Override the CSV output path
    #[arg(long, value_name = "FILE")]
    csv: Option<String>,

    /// Override the JSON output path
    #[arg(long, value_name = "FILE")]
    json: Option<String>,

    /// Run in the background, logging to the configured log file
    #[arg(long, requires = "pages")]
    detach: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match load_config(&cli) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let interactive = cli.pages.is_none();
    let range = match &cli.pages {
        Some(pages) => pages.parse::<PageRange>(),
        None => prompt_page_range(),
    };
    let range = match range {
        Ok(r) => r,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e.into());
        }
    };

    config.crawler.workers = crawl_width(config.crawler.workers, cli.workers, interactive);

    if cli.detach {
        handle_detach(&config, range)?;
    } else {
        handle_crawl(&config, range).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("catalog_harvest=info,warn"),
            1 => EnvFilter::new("catalog_harvest=debug,info"),
            2 => EnvFilter::new("catalog_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_ansi(std::io::stdout().is_terminal())
        .init();
}

/// Loads the configuration file (if any) and applies command-line overrides
fn load_config(cli: &Cli) -> Result<Config, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (cfg, hash) = config::load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            cfg
        }
        None => Config::default(),
    };

    if let Some(workers) = cli.workers {
        config.crawler.workers = workers;
    }
    if let Some(csv) = &cli.csv {
        config.output.csv_path = csv.clone();
    }
    if let Some(json) = &cli.json {
        config.output.json_path = json.clone();
    }

    config::validate(&config)?;
    Ok(config)
}

/// Number of product pages to keep in flight
///
/// A prompted run crawls one page at a time with pauses unless `--workers`
/// says otherwise; a run given `START:END` keeps the configured width.
fn crawl_width(configured: usize, flag: Option<usize>, interactive: bool) -> usize {
    match flag {
        Some(workers) => workers,
        None if interactive => 1,
        None => configured,
    }
}

/// Asks for the first and last catalog page on the console
fn prompt_page_range() -> Result<PageRange, ConfigError> {
    let start = prompt_page_number("Enter the first catalog page: ")?;
    let end = prompt_page_number("Enter the last catalog page: ")?;
    Ok(PageRange::new(start, end))
}

fn prompt_page_number(prompt: &str) -> Result<u32, ConfigError> {
    print!("{}", prompt);
    std::io::stdout().flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;

    line.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidRange {
            input: line.trim().to_string(),
            reason: "not a page number".to_string(),
        })
}

/// Re-launches this binary in the background with output sent to the log file
fn handle_detach(config: &Config, range: PageRange) -> Result<(), Box<dyn std::error::Error>> {
    let log_path = Path::new(&config.output.log_path);
    let log = std::fs::File::create(log_path)?;
    let args: Vec<_> = std::env::args_os()
        .skip(1)
        .filter(|arg| arg.as_os_str() != "--detach")
        .collect();

    let child = Command::new(std::env::current_exe()?)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(log.try_clone()?)
        .stderr(log)
        .spawn()?;

    println!(
        "Harvesting catalog pages {} to {} in the background...",
        range.start, range.end
    );
    println!("Logs are written to '{}'.", log_path.display());
    println!("Process started (pid {}).", child.id());

    Ok(())
}

/// Handles the main harvest operation
async fn handle_crawl(config: &Config, range: PageRange) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        "Harvesting {} (pages {}, {} workers)",
        config.site.catalog_url,
        range,
        config.crawler.workers
    );

    let (records, report) = match run_harvest(config, range).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!("Harvest failed: {}", e);
            return Err(e.into());
        }
    };

    let csv_path = Path::new(&config.output.csv_path);
    let json_path = Path::new(&config.output.json_path);
    let targets: [(&dyn Exporter, &Path); 2] =
        [(&CsvExporter, csv_path), (&JsonExporter, json_path)];
    export_all(&records, &targets)?;

    print_report(
        &report,
        &[config.output.csv_path.as_str(), config.output.json_path.as_str()],
    );

    Ok(())
}
