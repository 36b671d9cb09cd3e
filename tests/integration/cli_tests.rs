use crate::common::{mount_catalog_page, mount_product};
use catalog_harvest::output::read_json;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;
use wiremock::MockServer;

fn bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_catalog-harvest"))
}

/// Writes a config file pointing at the mock server into `dir`
fn write_config(dir: &Path, server: &MockServer) -> PathBuf {
    let config_path = dir.join("harvest.toml");
    let toml = format!(
        r#"
[site]
catalog-url = "{uri}/catalog"
product-prefix = "{uri}/product/"

[crawler]
workers = 2
request-delay-ms = 0
timeout-secs = 5

[output]
csv-path = "{csv}"
json-path = "{json}"
"#,
        uri = server.uri(),
        csv = dir.join("products.csv").display(),
        json = dir.join("products.json").display(),
    );
    std::fs::write(&config_path, toml).unwrap();
    config_path
}

async fn run_with_pages(config: &Path, pages: &str) -> Output {
    bin()
        .arg(pages)
        .arg("--config")
        .arg(config)
        .arg("--quiet")
        .output()
        .await
        .expect("failed to run catalog-harvest")
}

#[tokio::test]
async fn test_inverted_range_rejected_before_any_request() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server);

    let output = run_with_pages(&config, "5:1").await;

    assert!(!output.status.success());
    assert!(server.received_requests().await.unwrap().is_empty());
    assert!(!dir.path().join("products.csv").exists());
}

#[tokio::test]
async fn test_zero_start_page_rejected() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server);

    let output = run_with_pages(&config, "0:3").await;

    assert!(!output.status.success());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_range_rejected() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server);

    for pages in ["abc", "1-3", "1:", ":4", "1:2:3"] {
        let output = run_with_pages(&config, pages).await;
        assert!(!output.status.success(), "{} should be rejected", pages);
    }
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_config_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_with_pages(&dir.path().join("absent.toml"), "1:1").await;
    assert!(!output.status.success());
}

#[tokio::test]
async fn test_detach_requires_page_range() {
    let output = bin().arg("--detach").output().await.unwrap();
    assert!(!output.status.success());
}

#[tokio::test]
async fn test_harvest_writes_both_exports() {
    let server = MockServer::start().await;
    mount_catalog_page(&server, 1, &["a", "b"]).await;
    mount_product(&server, "a").await;
    mount_product(&server, "b").await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server);

    let output = run_with_pages(&config, "1:1").await;
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let records = read_json(&dir.path().join("products.json")).unwrap();
    assert_eq!(records.len(), 2);

    let csv = std::fs::read_to_string(dir.path().join("products.csv")).unwrap();
    assert!(csv.starts_with("Product Code,Product Name,Category"));
    assert!(csv.contains("Товар a"));
    assert!(csv.contains("Товар b"));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("products.json"));
}

#[tokio::test]
async fn test_workers_flag_overrides_config() {
    let server = MockServer::start().await;
    mount_catalog_page(&server, 1, &["a"]).await;
    mount_product(&server, "a").await;

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server);
    let json_path = dir.path().join("override.json");

    let output = bin()
        .args(["1:1", "--workers", "1", "--quiet"])
        .arg("--config")
        .arg(&config)
        .arg("--json")
        .arg(&json_path)
        .output()
        .await
        .unwrap();

    assert!(output.status.success());
    assert_eq!(read_json(&json_path).unwrap().len(), 1);
    assert!(!dir.path().join("products.json").exists());
}
