use crate::common::{
    create_test_config, mount_catalog_page, mount_failing_product, mount_product, product_url,
};
use catalog_harvest::config::PageRange;
use catalog_harvest::crawler::{Coordinator, CrawlEvent, MemorySink, NullSink};
use catalog_harvest::output::{read_json, CsvExporter, Exporter, JsonExporter, ProductRecord};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn names(records: &[ProductRecord]) -> Vec<String> {
    records.iter().map(|r| r.name.clone()).collect()
}

#[tokio::test]
async fn test_full_harvest_skips_failures() {
    let mock_server = MockServer::start().await;

    mount_catalog_page(&mock_server, 1, &["a", "b", "c"]).await;
    mount_catalog_page(&mock_server, 2, &["c", "d", "broken", "empty"]).await;
    // Page 3 is not mounted and answers 404

    for slug in ["a", "b", "c", "d"] {
        mount_product(&mock_server, slug).await;
    }
    mount_failing_product(&mock_server, "broken", 500).await;
    Mock::given(method("GET"))
        .and(path("/product/empty/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&mock_server)
        .await;

    let sink = Arc::new(MemorySink::new());
    let config = create_test_config(&mock_server.uri(), 3);
    let coordinator = Coordinator::new(&config, sink.clone()).expect("Failed to create coordinator");

    let (records, report) = coordinator.run(PageRange::new(1, 3)).await;

    assert_eq!(report.catalog_pages, 3);
    assert_eq!(report.catalog_failures, 1);
    assert_eq!(report.product_urls, 6);
    assert_eq!(report.records, 4);
    assert_eq!(report.product_failures, 2);

    let found: HashSet<String> = names(&records).into_iter().collect();
    let expected: HashSet<String> = ["a", "b", "c", "d"]
        .iter()
        .map(|slug| format!("Товар {}", slug))
        .collect();
    assert_eq!(found, expected);

    let record = records
        .iter()
        .find(|r| r.name == "Товар a")
        .expect("record for product a");
    assert_eq!(record.category, "Каталог / Спортивное питание");
    assert_eq!(record.price, "1 000");
    assert_eq!(
        record.images,
        vec![
            format!("{}/upload/a/1.jpg", mock_server.uri()),
            format!("{}/upload/a/2.jpg", mock_server.uri()),
        ]
    );
    assert_eq!(record.characteristics, "Вес500г\nРазмер упаковки10x10");
    assert_eq!(record.sku, "Артикул: a");
    assert_eq!(record.description, "Описание a");
    assert_eq!(record.extended_description, "Calories: \nSugars: 5g (10%)");

    assert_eq!(
        sink.count(|e| matches!(e, CrawlEvent::ExtractFailed { .. })),
        1
    );
}

#[tokio::test]
async fn test_one_event_per_fetch_attempt() {
    let mock_server = MockServer::start().await;
    mount_catalog_page(&mock_server, 1, &["a", "gone"]).await;
    mount_product(&mock_server, "a").await;
    mount_failing_product(&mock_server, "gone", 404).await;

    let sink = Arc::new(MemorySink::new());
    let config = create_test_config(&mock_server.uri(), 2);
    let coordinator = Coordinator::new(&config, sink.clone()).unwrap();

    coordinator.run(PageRange::new(1, 1)).await;

    let requests = mock_server.received_requests().await.unwrap().len();
    let fetch_events = sink.count(|e| {
        matches!(
            e,
            CrawlEvent::Fetched { .. } | CrawlEvent::FetchFailed { .. }
        )
    });
    assert_eq!(requests, 3);
    assert_eq!(fetch_events, requests);
}

#[tokio::test]
async fn test_concurrent_crawl_n_minus_k_records() {
    let mock_server = MockServer::start().await;

    let mut urls = Vec::new();
    for i in 0..10 {
        let slug = format!("p{}", i);
        if i % 3 == 0 {
            mount_failing_product(&mock_server, &slug, 503).await;
        } else {
            mount_product(&mock_server, &slug).await;
        }
        urls.push(product_url(&mock_server, &slug));
    }

    let config = create_test_config(&mock_server.uri(), 10);
    let coordinator = Coordinator::new(&config, Arc::new(NullSink)).unwrap();

    let records = coordinator.crawl(urls).await;

    // p0, p3, p6, p9 fail
    assert_eq!(records.len(), 6);
    let distinct: HashSet<String> = names(&records).into_iter().collect();
    assert_eq!(distinct.len(), 6);
    for record in &records {
        assert_eq!(record.description, record.name.replace("Товар", "Описание"));
        assert_eq!(record.images.len(), 2);
    }
}

#[tokio::test]
async fn test_sequential_crawl_keeps_input_order() {
    let mock_server = MockServer::start().await;
    let slugs = ["z", "m", "a", "q"];
    for slug in slugs {
        mount_product(&mock_server, slug).await;
    }

    let config = create_test_config(&mock_server.uri(), 1);
    let coordinator = Coordinator::new(&config, Arc::new(NullSink)).unwrap();

    let urls = slugs.iter().map(|s| product_url(&mock_server, s)).collect();
    let records = coordinator.crawl(urls).await;

    assert_eq!(
        names(&records),
        vec!["Товар z", "Товар m", "Товар a", "Товар q"]
    );
}

#[tokio::test]
async fn test_sequential_crawl_is_paced() {
    let mock_server = MockServer::start().await;
    for slug in ["a", "b", "c"] {
        mount_product(&mock_server, slug).await;
    }

    let mut config = create_test_config(&mock_server.uri(), 1);
    config.crawler.request_delay_ms = 200;
    let coordinator = Coordinator::new(&config, Arc::new(NullSink)).unwrap();

    let urls = ["a", "b", "c"]
        .iter()
        .map(|s| product_url(&mock_server, s))
        .collect();
    let start = Instant::now();
    let records = coordinator.crawl(urls).await;

    assert_eq!(records.len(), 3);
    assert!(start.elapsed() >= Duration::from_millis(400));
}

#[tokio::test]
async fn test_concurrent_crawl_overlaps_requests() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(crate::common::product_page("slow"))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&mock_server)
        .await;

    let mut config = create_test_config(&mock_server.uri(), 5);
    config.crawler.request_delay_ms = 1000;
    let coordinator = Coordinator::new(&config, Arc::new(NullSink)).unwrap();

    let urls = (0..5)
        .map(|i| product_url(&mock_server, &format!("s{}", i)))
        .collect();
    let start = Instant::now();
    let records = coordinator.crawl(urls).await;

    assert_eq!(records.len(), 5);
    // Five sequential requests would take at least 1.5s
    assert!(start.elapsed() < Duration::from_millis(1200));
}

#[tokio::test]
async fn test_crawled_records_survive_export() {
    let mock_server = MockServer::start().await;
    mount_catalog_page(&mock_server, 1, &["x", "y"]).await;
    mount_product(&mock_server, "x").await;
    mount_product(&mock_server, "y").await;

    let config = create_test_config(&mock_server.uri(), 2);
    let coordinator = Coordinator::new(&config, Arc::new(NullSink)).unwrap();
    let (records, _report) = coordinator.run(PageRange::new(1, 1)).await;
    assert_eq!(records.len(), 2);

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("products.json");
    let csv_path = dir.path().join("products.csv");

    JsonExporter.export(&records, &json_path).unwrap();
    CsvExporter.export(&records, &csv_path).unwrap();

    assert_eq!(read_json(&json_path).unwrap(), records);

    let mut reader = csv::Reader::from_path(&csv_path).unwrap();
    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 2);
    for (row, record) in rows.iter().zip(&records) {
        assert_eq!(&row[0], record.sku.as_str());
        assert_eq!(&row[6], record.images.join("\n").as_str());
    }
}
