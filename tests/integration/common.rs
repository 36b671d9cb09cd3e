//! Shared fixtures for the integration tests

use catalog_harvest::config::Config;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a configuration pointing at the mock server
pub fn create_test_config(base_url: &str, workers: usize) -> Config {
    let mut config = Config::default();
    config.site.catalog_url = format!("{}/catalog", base_url);
    config.site.product_prefix = format!("{}/product/", base_url);
    config.crawler.workers = workers;
    config.crawler.request_delay_ms = 0;
    config.crawler.timeout_secs = 5;
    config
}

/// Markup of a product page carrying every extracted field
pub fn product_page(slug: &str) -> String {
    format!(
        r#"<html><body>
        <span itemprop="name">Каталог</span>
        <span itemprop="name">Спортивное питание</span>
        <span itemprop="name">Артикул: {slug}</span>
        <h1 id="pagetitle">Товар {slug}</h1>
        <span class="price_value">1 000</span>
        <ul>
            <li id="photo-1"><img data-src="/upload/{slug}/1.jpg" src="/blank.gif"></li>
            <li id="photo-2"><img src="/upload/{slug}/2.jpg"></li>
        </ul>
        <div class="top_props"><span>Вес500г</span><span>Размер упаковки10x10</span></div>
        <div class="article iblock" itemprop="additionalProperty">Артикул: {slug}</div>
        <div class="descr-outer-wrapper"><p>Описание {slug}</p></div>
        <table>
            <tr valign="top"><td>Calories</td></tr>
            <tr valign="top"><td>Sugars</td><td>5g</td><td>10%</td></tr>
        </table>
        </body></html>"#
    )
}

/// Markup of a catalog page linking to the given product slugs
pub fn catalog_page(slugs: &[&str]) -> String {
    let links: String = slugs
        .iter()
        .map(|slug| format!(r#"<a href="/product/{}/">{}</a>"#, slug, slug))
        .collect();
    format!(
        r#"<html><body>{}<a href="/about/">About</a><a href="/catalog?PAGEN_1=99">Last</a></body></html>"#,
        links
    )
}

/// Serves a catalog page for `page`
pub async fn mount_catalog_page(server: &MockServer, page: u32, slugs: &[&str]) {
    Mock::given(method("GET"))
        .and(path("/catalog"))
        .and(query_param("PAGEN_1", page.to_string().as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(catalog_page(slugs)))
        .mount(server)
        .await;
}

/// Serves a product page for `slug`
pub async fn mount_product(server: &MockServer, slug: &str) {
    Mock::given(method("GET"))
        .and(path(format!("/product/{}/", slug)))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(product_page(slug)),
        )
        .mount(server)
        .await;
}

/// Serves an error status for the product page of `slug`
pub async fn mount_failing_product(server: &MockServer, slug: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/product/{}/", slug)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Product URL for `slug` on the mock server
pub fn product_url(server: &MockServer, slug: &str) -> String {
    format!("{}/product/{}/", server.uri(), slug)
}
