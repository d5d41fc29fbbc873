//! End-to-end scrape tests against a mock catalog

use shelf_scrape::crawler::ScrapeStats;
use shelf_scrape::output::{OutputError, OutputResult, RecordSink};
use shelf_scrape::{BookRecord, Config, FetchError, RangeError, ScrapeError, Scraper};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;
use wiremock::matchers::{method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CATALOGUE_PAGE: &str = include_str!("../fixtures/catalogue-page-1.html");
const BOOK_PAGE: &str = include_str!("../fixtures/book-a-light-in-the-attic.html");

/// Creates a test configuration pointing at the mock catalog
fn create_test_config(server: &MockServer, records_path: &str) -> Config {
    let mut config = Config::default();
    config.catalog.base_url = format!("{}/catalogue/", server.uri());
    config.http.timeout_secs = 5;
    config.output.records_path = records_path.to_string();
    config
}

/// Builds a catalog page listing the given book slugs
fn catalog_page(slugs: &[&str], page: u32, total: u32) -> String {
    let items: String = slugs
        .iter()
        .map(|slug| {
            format!(
                r#"<li><article class="product_pod"><h3><a href="{slug}/index.html">{slug}</a></h3></article></li>"#
            )
        })
        .collect();

    format!(
        r#"<html><body><section><ol class="row">{items}</ol>
           <ul class="pager"><li class="current">Page {page} of {total}</li></ul>
           </section></body></html>"#
    )
}

/// Builds a minimal book page
fn book_page(title: &str) -> String {
    format!(
        r#"<html><body><article class="product_page">
            <h1>{title}</h1>
            <p class="price_color">£10.00</p>
            <p class="instock availability">In stock (5 available)</p>
            <p class="star-rating Two"></p>
            <table class="table table-striped">
                <tr><th>UPC</th><td>upc-{title}</td></tr>
                <tr><th>Availability</th><td>In stock (5 available)</td></tr>
            </table>
        </article></body></html>"#
    )
}

async fn mount_html(server: &MockServer, page_path: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .mount(server)
        .await;
}

async fn mount_status(server: &MockServer, page_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Mounts a three-page catalog with two books per page
async fn mount_small_catalog(server: &MockServer) {
    let pages = [
        ["book-a", "book-b"],
        ["book-c", "book-d"],
        ["book-e", "book-f"],
    ];

    for (index, slugs) in pages.iter().enumerate() {
        let page = index as u32 + 1;
        mount_html(
            server,
            &format!("/catalogue/page-{}.html", page),
            catalog_page(slugs, page, 3),
        )
        .await;
    }
}

async fn mount_books(server: &MockServer, slugs: &[&str]) {
    for slug in slugs {
        mount_html(
            server,
            &format!("/catalogue/{}/index.html", slug),
            book_page(slug),
        )
        .await;
    }
}

fn titles(records: &[BookRecord]) -> Vec<&str> {
    records.iter().filter_map(BookRecord::title).collect()
}

/// Sink that keeps every persisted batch in memory
#[derive(Default)]
struct MemorySink {
    batches: Mutex<Vec<Vec<BookRecord>>>,
}

impl RecordSink for MemorySink {
    fn persist(&self, records: &[BookRecord]) -> OutputResult<()> {
        self.batches.lock().unwrap().push(records.to_vec());
        Ok(())
    }
}

/// Sink that always fails
struct FailingSink;

impl RecordSink for FailingSink {
    fn persist(&self, _records: &[BookRecord]) -> OutputResult<()> {
        Err(OutputError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "read-only",
        )))
    }
}

#[tokio::test]
async fn test_resolve_page_count_from_catalog() {
    let mock_server = MockServer::start().await;
    mount_html(&mock_server, "/catalogue/page-1.html", CATALOGUE_PAGE.to_string()).await;

    let scraper = Scraper::new(&create_test_config(&mock_server, "unused.txt")).unwrap();

    assert_eq!(scraper.resolve_page_count().await.unwrap(), 50);
}

#[tokio::test]
async fn test_scrape_two_full_catalog_pages() {
    let mock_server = MockServer::start().await;

    for page in 1..=3 {
        mount_html(
            &mock_server,
            &format!("/catalogue/page-{}.html", page),
            CATALOGUE_PAGE.to_string(),
        )
        .await;
    }

    // Every book link in the fixture resolves to the same book page
    Mock::given(method("GET"))
        .and(path_regex(r"^/catalogue/[^/]+/index\.html$"))
        .respond_with(ResponseTemplate::new(200).set_body_string(BOOK_PAGE))
        .mount(&mock_server)
        .await;

    let scraper = Scraper::new(&create_test_config(&mock_server, "unused.txt")).unwrap();
    let records = scraper.scrape(false, Some(2), Some(3)).await.unwrap();

    assert_eq!(records.len(), 40);
    assert!(records
        .iter()
        .all(|record| record.title() == Some("A Light in the Attic")));
}

#[tokio::test]
async fn test_scrape_keeps_catalog_order() {
    let mock_server = MockServer::start().await;
    mount_small_catalog(&mock_server).await;
    mount_books(
        &mock_server,
        &["book-a", "book-b", "book-c", "book-d", "book-e", "book-f"],
    )
    .await;

    let scraper = Scraper::new(&create_test_config(&mock_server, "unused.txt")).unwrap();
    let (records, stats) = scraper.scrape_with_stats(false, None, None).await.unwrap();

    assert_eq!(
        titles(&records),
        vec!["book-a", "book-b", "book-c", "book-d", "book-e", "book-f"]
    );
    assert_eq!(
        stats,
        ScrapeStats {
            pages_visited: 3,
            pages_skipped: 0,
            books_parsed: 6,
            books_skipped: 0,
            persisted: false,
        }
    );
}

#[tokio::test]
async fn test_records_are_deduplicated() {
    let mock_server = MockServer::start().await;
    mount_small_catalog(&mock_server).await;
    mount_books(&mock_server, &["book-a", "book-b"]).await;

    let scraper = Scraper::new(&create_test_config(&mock_server, "unused.txt")).unwrap();
    let records = scraper.scrape(false, Some(1), Some(1)).await.unwrap();

    let record = &records[0];
    let keys: Vec<&str> = record.keys().collect();
    assert_eq!(
        keys,
        vec!["Title", "Price", "Rating", "Availability", "UPC"]
    );
    assert_eq!(
        record.get("Availability").and_then(|v| v.as_number()),
        Some(5)
    );
}

#[tokio::test]
async fn test_failed_catalog_page_is_skipped() {
    let mock_server = MockServer::start().await;
    // Page 2 fails; mounted before the healthy pages so it takes precedence
    mount_status(&mock_server, "/catalogue/page-2.html", 500).await;
    mount_small_catalog(&mock_server).await;
    mount_books(&mock_server, &["book-a", "book-b", "book-e", "book-f"]).await;

    let scraper = Scraper::new(&create_test_config(&mock_server, "unused.txt")).unwrap();
    let (records, stats) = scraper.scrape_with_stats(false, None, None).await.unwrap();

    assert_eq!(titles(&records), vec!["book-a", "book-b", "book-e", "book-f"]);
    assert_eq!(stats.pages_visited, 2);
    assert_eq!(stats.pages_skipped, 1);
}

#[tokio::test]
async fn test_catalog_page_without_listing_is_skipped() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        "/catalogue/page-2.html",
        r#"<html><body><ul class="pager"><li>Page 2 of 3</li></ul></body></html>"#.to_string(),
    )
    .await;
    mount_small_catalog(&mock_server).await;
    mount_books(&mock_server, &["book-a", "book-b", "book-e", "book-f"]).await;

    let scraper = Scraper::new(&create_test_config(&mock_server, "unused.txt")).unwrap();
    let records = scraper.scrape(false, None, None).await.unwrap();

    assert_eq!(titles(&records), vec!["book-a", "book-b", "book-e", "book-f"]);
}

#[tokio::test]
async fn test_failed_books_are_skipped() {
    let mock_server = MockServer::start().await;
    mount_small_catalog(&mock_server).await;
    mount_books(&mock_server, &["book-a", "book-d"]).await;
    // book-b has no product container, book-c is never mounted (404)
    mount_html(
        &mock_server,
        "/catalogue/book-b/index.html",
        "<html><body><h1>Gone</h1></body></html>".to_string(),
    )
    .await;

    let scraper = Scraper::new(&create_test_config(&mock_server, "unused.txt")).unwrap();
    let (records, stats) = scraper
        .scrape_with_stats(false, Some(1), Some(2))
        .await
        .unwrap();

    assert_eq!(titles(&records), vec!["book-a", "book-d"]);
    assert_eq!(stats.books_parsed, 2);
    assert_eq!(stats.books_skipped, 2);
}

#[tokio::test]
async fn test_inverted_range_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_small_catalog(&mock_server).await;

    let scraper = Scraper::new(&create_test_config(&mock_server, "unused.txt")).unwrap();
    let result = scraper.scrape(false, Some(2), Some(1)).await;

    assert!(matches!(
        result,
        Err(ScrapeError::InvalidRange(RangeError::Inverted { from: 2, to: 1 }))
    ));
}

#[tokio::test]
async fn test_range_beyond_catalog_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_small_catalog(&mock_server).await;

    let scraper = Scraper::new(&create_test_config(&mock_server, "unused.txt")).unwrap();
    let result = scraper.scrape(false, Some(3), Some(4)).await;

    assert!(matches!(
        result,
        Err(ScrapeError::InvalidRange(RangeError::BeyondLastPage { to: 4, max: 3 }))
    ));
}

#[tokio::test]
async fn test_page_count_failure_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_status(&mock_server, "/catalogue/page-1.html", 503).await;

    let scraper = Scraper::new(&create_test_config(&mock_server, "unused.txt")).unwrap();
    let result = scraper.scrape(false, Some(1), Some(1)).await;

    assert!(matches!(
        result,
        Err(ScrapeError::Fetch(FetchError::Status { status: 503, .. }))
    ));
}

#[tokio::test]
async fn test_missing_pager_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_html(
        &mock_server,
        "/catalogue/page-1.html",
        "<html><body><section></section></body></html>".to_string(),
    )
    .await;

    let scraper = Scraper::new(&create_test_config(&mock_server, "unused.txt")).unwrap();
    let result = scraper.scrape(false, None, None).await;

    assert!(matches!(result, Err(ScrapeError::MalformedPage(_))));
}

#[tokio::test]
async fn test_persist_writes_records_file() {
    let mock_server = MockServer::start().await;
    mount_small_catalog(&mock_server).await;
    mount_books(&mock_server, &["book-a", "book-b"]).await;

    let dir = TempDir::new().unwrap();
    let records_path = dir.path().join("artifacts").join("books_data.txt");
    let config = create_test_config(&mock_server, &records_path.display().to_string());

    let scraper = Scraper::new(&config).unwrap();
    let records = scraper.scrape(true, Some(1), Some(1)).await.unwrap();
    assert_eq!(records.len(), 2);

    let content = std::fs::read_to_string(&records_path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Title: book-a",
            "Price: £10.00",
            "Rating: 2",
            "Availability: 5",
            "UPC: upc-book-a",
            "Title: book-b",
            "Price: £10.00",
            "Rating: 2",
            "Availability: 5",
            "UPC: upc-book-b",
        ]
    );
}

#[tokio::test]
async fn test_no_persist_leaves_no_file() {
    let mock_server = MockServer::start().await;
    mount_small_catalog(&mock_server).await;
    mount_books(&mock_server, &["book-a", "book-b"]).await;

    let dir = TempDir::new().unwrap();
    let records_path = dir.path().join("books_data.txt");
    let config = create_test_config(&mock_server, &records_path.display().to_string());

    let scraper = Scraper::new(&config).unwrap();
    scraper.scrape(false, Some(1), Some(1)).await.unwrap();

    assert!(!records_path.exists());
}

#[tokio::test]
async fn test_sink_receives_full_collection_once() {
    let mock_server = MockServer::start().await;
    mount_small_catalog(&mock_server).await;
    mount_books(&mock_server, &["book-c", "book-d", "book-e", "book-f"]).await;

    let sink = Arc::new(MemorySink::default());
    let config = create_test_config(&mock_server, "unused.txt");
    let scraper = Scraper::with_sink(&config, sink.clone()).unwrap();

    let (records, stats) = scraper.scrape_with_stats(true, Some(2), None).await.unwrap();
    assert!(stats.persisted);

    let batches = sink.batches.lock().unwrap();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0], records);
    assert_eq!(records.len(), 4);
}

#[tokio::test]
async fn test_sink_failure_returns_records_unpersisted() {
    let mock_server = MockServer::start().await;
    mount_small_catalog(&mock_server).await;
    mount_books(&mock_server, &["book-a", "book-b"]).await;

    let config = create_test_config(&mock_server, "unused.txt");
    let scraper = Scraper::with_sink(&config, Arc::new(FailingSink)).unwrap();

    let (records, stats) = scraper.scrape_with_stats(true, Some(1), Some(1)).await.unwrap();
    assert_eq!(titles(&records), vec!["book-a", "book-b"]);
    assert_eq!(stats.books_parsed, 2);
    assert!(!stats.persisted);
}
