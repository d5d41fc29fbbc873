//! Scrape coordinator - main scrape orchestration logic
//!
//! This module contains the scrape loop that ties the pipeline together:
//! - Resolving the page interval against the live catalog
//! - Fetching catalog pages and extracting book links
//! - Fetching and extracting every book page
//! - Isolating per-page and per-book failures
//! - Handing the collected records to the output sink

use crate::config::{validate, Config};
use crate::crawler::range::{validate_interval, PageInterval};
use crate::crawler::{build_http_client, fetch_page};
use crate::extract::{extract_book, extract_links, parse_page_count};
use crate::output::{RecordSink, TextFileSink};
use crate::record::BookRecord;
use crate::ScrapeError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Instant;
use url::Url;

/// Counters for a single scrape run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrapeStats {
    /// Catalog pages whose listing was read
    pub pages_visited: u32,
    /// Catalog pages lost to a fetch or parse failure
    pub pages_skipped: u32,
    /// Book pages turned into records
    pub books_parsed: u32,
    /// Book pages lost to a fetch or parse failure
    pub books_skipped: u32,
    /// Whether the sink accepted the records; false when not asked to persist
    pub persisted: bool,
}

/// Main scraper structure
///
/// Holds the HTTP client (and its connection pool) for as long as the scraper
/// lives. Requests are issued one at a time.
pub struct Scraper {
    client: Client,
    base_url: Url,
    sink: Arc<dyn RecordSink>,
}

impl Scraper {
    /// Creates a scraper that persists to the configured records file
    ///
    /// # Returns
    ///
    /// * `Ok(Scraper)` - Successfully created scraper
    /// * `Err(ScrapeError)` - Invalid configuration or HTTP client setup failure
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let sink = TextFileSink::new(&config.output.records_path);
        Self::with_sink(config, Arc::new(sink))
    }

    /// Creates a scraper that persists to the given sink
    ///
    /// The configuration is validated first, so a hand-built [`Config`] gets the
    /// same checks as one loaded from a file.
    pub fn with_sink(config: &Config, sink: Arc<dyn RecordSink>) -> Result<Self, ScrapeError> {
        validate(config)?;
        let base_url = Url::parse(&config.catalog.base_url)?;
        let client = build_http_client(&config.http)?;

        Ok(Self {
            client,
            base_url,
            sink,
        })
    }

    /// URL of the given catalog page, e.g. `<base>/page-3.html`
    pub fn catalog_page_url(&self, page: u32) -> Result<Url, ScrapeError> {
        Ok(self.base_url.join(&format!("page-{}.html", page))?)
    }

    /// Determines the number of catalog pages from the pager on page 1
    ///
    /// # Errors
    ///
    /// Fails if page 1 cannot be fetched or has no readable pager.
    pub async fn resolve_page_count(&self) -> Result<u32, ScrapeError> {
        let url = self.catalog_page_url(1)?;
        let body = fetch_page(&self.client, url.as_str()).await?;
        let count = parse_page_count(&body)?;
        tracing::debug!("Catalog has {} pages", count);
        Ok(count)
    }

    /// Resolves and validates the requested page bounds
    ///
    /// Always asks the site for its page count first, since the upper bound
    /// cannot be checked otherwise.
    pub async fn resolve_interval(
        &self,
        from: Option<u32>,
        to: Option<u32>,
    ) -> Result<PageInterval, ScrapeError> {
        let max_page = self.resolve_page_count().await?;
        Ok(validate_interval(from, to, max_page)?)
    }

    /// Scrapes every book on catalog pages `from..=to`
    ///
    /// Records come back in catalog order: page by page, and within a page in
    /// listing order. A catalog page or book page that fails to load or parse
    /// is logged and left out. Only an invalid interval, or a failure to learn
    /// the catalog's page count, aborts the run.
    ///
    /// If `persist` is set the records are also handed to the sink. A sink
    /// failure is logged and the records are still returned; use
    /// [`Scraper::scrape_with_stats`] to learn whether they were written.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use shelf_scrape::{Config, Scraper};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let scraper = Scraper::new(&Config::default())?;
    /// let records = scraper.scrape(false, Some(2), Some(3)).await?;
    /// println!("Scraped {} books", records.len());
    /// # Ok(())
    /// # }
    /// ```
    pub async fn scrape(
        &self,
        persist: bool,
        from: Option<u32>,
        to: Option<u32>,
    ) -> Result<Vec<BookRecord>, ScrapeError> {
        let (records, _stats) = self.scrape_with_stats(persist, from, to).await?;
        Ok(records)
    }

    /// Like [`Scraper::scrape`], also returning the run's counters
    ///
    /// `stats.persisted` tells whether the sink accepted the records.
    pub async fn scrape_with_stats(
        &self,
        persist: bool,
        from: Option<u32>,
        to: Option<u32>,
    ) -> Result<(Vec<BookRecord>, ScrapeStats), ScrapeError> {
        let start_time = Instant::now();
        let interval = self.resolve_interval(from, to).await?;
        tracing::info!(
            "Scraping catalog pages {} to {} from {}",
            interval.from(),
            interval.to(),
            self.base_url
        );

        let mut records = Vec::new();
        let mut stats = ScrapeStats::default();

        for page in interval.pages() {
            let page_url = self.catalog_page_url(page)?;
            tracing::info!("Processing catalog page {}: {}", page, page_url);

            if let Err(e) = self
                .scrape_catalog_page(&page_url, &mut records, &mut stats)
                .await
            {
                tracing::warn!("Skipping catalog page {}: {}", page_url, e);
                stats.pages_skipped += 1;
            }
        }

        if persist {
            match self.sink.persist(&records) {
                Ok(()) => {
                    tracing::info!("Persisted {} records", records.len());
                    stats.persisted = true;
                }
                Err(e) => tracing::error!("Failed to persist {} records: {}", records.len(), e),
            }
        }

        tracing::info!(
            "Scrape completed: {} books from {} pages in {:?} ({} pages skipped, {} books skipped)",
            stats.books_parsed,
            stats.pages_visited,
            start_time.elapsed(),
            stats.pages_skipped,
            stats.books_skipped
        );

        Ok((records, stats))
    }

    /// Processes one catalog page
    ///
    /// An error means the listing itself could not be read; failures on
    /// individual books are handled here and never returned.
    async fn scrape_catalog_page(
        &self,
        page_url: &Url,
        records: &mut Vec<BookRecord>,
        stats: &mut ScrapeStats,
    ) -> Result<(), ScrapeError> {
        let body = fetch_page(&self.client, page_url.as_str()).await?;
        let links = extract_links(&body, &self.base_url)?;
        stats.pages_visited += 1;
        tracing::debug!("Found {} books on {}", links.len(), page_url);

        for link in &links {
            match self.scrape_book(link).await {
                Ok(record) => {
                    tracing::debug!("Parsed {:?} from {}", record.title().unwrap_or_default(), link);
                    records.push(record);
                    stats.books_parsed += 1;
                }
                Err(e) => {
                    tracing::warn!("Skipping book {}: {}", link, e);
                    stats.books_skipped += 1;
                }
            }
        }

        Ok(())
    }

    /// Fetches and extracts a single book page
    async fn scrape_book(&self, url: &str) -> Result<BookRecord, ScrapeError> {
        let body = fetch_page(&self.client, url).await?;
        extract_book(&body)
    }
}
