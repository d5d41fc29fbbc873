//! Crawler module for walking the catalog
//!
//! This module contains the scrape pipeline around the extractors:
//! - HTTP fetching with timeout and error classification
//! - Page interval validation against the catalog's real size
//! - The sequential scrape loop over catalog pages and book pages
//! - A cancellable daily schedule for unattended runs

mod coordinator;
mod fetcher;
mod range;
mod scheduler;

pub use coordinator::{ScrapeStats, Scraper};
pub use fetcher::{build_http_client, fetch_page};
pub use range::{validate_interval, PageInterval};
pub use scheduler::{next_occurrence, spawn_daily, DailySchedule, ScheduleHandle};

use crate::config::Config;
use crate::record::BookRecord;
use crate::ScrapeError;

/// Runs a one-shot scrape with the given configuration
///
/// Builds a [`Scraper`] writing to the configured records file and scrapes
/// `from..=to`, defaulting to the whole catalog. The returned stats tell
/// whether the records were written.
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `persist` - Whether to write the records to the output file
/// * `from` - First catalog page (defaults to 1)
/// * `to` - Last catalog page (defaults to the last page of the catalog)
pub async fn scrape(
    config: &Config,
    persist: bool,
    from: Option<u32>,
    to: Option<u32>,
) -> Result<(Vec<BookRecord>, ScrapeStats), ScrapeError> {
    let scraper = Scraper::new(config)?;
    scraper.scrape_with_stats(persist, from, to).await
}
