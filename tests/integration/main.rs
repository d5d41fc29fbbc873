//! Integration tests for Shelf-Scrape
//!
//! These tests run the scraper against wiremock servers serving catalog and
//! book pages, so the full pipeline is exercised without the live site.

mod scrape_tests;
