//! Catalog listing extraction

use crate::extract::query::{require_first, select_all, Document};
use crate::ScrapeError;
use url::Url;

const LISTING: &str = "section";
const ITEM_HEADING: &str = "h3";
const ITEM_LINK: &str = "a[href]";

/// Extracts the book page URLs listed on one catalog page
///
/// Each item heading's link target is trimmed and resolved against `base`, the
/// catalog base URL. URLs are returned in the order they appear on the page.
/// A listing with no items yields an empty list.
///
/// # Errors
///
/// Returns [`ScrapeError::MalformedPage`] if the listing region is missing or an
/// item heading has no link, and [`ScrapeError::UrlParse`] if a link target
/// cannot be resolved.
///
/// # Example
///
/// ```
/// use shelf_scrape::extract_links;
/// use url::Url;
///
/// let base = Url::parse("https://books.toscrape.com/catalogue/").unwrap();
/// let html = r#"<section><ol><li><h3><a href="olio_984/index.html">Olio</a></h3></li></ol></section>"#;
/// let links = extract_links(html, &base).unwrap();
/// assert_eq!(links, vec!["https://books.toscrape.com/catalogue/olio_984/index.html"]);
/// ```
pub fn extract_links(markup: &str, base: &Url) -> Result<Vec<String>, ScrapeError> {
    let document = Document::parse(markup);
    let listing = require_first(document.root(), LISTING, "catalog listing")?;

    let mut links = Vec::new();
    for heading in select_all(listing, ITEM_HEADING)? {
        let anchor = require_first(heading, ITEM_LINK, "book link")?;
        let href = anchor.value().attr("href").unwrap_or_default().trim();
        links.push(base.join(href)?.to_string());
    }

    Ok(links)
}
