//! Catalog pager parsing

use crate::extract::query::{require_first, text_of, Document};
use crate::ScrapeError;
use regex::Regex;
use std::sync::LazyLock;

const PAGER: &str = "ul.pager";

static PAGE_TOTAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"of (\d+)").expect("pager regex is valid")); // Static pattern, safe to panic

/// Reads the total page count from a catalog page's pager ("Page 1 of 50")
///
/// # Errors
///
/// Returns [`ScrapeError::MalformedPage`] if there is no pager or its text has
/// no "of N" suffix.
pub fn parse_page_count(markup: &str) -> Result<u32, ScrapeError> {
    let document = Document::parse(markup);
    let pager = require_first(document.root(), PAGER, "pager")?;
    let text = text_of(pager);

    PAGE_TOTAL
        .captures(&text)
        .and_then(|caps| caps.get(1))
        .and_then(|total| total.as_str().parse::<u32>().ok())
        .ok_or_else(|| ScrapeError::malformed(format!("pager text has no page total: '{}'", text)))
}
