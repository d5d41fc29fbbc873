//! Book page extraction

use crate::extract::query::{require_first, select_all, select_first, text_of, Document};
use crate::record::{BookRecord, AVAILABILITY, DESCRIPTION, PRICE, RATING, TITLE};
use crate::ScrapeError;
use regex::Regex;
use scraper::ElementRef;
use std::sync::LazyLock;

const PRODUCT: &str = "article.product_page";
const TITLE_HEADING: &str = "h1";
const PRICE_TAG: &str = "p.price_color";
const RATING_TAG: &str = "p.star-rating";
const AVAILABILITY_TAG: &str = "p.instock.availability";
const DESCRIPTION_ANCHOR: &str = "div#product_description";
const ATTRIBUTE_TABLE: &str = "table.table.table-striped";

/// Mis-decoded leading byte of the UTF-8 pound sign, as it shows up when the
/// page is read as Latin-1.
const GLYPH_ARTIFACT: char = 'Â';

static FIRST_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("number regex is valid")); // Static pattern, safe to panic

/// Parses one book page into a record
///
/// # Fields
///
/// | Field | Source | When absent |
/// |-------|--------|-------------|
/// | Title | first `h1` | malformed page |
/// | Price | `p.price_color` | malformed page |
/// | Rating | 2nd class token of `p.star-rating` | omitted |
/// | Availability | first number in `p.instock.availability` | omitted |
/// | Description | `p` following `div#product_description` | omitted |
/// | *table rows* | `th` / `td` of the product information table | malformed page |
///
/// Table rows never overwrite a field that is already set.
///
/// # Errors
///
/// Returns [`ScrapeError::MalformedPage`] when a required element is missing.
///
/// # Example
///
/// ```
/// use shelf_scrape::extract_book;
///
/// let html = r#"<article class="product_page">
///     <h1>Olio</h1><p class="price_color">£23.88</p>
///     <table class="table table-striped"><tr><th>UPC</th><td>feb7cc7701ecf901</td></tr></table>
/// </article>"#;
/// let record = extract_book(html).unwrap();
/// assert_eq!(record.title(), Some("Olio"));
/// assert_eq!(record.len(), 3);
/// ```
pub fn extract_book(markup: &str) -> Result<BookRecord, ScrapeError> {
    let document = Document::parse(markup);
    let product = require_first(document.root(), PRODUCT, "product container")?;

    let mut record = BookRecord::new();

    let title = require_first(product, TITLE_HEADING, "title heading")?;
    record.insert_if_absent(TITLE, text_of(title));

    let price = require_first(product, PRICE_TAG, "price")?;
    record.insert_if_absent(PRICE, strip_glyph_artifact(&text_of(price)));

    if let Some(rating) = extract_rating(product)? {
        record.insert_if_absent(RATING, rating);
    }

    if let Some(available) = extract_availability(product)? {
        record.insert_if_absent(AVAILABILITY, available);
    }

    if let Some(description) = extract_description(product)? {
        record.insert_if_absent(DESCRIPTION, description);
    }

    let table = require_first(product, ATTRIBUTE_TABLE, "product information table")?;
    for row in select_all(table, "tr")? {
        let name = text_of(require_first(row, "th", "attribute name cell")?);
        let value = text_of(require_first(row, "td", "attribute value cell")?);
        if !record.insert_if_absent(name.as_str(), strip_glyph_artifact(&value)) {
            tracing::trace!("Skipping duplicate attribute '{}'", name);
        }
    }

    Ok(record)
}

/// Maps a star-rating word to its number of stars; unknown words map to 0
pub fn rating_from_word(word: &str) -> u32 {
    match word {
        "One" => 1,
        "Two" => 2,
        "Three" => 3,
        "Four" => 4,
        "Five" => 5,
        _ => 0,
    }
}

/// Removes the mis-encoded currency glyph artifact from a text value
pub fn strip_glyph_artifact(text: &str) -> String {
    text.replace(GLYPH_ARTIFACT, "")
}

/// Reads the rating word from the second class token, e.g. `star-rating Three`
fn extract_rating(product: ElementRef<'_>) -> Result<Option<u32>, ScrapeError> {
    let rating = select_first(product, RATING_TAG)?
        .and_then(|tag| tag.value().attr("class"))
        .and_then(|classes| classes.split_whitespace().nth(1))
        .map(rating_from_word);
    Ok(rating)
}

fn extract_availability(product: ElementRef<'_>) -> Result<Option<u64>, ScrapeError> {
    let Some(tag) = select_first(product, AVAILABILITY_TAG)? else {
        return Ok(None);
    };

    let text = text_of(tag);
    let Some(digits) = FIRST_NUMBER.find(&text) else {
        return Ok(None);
    };

    match digits.as_str().parse::<u64>() {
        Ok(available) => Ok(Some(available)),
        Err(e) => {
            tracing::warn!("Dropping availability count '{}': {}", digits.as_str(), e);
            Ok(None)
        }
    }
}

/// The description is the first `p` sibling after the description anchor
fn extract_description(product: ElementRef<'_>) -> Result<Option<String>, ScrapeError> {
    let Some(anchor) = select_first(product, DESCRIPTION_ANCHOR)? else {
        return Ok(None);
    };

    let paragraph = anchor
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "p")
        .ok_or_else(|| ScrapeError::malformed("description anchor has no following paragraph"))?;

    Ok(Some(text_of(paragraph)))
}
