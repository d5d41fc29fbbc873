//! Extraction of structured data from catalog and book pages
//!
//! Every extractor here is a pure function from markup to data. Markup is
//! parsed once into a [`Document`] and then queried with named CSS selectors,
//! which keeps all assumptions about the site's layout in this module:
//! - [`extract_book`]: one book page into a [`BookRecord`](crate::BookRecord)
//! - [`extract_links`]: one catalog page into absolute book URLs
//! - [`parse_page_count`]: the catalog pager into the total page count

mod book;
mod catalog;
mod pager;
pub mod query;

pub use book::{extract_book, rating_from_word, strip_glyph_artifact};
pub use catalog::extract_links;
pub use pager::parse_page_count;
pub use query::Document;
