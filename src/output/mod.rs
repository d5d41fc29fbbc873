//! Output module for persisting scraped records
//!
//! This module handles:
//! - The [`RecordSink`] seam the scraper hands its results to
//! - Writing records to a flat `key: value` text file

mod text_file;
mod traits;

pub use text_file::{format_records, TextFileSink};
pub use traits::{OutputError, OutputResult, RecordSink};
