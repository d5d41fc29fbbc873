//! Flat text file output
//!
//! Each field is written on its own line as `key: value`, one record after
//! another, with no separator between records.

use crate::output::traits::{OutputError, OutputResult, RecordSink};
use crate::record::BookRecord;
use std::fs;
use std::path::PathBuf;

/// Writes records to a text file, replacing its previous content
#[derive(Debug, Clone)]
pub struct TextFileSink {
    path: PathBuf,
}

impl TextFileSink {
    /// Creates a sink writing to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordSink for TextFileSink {
    /// Writes all records, creating parent directories as needed
    fn persist(&self, records: &[BookRecord]) -> OutputResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        fs::write(&self.path, format_records(records)).map_err(|source| OutputError::Write {
            path: self.path.display().to_string(),
            source,
        })?;

        tracing::debug!(
            "Wrote {} records to {}",
            records.len(),
            self.path.display()
        );
        Ok(())
    }
}

/// Formats records as `key: value` lines
pub fn format_records(records: &[BookRecord]) -> String {
    let mut out = String::new();
    for record in records {
        for (key, value) in record.iter() {
            out.push_str(&format!("{}: {}\n", key, value));
        }
    }
    out
}
