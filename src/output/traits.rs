//! Output sink traits and errors

use crate::record::BookRecord;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to write output to {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for record sinks
///
/// A sink receives the full result collection of a run at once. Implementations
/// must be thread-safe so a scraper can be shared with the scheduler task.
pub trait RecordSink: Send + Sync {
    /// Persists the records of one run, in order
    ///
    /// # Arguments
    ///
    /// * `records` - The records collected by the run
    fn persist(&self, records: &[BookRecord]) -> OutputResult<()>;
}
