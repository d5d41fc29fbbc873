//! Page interval resolution

use crate::RangeError;
use std::ops::RangeInclusive;

/// An inclusive, 1-based range of catalog pages
///
/// Only [`validate_interval`] builds one, so `from <= to` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInterval {
    from: u32,
    to: u32,
}

impl PageInterval {
    /// First page of the interval
    pub fn from(&self) -> u32 {
        self.from
    }

    /// Last page of the interval
    pub fn to(&self) -> u32 {
        self.to
    }

    /// The page numbers in increasing order
    pub fn pages(&self) -> RangeInclusive<u32> {
        self.from..=self.to
    }

    /// Number of pages in the interval
    pub fn len(&self) -> u32 {
        if self.from > self.to {
            0
        } else {
            self.to - self.from + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolves requested bounds against the catalog's page count
///
/// `from` defaults to 1 and `to` defaults to `max_page`. Valid bounds are
/// returned unchanged; nothing is clamped.
///
/// # Errors
///
/// * [`RangeError::BelowFirstPage`] - `from` is 0
/// * [`RangeError::Inverted`] - `from` is greater than `to`
/// * [`RangeError::BeyondLastPage`] - `to` is greater than `max_page`
///
/// # Example
///
/// ```
/// use shelf_scrape::crawler::validate_interval;
///
/// let interval = validate_interval(Some(2), None, 50).unwrap();
/// assert_eq!((interval.from(), interval.to()), (2, 50));
/// assert!(validate_interval(Some(50), Some(51), 50).is_err());
/// ```
pub fn validate_interval(
    from: Option<u32>,
    to: Option<u32>,
    max_page: u32,
) -> Result<PageInterval, RangeError> {
    let from = from.unwrap_or(1);
    let to = to.unwrap_or(max_page);

    if from < 1 {
        return Err(RangeError::BelowFirstPage { from });
    }

    if from > to {
        return Err(RangeError::Inverted { from, to });
    }

    if to > max_page {
        return Err(RangeError::BeyondLastPage { to, max: max_page });
    }

    Ok(PageInterval { from, to })
}
