//! Normalized book records
//!
//! A [`BookRecord`] is an ordered list of `(field name, value)` pairs. Keys are
//! unique within a record: the first value written for a key wins and any later
//! value for the same key is discarded.

use std::fmt;

/// Field name for the book title
pub const TITLE: &str = "Title";
/// Field name for the listed price
pub const PRICE: &str = "Price";
/// Field name for the star rating (1..=5, 0 for an unknown word)
pub const RATING: &str = "Rating";
/// Field name for the number of copies in stock
pub const AVAILABILITY: &str = "Availability";
/// Field name for the product description
pub const DESCRIPTION: &str = "Description";

/// A single field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(u64),
}

impl FieldValue {
    /// Returns the text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            FieldValue::Number(_) => None,
        }
    }

    /// Returns the numeric content, if this is a number value
    pub fn as_number(&self) -> Option<u64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Text(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => f.write_str(text),
            FieldValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        FieldValue::Number(u64::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        FieldValue::Number(value)
    }
}

/// Ordered, duplicate-free mapping of field names to values for one book
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookRecord {
    fields: Vec<(String, FieldValue)>,
}

impl BookRecord {
    /// Creates an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a field unless the key is already present
    ///
    /// Returns `true` if the field was added, `false` if it was discarded
    /// because an earlier value for the same key exists.
    pub(crate) fn insert_if_absent(
        &mut self,
        key: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> bool {
        let key = key.into();
        if self.contains_key(&key) {
            return false;
        }
        self.fields.push((key, value.into()));
        true
    }

    /// Looks up a field by name
    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Returns whether the record has a field with this name
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.iter().any(|(name, _)| name == key)
    }

    /// The book title, if present
    pub fn title(&self) -> Option<&str> {
        self.get(TITLE).and_then(FieldValue::as_text)
    }

    /// Number of fields in the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Iterates over field names in insertion order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }
}
