//! Configuration module for Shelf-Scrape
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section and key is optional; missing values fall back to the defaults
//! documented on each type.
//!
//! # Example
//!
//! ```no_run
//! use shelf_scrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("shelf-scrape.toml")).unwrap();
//! println!("Scraping catalog at: {}", config.catalog.base_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{CatalogConfig, Config, HttpConfig, OutputConfig, ScheduleConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
