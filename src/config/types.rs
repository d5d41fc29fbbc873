use crate::ConfigError;
use chrono::NaiveTime;
use serde::Deserialize;
use std::time::Duration;

/// Default catalog location
pub const DEFAULT_BASE_URL: &str = "https://books.toscrape.com/catalogue/";

/// Main configuration structure for Shelf-Scrape
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
    pub schedule: ScheduleConfig,
}

/// Target catalog configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Base URL of the catalog; catalog pages and book links resolve against it.
    /// Must end with `/`.
    #[serde(rename = "base-url")]
    pub base_url: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: format!("shelf-scrape/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the text file records are written to
    #[serde(rename = "records-path")]
    pub records_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            records_path: "./artifacts/books_data.txt".to_string(),
        }
    }
}

/// Daily schedule configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Local wall-clock time of the daily run, `HH:MM`
    #[serde(rename = "daily-at")]
    pub daily_at: String,

    /// How often the scheduler checks whether a run is due (seconds)
    #[serde(rename = "poll-interval-secs")]
    pub poll_interval_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            daily_at: "19:00".to_string(),
            poll_interval_secs: 50,
        }
    }
}

impl ScheduleConfig {
    /// Parses `daily_at` into a wall-clock time
    pub fn daily_time(&self) -> Result<NaiveTime, ConfigError> {
        NaiveTime::parse_from_str(self.daily_at.trim(), "%H:%M").map_err(|e| {
            ConfigError::Validation(format!(
                "daily_at must be HH:MM, got '{}': {}",
                self.daily_at, e
            ))
        })
    }

    /// The poll interval as a [`Duration`]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }
}

impl HttpConfig {
    /// The request timeout as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
