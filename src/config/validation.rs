use crate::config::types::{CatalogConfig, Config, HttpConfig, OutputConfig, ScheduleConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_catalog_config(&config.catalog)?;
    validate_http_config(&config.http)?;
    validate_output_config(&config.output)?;
    validate_schedule_config(&config.schedule)?;
    Ok(())
}

/// Validates the catalog base URL
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            config.base_url
        )));
    }

    // Relative links only resolve under the catalog directory with a trailing slash
    if !url.path().ends_with('/') {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must end with '/', got '{}'",
            config.base_url
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.records_path.trim().is_empty() {
        return Err(ConfigError::Validation(
            "records_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the daily schedule
fn validate_schedule_config(config: &ScheduleConfig) -> Result<(), ConfigError> {
    config.daily_time()?;

    if config.poll_interval_secs < 1 || config.poll_interval_secs > 3600 {
        return Err(ConfigError::Validation(format!(
            "poll_interval_secs must be between 1 and 3600, got {}",
            config.poll_interval_secs
        )));
    }

    Ok(())
}
