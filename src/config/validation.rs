use crate::config::types::{ClientConfig, Config, CrawlerConfig, SiteConfig, StorageConfig};
use crate::ConfigError;
use url::Url;

/// Upper bound on concurrent topic fetches, to stay polite to the source site
pub const MAX_TOPIC_WORKERS: usize = 16;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_client_config(&config.client)?;
    validate_crawler_config(&config.crawler)?;
    validate_storage_config(&config.storage)?;
    Ok(())
}

/// Validates the site layout
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url '{}' must use http or https",
            config.base_url
        )));
    }

    for subforum in &config.subforums {
        validate_subforum_name(subforum)?;
    }

    Ok(())
}

/// Validates HTTP client settings
fn validate_client_config(config: &ClientConfig) -> Result<(), ConfigError> {
    if config.desktop_user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "desktop-user-agent cannot be empty".to_string(),
        ));
    }

    if config.mobile_user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "mobile-user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout-secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect-timeout-secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_listing_pages == Some(0) {
        return Err(ConfigError::Validation(
            "max-listing-pages must be >= 1 when set".to_string(),
        ));
    }

    if config.max_consecutive_empty_pages < 1 {
        return Err(ConfigError::Validation(format!(
            "max-consecutive-empty-pages must be >= 1, got {}",
            config.max_consecutive_empty_pages
        )));
    }

    if config.topic_workers < 1 || config.topic_workers > MAX_TOPIC_WORKERS {
        return Err(ConfigError::Validation(format!(
            "topic-workers must be between 1 and {}, got {}",
            MAX_TOPIC_WORKERS, config.topic_workers
        )));
    }

    Ok(())
}

/// Validates storage configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Subforum names become URL path segments: lowercase alphanumerics and hyphens
fn validate_subforum_name(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() {
        return Err(ConfigError::Validation(
            "Subforum name cannot be empty".to_string(),
        ));
    }

    if !name
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "Subforum '{}' must contain only lowercase letters, digits and hyphens",
            name
        )));
    }

    Ok(())
}
