use crate::config::types::{ApiConfig, Config, GraphConfig, OutputConfig, UserAgentConfig};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Largest `pllimit` the MediaWiki API accepts for regular clients
const MAX_PAGE_LIMIT: u32 = 500;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_seeds(&config.graph)?;
    Ok(())
}

/// Validates the API endpoint and pacing settings
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid api url '{}': {}", config.url, e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "api url '{}' must use http or https",
            config.url
        )));
    }

    validate_page_limit(&config.page_limit)?;

    if config.max_links_per_topic == Some(0) {
        return Err(ConfigError::Validation(
            "max_links_per_topic must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates the `pllimit` hint: either "max" or 1..=500
fn validate_page_limit(limit: &str) -> Result<(), ConfigError> {
    if limit == "max" {
        return Ok(());
    }

    match limit.parse::<u32>() {
        Ok(n) if (1..=MAX_PAGE_LIMIT).contains(&n) => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "page_limit must be \"max\" or between 1 and {}, got '{}'",
            MAX_PAGE_LIMIT, limit
        ))),
    }
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.snapshot_path.is_empty() {
        return Err(ConfigError::Validation(
            "snapshot_path cannot be empty".to_string(),
        ));
    }

    if config.static_dir.is_empty() {
        return Err(ConfigError::Validation(
            "static_dir cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates the seed list: non-empty, no blank or repeated titles
///
/// Titles are compared exactly, so "Physics" and "physics" are distinct seeds.
fn validate_seeds(config: &GraphConfig) -> Result<(), ConfigError> {
    if config.seeds.is_empty() {
        return Err(ConfigError::Validation(
            "at least one seed topic is required".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for seed in &config.seeds {
        if seed.trim().is_empty() {
            return Err(ConfigError::Validation(
                "seed topics cannot be blank".to_string(),
            ));
        }

        if !seen.insert(seed.as_str()) {
            return Err(ConfigError::Validation(format!(
                "seed topic '{}' is listed more than once",
                seed
            )));
        }
    }

    Ok(())
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    let local = parts[0];
    let domain = parts[1];

    if local.is_empty() || domain.is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !domain.contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
