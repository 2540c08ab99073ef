use crate::config::types::{Config, CredentialsConfig, DataConfig, HttpConfig, SiteConfig};
use crate::ConfigError;
use chrono::Weekday;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_credentials(&config.credentials)?;
    validate_http_config(&config.http)?;
    validate_data_config(&config.data)?;

    if config.transfers.deadline_window_days < 0 {
        return Err(ConfigError::Validation(format!(
            "deadline_window_days must be >= 0, got {}",
            config.transfers.deadline_window_days
        )));
    }

    Ok(())
}

/// Validates the target site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base_url must use the http or https scheme, got '{}'",
            url.scheme()
        )));
    }

    if config.game_id.is_empty() {
        return Err(ConfigError::Validation("game_id cannot be empty".to_string()));
    }

    Ok(())
}

/// Validates that credentials are present (file or environment)
fn validate_credentials(config: &CredentialsConfig) -> Result<(), ConfigError> {
    if config.user.is_empty() {
        return Err(ConfigError::Validation(
            "credentials.user cannot be empty (set it in the config file or via MAXI_USER)"
                .to_string(),
        ));
    }

    if config.password.is_empty() {
        return Err(ConfigError::Validation(
            "credentials.password cannot be empty (set it in the config file or via MAXI_PASS)"
                .to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP retry configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout_secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    if config.retry_attempts < 1 || config.retry_attempts > 10 {
        return Err(ConfigError::Validation(format!(
            "retry_attempts must be between 1 and 10, got {}",
            config.retry_attempts
        )));
    }

    Ok(())
}

/// Validates dataset location and backup schedule
fn validate_data_config(config: &DataConfig) -> Result<(), ConfigError> {
    if config.data_dir.is_empty() {
        return Err(ConfigError::Validation("data_dir cannot be empty".to_string()));
    }

    config.backup_weekday.parse::<Weekday>().map_err(|_| {
        ConfigError::Validation(format!(
            "backup_weekday must be a weekday name, got '{}'",
            config.backup_weekday
        ))
    })?;

    Ok(())
}
