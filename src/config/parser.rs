use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// Reads the TOML file, applies environment-variable overrides for the
/// credentials, and runs the validation pass.
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;

    let mut config: Config = toml::from_str(&content)?;

    apply_env_overrides(&mut config);

    validate(&config)?;

    Ok(config)
}

/// Applies `MAXI_USER` / `MAXI_PASS` environment overrides to the credentials
fn apply_env_overrides(config: &mut Config) {
    if let Ok(user) = std::env::var("MAXI_USER") {
        config.credentials.user = user;
    }
    if let Ok(password) = std::env::var("MAXI_PASS") {
        config.credentials.password = password;
    }
}
