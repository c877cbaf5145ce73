use crate::config::types::{Config, SourceConfig, StoreConfig};
use crate::extract::NumberFormat;
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_source_config(&config.source)?;
    validate_store_config(&config.store)?;
    validate_number_format(&config.number_format)?;
    Ok(())
}

/// Validates remote source configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    validate_http_url("start-url", &config.start_url)?;
    validate_http_url("api-url", &config.api_url)?;

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    Ok(())
}

/// Validates an http(s) URL
fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Validation(format!(
            "{} '{}' must use http or https",
            key, value
        )));
    }

    Ok(())
}

/// Validates page store configuration
fn validate_store_config(config: &StoreConfig) -> Result<(), ConfigError> {
    if config.temp_dir.trim().is_empty() {
        return Err(ConfigError::Validation(
            "temp-dir cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates the currency/decimal formatting rules
fn validate_number_format(format: &NumberFormat) -> Result<(), ConfigError> {
    let decimal = format.decimal_separator;
    let thousands = format.thousands_separator;

    if decimal == thousands {
        return Err(ConfigError::Validation(format!(
            "decimal-separator and thousands-separator must differ, both are '{}'",
            decimal
        )));
    }

    if decimal.is_ascii_digit() || thousands.is_ascii_digit() {
        return Err(ConfigError::Validation(
            "separators cannot be digits".to_string(),
        ));
    }

    if format.currency_symbol.chars().any(|c| c.is_ascii_digit()) {
        return Err(ConfigError::Validation(format!(
            "currency-symbol cannot contain digits, got '{}'",
            format.currency_symbol
        )));
    }

    Ok(())
}
