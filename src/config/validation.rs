use crate::config::types::{AnalyzerConfig, Config, HttpConfig};
use crate::ConfigError;

/// Upper bound for the probe worker pool
pub const MAX_CONCURRENT_PROBES_LIMIT: usize = 1024;

/// Upper bound for followed redirects
pub const MAX_REDIRECTS_LIMIT: usize = 50;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_analyzer_config(&config.analyzer)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates analyzer configuration
fn validate_analyzer_config(config: &AnalyzerConfig) -> Result<(), ConfigError> {
    if config.max_concurrent_probes < 1 || config.max_concurrent_probes > MAX_CONCURRENT_PROBES_LIMIT
    {
        return Err(ConfigError::Validation(format!(
            "max_concurrent_probes must be between 1 and {}, got {}",
            MAX_CONCURRENT_PROBES_LIMIT, config.max_concurrent_probes
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    // Header values cannot carry control characters
    if config.user_agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user_agent contains control characters: {:?}",
            config.user_agent
        )));
    }

    if config.request_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "request_timeout must be >= 1s, got {}s",
            config.request_timeout
        )));
    }

    if config.connect_timeout < 1 {
        return Err(ConfigError::Validation(format!(
            "connect_timeout must be >= 1s, got {}s",
            config.connect_timeout
        )));
    }

    if config.max_redirects > MAX_REDIRECTS_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be <= {}, got {}",
            MAX_REDIRECTS_LIMIT, config.max_redirects
        )));
    }

    Ok(())
}
