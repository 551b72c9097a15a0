//! Configuration validation

use crate::{AppConfig, ConfigError, Result};

/// Validation error details
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate the entire application configuration
pub fn validate_config(config: &AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    if let Err(e) = validate_log_level(&config.network.log_level) {
        errors.push(e);
    }

    if config.ledger.api_base_url.is_empty() {
        errors.push(ValidationError::new(
            "ledger.api_base_url",
            "API base URL is required",
        ));
    } else if !config.ledger.api_base_url.starts_with("http://")
        && !config.ledger.api_base_url.starts_with("https://")
    {
        errors.push(ValidationError::new(
            "ledger.api_base_url",
            "API base URL must be an http(s) URL",
        ));
    }

    if config.ledger.program_id.is_empty() {
        errors.push(ValidationError::new(
            "ledger.program_id",
            "program id is required",
        ));
    }

    if config.ledger.request_timeout_ms == 0 {
        errors.push(ValidationError::new(
            "ledger.request_timeout_ms",
            "must be greater than 0",
        ));
    }

    if config.reconciler.poll_interval_secs == 0 {
        errors.push(ValidationError::new(
            "reconciler.poll_interval_secs",
            "must be greater than 0",
        ));
    }

    if config.reconciler.max_attempts == 0 {
        errors.push(ValidationError::new(
            "reconciler.max_attempts",
            "must be greater than 0",
        ));
    }

    if config.reconciler.optimistic_receipts
        && config.reconciler.receipt_grace_attempts >= config.reconciler.max_attempts
    {
        errors.push(ValidationError::new(
            "reconciler.receipt_grace_attempts",
            "grace window must end before the attempt ceiling",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        let combined = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Err(ConfigError::ValidationError(combined))
    }
}

fn validate_log_level(level: &str) -> std::result::Result<(), ValidationError> {
    match level {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ValidationError::new(
            "network.log_level",
            format!("unknown log level: {level}"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&AppConfig::default()).is_ok());
    }

    #[test]
    fn zero_poll_interval_is_rejected() {
        let mut config = AppConfig::default();
        config.reconciler.poll_interval_secs = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn grace_window_must_fit_under_the_ceiling() {
        let mut config = AppConfig::default();
        config.reconciler.receipt_grace_attempts = 50;
        assert!(validate_config(&config).is_err());

        // Irrelevant when optimism is disabled
        config.reconciler.optimistic_receipts = false;
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let mut config = AppConfig::default();
        config.ledger.api_base_url = "ftp://example.com".to_string();
        assert!(validate_config(&config).is_err());

        config.ledger.api_base_url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn unknown_log_level_is_rejected() {
        let mut config = AppConfig::default();
        config.network.log_level = "loud".to_string();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("log_level"));
    }
}
