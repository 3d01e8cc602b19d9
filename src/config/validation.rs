//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use thiserror::Error;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("limits.max_line_length must be greater than zero")]
    ZeroMaxLineLength,
    #[error("limits.outbound_queue must be greater than zero")]
    ZeroOutboundQueue,
    #[error("limits.idle_timeout_secs must be greater than zero when set")]
    ZeroIdleTimeout,
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.limits.max_line_length == 0 {
        errors.push(ValidationError::ZeroMaxLineLength);
    }
    // mpsc::channel panics on a zero capacity
    if config.limits.outbound_queue == 0 {
        errors.push(ValidationError::ZeroOutboundQueue);
    }
    if config.limits.idle_timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroIdleTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn collects_every_error() {
        let mut config = Config::default();
        config.limits.max_line_length = 0;
        config.limits.outbound_queue = 0;
        config.limits.idle_timeout_secs = Some(0);

        let errors = validate(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(matches!(errors[0], ValidationError::ZeroMaxLineLength));
        assert!(matches!(errors[1], ValidationError::ZeroOutboundQueue));
        assert!(matches!(errors[2], ValidationError::ZeroIdleTimeout));
    }
}
