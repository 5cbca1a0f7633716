//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Required fields present (hostname, service)
//! - Value ranges (port > 0, percentages <= 100, timeout > 0)
//! - Service pattern compiles as a regex
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CheckConfig → Result<(), Vec<ValidationError>>
//! - Runs before any network traffic

use thiserror::Error;

use crate::config::schema::CheckConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("port must be between 1 and 65535")]
    InvalidPort,

    #[error("{name} must be between 0 and 100, got {value}")]
    PercentOutOfRange { name: &'static str, value: u32 },

    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    #[error("invalid service pattern /{pattern}/: {reason}")]
    InvalidPattern { pattern: String, reason: String },
}

/// Validate a fully merged configuration.
pub fn validate_config(config: &CheckConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.hostname.trim().is_empty() {
        errors.push(ValidationError::Missing("hostname"));
    }

    if config.port == 0 {
        errors.push(ValidationError::InvalidPort);
    }

    if config.timeout_secs == Some(0) {
        errors.push(ValidationError::ZeroTimeout);
    }

    let percents = [
        ("warn_percent", Some(config.warn_percent)),
        ("crit_percent", Some(config.crit_percent)),
        ("session_warn_percent", Some(config.session_warn_percent)),
        ("session_crit_percent", Some(config.session_crit_percent)),
        ("backend_session_warn_percent", config.backend_session_warn_percent),
        ("backend_session_crit_percent", config.backend_session_crit_percent),
    ];
    for (name, value) in percents {
        if let Some(value) = value.filter(|v| *v > 100) {
            errors.push(ValidationError::PercentOutOfRange { name, value });
        }
    }

    if config.service.is_empty() {
        errors.push(ValidationError::Missing("service"));
    } else if let Err(e) = regex::Regex::new(&config.service) {
        errors.push(ValidationError::InvalidPattern {
            pattern: config.service.clone(),
            reason: e.to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
