//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::CheckConfig;
use crate::config::validation::ValidationError;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read a TOML file into a configuration.
///
/// Fields missing from the file keep their defaults. Validation is left to
/// the caller because command-line flags are merged on top first.
pub fn load_config(path: &Path) -> Result<CheckConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: CheckConfig = toml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            hostname = "10.0.0.5"
            port = 8404
            path = "/stats"
            username = "monitor"
            service = "^web"
            session_crit_percent = 95
            "#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.hostname, "10.0.0.5");
        assert_eq!(config.port, 8404);
        assert_eq!(config.path, "/stats");
        assert_eq!(config.username.as_deref(), Some("monitor"));
        assert_eq!(config.session_crit_percent, 95);
        assert_eq!(config.session_warn_percent, 75);
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/haproxy-check.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "port = \"eighty\"").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_message() {
        let err = ConfigError::Validation(vec![
            ValidationError::Missing("hostname"),
            ValidationError::InvalidPort,
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: hostname is required, port must be between 1 and 65535"
        );
    }
}
