//! Configuration schema definitions.
//!
//! The check is driven by one flat options struct. It derives Serde traits so
//! the same shape can be read from a TOML file and then overridden from the
//! command line.

use serde::{Deserialize, Serialize};

/// Root configuration for a single HAProxy status check.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CheckConfig {
    /// HAProxy stats hostname (required).
    pub hostname: String,

    /// HAProxy stats port.
    pub port: u16,

    /// Stats page path, always starting with `/`.
    pub path: String,

    /// Basic auth username. Auth is only sent when this is set.
    pub username: Option<String>,

    /// Basic auth password (empty when absent).
    pub password: Option<String>,

    /// Use HTTPS instead of HTTP.
    pub use_ssl: bool,

    /// Request timeout in seconds. `None` keeps the HTTP client default.
    pub timeout_secs: Option<u64>,

    /// Overall availability warning threshold (percent up).
    pub warn_percent: u32,

    /// Overall availability critical threshold (percent up).
    pub crit_percent: u32,

    /// Per-server session saturation warning threshold.
    pub session_warn_percent: u32,

    /// Per-server session saturation critical threshold.
    pub session_crit_percent: u32,

    /// Per-backend session saturation warning threshold; unset disables the check.
    pub backend_session_warn_percent: Option<u32>,

    /// Per-backend session saturation critical threshold; unset disables the check.
    pub backend_session_crit_percent: Option<u32>,

    /// Minimum matched-server count below which the check warns.
    pub min_warn_count: usize,

    /// Minimum matched-server count below which the check is critical.
    pub min_crit_count: usize,

    /// Proxy name pattern (regex source, required).
    pub service: String,

    /// Anchor `service` so it must match the whole proxy name.
    pub exact_match: bool,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            port: 80,
            path: "/".to_string(),
            username: None,
            password: None,
            use_ssl: false,
            timeout_secs: None,
            warn_percent: 50,
            crit_percent: 25,
            session_warn_percent: 75,
            session_crit_percent: 90,
            backend_session_warn_percent: None,
            backend_session_crit_percent: None,
            min_warn_count: 0,
            min_crit_count: 0,
            service: String::new(),
            exact_match: false,
        }
    }
}

impl CheckConfig {
    /// Scheme used to reach the stats page.
    pub fn scheme(&self) -> &'static str {
        if self.use_ssl {
            "https"
        } else {
            "http"
        }
    }

    /// Ensure the stats path is absolute.
    pub fn normalize(&mut self) {
        if !self.path.starts_with('/') {
            self.path.insert(0, '/');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckConfig::default();
        assert_eq!(config.port, 80);
        assert_eq!(config.path, "/");
        assert_eq!(config.warn_percent, 50);
        assert_eq!(config.crit_percent, 25);
        assert_eq!(config.session_warn_percent, 75);
        assert_eq!(config.session_crit_percent, 90);
        assert!(config.backend_session_warn_percent.is_none());
        assert!(config.backend_session_crit_percent.is_none());
        assert_eq!(config.min_warn_count, 0);
        assert_eq!(config.min_crit_count, 0);
        assert!(!config.exact_match);
        assert!(!config.use_ssl);
    }

    #[test]
    fn test_normalize_path() {
        let mut config = CheckConfig {
            path: "haproxy?stats".into(),
            ..Default::default()
        };
        config.normalize();
        assert_eq!(config.path, "/haproxy?stats");

        config.normalize();
        assert_eq!(config.path, "/haproxy?stats");
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: CheckConfig = toml::from_str(
            r#"
            hostname = "lb1"
            service = "api"
            backend_session_crit_percent = 95
            "#,
        )
        .unwrap();

        assert_eq!(config.hostname, "lb1");
        assert_eq!(config.port, 80);
        assert_eq!(config.backend_session_crit_percent, Some(95));
        assert_eq!(config.scheme(), "http");
    }
}
