//! Command-line interface.
//!
//! Every flag is optional at this layer so a TOML file given with `--config`
//! can supply the rest; required values are enforced by config validation.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::config::{load_config, CheckConfig, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "check-haproxy-status")]
#[command(version, about = "Check HAProxy backend server health via the stats page", long_about = None)]
#[command(disable_help_flag = true)]
pub struct Cli {
    /// TOML file with default values for any of the options below
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// HAProxy web stats hostname
    #[arg(short = 'h', long, value_name = "HOSTNAME")]
    pub hostname: Option<String>,

    /// HAProxy web stats port [default: 80]
    #[arg(short = 'P', long, value_name = "PORT")]
    pub port: Option<u16>,

    /// HAProxy web stats path [default: /]
    #[arg(short = 'q', long = "statspath", value_name = "STATUSPATH")]
    pub path: Option<String>,

    /// HAProxy web stats username
    #[arg(short = 'u', long = "user", env = "HAPROXY_USER", value_name = "USERNAME")]
    pub username: Option<String>,

    /// HAProxy web stats password
    #[arg(
        short = 'p',
        long = "pass",
        env = "HAPROXY_PASSWORD",
        hide_env_values = true,
        value_name = "PASSWORD"
    )]
    pub password: Option<String>,

    /// Use SSL to connect to HAProxy web stats
    #[arg(long, overrides_with = "no_use_ssl")]
    pub use_ssl: bool,

    /// Use plain HTTP even if the config file enables SSL
    #[arg(long, overrides_with = "use_ssl")]
    pub no_use_ssl: bool,

    /// Request timeout in seconds [default: HTTP client default]
    #[arg(long = "timeout", value_name = "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Warning percent of servers up [default: 50]
    #[arg(short = 'w', long, value_name = "PERCENT")]
    pub warn_percent: Option<u32>,

    /// Critical percent of servers up [default: 25]
    #[arg(short = 'c', long, value_name = "PERCENT")]
    pub crit_percent: Option<u32>,

    /// Session limit warning percent [default: 75]
    #[arg(short = 'W', long, value_name = "PERCENT")]
    pub session_warn_percent: Option<u32>,

    /// Session limit critical percent [default: 90]
    #[arg(short = 'C', long, value_name = "PERCENT")]
    pub session_crit_percent: Option<u32>,

    /// Per backend session limit warning percent
    #[arg(short = 'b', long, value_name = "PERCENT")]
    pub backend_session_warn_percent: Option<u32>,

    /// Per backend session limit critical percent
    #[arg(short = 'B', long, value_name = "PERCENT")]
    pub backend_session_crit_percent: Option<u32>,

    /// Minimum server warn count [default: 0]
    #[arg(short = 'M', long, value_name = "COUNT")]
    pub min_warn_count: Option<usize>,

    /// Minimum server critical count [default: 0]
    #[arg(short = 'X', long, value_name = "COUNT")]
    pub min_crit_count: Option<usize>,

    /// Service name (proxy name regex) to check
    #[arg(short = 's', long, value_name = "SVC")]
    pub service: Option<String>,

    /// Require the service name to match the whole proxy name
    #[arg(short = 'e', long, overrides_with = "no_exact_match")]
    pub exact_match: bool,

    /// Substring match even if the config file enables exact matching
    #[arg(long, overrides_with = "exact_match")]
    pub no_exact_match: bool,

    /// Increase log verbosity on stderr (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    pub help: Option<bool>,
}

impl Cli {
    /// Build the run configuration: defaults, then `--config`, then flags.
    pub fn into_config(self) -> Result<CheckConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Loading config file");
                load_config(path)?
            }
            None => CheckConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    /// Override `config` with every flag that was given.
    pub fn apply(self, config: &mut CheckConfig) {
        if let Some(v) = self.hostname {
            config.hostname = v;
        }
        if let Some(v) = self.port {
            config.port = v;
        }
        if let Some(v) = self.path {
            config.path = v;
        }
        if self.username.is_some() {
            config.username = self.username;
        }
        if self.password.is_some() {
            config.password = self.password;
        }
        if let Some(v) = switch(self.use_ssl, self.no_use_ssl) {
            config.use_ssl = v;
        }
        if self.timeout_secs.is_some() {
            config.timeout_secs = self.timeout_secs;
        }
        if let Some(v) = self.warn_percent {
            config.warn_percent = v;
        }
        if let Some(v) = self.crit_percent {
            config.crit_percent = v;
        }
        if let Some(v) = self.session_warn_percent {
            config.session_warn_percent = v;
        }
        if let Some(v) = self.session_crit_percent {
            config.session_crit_percent = v;
        }
        if self.backend_session_warn_percent.is_some() {
            config.backend_session_warn_percent = self.backend_session_warn_percent;
        }
        if self.backend_session_crit_percent.is_some() {
            config.backend_session_crit_percent = self.backend_session_crit_percent;
        }
        if let Some(v) = self.min_warn_count {
            config.min_warn_count = v;
        }
        if let Some(v) = self.min_crit_count {
            config.min_crit_count = v;
        }
        if let Some(v) = self.service {
            config.service = v;
        }
        if let Some(v) = switch(self.exact_match, self.no_exact_match) {
            config.exact_match = v;
        }
    }
}

/// Resolve a `--flag` / `--no-flag` pair; `None` when neither was given.
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (false, true) => Some(false),
        (false, false) => None,
    }
}
