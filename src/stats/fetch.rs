//! Stats page retrieval.
//!
//! # Responsibilities
//! - Build the `;csv;norefresh` URL from host, port, path and scheme
//! - Attach basic auth when a username is configured
//! - Perform exactly one GET and hand back status + body
//!
//! # Design Decisions
//! - No retries: a failed attempt is reported, not repeated
//! - Non-200 responses are returned as-is; deciding what they mean is the
//!   caller's job
//! - No timeout unless one is configured (client default otherwise)

use std::time::Duration;

use url::Url;

use crate::config::CheckConfig;
use crate::stats::types::{StatsError, StatsResponse};

/// Suffix that selects HAProxy's CSV export without the auto-refresh header.
pub const CSV_SUFFIX: &str = ";csv;norefresh";

/// Build the stats URL for a configuration.
pub fn stats_url(config: &CheckConfig) -> Result<Url, StatsError> {
    let host = if config.hostname.contains(':') && !config.hostname.starts_with('[') {
        format!("[{}]", config.hostname)
    } else {
        config.hostname.clone()
    };
    let raw = format!(
        "{}://{}:{}{}{}",
        config.scheme(),
        host,
        config.port,
        config.path,
        CSV_SUFFIX
    );

    Url::parse(&raw).map_err(|e| StatsError::Transport {
        host: config.hostname.clone(),
        port: config.port,
        path: config.path.clone(),
        reason: format!("invalid stats URL: {}", e),
    })
}

/// HTTP client for one HAProxy stats endpoint.
#[derive(Debug)]
pub struct StatsClient {
    client: reqwest::Client,
    url: Url,
    host: String,
    port: u16,
    path: String,
    username: Option<String>,
    password: Option<String>,
}

impl StatsClient {
    pub fn new(config: &CheckConfig) -> Result<Self, StatsError> {
        let url = stats_url(config)?;

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("haproxy-check/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(|e| StatsError::Transport {
            host: config.hostname.clone(),
            port: config.port,
            path: config.path.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            url,
            host: config.hostname.clone(),
            port: config.port,
            path: config.path.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Issue the GET and return whatever the endpoint answered.
    pub async fn fetch(&self) -> Result<StatsResponse, StatsError> {
        tracing::debug!(
            url = %self.url,
            auth = self.username.is_some(),
            "Fetching HAProxy stats"
        );

        let mut request = self.client.get(self.url.clone());
        if let Some(username) = &self.username {
            request = request.basic_auth(username, Some(self.password.as_deref().unwrap_or("")));
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(body) => body,
            // The status alone decides a non-200 outcome.
            Err(e) if status != 200 => {
                tracing::debug!(status, error = %e, "Ignoring unreadable error body");
                String::new()
            }
            Err(e) => return Err(self.transport_error(e)),
        };

        tracing::debug!(status, bytes = body.len(), "Stats response received");
        Ok(StatsResponse { status, body })
    }

    fn transport_error(&self, e: reqwest::Error) -> StatsError {
        tracing::warn!(host = %self.host, port = self.port, error = %e, "Stats request failed");
        StatsError::Transport {
            host: self.host.clone(),
            port: self.port,
            path: self.path.clone(),
            reason: e.without_url().to_string(),
        }
    }

    /// Turn a raw response into an error unless it is a 200.
    pub fn ensure_ok(&self, response: StatsResponse) -> Result<String, StatsError> {
        if response.status == 200 {
            Ok(response.body)
        } else {
            Err(StatsError::Fetch {
                host: self.host.clone(),
                port: self.port,
                path: self.path.clone(),
                status: response.status,
            })
        }
    }
}
