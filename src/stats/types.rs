//! Stats feed types and error definitions.

use thiserror::Error;

/// Server name HAProxy uses for a proxy's frontend aggregate row.
pub const FRONTEND: &str = "FRONTEND";

/// Server name HAProxy uses for a proxy's backend aggregate row.
pub const BACKEND: &str = "BACKEND";

/// Raw response from the stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsResponse {
    pub status: u16,
    pub body: String,
}

/// One row of the stats feed: a server, or a frontend/backend aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceRecord {
    /// `pxname`: the proxy this row belongs to.
    pub proxy_name: String,
    /// `svname`: server name, or `FRONTEND` / `BACKEND`.
    pub server_name: String,
    /// `status`: `UP 1/2`, `DOWN`, `OPEN`, `MAINT`, `DRAIN`, `no check`, ...
    pub status: String,
    /// `check_status`: last health check detail, possibly empty.
    pub check_status: String,
    /// `scur`: current sessions.
    pub current_sessions: u64,
    /// `slim`: configured session limit, 0 = unlimited.
    pub session_limit: u64,
    /// `smax`: highest session count seen.
    pub max_sessions_seen: u64,
}

impl ServiceRecord {
    /// True for the synthetic `FRONTEND` / `BACKEND` rows.
    pub fn is_aggregate(&self) -> bool {
        self.server_name == FRONTEND || self.server_name == BACKEND
    }

    pub fn is_backend(&self) -> bool {
        self.server_name == BACKEND
    }

    /// Administratively removed from rotation.
    pub fn in_maintenance(&self) -> bool {
        self.status.starts_with("MAINT")
    }

    /// Whether HAProxy considers this entity serviceable.
    ///
    /// `OPEN`, `no check` and `DRAIN*` count as up: HAProxy is not reporting
    /// a failure for them.
    pub fn is_up(&self) -> bool {
        self.status.starts_with("UP")
            || self.status == "OPEN"
            || self.status == "no check"
            || self.status.starts_with("DRAIN")
    }

    /// `proxy/server`, with `[check_status]` appended when known.
    pub fn failure_label(&self) -> String {
        if self.check_status.is_empty() {
            format!("{}/{}", self.proxy_name, self.server_name)
        } else {
            format!("{}/{}[{}]", self.proxy_name, self.server_name, self.check_status)
        }
    }
}

/// Errors that can occur while obtaining the stats feed.
#[derive(Debug, Error)]
pub enum StatsError {
    /// Connection, DNS or TLS failure reaching the stats endpoint.
    #[error("Failed to connect to {host}:{port}{path}: {reason}")]
    Transport {
        host: String,
        port: u16,
        path: String,
        reason: String,
    },

    /// The endpoint answered with something other than 200.
    #[error("Failed to fetch from {host}:{port}{path}: {status}")]
    Fetch {
        host: String,
        port: u16,
        path: String,
        status: u16,
    },

    /// The body is not a usable stats CSV.
    #[error("Failed to parse stats: {0}")]
    Parse(String),
}
