//! Verdict evaluation.
//!
//! # Decision Table
//! ```text
//! no servers matched                                 → WARNING "No services matching /p/"
//! 1. servers < min_crit_count                        → CRITICAL
//! 2. percent_up < crit_percent                       → CRITICAL
//! 3. server sessions > session_crit (no backend crit) → CRITICAL + server detail
//! 4. backend crit set and backend sessions above it  → CRITICAL + backend detail
//! 5. servers < min_warn_count                        → WARNING
//! 6. percent_up < warn_percent                       → WARNING
//! 7. server sessions > session_warn (no backend warn) → WARNING + server detail
//! 8. backend warn set and backend sessions above it  → CRITICAL + backend detail
//! otherwise                                          → OK
//! ```
//! First match wins. Rule 8 reports CRITICAL, not WARNING.

use crate::check::session::{backend_detail, saturated, server_detail};
use crate::check::verdict::CheckResult;
use crate::config::CheckConfig;
use crate::stats::filter::Selection;
use crate::stats::types::ServiceRecord;

/// Threshold settings used by the decision table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Thresholds {
    pub warn_percent: u32,
    pub crit_percent: u32,
    pub session_warn_percent: u32,
    pub session_crit_percent: u32,
    pub backend_session_warn_percent: Option<u32>,
    pub backend_session_crit_percent: Option<u32>,
    pub min_warn_count: usize,
    pub min_crit_count: usize,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::from(&CheckConfig::default())
    }
}

impl From<&CheckConfig> for Thresholds {
    fn from(config: &CheckConfig) -> Self {
        Self {
            warn_percent: config.warn_percent,
            crit_percent: config.crit_percent,
            session_warn_percent: config.session_warn_percent,
            session_crit_percent: config.session_crit_percent,
            backend_session_warn_percent: config.backend_session_warn_percent,
            backend_session_crit_percent: config.backend_session_crit_percent,
            min_warn_count: config.min_warn_count,
            min_crit_count: config.min_crit_count,
        }
    }
}

/// Availability figures over the per-server population.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Availability {
    pub total: usize,
    pub up: usize,
    /// Truncated: 1 of 3 up is 33.
    pub percent_up: u32,
    /// `proxy/server[check_status]` for each down server, in feed order.
    pub failed: Vec<String>,
}

impl Availability {
    /// Returns `None` for an empty population.
    pub fn of(servers: &[ServiceRecord]) -> Option<Self> {
        if servers.is_empty() {
            return None;
        }
        let up = servers.iter().filter(|s| s.is_up()).count();
        let failed = servers
            .iter()
            .filter(|s| !s.is_up())
            .map(ServiceRecord::failure_label)
            .collect();

        Some(Self {
            total: servers.len(),
            up,
            percent_up: (100 * up / servers.len()) as u32,
            failed,
        })
    }

    /// `UP: 75% of 4 /svc/ services, DOWN: svc/srv4`
    pub fn status_message(&self, pattern: &str) -> String {
        let mut message = format!(
            "UP: {}% of {} /{}/ services",
            self.percent_up, self.total, pattern
        );
        if !self.failed.is_empty() {
            message.push_str(", DOWN: ");
            message.push_str(&self.failed.join(", "));
        }
        message
    }
}

/// Pick the verdict for a selection.
pub fn evaluate(selection: &Selection, pattern: &str, thresholds: &Thresholds) -> CheckResult {
    let Some(availability) = Availability::of(&selection.servers) else {
        return CheckResult::warning(format!("No services matching /{}/", pattern));
    };
    let status = availability.status_message(pattern);
    let total = availability.total;
    let percent_up = availability.percent_up;

    let critical_sessions = saturated(&selection.servers, thresholds.session_crit_percent);
    let warning_sessions = saturated(&selection.servers, thresholds.session_warn_percent);
    let critical_backends = thresholds
        .backend_session_crit_percent
        .map(|t| saturated(&selection.backends, t))
        .unwrap_or_default();
    let warning_backends = thresholds
        .backend_session_warn_percent
        .map(|t| saturated(&selection.backends, t))
        .unwrap_or_default();

    tracing::debug!(
        total,
        up = availability.up,
        percent_up,
        critical_sessions = critical_sessions.len(),
        warning_sessions = warning_sessions.len(),
        critical_backends = critical_backends.len(),
        warning_backends = warning_backends.len(),
        "Evaluating thresholds"
    );

    if total < thresholds.min_crit_count || percent_up < thresholds.crit_percent {
        return CheckResult::critical(status);
    }
    if !critical_sessions.is_empty() && thresholds.backend_session_crit_percent.is_none() {
        return CheckResult::critical(format!(
            "{}; Active sessions critical: {}",
            status,
            server_detail(&critical_sessions)
        ));
    }
    if !critical_backends.is_empty() {
        return CheckResult::critical(format!(
            "{}; Active backends critical: {}",
            status,
            backend_detail(&critical_backends)
        ));
    }
    if total < thresholds.min_warn_count || percent_up < thresholds.warn_percent {
        return CheckResult::warning(status);
    }
    if !warning_sessions.is_empty() && thresholds.backend_session_warn_percent.is_none() {
        return CheckResult::warning(format!(
            "{}; Active sessions warning: {}",
            status,
            server_detail(&warning_sessions)
        ));
    }
    if !warning_backends.is_empty() {
        return CheckResult::critical(format!(
            "{}; Active backends warning: {}",
            status,
            backend_detail(&warning_backends)
        ));
    }

    CheckResult::ok(status)
}
