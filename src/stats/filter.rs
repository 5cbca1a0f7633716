//! Service selection.
//!
//! # Responsibilities
//! - Match proxy names against the configured service pattern
//! - Split matching rows into the per-server population and the
//!   `BACKEND` aggregate rows
//! - Drop `MAINT*` rows from both
//!
//! # Design Decisions
//! - The pattern is compiled once per run, not per row
//! - Matching is case-sensitive; exact mode anchors the whole proxy name
//! - `FRONTEND` rows are never used

use regex::Regex;

use crate::stats::types::ServiceRecord;

/// Compiled proxy-name matcher.
#[derive(Debug, Clone)]
pub struct ServiceMatcher {
    pattern: String,
    regex: Regex,
}

impl ServiceMatcher {
    /// Compile `pattern`. With `exact` set the pattern must cover the entire
    /// proxy name; otherwise it may match anywhere in it.
    pub fn new(pattern: &str, exact: bool) -> Result<Self, regex::Error> {
        let regex = if exact {
            Regex::new(&format!(r"\A(?:{})\z", pattern))?
        } else {
            Regex::new(pattern)?
        };
        Ok(Self {
            pattern: pattern.to_string(),
            regex,
        })
    }

    /// The pattern as the user wrote it.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn matches(&self, proxy_name: &str) -> bool {
        self.regex.is_match(proxy_name)
    }
}

/// Rows relevant to one service check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Real servers of matching proxies (the evaluated population).
    pub servers: Vec<ServiceRecord>,
    /// `BACKEND` aggregate rows of matching proxies.
    pub backends: Vec<ServiceRecord>,
}

/// Select the rows belonging to the matched service.
pub fn select(records: Vec<ServiceRecord>, matcher: &ServiceMatcher) -> Selection {
    let mut selection = Selection::default();

    for record in records {
        if !matcher.matches(&record.proxy_name) || record.in_maintenance() {
            continue;
        }
        if record.is_backend() {
            selection.backends.push(record);
        } else if !record.is_aggregate() {
            selection.servers.push(record);
        }
    }

    tracing::debug!(
        pattern = %matcher.pattern(),
        servers = selection.servers.len(),
        backends = selection.backends.len(),
        "Selected service rows"
    );
    selection
}
