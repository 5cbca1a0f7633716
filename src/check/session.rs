//! Session saturation.
//!
//! A row is saturated past a threshold when `100 * scur / slim` is strictly
//! greater than it. Rows without a limit (`slim == 0`) are never saturated.

use crate::stats::types::ServiceRecord;

/// Percentage of the session limit in use, or `None` when unlimited.
pub fn session_percent(current: u64, limit: u64) -> Option<f64> {
    if limit == 0 {
        None
    } else {
        Some(100.0 * current as f64 / limit as f64)
    }
}

/// Whether `record` is above `threshold` percent of its session limit.
pub fn exceeds(record: &ServiceRecord, threshold: u32) -> bool {
    session_percent(record.current_sessions, record.session_limit)
        .is_some_and(|pct| pct > f64::from(threshold))
}

/// Rows above `threshold`, in feed order.
pub fn saturated(records: &[ServiceRecord], threshold: u32) -> Vec<&ServiceRecord> {
    records.iter().filter(|r| exceeds(r, threshold)).collect()
}

/// `"{scur} of {slim} {pxname}.{svname}"` per server, comma separated.
pub fn server_detail(records: &[&ServiceRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "{} of {} {}.{}",
                r.current_sessions, r.session_limit, r.proxy_name, r.server_name
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Per-backend summary, comma separated.
pub fn backend_detail(records: &[&ServiceRecord]) -> String {
    records
        .iter()
        .map(|r| {
            format!(
                "current sessions: {}, maximum sessions: {} for {} backend.",
                r.current_sessions, r.max_sessions_seen, r.proxy_name
            )
        })
        .collect::<Vec<_>>()
        .join(", ")
}
