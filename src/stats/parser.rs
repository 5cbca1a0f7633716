//! CSV stats parsing.
//!
//! # Responsibilities
//! - Split the body into CSV rows, skipping blank lines
//! - Derive a key from each header cell (`# pxname` → `pxname`)
//! - Map the known keys onto `ServiceRecord` fields, once per body
//!
//! # Design Decisions
//! - Column positions come from the header, never hard-coded indices
//! - Unrecognized columns are ignored
//! - A missing required column fails the whole body
//! - Short rows leave trailing fields empty; extra trailing cells are ignored
//!   (HAProxy ends every line with a comma)

use regex::Regex;

use crate::stats::types::{ServiceRecord, StatsError};

/// Pattern for the key token of a header cell, compiled once per body.
pub fn key_pattern() -> Result<Regex, StatsError> {
    Regex::new(r"[\w()\-?]+").map_err(|e| StatsError::Parse(format!("header key pattern: {}", e)))
}

/// Extract the key token from a header cell.
///
/// Returns the first run of word characters (plus `(`, `)`, `-`, `?`), which
/// strips HAProxy's leading `# ` from the first column.
pub fn header_key<'a>(pattern: &Regex, cell: &'a str) -> Option<&'a str> {
    pattern.find(cell).map(|m| m.as_str())
}

/// Positions of the columns the check reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMap {
    proxy_name: usize,
    server_name: usize,
    status: usize,
    check_status: Option<usize>,
    current_sessions: usize,
    session_limit: usize,
    max_sessions_seen: Option<usize>,
}

impl ColumnMap {
    /// Build the mapping from a header row.
    pub fn from_header<'a>(cells: impl IntoIterator<Item = &'a str>) -> Result<Self, StatsError> {
        let pattern = key_pattern()?;
        let keys: Vec<Option<&str>> = cells.into_iter().map(|c| header_key(&pattern, c)).collect();
        let find = |name: &str| keys.iter().position(|k| *k == Some(name));
        let require = |name: &str| {
            find(name).ok_or_else(|| StatsError::Parse(format!("missing column '{}' in header", name)))
        };

        Ok(Self {
            proxy_name: require("pxname")?,
            server_name: require("svname")?,
            status: require("status")?,
            check_status: find("check_status"),
            current_sessions: require("scur")?,
            session_limit: require("slim")?,
            max_sessions_seen: find("smax"),
        })
    }

    /// Interpret one data row. `line` is only used in error messages.
    pub fn record(&self, row: &csv::StringRecord, line: u64) -> Result<ServiceRecord, StatsError> {
        let text = |idx: usize| row.get(idx).unwrap_or("").to_string();
        let number = |idx: Option<usize>, name: &str| -> Result<u64, StatsError> {
            let raw = idx.and_then(|i| row.get(i)).unwrap_or("").trim();
            if raw.is_empty() {
                return Ok(0);
            }
            raw.parse().map_err(|_| {
                StatsError::Parse(format!("invalid {} value '{}' on line {}", name, raw, line))
            })
        };

        Ok(ServiceRecord {
            proxy_name: text(self.proxy_name),
            server_name: text(self.server_name),
            status: text(self.status),
            check_status: self.check_status.map(text).unwrap_or_default(),
            current_sessions: number(Some(self.current_sessions), "scur")?,
            session_limit: number(Some(self.session_limit), "slim")?,
            max_sessions_seen: number(self.max_sessions_seen, "smax")?,
        })
    }
}

/// A line with no content at all. Rows of empty cells (`,,,`) are data.
fn is_blank_line(row: &csv::StringRecord) -> bool {
    row.len() <= 1 && row.get(0).map_or(true, |cell| cell.trim().is_empty())
}

/// Parse a `;csv` stats dump into records.
pub fn parse_stats(body: &str) -> Result<Vec<ServiceRecord>, StatsError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut rows = reader
        .records()
        .filter(|row| !matches!(row, Ok(row) if is_blank_line(row)));

    let header = rows
        .next()
        .ok_or_else(|| StatsError::Parse("empty stats body".to_string()))?
        .map_err(|e| StatsError::Parse(e.to_string()))?;
    let columns = ColumnMap::from_header(header.iter())?;

    let mut records = Vec::new();
    for result in rows {
        let row = result.map_err(|e| StatsError::Parse(e.to_string()))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        records.push(columns.record(&row, line)?);
    }

    tracing::debug!(rows = records.len(), "Parsed stats rows");
    Ok(records)
}
