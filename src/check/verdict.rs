//! Check verdicts and their process exit codes.

use std::fmt;

/// Name printed in front of every result line.
pub const CHECK_NAME: &str = "CheckHaproxyStatus";

/// Monitoring-plugin state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Verdict {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Verdict {
    /// Exit code expected by the monitoring system.
    pub fn exit_code(self) -> i32 {
        match self {
            Verdict::Ok => 0,
            Verdict::Warning => 1,
            Verdict::Critical => 2,
            Verdict::Unknown => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Ok => "OK",
            Verdict::Warning => "WARNING",
            Verdict::Critical => "CRITICAL",
            Verdict::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one check run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub verdict: Verdict,
    pub message: String,
}

impl CheckResult {
    pub fn new(verdict: Verdict, message: impl Into<String>) -> Self {
        Self {
            verdict,
            message: message.into(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(Verdict::Ok, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Verdict::Warning, message)
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(Verdict::Critical, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Verdict::Unknown, message)
    }

    pub fn exit_code(&self) -> i32 {
        self.verdict.exit_code()
    }
}

impl fmt::Display for CheckResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", CHECK_NAME, self.verdict, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Verdict::Ok.exit_code(), 0);
        assert_eq!(Verdict::Warning.exit_code(), 1);
        assert_eq!(Verdict::Critical.exit_code(), 2);
        assert_eq!(Verdict::Unknown.exit_code(), 3);
    }

    #[test]
    fn test_output_line() {
        let result = CheckResult::warning("No services matching /api/");
        assert_eq!(result.to_string(), "CheckHaproxyStatus WARNING: No services matching /api/");
    }
}
