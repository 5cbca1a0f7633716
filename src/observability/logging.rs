//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once at startup
//! - Map `-v` repetitions to a default level
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Logs go to stderr; stdout is reserved for the plugin result line
//! - `RUST_LOG` overrides the verbosity flag

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter for a given verbosity count.
pub fn default_filter(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "haproxy_check=warn",
        1 => "haproxy_check=info",
        2 => "haproxy_check=debug,reqwest=info",
        _ => "haproxy_check=trace,reqwest=debug",
    }
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbosity)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(0), "haproxy_check=warn");
        assert_eq!(default_filter(2), "haproxy_check=debug,reqwest=info");
        assert_eq!(default_filter(9), "haproxy_check=trace,reqwest=debug");
    }
}
