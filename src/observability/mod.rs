//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! config / stats / check subsystems produce:
//!     → tracing events (stage, row counts, verdict)
//!     → logging.rs subscriber
//!     → stderr
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted strings
//! - Credentials are never logged
//! - Quiet by default (warn) so monitoring output stays clean

pub mod logging;
