//! HAProxy stats health check library.
//!
//! Fetches HAProxy's CSV statistics, selects the servers of one service and
//! turns their state into a single monitoring verdict.

// Inputs
pub mod cli;
pub mod config;

// Core
pub mod check;
pub mod stats;

// Cross-cutting concerns
pub mod observability;

pub use check::{CheckResult, HaproxyCheck, Verdict};
pub use config::CheckConfig;
