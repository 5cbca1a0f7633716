//! Health evaluation subsystem.
//!
//! # Data Flow
//! ```text
//! Selection { servers, backends }
//!     → evaluator.rs (up/down classification, percent_up, failed names)
//!     → session.rs (per-server and per-backend saturation)
//!     → evaluator.rs decision table (first match wins)
//!     → verdict.rs (CheckResult: OK / WARNING / CRITICAL / UNKNOWN)
//!
//! runner.rs wires stats fetching to evaluation and folds every
//! fetch/parse failure into UNKNOWN.
//! ```
//!
//! # Design Decisions
//! - Evaluation is a pure function of the selection and thresholds
//! - Availability outranks session exhaustion
//! - Configured backend thresholds replace the per-server session check
//!   of the same severity

pub mod evaluator;
pub mod runner;
pub mod session;
pub mod verdict;

pub use evaluator::{evaluate, Availability, Thresholds};
pub use runner::HaproxyCheck;
pub use verdict::{CheckResult, Verdict};
