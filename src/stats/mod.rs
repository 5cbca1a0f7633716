//! HAProxy stats subsystem.
//!
//! # Data Flow
//! ```text
//! CheckConfig
//!     → fetch.rs (GET <path>;csv;norefresh, optional basic auth)
//!     → StatsResponse { status, body }
//!     → non-200 → StatsError::Fetch
//!     → parser.rs (header keys → ColumnMap → ServiceRecord per row)
//!     → filter.rs (proxy name match, drop FRONTEND/MAINT, split BACKEND rows)
//!     → Selection { servers, backends }
//! ```
//!
//! # Design Decisions
//! - One fetch per run, no retries
//! - Records live only for the duration of one evaluation
//! - Any fetch or parse failure surfaces as a StatsError, never a panic

pub mod fetch;
pub mod filter;
pub mod parser;
pub mod types;

pub use fetch::StatsClient;
pub use filter::{select, Selection, ServiceMatcher};
pub use parser::parse_stats;
pub use types::{ServiceRecord, StatsError, StatsResponse};
