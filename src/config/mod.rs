//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults (CheckConfig::default)
//!     → loader.rs (optional TOML file, missing keys keep defaults)
//!     → command-line flags override file values
//!     → normalize (path gets a leading '/')
//!     → validation.rs (semantic checks)
//!     → CheckConfig (validated, immutable for the run)
//! ```
//!
//! # Design Decisions
//! - Config is built once per invocation; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::CheckConfig;
pub use validation::{validate_config, ValidationError};
