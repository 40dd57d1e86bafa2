//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → command line overrides (binary)
//!     → validation.rs (semantic checks)
//!     → ReconcileTarget (validated, immutable)
//!     → handed to the Reconciler at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no reload
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    HealthCheckConfig, LoBalancerConfig, LogFormat, LoggingConfig, ReconcileConfig, VipConfig,
};
pub use validation::{validate_config, ValidationError};
