//! # confmend - Schema-Driven Configuration Repair
//!
//! Repairs a YAML configuration file against a statically declared schema
//! and edits arbitrarily nested values by path.
//!
//! ## Features
//!
//! - **Self-healing**: wrong-typed values reset to their defaults, missing
//!   keys filled in, unknown nested keys pruned - every change logged
//! - **Path-addressed**: read and write nested values by
//!   `category property path...` addressing, with list indices
//! - **Order-preserving**: schema-governed keys keep their declaration
//!   order; unrecognized top-level keys survive untouched
//!
//! ## Quick Start
//!
//! ```bash
//! # Repair config.yml against the schema
//! confmend sanitize
//!
//! # Read a nested value
//! confmend get main config2 another-object some-element sub-element
//!
//! # Replace a list
//! confmend set main config2 a-list banana kiwi
//! ```

pub mod cli;
pub mod error;
pub mod sanitize;
pub mod schema;
pub mod service;
pub mod settings;
pub mod store;
pub mod value;

pub use cli::{Cli, Output};
pub use error::{ConfigError, SchemaError};
pub use service::ConfigService;
pub use store::YamlStore;
pub use value::Value;

/// Result type alias for confmend operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
