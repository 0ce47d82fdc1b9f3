//! Command implementations for the confmend CLI
//!
//! Each subcommand is organized into its own module.

pub mod get;
pub mod sanitize;
pub mod schema;
pub mod set;
pub mod show;
