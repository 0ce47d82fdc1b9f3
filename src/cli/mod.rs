//! Command-line interface for confmend
//!
//! This module provides the main CLI structure and command handling.
//! It uses clap for argument parsing; each subcommand lives in its own
//! module under `commands/`.

use crate::schema::builtin;
use crate::service::ConfigService;
use crate::settings::Settings;
use crate::store::YamlStore;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
mod output;

pub use output::Output;

/// confmend - schema-driven repair and path-addressed editing for YAML configuration
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file to operate on
    #[arg(short, long, value_name = "FILE", default_value = "config.yml", global = true)]
    pub file: PathBuf,

    /// Settings file for confmend itself
    #[arg(long, value_name = "FILE", global = true)]
    pub settings: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable quiet output (minimal)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format (text, json)
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Read a configuration value by category, property, and path
    Get {
        /// Category name (e.g. "main")
        category: String,
        /// Property name within the category
        property: String,
        /// Path segments descending into the value (map keys, list indices)
        path: Vec<String>,
    },
    /// Write a configuration value by category, property, and path
    Set {
        /// Category name (e.g. "main")
        category: String,
        /// Property name within the category
        property: String,
        /// Path segments followed by the new value
        #[arg(required = true, num_args = 1..)]
        args: Vec<String>,
    },
    /// Repair the configuration file against the declared schema
    Sanitize,
    /// Print the configuration file
    Show,
    /// List declared categories and their properties
    Schema {
        /// Show one category's properties in detail
        category: Option<String>,
    },
}

impl Cli {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let output = Output::new(self.verbose, self.quiet);
        let settings = Settings::load_with_custom_file(self.settings.as_deref())?;

        match self.command {
            Commands::Get {
                category,
                property,
                path,
            } => {
                let service = open_service(&self.file, &settings)?;
                commands::get::execute(
                    &service, &category, &property, &path, &self.format, &settings, &output,
                )
                .await
            }
            Commands::Set {
                category,
                property,
                args,
            } => {
                let mut service = open_service(&self.file, &settings)?;
                commands::set::execute(&mut service, &category, &property, &args, &output).await
            }
            Commands::Sanitize => {
                let mut service = open_service(&self.file, &settings)?;
                commands::sanitize::execute(&mut service, &output).await
            }
            Commands::Show => commands::show::execute(&self.file, &output).await,
            Commands::Schema { category } => {
                let registry = builtin::registry()?;
                commands::schema::execute(&registry, category.as_deref(), &output).await
            }
        }
    }
}

fn open_service(file: &PathBuf, settings: &Settings) -> Result<ConfigService> {
    let store = YamlStore::new(file.clone()).with_backup(settings.backup.enabled);
    ConfigService::open(store, builtin::registry()?)
}
