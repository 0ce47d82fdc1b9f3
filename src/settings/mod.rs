//! Tool settings
//!
//! Settings for confmend itself, distinct from the configuration tree the
//! tool operates on. Defaults are embedded at compile time and can be
//! layered over with an optional settings file and `CONFMEND_`-prefixed
//! environment variables.

use anyhow::Result;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use serde::Deserialize;

// Embed the default settings at compile time
const DEFAULT_SETTINGS: &str = include_str!("../../default-config.toml");

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub display: DisplaySettings,
    pub backup: BackupSettings,
}

/// Truncation limits for value listings
#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySettings {
    #[serde(rename = "max-entries")]
    pub max_entries: usize,
    #[serde(rename = "max-value-length")]
    pub max_value_length: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BackupSettings {
    pub enabled: bool,
}

impl Settings {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_file(None)
    }

    pub fn load_with_custom_file(custom: Option<&str>) -> Result<Self> {
        let mut figment = Figment::new().merge(Toml::string(DEFAULT_SETTINGS));

        if let Some(path) = custom {
            figment = figment.merge(Toml::file(path));
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed("CONFMEND_"));

        Ok(figment.extract()?)
    }
}
