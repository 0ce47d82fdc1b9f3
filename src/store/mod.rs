//! YAML file store
//!
//! The durable-storage collaborator: loads the configuration document into
//! the value tree and writes it back, preserving key order. A missing file
//! loads as an empty tree; `sanitize` then materializes the defaults into
//! it, which covers the first-run case.

use crate::value::{self, Map};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File-backed YAML store
pub struct YamlStore {
    path: PathBuf,
    backup: bool,
}

impl YamlStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        YamlStore {
            path: path.into(),
            backup: false,
        }
    }

    /// Write `<file>.bak` with the previous contents before each save
    pub fn with_backup(mut self, backup: bool) -> Self {
        self.backup = backup;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the document, or an empty tree when the file does not exist
    pub fn load(&self) -> Result<Map> {
        if !self.path.exists() {
            debug!("config file {} does not exist, starting empty", self.path.display());
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config file: {}", self.path.display()))?;

        let yaml: serde_yml::Value = serde_yml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", self.path.display()))?;

        match yaml {
            serde_yml::Value::Null => Ok(Map::new()),
            serde_yml::Value::Mapping(mapping) => Ok(value::map_from_yaml(&mapping)),
            other => anyhow::bail!(
                "Config file {} must contain a mapping at the root, found {}",
                self.path.display(),
                yaml_kind(&other)
            ),
        }
    }

    /// Save the tree, replacing the whole document
    pub fn save(&self, tree: &Map) -> Result<()> {
        let yaml = serde_yml::Value::Mapping(value::map_to_yaml(tree));
        let content =
            serde_yml::to_string(&yaml).context("Failed to serialize configuration")?;

        if self.backup && self.path.exists() {
            let backup_path = PathBuf::from(format!("{}.bak", self.path.display()));
            fs::copy(&self.path, &backup_path).with_context(|| {
                format!("Failed to write backup file: {}", backup_path.display())
            })?;
        }

        fs::write(&self.path, content)
            .with_context(|| format!("Failed to write config file: {}", self.path.display()))?;
        debug!("saved {} top-level keys to {}", tree.len(), self.path.display());
        Ok(())
    }

    /// Re-read the document from disk
    pub fn reload(&self) -> Result<Map> {
        self.load()
    }
}

fn yaml_kind(value: &serde_yml::Value) -> &'static str {
    match value {
        serde_yml::Value::Null => "null",
        serde_yml::Value::Bool(_) => "a boolean",
        serde_yml::Value::Number(_) => "a number",
        serde_yml::Value::String(_) => "a string",
        serde_yml::Value::Sequence(_) => "a sequence",
        serde_yml::Value::Mapping(_) => "a mapping",
        serde_yml::Value::Tagged(_) => "a tagged value",
    }
}
