//! Sanitize command implementation
//!
//! Runs schema reconciliation over the configuration file and prints what
//! was repaired.

use crate::cli::Output;
use crate::sanitize::Change;
use crate::service::ConfigService;
use anyhow::Result;

pub async fn execute(service: &mut ConfigService, output: &Output) -> Result<()> {
    output.header("🧹 Sanitizing Configuration");

    let report = service.sanitize()?;

    if report.is_clean() {
        output.success("Configuration is clean, nothing to repair");
        return Ok(());
    }

    for change in report.changes() {
        match change {
            Change::Added { path, value } => {
                output.success(&format!("+ added {path} = {value}"));
            }
            Change::Removed { path, value } => {
                output.warning(&format!("- removed {path} = {value}"));
            }
            Change::Corrected { path, from, to } => {
                output.info(&format!("~ changed {path}: {from} -> {to}"));
            }
        }
    }

    output.blank_line();
    output.count("🔧", "Repairs applied", report.len());
    Ok(())
}
