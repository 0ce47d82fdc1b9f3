//! Schema command implementation
//!
//! Lists what the registry declares: either every category, or one
//! category's properties with their types and defaults.

use crate::cli::Output;
use crate::error::ConfigError;
use crate::schema::{FieldType, SchemaField, SchemaRegistry};
use anyhow::Result;

pub async fn execute(
    registry: &SchemaRegistry,
    category: Option<&str>,
    output: &Output,
) -> Result<()> {
    match category {
        None => list_categories(registry, output),
        Some(name) => list_properties(registry, name, output)?,
    }
    Ok(())
}

fn list_categories(registry: &SchemaRegistry, output: &Output) {
    output.header("🗂 Declared Categories");
    for name in registry.category_names() {
        let count = registry
            .category(name)
            .map(|c| c.properties().len())
            .unwrap_or(0);
        output.table_row(name, &format!("{count} properties"));
    }
}

fn list_properties(registry: &SchemaRegistry, name: &str, output: &Output) -> Result<()> {
    let category = registry
        .category(name)
        .ok_or_else(|| ConfigError::UnknownCategory {
            name: name.to_string(),
        })?;

    output.header(&format!("🗂 Category '{}'", category.name()));
    for property in category.properties() {
        output.step(&format!(
            "{} ({})",
            property.name(),
            property.ty().describe()
        ));
        output.table_row("default", &property.default_value().to_string());
        if let FieldType::Map(fields) = property.ty() {
            for field in fields {
                describe_field(field, 1, output);
            }
        }
    }
    Ok(())
}

fn describe_field(field: &SchemaField, depth: usize, output: &Output) {
    let indent = "  ".repeat(depth);
    output.list_item(&format!(
        "{indent}{} ({})",
        field.name(),
        field.ty().describe()
    ));
    if let FieldType::Map(children) = field.ty() {
        for child in children {
            describe_field(child, depth + 1, output);
        }
    }
}
