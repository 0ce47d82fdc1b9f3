//! Get command implementation
//!
//! Resolves a value by (category, property, path) and renders it. Maps and
//! lists are listed entry by entry up to the configured limits; `--format
//! json` emits the raw value instead.

use crate::cli::Output;
use crate::service::ConfigService;
use crate::settings::Settings;
use crate::value::Value;
use anyhow::Result;

pub async fn execute(
    service: &ConfigService,
    category: &str,
    property: &str,
    path: &[String],
    format: &str,
    settings: &Settings,
    output: &Output,
) -> Result<()> {
    let value = service.get(category, property, path)?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&value.to_json())?);
        return Ok(());
    }

    let address = display_address(property, path);
    display_value(&address, value, settings, output);
    Ok(())
}

fn display_address(property: &str, path: &[String]) -> String {
    if path.is_empty() {
        property.to_string()
    } else {
        format!("{property}.{}", path.join("."))
    }
}

/// Render a resolved value: maps and lists one entry per line with
/// truncation, scalars inline
fn display_value(address: &str, value: &Value, settings: &Settings, output: &Output) {
    let max_entries = settings.display.max_entries;
    match value {
        Value::Map(map) => {
            output.info(&format!(
                "Value at {address} is a map with {} entries:",
                map.len()
            ));
            for (key, entry) in map.iter().take(max_entries) {
                output.list_item(&format!("{key} = {}", summarize(entry, settings)));
            }
            if map.len() > max_entries {
                output.indent(&format!("... and {} more entries", map.len() - max_entries));
            }
        }
        Value::List(items) => {
            output.info(&format!(
                "Value at {address} is a list with {} items:",
                items.len()
            ));
            for (index, item) in items.iter().take(max_entries).enumerate() {
                output.list_item(&format!("{index}: {}", summarize(item, settings)));
            }
            if items.len() > max_entries {
                output.indent(&format!("... and {} more items", items.len() - max_entries));
            }
        }
        scalar => output.info(&format!("Value at {address} is: {scalar}")),
    }
}

/// One-line summary of an entry inside a listing
fn summarize(value: &Value, settings: &Settings) -> String {
    match value {
        Value::Map(map) => format!("map({} entries)", map.len()),
        Value::List(items) => format!("list({} items)", items.len()),
        scalar => {
            let text = scalar.to_string();
            let limit = settings.display.max_value_length;
            if text.chars().count() > limit {
                let truncated: String = text.chars().take(limit).collect();
                format!("{truncated}…")
            } else {
                text
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Map;

    fn settings() -> Settings {
        Settings::load().unwrap()
    }

    #[test]
    fn summarize_truncates_long_scalars() {
        let long = "x".repeat(80);
        let summary = summarize(&Value::String(long), &settings());
        assert_eq!(summary.chars().count(), 51); // limit + ellipsis
        assert!(summary.ends_with('…'));
    }

    #[test]
    fn summarize_collapses_containers() {
        let mut map = Map::new();
        map.insert("a".into(), Value::Int(1));
        assert_eq!(summarize(&Value::Map(map), &settings()), "map(1 entries)");
        assert_eq!(
            summarize(&Value::List(vec![Value::Int(1), Value::Int(2)]), &settings()),
            "list(2 items)"
        );
    }

    #[test]
    fn addresses_join_with_dots() {
        assert_eq!(display_address("config2", &[]), "config2");
        assert_eq!(
            display_address("config2", &["a".to_string(), "b".to_string()]),
            "config2.a.b"
        );
    }
}
