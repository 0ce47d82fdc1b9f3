//! Configuration reconciliation
//!
//! Walks a persisted tree against the declared schema and produces a
//! corrected tree: wrong-typed scalars are reset to their defaults,
//! unknown nested keys are pruned, and missing auto-insert keys are
//! filled in from the schema. Nothing in here returns an error; a state
//! the schema cannot account for resolves to the default or to removal,
//! and every correction is recorded in the report.

use crate::schema::{FieldType, SchemaField, SchemaProperty, SchemaRegistry};
use crate::value::{Map, Value};
use std::fmt;
use tracing::info;

/// One correction applied during reconciliation
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    /// A missing key was filled in from its default
    Added { path: String, value: Value },
    /// A key or list element the schema does not declare was dropped
    Removed { path: String, value: Value },
    /// A wrong-typed value was replaced by its default
    Corrected {
        path: String,
        from: Value,
        to: Value,
    },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Added { path, value } => write!(f, "+ added {path} = {value}"),
            Change::Removed { path, value } => write!(f, "- removed {path} = {value}"),
            Change::Corrected { path, from, to } => {
                write!(f, "~ changed {path}: {from} -> {to}")
            }
        }
    }
}

/// Ordered record of everything reconciliation changed
#[derive(Debug, Default)]
pub struct ReconcileReport {
    changes: Vec<Change>,
}

impl ReconcileReport {
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    pub fn is_clean(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    fn record(&mut self, change: Change) {
        info!("sanitize: {change}");
        self.changes.push(change);
    }
}

/// Reconcile a persisted tree against every property the registry declares.
///
/// The result holds the reconciled schema properties in declaration order,
/// followed by all top-level keys the schema does not cover, unchanged and
/// in their original order. Top-level keys are never pruned.
pub fn reconcile(tree: &Map, registry: &SchemaRegistry) -> (Map, ReconcileReport) {
    let mut report = ReconcileReport::default();
    let mut out = Map::new();

    for property in registry.all_properties() {
        if let Some(value) = reconcile_property(tree.get(property.name()), property, &mut report) {
            out.insert(property.name().to_string(), value);
        }
    }

    for (key, value) in tree {
        if !registry.covers(key) {
            out.insert(key.clone(), value.clone());
        }
    }

    (out, report)
}

fn reconcile_property(
    current: Option<&Value>,
    property: &SchemaProperty,
    report: &mut ReconcileReport,
) -> Option<Value> {
    reconcile_value(current, property.field(), property.name(), report)
}

/// The recursive reconciliation rule.
///
/// `path` is the dotted address used in change records; `field` carries the
/// expected type, default, and flags for the value being examined.
fn reconcile_value(
    current: Option<&Value>,
    field: &SchemaField,
    path: &str,
    report: &mut ReconcileReport,
) -> Option<Value> {
    match field.ty() {
        FieldType::Map(fields) => {
            // Anything that is not a map is treated as an empty one: the
            // declared fields get their defaults and the old value is gone.
            let empty = Map::new();
            let current_map = current.and_then(Value::as_map).unwrap_or(&empty);

            let mut out = Map::new();
            for child in fields {
                let child_path = format!("{path}.{}", child.name());
                match current_map.get(child.name()) {
                    Some(sub) => {
                        if let Some(value) =
                            reconcile_value(Some(sub), child, &child_path, report)
                        {
                            out.insert(child.name().to_string(), value);
                        }
                    }
                    None if child.auto_insert() => {
                        let value = child.default_value();
                        report.record(Change::Added {
                            path: child_path,
                            value: value.clone(),
                        });
                        out.insert(child.name().to_string(), value);
                    }
                    None => {}
                }
            }

            for (key, value) in current_map {
                if fields.iter().all(|f| f.name() != key.as_str()) {
                    report.record(Change::Removed {
                        path: format!("{path}.{key}"),
                        value: value.clone(),
                    });
                }
            }

            Some(Value::Map(out))
        }

        FieldType::List(allowed) => match current {
            None => None,
            Some(Value::List(items)) => {
                let mut kept = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    if allowed.iter().any(|tag| tag.matches(item)) {
                        kept.push(item.clone());
                    } else {
                        report.record(Change::Removed {
                            path: format!("{path}[{index}]"),
                            value: item.clone(),
                        });
                    }
                }
                if kept.is_empty() {
                    None
                } else {
                    Some(Value::List(kept))
                }
            }
            Some(other) => {
                let default = field.default_value();
                report.record(Change::Corrected {
                    path: path.to_string(),
                    from: other.clone(),
                    to: default.clone(),
                });
                Some(default)
            }
        },

        FieldType::Scalar(tag) => match current {
            None => field.is_required().then(|| field.default_value()),
            Some(value) if tag.matches(value) => Some(value.clone()),
            Some(value) => {
                let default = field.default_value();
                report.record(Change::Corrected {
                    path: path.to_string(),
                    from: value.clone(),
                    to: default.clone(),
                });
                Some(default)
            }
        },
    }
}
