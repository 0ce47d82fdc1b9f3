//! Path-addressed access into a value tree
//!
//! A path is a sequence of segments: map keys, or decimal indices when the
//! node being walked is a list. Resolution never mutates; writes build the
//! missing intermediate maps on the way down and refuse to overwrite an
//! existing non-container node.

use super::{Map, Value};
use crate::error::ConfigError;

/// Resolve a path to a reference into the tree.
///
/// Fails with [`ConfigError::PathNotFound`] naming the offending segment and
/// the dotted path walked so far.
pub fn resolve<'a>(root: &'a Value, segments: &[String]) -> Result<&'a Value, ConfigError> {
    let mut current = root;
    let mut walked: Vec<&str> = Vec::with_capacity(segments.len());

    for segment in segments {
        current = match current {
            Value::Map(map) => map.get(segment).ok_or_else(|| ConfigError::PathNotFound {
                segment: segment.clone(),
                at: walked.join("."),
            })?,
            Value::List(items) => {
                let index = parse_index(segment, &walked)?;
                if index >= items.len() {
                    return Err(ConfigError::ListIndexOutOfBounds {
                        index,
                        len: items.len(),
                    });
                }
                &items[index]
            }
            scalar => {
                return Err(ConfigError::Traverse {
                    segment: segment.clone(),
                    type_name: scalar.type_name(),
                });
            }
        };
        walked.push(segment.as_str());
    }

    Ok(current)
}

/// Assign `value` at `segments`, creating empty maps for absent intermediate
/// keys.
///
/// An existing scalar in the middle of the path is a
/// [`ConfigError::TypeConflict`]; it is never silently replaced by a map.
pub fn set_at_path(root: &mut Value, segments: &[String], value: Value) -> Result<(), ConfigError> {
    let Some((last, intermediate)) = segments.split_last() else {
        *root = value;
        return Ok(());
    };

    let mut current = root;
    for segment in intermediate {
        current = match current {
            Value::Map(map) => map
                .entry(segment.clone())
                .or_insert_with(|| Value::Map(Map::new())),
            Value::List(items) => {
                let len = items.len();
                let index = parse_index_for_set(segment)?;
                items
                    .get_mut(index)
                    .ok_or(ConfigError::ListIndexOutOfBounds { index, len })?
            }
            scalar => {
                return Err(ConfigError::TypeConflict {
                    segment: segment.clone(),
                    type_name: scalar.type_name(),
                });
            }
        };
        if !matches!(current, Value::Map(_) | Value::List(_)) {
            return Err(ConfigError::TypeConflict {
                segment: segment.clone(),
                type_name: current.type_name(),
            });
        }
    }

    match current {
        Value::Map(map) => {
            map.insert(last.clone(), value);
            Ok(())
        }
        Value::List(items) => {
            let len = items.len();
            let index = parse_index_for_set(last)?;
            let slot = items
                .get_mut(index)
                .ok_or(ConfigError::ListIndexOutOfBounds { index, len })?;
            *slot = value;
            Ok(())
        }
        scalar => Err(ConfigError::TypeConflict {
            segment: last.clone(),
            type_name: scalar.type_name(),
        }),
    }
}

fn parse_index(segment: &str, walked: &[&str]) -> Result<usize, ConfigError> {
    segment
        .parse::<usize>()
        .map_err(|_| ConfigError::PathNotFound {
            segment: segment.to_string(),
            at: walked.join("."),
        })
}

fn parse_index_for_set(segment: &str) -> Result<usize, ConfigError> {
    segment
        .parse::<usize>()
        .map_err(|_| ConfigError::TypeConflict {
            segment: segment.to_string(),
            type_name: "list",
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Value {
        let yaml: serde_yml::Value = serde_yml::from_str(
            "outer:\n  inner: Hello\nitems:\n  - first\n  - second\ncount: 3\n",
        )
        .unwrap();
        Value::from_yaml(&yaml).unwrap()
    }

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn resolves_nested_map_keys() {
        let tree = sample();
        let value = resolve(&tree, &segs(&["outer", "inner"])).unwrap();
        assert_eq!(value, &Value::String("Hello".into()));
    }

    #[test]
    fn resolves_list_indices() {
        let tree = sample();
        let value = resolve(&tree, &segs(&["items", "1"])).unwrap();
        assert_eq!(value, &Value::String("second".into()));
    }

    #[test]
    fn missing_key_names_segment_and_path_so_far() {
        let tree = sample();
        let err = resolve(&tree, &segs(&["outer", "nope"])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::PathNotFound {
                segment: "nope".into(),
                at: "outer".into(),
            }
        );
    }

    #[test]
    fn out_of_bounds_index_is_reported() {
        let tree = sample();
        let err = resolve(&tree, &segs(&["items", "5"])).unwrap_err();
        assert_eq!(err, ConfigError::ListIndexOutOfBounds { index: 5, len: 2 });
    }

    #[test]
    fn cannot_walk_through_scalars() {
        let tree = sample();
        let err = resolve(&tree, &segs(&["count", "deeper"])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Traverse {
                segment: "deeper".into(),
                type_name: "int",
            }
        );
    }

    #[test]
    fn set_creates_intermediate_maps() {
        let mut tree = Value::Map(Map::new());
        set_at_path(&mut tree, &segs(&["a", "b", "c"]), Value::Int(7)).unwrap();
        assert_eq!(resolve(&tree, &segs(&["a", "b", "c"])).unwrap(), &Value::Int(7));
    }

    #[test]
    fn set_refuses_to_replace_scalar_intermediates() {
        let mut tree = sample();
        let err = set_at_path(&mut tree, &segs(&["count", "sub"]), Value::Int(1)).unwrap_err();
        assert_eq!(
            err,
            ConfigError::TypeConflict {
                segment: "count".into(),
                type_name: "int",
            }
        );
        // and the tree is untouched
        assert_eq!(resolve(&tree, &segs(&["count"])).unwrap(), &Value::Int(3));
    }

    #[test]
    fn set_replaces_list_elements_in_bounds() {
        let mut tree = sample();
        set_at_path(&mut tree, &segs(&["items", "0"]), "patched".into()).unwrap();
        assert_eq!(
            resolve(&tree, &segs(&["items", "0"])).unwrap(),
            &Value::String("patched".into())
        );
    }

    #[test]
    fn set_then_resolve_round_trips() {
        let mut tree = sample();
        let path = segs(&["outer", "fresh", "leaf"]);
        set_at_path(&mut tree, &path, Value::Bool(true)).unwrap();
        assert_eq!(resolve(&tree, &path).unwrap(), &Value::Bool(true));
    }
}
