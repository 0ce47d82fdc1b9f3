//! Configuration value tree
//!
//! A closed, tagged representation of everything a configuration file can
//! hold: scalars, ordered lists, and ordered maps. Every branch of the
//! sanitizer and the path accessor matches on this type exhaustively, so
//! a malformed tree can never fall through an unchecked case.

use indexmap::IndexMap;
use std::fmt;

pub mod path;

/// An ordered mapping from keys to values, mirroring the YAML document
pub type Map = IndexMap<String, Value>;

/// A single configuration value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Int(i64),
    Bool(bool),
    Float(f64),
    List(Vec<Value>),
    Map(Map),
}

impl Value {
    /// Short lowercase type name used in user-facing messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Float(_) => "float",
            Value::List(_) => "list",
            Value::Map(_) => "map",
        }
    }

    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(l) => Some(l),
            _ => None,
        }
    }

    /// Convert a parsed YAML value into the closed representation.
    ///
    /// Returns `None` for YAML nulls: the tree has no null variant and the
    /// engine treats a null entry exactly like a missing key, which is what
    /// the sanitizer needs to re-insert defaults over it.
    pub fn from_yaml(yaml: &serde_yml::Value) -> Option<Value> {
        match yaml {
            serde_yml::Value::Null => None,
            serde_yml::Value::Bool(b) => Some(Value::Bool(*b)),
            serde_yml::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Value::Int(i))
                } else {
                    n.as_f64().map(Value::Float)
                }
            }
            serde_yml::Value::String(s) => Some(Value::String(s.clone())),
            serde_yml::Value::Sequence(seq) => Some(Value::List(
                seq.iter().filter_map(Value::from_yaml).collect(),
            )),
            serde_yml::Value::Mapping(mapping) => Some(Value::Map(map_from_yaml(mapping))),
            serde_yml::Value::Tagged(tagged) => Value::from_yaml(&tagged.value),
        }
    }

    pub fn to_yaml(&self) -> serde_yml::Value {
        match self {
            Value::String(s) => serde_yml::Value::String(s.clone()),
            Value::Int(i) => serde_yml::Value::Number((*i).into()),
            Value::Bool(b) => serde_yml::Value::Bool(*b),
            Value::Float(f) => serde_yml::Value::Number((*f).into()),
            Value::List(items) => {
                serde_yml::Value::Sequence(items.iter().map(Value::to_yaml).collect())
            }
            Value::Map(map) => serde_yml::Value::Mapping(map_to_yaml(map)),
        }
    }

    /// Convert to JSON for `--format json` output
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(map) => serde_json::Value::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
        }
    }
}

/// Convert a YAML mapping into an ordered tree, stringifying non-string keys
/// and skipping null entries
pub fn map_from_yaml(mapping: &serde_yml::Mapping) -> Map {
    let mut map = Map::new();
    for (key, value) in mapping {
        let key = match key {
            serde_yml::Value::String(s) => s.clone(),
            other => yaml_key_to_string(other),
        };
        if let Some(value) = Value::from_yaml(value) {
            map.insert(key, value);
        }
    }
    map
}

pub fn map_to_yaml(map: &Map) -> serde_yml::Mapping {
    let mut mapping = serde_yml::Mapping::new();
    for (key, value) in map {
        mapping.insert(serde_yml::Value::String(key.clone()), value.to_yaml());
    }
    mapping
}

fn yaml_key_to_string(key: &serde_yml::Value) -> String {
    match key {
        serde_yml::Value::Bool(b) => b.to_string(),
        serde_yml::Value::Number(n) => n.to_string(),
        serde_yml::Value::String(s) => s.clone(),
        other => serde_yml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{s}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Map(map) => {
                write!(f, "{{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_round_trip_preserves_key_order() {
        let doc = "zulu: 1\nalpha: two\nmike:\n  nested: true\n";
        let yaml: serde_yml::Value = serde_yml::from_str(doc).unwrap();
        let map = map_from_yaml(yaml.as_mapping().unwrap());

        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, ["zulu", "alpha", "mike"]);

        let back = serde_yml::to_string(&serde_yml::Value::Mapping(map_to_yaml(&map))).unwrap();
        let reparsed: serde_yml::Value = serde_yml::from_str(&back).unwrap();
        let reparsed = map_from_yaml(reparsed.as_mapping().unwrap());
        assert_eq!(map, reparsed);
    }

    #[test]
    fn null_entries_are_treated_as_absent() {
        let doc = "present: 1\nempty: null\n";
        let yaml: serde_yml::Value = serde_yml::from_str(doc).unwrap();
        let map = map_from_yaml(yaml.as_mapping().unwrap());
        assert_eq!(map.len(), 1);
        assert!(map.contains_key("present"));
    }

    #[test]
    fn numbers_split_into_int_and_float() {
        let yaml: serde_yml::Value = serde_yml::from_str("[3, 2.5]").unwrap();
        let value = Value::from_yaml(&yaml).unwrap();
        assert_eq!(
            value,
            Value::List(vec![Value::Int(3), Value::Float(2.5)])
        );
    }

    #[test]
    fn display_is_compact() {
        let mut map = Map::new();
        map.insert("a".into(), Value::Int(1));
        map.insert("b".into(), Value::List(vec!["x".into(), "y".into()]));
        assert_eq!(Value::Map(map).to_string(), "{a: 1, b: [x, y]}");
    }
}
