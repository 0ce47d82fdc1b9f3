//! Declarative configuration schema
//!
//! This module describes the shape a configuration tree is expected to
//! have: named categories of properties, where each property is a scalar,
//! a typed list, or a nested map of further fields. The registry is built
//! statically at startup and validated once; the sanitizer and the command
//! layer only ever read it.

use crate::error::{ConfigError, SchemaError};
use crate::value::Value;

pub mod builtin;
pub mod coerce;

/// The scalar types a configuration value can have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    String,
    Int,
    Bool,
    Float,
}

impl ScalarType {
    /// Whether a value's runtime type matches this tag
    pub fn matches(&self, value: &Value) -> bool {
        matches!(
            (self, value),
            (ScalarType::String, Value::String(_))
                | (ScalarType::Int, Value::Int(_))
                | (ScalarType::Bool, Value::Bool(_))
                | (ScalarType::Float, Value::Float(_))
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ScalarType::String => "string",
            ScalarType::Int => "int",
            ScalarType::Bool => "bool",
            ScalarType::Float => "float",
        }
    }
}

/// The expected shape of a field
#[derive(Debug, Clone)]
pub enum FieldType {
    /// A single scalar of the given type
    Scalar(ScalarType),
    /// A list whose elements may be any of the given scalar types
    List(Vec<ScalarType>),
    /// A nested map of named fields, in declaration order
    Map(Vec<SchemaField>),
}

impl FieldType {
    /// Human-readable description for schema listings
    pub fn describe(&self) -> String {
        match self {
            FieldType::Scalar(tag) => tag.name().to_string(),
            FieldType::List(allowed) => {
                let tags: Vec<&str> = allowed.iter().map(ScalarType::name).collect();
                format!("list<{}>", tags.join("|"))
            }
            FieldType::Map(fields) => format!("map({} fields)", fields.len()),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Scalar(tag) => tag.name(),
            FieldType::List(_) => "list",
            FieldType::Map(_) => "map",
        }
    }
}

/// A named entry in the schema: expected type, default value, and the
/// flags steering reconciliation
#[derive(Debug, Clone)]
pub struct SchemaField {
    name: String,
    ty: FieldType,
    default: Value,
    required: bool,
    auto_insert: bool,
}

impl SchemaField {
    pub fn string(name: &str, default: &str) -> Self {
        Self::leaf(name, FieldType::Scalar(ScalarType::String), default.into())
    }

    pub fn int(name: &str, default: i64) -> Self {
        Self::leaf(name, FieldType::Scalar(ScalarType::Int), default.into())
    }

    pub fn bool(name: &str, default: bool) -> Self {
        Self::leaf(name, FieldType::Scalar(ScalarType::Bool), default.into())
    }

    pub fn float(name: &str, default: f64) -> Self {
        Self::leaf(name, FieldType::Scalar(ScalarType::Float), default.into())
    }

    /// A list field with its allowed element types and default elements
    pub fn list(name: &str, allowed: Vec<ScalarType>, default: Vec<Value>) -> Self {
        Self::leaf(name, FieldType::List(allowed), Value::List(default))
    }

    /// A nested map field; its default is derived from the child defaults
    pub fn map(name: &str, fields: Vec<SchemaField>) -> Self {
        let default = Value::Map(
            fields
                .iter()
                .map(|f| (f.name.clone(), f.default_value()))
                .collect(),
        );
        SchemaField {
            name: name.to_string(),
            ty: FieldType::Map(fields),
            default,
            required: false,
            auto_insert: true,
        }
    }

    fn leaf(name: &str, ty: FieldType, default: Value) -> Self {
        SchemaField {
            name: name.to_string(),
            ty,
            default,
            required: false,
            auto_insert: true,
        }
    }

    /// Mark the field as required: a missing scalar is restored from its
    /// default instead of being dropped
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Do not insert the default when the key is absent
    pub fn no_auto_insert(mut self) -> Self {
        self.auto_insert = false;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> &FieldType {
        &self.ty
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn auto_insert(&self) -> bool {
        self.auto_insert
    }

    /// The unwrapped default for this field. Map fields collect their
    /// children's defaults into an ordered map.
    pub fn default_value(&self) -> Value {
        self.default.clone()
    }

    fn validate(&self) -> Result<(), SchemaError> {
        match &self.ty {
            FieldType::Scalar(tag) => {
                if !tag.matches(&self.default) {
                    return Err(SchemaError::DefaultTypeMismatch {
                        field: self.name.clone(),
                        expected: tag.name(),
                    });
                }
            }
            FieldType::List(allowed) => {
                if allowed.is_empty() {
                    return Err(SchemaError::NoElementTypes {
                        field: self.name.clone(),
                    });
                }
                let elements = self.default.as_list().ok_or(SchemaError::DefaultTypeMismatch {
                    field: self.name.clone(),
                    expected: "list",
                })?;
                for element in elements {
                    if !allowed.iter().any(|tag| tag.matches(element)) {
                        return Err(SchemaError::DefaultTypeMismatch {
                            field: self.name.clone(),
                            expected: "list",
                        });
                    }
                }
            }
            FieldType::Map(fields) => {
                let mut seen: Vec<&str> = Vec::with_capacity(fields.len());
                for field in fields {
                    if seen.contains(&field.name.as_str()) {
                        return Err(SchemaError::DuplicateField {
                            parent: self.name.clone(),
                            field: field.name.clone(),
                        });
                    }
                    seen.push(&field.name);
                    field.validate()?;
                }
            }
        }
        Ok(())
    }
}

/// A top-level configuration entry registered under a category
#[derive(Debug, Clone)]
pub struct SchemaProperty {
    field: SchemaField,
}

impl SchemaProperty {
    pub fn new(field: SchemaField) -> Self {
        SchemaProperty { field }
    }

    pub fn name(&self) -> &str {
        self.field.name()
    }

    pub fn ty(&self) -> &FieldType {
        self.field.ty()
    }

    pub fn default_value(&self) -> Value {
        self.field.default_value()
    }

    pub fn field(&self) -> &SchemaField {
        &self.field
    }
}

/// A named group of properties, in declaration order
#[derive(Debug, Clone)]
pub struct Category {
    name: String,
    properties: Vec<SchemaProperty>,
}

impl Category {
    pub fn new(name: &str, properties: Vec<SchemaProperty>) -> Self {
        Category {
            name: name.to_string(),
            properties,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn properties(&self) -> &[SchemaProperty] {
        &self.properties
    }

    pub fn property(&self, name: &str) -> Option<&SchemaProperty> {
        self.properties.iter().find(|p| p.name() == name)
    }
}

/// The immutable registry of every declared category
///
/// Built once at startup; construction fails fast on duplicate names or
/// defaults that do not match their declared types, so an invalid schema
/// never reaches the sanitizer.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    categories: Vec<Category>,
}

impl SchemaRegistry {
    pub fn new(categories: Vec<Category>) -> Result<Self, SchemaError> {
        let mut category_names: Vec<&str> = Vec::with_capacity(categories.len());
        for category in &categories {
            if category_names.contains(&category.name()) {
                return Err(SchemaError::DuplicateCategory(category.name().to_string()));
            }
            category_names.push(category.name());

            let mut property_names: Vec<&str> = Vec::with_capacity(category.properties.len());
            for property in &category.properties {
                if property_names.contains(&property.name()) {
                    return Err(SchemaError::DuplicateProperty {
                        category: category.name().to_string(),
                        property: property.name().to_string(),
                    });
                }
                property_names.push(property.name());
                property.field.validate()?;
            }
        }
        Ok(SchemaRegistry { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name() == name)
    }

    /// Look up a property, reporting which part of the address was wrong
    pub fn property(&self, category: &str, name: &str) -> Result<&SchemaProperty, ConfigError> {
        let category = self
            .category(category)
            .ok_or_else(|| ConfigError::UnknownCategory {
                name: category.to_string(),
            })?;
        category
            .property(name)
            .ok_or_else(|| ConfigError::UnknownProperty {
                category: category.name().to_string(),
                name: name.to_string(),
            })
    }

    /// Sorted category names for listings
    pub fn category_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.categories.iter().map(Category::name).collect();
        names.sort_unstable();
        names
    }

    /// Sorted property names of one category for listings
    pub fn property_names(&self, category: &str) -> Option<Vec<&str>> {
        let category = self.category(category)?;
        let mut names: Vec<&str> = category.properties.iter().map(SchemaProperty::name).collect();
        names.sort_unstable();
        Some(names)
    }

    /// Every property of every category, in registry declaration order.
    ///
    /// The sanitizer reconciles the tree against this flattened sequence.
    pub fn all_properties(&self) -> impl Iterator<Item = &SchemaProperty> {
        self.categories.iter().flat_map(|c| c.properties.iter())
    }

    /// Whether any category declares a property with this name
    pub fn covers(&self, name: &str) -> bool {
        self.all_properties().any(|p| p.name() == name)
    }
}

/// Walk the schema's type tree along a path of map keys, returning the
/// expected type at the terminal segment.
///
/// Only map fields can be descended into; the schema does not address
/// individual list elements.
pub fn type_at_path<'a>(
    ty: &'a FieldType,
    segments: &[String],
) -> Result<&'a FieldType, ConfigError> {
    let mut current = ty;
    let mut walked: Vec<&str> = Vec::with_capacity(segments.len());
    for segment in segments {
        current = match current {
            FieldType::Map(fields) => fields
                .iter()
                .find(|f| f.name() == segment.as_str())
                .map(SchemaField::ty)
                .ok_or_else(|| ConfigError::PathNotFound {
                    segment: segment.clone(),
                    at: walked.join("."),
                })?,
            other => {
                return Err(ConfigError::Traverse {
                    segment: segment.clone(),
                    type_name: other.type_name(),
                });
            }
        };
        walked.push(segment.as_str());
    }
    Ok(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Map;

    fn demo_category() -> Category {
        Category::new(
            "demo",
            vec![
                SchemaProperty::new(SchemaField::string("greeting", "hi").required()),
                SchemaProperty::new(SchemaField::map(
                    "nested",
                    vec![
                        SchemaField::bool("flag", true),
                        SchemaField::int("depth", 4),
                    ],
                )),
            ],
        )
    }

    #[test]
    fn registry_accepts_a_valid_category() {
        let registry = SchemaRegistry::new(vec![demo_category()]).unwrap();
        assert!(registry.category("demo").is_some());
        assert!(registry.property("demo", "greeting").is_ok());
    }

    #[test]
    fn duplicate_property_names_fail_at_build_time() {
        let category = Category::new(
            "demo",
            vec![
                SchemaProperty::new(SchemaField::int("twice", 1)),
                SchemaProperty::new(SchemaField::string("twice", "again")),
            ],
        );
        let err = SchemaRegistry::new(vec![category]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateProperty {
                category: "demo".into(),
                property: "twice".into(),
            }
        );
    }

    #[test]
    fn duplicate_category_names_fail_at_build_time() {
        let err =
            SchemaRegistry::new(vec![demo_category(), demo_category()]).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateCategory("demo".into()));
    }

    #[test]
    fn duplicate_field_names_fail_at_build_time() {
        let category = Category::new(
            "demo",
            vec![SchemaProperty::new(SchemaField::map(
                "nested",
                vec![SchemaField::int("x", 1), SchemaField::int("x", 2)],
            ))],
        );
        let err = SchemaRegistry::new(vec![category]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateField {
                parent: "nested".into(),
                field: "x".into(),
            }
        );
    }

    #[test]
    fn list_defaults_must_match_allowed_element_types() {
        let category = Category::new(
            "demo",
            vec![SchemaProperty::new(SchemaField::list(
                "words",
                vec![ScalarType::String],
                vec!["ok".into(), Value::Int(9)],
            ))],
        );
        let err = SchemaRegistry::new(vec![category]).unwrap_err();
        assert_eq!(
            err,
            SchemaError::DefaultTypeMismatch {
                field: "words".into(),
                expected: "list",
            }
        );
    }

    #[test]
    fn list_fields_need_at_least_one_element_type() {
        let category = Category::new(
            "demo",
            vec![SchemaProperty::new(SchemaField::list("empty", vec![], vec![]))],
        );
        let err = SchemaRegistry::new(vec![category]).unwrap_err();
        assert_eq!(err, SchemaError::NoElementTypes { field: "empty".into() });
    }

    #[test]
    fn map_defaults_are_derived_from_children() {
        let category = demo_category();
        let nested = category.property("nested").unwrap();
        let expected: Map = [
            ("flag".to_string(), Value::Bool(true)),
            ("depth".to_string(), Value::Int(4)),
        ]
        .into_iter()
        .collect();
        assert_eq!(nested.default_value(), Value::Map(expected));
    }

    #[test]
    fn type_at_path_walks_nested_maps() {
        let category = demo_category();
        let nested = category.property("nested").unwrap();
        let ty = type_at_path(nested.ty(), &["depth".to_string()]).unwrap();
        assert!(matches!(ty, FieldType::Scalar(ScalarType::Int)));
    }

    #[test]
    fn type_at_path_rejects_unknown_fields() {
        let category = demo_category();
        let nested = category.property("nested").unwrap();
        let err = type_at_path(nested.ty(), &["missing".to_string()]).unwrap_err();
        assert_eq!(
            err,
            ConfigError::PathNotFound {
                segment: "missing".into(),
                at: String::new(),
            }
        );
    }

    #[test]
    fn unknown_lookups_name_the_bad_part() {
        let registry = SchemaRegistry::new(vec![demo_category()]).unwrap();
        assert_eq!(
            registry.property("nope", "greeting").unwrap_err(),
            ConfigError::UnknownCategory { name: "nope".into() }
        );
        assert_eq!(
            registry.property("demo", "nope").unwrap_err(),
            ConfigError::UnknownProperty {
                category: "demo".into(),
                name: "nope".into(),
            }
        );
    }
}
