//! Error types for confmend
//!
//! Recoverable errors raised by the configuration engine. All of these are
//! caught at the command boundary and rendered as a short message; none of
//! them abort the process.

use thiserror::Error;

/// Errors raised while reading, writing, or coercing configuration values
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The requested category is not registered
    #[error("unknown category '{name}'")]
    UnknownCategory { name: String },

    /// The requested property does not exist in the category
    #[error("unknown property '{name}' in category '{category}'")]
    UnknownProperty { category: String, name: String },

    /// The property exists in the schema but the tree holds no value for it
    #[error("no value stored for property '{name}'")]
    MissingValue { name: String },

    /// A path segment did not match any key or index
    #[error("path segment '{segment}' not found at '{at}'")]
    PathNotFound { segment: String, at: String },

    /// Tried to navigate deeper through a scalar value
    #[error("cannot navigate through {type_name} value at segment '{segment}'")]
    Traverse {
        segment: String,
        type_name: &'static str,
    },

    /// Tried to set a sub-path below an existing non-container value
    #[error("cannot set below existing {type_name} value at segment '{segment}'")]
    TypeConflict {
        segment: String,
        type_name: &'static str,
    },

    /// A list index was numeric but outside the list
    #[error("list index {index} out of bounds (length {len})")]
    ListIndexOutOfBounds { index: usize, len: usize },

    /// A literal could not be parsed as the type the schema expects
    #[error("invalid {expected} literal '{literal}'")]
    InvalidValueFormat {
        literal: String,
        expected: &'static str,
    },

    /// The addressed target is a whole map; raw tokens cannot replace it
    #[error("cannot assign a raw value to a {type_name} target")]
    UnsupportedAssignment { type_name: &'static str },
}

/// Schema definition errors
///
/// These are raised while building a [`crate::schema::SchemaRegistry`] and
/// are fatal: a registry that fails validation must never reach the
/// sanitizer or the command layer.
#[derive(Debug, Error, PartialEq)]
pub enum SchemaError {
    #[error("duplicate category '{0}'")]
    DuplicateCategory(String),

    #[error("duplicate property '{property}' in category '{category}'")]
    DuplicateProperty { category: String, property: String },

    #[error("duplicate field '{field}' under '{parent}'")]
    DuplicateField { parent: String, field: String },

    #[error("list field '{field}' declares no allowed element types")]
    NoElementTypes { field: String },

    #[error("default for field '{field}' does not match its declared {expected} type")]
    DefaultTypeMismatch {
        field: String,
        expected: &'static str,
    },
}
