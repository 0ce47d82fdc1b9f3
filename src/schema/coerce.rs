//! Literal-to-value coercion
//!
//! Turns the raw tokens a user typed into a [`Value`] of the type the
//! schema expects at the addressed path. Parse failures are user-facing
//! errors that echo the offending literal; they never panic and never
//! fall back to a substitute value.

use super::{FieldType, ScalarType};
use crate::error::ConfigError;
use crate::value::Value;

/// Coerce raw value tokens to the expected type.
///
/// Scalar targets join the tokens with spaces first (quoted multi-word
/// values arrive as a single token already); list targets parse each token
/// as one element and the result replaces the whole list.
pub fn coerce(tokens: &[String], expected: &FieldType) -> Result<Value, ConfigError> {
    match expected {
        FieldType::Scalar(tag) => coerce_scalar(&tokens.join(" "), *tag),
        FieldType::List(allowed) => {
            // Element type for parsing is the first allowed tag; the
            // registry guarantees there is one.
            let tag = allowed.first().copied().unwrap_or(ScalarType::String);
            let elements = tokens
                .iter()
                .map(|token| coerce_scalar(token, tag))
                .collect::<Result<Vec<Value>, ConfigError>>()?;
            Ok(Value::List(elements))
        }
        FieldType::Map(_) => Err(ConfigError::UnsupportedAssignment { type_name: "map" }),
    }
}

fn coerce_scalar(literal: &str, tag: ScalarType) -> Result<Value, ConfigError> {
    match tag {
        ScalarType::String => Ok(Value::String(literal.to_string())),
        ScalarType::Int => literal
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| invalid(literal, "integer")),
        ScalarType::Float => literal
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| invalid(literal, "double")),
        ScalarType::Bool => match literal {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(invalid(literal, "boolean")),
        },
    }
}

fn invalid(literal: &str, expected: &'static str) -> ConfigError {
    ConfigError::InvalidValueFormat {
        literal: literal.to_string(),
        expected,
    }
}
