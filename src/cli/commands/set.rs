//! Set command implementation
//!
//! Splits the trailing arguments into path segments and value tokens,
//! then hands the address and raw tokens to the service for coercion and
//! assignment. Quoted runs of tokens are re-joined into a single value
//! token first, so `set main config2 some-key "two words"` works the same
//! whether or not the shell already collapsed the quotes.

use crate::cli::Output;
use crate::error::ConfigError;
use crate::schema::FieldType;
use crate::service::ConfigService;
use anyhow::Result;

pub async fn execute(
    service: &mut ConfigService,
    category: &str,
    property: &str,
    args: &[String],
    output: &Output,
) -> Result<()> {
    let prop = service.registry().property(category, property)?;
    let tokens = join_quoted(args);
    let (path, value_tokens) = split_path_and_value(prop.ty(), &tokens)?;

    if value_tokens.is_empty() {
        anyhow::bail!("no value specified");
    }

    let value = service.set(category, property, &path, &value_tokens)?;

    if path.is_empty() {
        output.success(&format!("Updated {property} to {value}"));
    } else {
        output.success(&format!(
            "Updated {property} at {} to {value}",
            path.join(".")
        ));
    }
    Ok(())
}

/// Re-join tokens that belong to one double-quoted value.
///
/// A token starting with `"` opens a quoted run; the run ends with the
/// first token ending in `"`. The surrounding quotes are stripped. Tokens
/// outside quoted runs pass through unchanged.
pub fn join_quoted(args: &[String]) -> Vec<String> {
    let mut tokens = Vec::with_capacity(args.len());
    let mut pending: Option<String> = None;

    for arg in args {
        match pending.take() {
            Some(mut buffer) => {
                if let Some(stripped) = arg.strip_suffix('"') {
                    buffer.push(' ');
                    buffer.push_str(stripped);
                    tokens.push(buffer);
                } else {
                    buffer.push(' ');
                    buffer.push_str(arg);
                    pending = Some(buffer);
                }
            }
            None => {
                if let Some(stripped) = arg.strip_prefix('"') {
                    if let Some(whole) = stripped.strip_suffix('"') {
                        // a single token carrying both quotes
                        tokens.push(whole.to_string());
                    } else {
                        pending = Some(stripped.to_string());
                    }
                } else {
                    tokens.push(arg.clone());
                }
            }
        }
    }

    // an unterminated quote keeps what was collected
    if let Some(buffer) = pending {
        tokens.push(buffer);
    }

    tokens
}

/// Split tokens into path segments and value tokens, guided by the schema.
///
/// A token is consumed as a path segment while the expected type at the
/// current depth is a map and the token names one of its fields; the
/// remaining tokens are the value. A token that matches no field at a map
/// level is a path error rather than a value.
pub fn split_path_and_value(
    ty: &FieldType,
    tokens: &[String],
) -> Result<(Vec<String>, Vec<String>), ConfigError> {
    let mut current = ty;
    let mut path = Vec::new();
    let mut index = 0;

    while index < tokens.len() {
        let FieldType::Map(fields) = current else {
            break;
        };
        let token = &tokens[index];
        let field = fields.iter().find(|f| f.name() == token.as_str()).ok_or_else(|| {
            ConfigError::PathNotFound {
                segment: token.clone(),
                at: path.join("."),
            }
        })?;
        current = field.ty();
        path.push(token.clone());
        index += 1;
    }

    Ok((path, tokens[index..].to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builtin;

    fn tokens(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn quoted_runs_are_rejoined() {
        let joined = join_quoted(&tokens(&["some-key", "\"two", "words\""]));
        assert_eq!(joined, tokens(&["some-key", "two words"]));
    }

    #[test]
    fn single_token_quotes_are_stripped() {
        let joined = join_quoted(&tokens(&["\"already joined\""]));
        assert_eq!(joined, tokens(&["already joined"]));
    }

    #[test]
    fn unquoted_tokens_pass_through() {
        let joined = join_quoted(&tokens(&["banana", "kiwi"]));
        assert_eq!(joined, tokens(&["banana", "kiwi"]));
    }

    #[test]
    fn list_fields_take_all_remaining_tokens_as_value() {
        let registry = builtin::registry().unwrap();
        let config2 = registry.property("main", "config2").unwrap();
        let (path, value) =
            split_path_and_value(config2.ty(), &tokens(&["a-list", "banana", "kiwi"])).unwrap();
        assert_eq!(path, tokens(&["a-list"]));
        assert_eq!(value, tokens(&["banana", "kiwi"]));
    }

    #[test]
    fn nested_map_fields_extend_the_path() {
        let registry = builtin::registry().unwrap();
        let config2 = registry.property("main", "config2").unwrap();
        let (path, value) = split_path_and_value(
            config2.ty(),
            &tokens(&["another-object", "some-element", "sub-element", "Hi there"]),
        )
        .unwrap();
        assert_eq!(
            path,
            tokens(&["another-object", "some-element", "sub-element"])
        );
        assert_eq!(value, tokens(&["Hi there"]));
    }

    #[test]
    fn unknown_field_at_map_level_is_a_path_error() {
        let registry = builtin::registry().unwrap();
        let config2 = registry.property("main", "config2").unwrap();
        let err =
            split_path_and_value(config2.ty(), &tokens(&["bogus", "x"])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::PathNotFound {
                segment: "bogus".into(),
                at: String::new(),
            }
        );
    }

    #[test]
    fn scalar_properties_have_no_path() {
        let registry = builtin::registry().unwrap();
        let prefix = registry.property("main", "prefix").unwrap();
        let (path, value) =
            split_path_and_value(prefix.ty(), &tokens(&["[New] "])).unwrap();
        assert!(path.is_empty());
        assert_eq!(value, tokens(&["[New] "]));
    }
}
