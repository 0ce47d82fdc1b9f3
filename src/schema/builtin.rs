//! Built-in schema declarations
//!
//! The statically registered categories. Adding a property here is all
//! that is needed for it to be repaired on `sanitize` and addressable
//! from `get`/`set`.

use super::{Category, ScalarType, SchemaField, SchemaProperty, SchemaRegistry};
use crate::error::SchemaError;

/// Build the registry of built-in categories
pub fn registry() -> Result<SchemaRegistry, SchemaError> {
    SchemaRegistry::new(vec![main_category()])
}

fn main_category() -> Category {
    Category::new(
        "main",
        vec![
            SchemaProperty::new(SchemaField::string("prefix", "[mcMMO Additions] ").required()),
            SchemaProperty::new(SchemaField::map(
                "console",
                vec![SchemaField::bool("add-prefix-space-automatically", true)],
            )),
            SchemaProperty::new(SchemaField::map(
                "config2",
                vec![
                    SchemaField::string("some-key", "some-value").required(),
                    SchemaField::int("lets-try-int", 2),
                    SchemaField::list(
                        "a-list",
                        vec![ScalarType::String],
                        vec![
                            "banana".into(),
                            "pineapple".into(),
                            "pen".into(),
                            "apple".into(),
                        ],
                    ),
                    SchemaField::map(
                        "another-object",
                        vec![
                            SchemaField::map(
                                "some-element",
                                vec![SchemaField::string("sub-element", "Hello")],
                            ),
                            SchemaField::list(
                                "some-other-list",
                                vec![ScalarType::String],
                                vec!["urmom".into(), "you".into()],
                            ),
                        ],
                    ),
                ],
            )),
        ],
    )
}
