//! Configuration service
//!
//! Owns the loaded configuration tree together with its schema registry
//! and store. Constructed once at startup and handed by reference to the
//! command layer; every mutation runs the full
//! read-modify-write-save-reload sequence before returning, so callers
//! never observe a half-written tree. All work happens synchronously on
//! the calling thread.

use crate::error::ConfigError;
use crate::sanitize::{self, ReconcileReport};
use crate::schema::{SchemaRegistry, coerce, type_at_path};
use crate::store::YamlStore;
use crate::value::{Map, Value, path};
use anyhow::Result;

pub struct ConfigService {
    registry: SchemaRegistry,
    store: YamlStore,
    tree: Map,
}

impl ConfigService {
    /// Load the store and wrap it with the registry
    pub fn open(store: YamlStore, registry: SchemaRegistry) -> Result<Self> {
        let tree = store.load()?;
        Ok(ConfigService {
            registry,
            store,
            tree,
        })
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn tree(&self) -> &Map {
        &self.tree
    }

    /// Reconcile the tree against the registry, rewrite the store from the
    /// corrected tree, and reload it from durable storage
    pub fn sanitize(&mut self) -> Result<ReconcileReport> {
        let (corrected, report) = sanitize::reconcile(&self.tree, &self.registry);
        self.tree = corrected;
        self.store.save(&self.tree)?;
        self.tree = self.store.reload()?;
        Ok(report)
    }

    /// Resolve a property value, optionally descending a path into it
    pub fn get(
        &self,
        category: &str,
        property: &str,
        segments: &[String],
    ) -> Result<&Value, ConfigError> {
        let property = self.registry.property(category, property)?;
        let root = self
            .tree
            .get(property.name())
            .ok_or_else(|| ConfigError::MissingValue {
                name: property.name().to_string(),
            })?;
        path::resolve(root, segments)
    }

    /// Coerce raw tokens to the schema type at the addressed path and
    /// assign the result.
    ///
    /// The value is first validated against the schema's type tree, then
    /// applied to a working copy and persisted; on any error the stored
    /// tree is left untouched.
    pub fn set(
        &mut self,
        category: &str,
        property: &str,
        segments: &[String],
        tokens: &[String],
    ) -> Result<Value> {
        let property = self.registry.property(category, property)?;
        let expected = type_at_path(property.ty(), segments)?;
        let value = coerce::coerce(tokens, expected)?;
        let name = property.name().to_string();

        let mut next = self.tree.clone();
        if segments.is_empty() {
            next.insert(name, value.clone());
        } else {
            let mut root = match next.get(&name) {
                Some(existing) => existing.clone(),
                None => Value::Map(Map::new()),
            };
            path::set_at_path(&mut root, segments, value.clone())?;
            next.insert(name, root);
        }

        self.store.save(&next)?;
        self.tree = self.store.reload()?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::builtin;
    use tempfile::TempDir;

    fn service(dir: &TempDir) -> ConfigService {
        let store = YamlStore::new(dir.path().join("config.yml"));
        ConfigService::open(store, builtin::registry().unwrap()).unwrap()
    }

    fn segs(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn sanitize_then_get_deep_default() {
        let dir = TempDir::new().unwrap();
        let mut service = service(&dir);
        service.sanitize().unwrap();

        let value = service
            .get(
                "main",
                "config2",
                &segs(&["another-object", "some-element", "sub-element"]),
            )
            .unwrap();
        assert_eq!(value, &Value::String("Hello".into()));
    }

    #[test]
    fn set_replaces_a_list_wholesale() {
        let dir = TempDir::new().unwrap();
        let mut service = service(&dir);
        service.sanitize().unwrap();

        let updated = service
            .set(
                "main",
                "config2",
                &segs(&["a-list"]),
                &segs(&["banana", "kiwi"]),
            )
            .unwrap();
        assert_eq!(updated, Value::List(vec!["banana".into(), "kiwi".into()]));

        let stored = service.get("main", "config2", &segs(&["a-list"])).unwrap();
        assert_eq!(stored, &Value::List(vec!["banana".into(), "kiwi".into()]));
    }

    #[test]
    fn invalid_int_leaves_the_tree_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut service = service(&dir);
        service.sanitize().unwrap();

        let before = service.tree().clone();
        let err = service
            .set(
                "main",
                "config2",
                &segs(&["lets-try-int"]),
                &segs(&["notanumber"]),
            )
            .unwrap_err();
        assert!(err.to_string().contains("notanumber"));
        assert_eq!(service.tree(), &before);
    }

    #[test]
    fn set_persists_across_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let mut service = service(&dir);
            service.sanitize().unwrap();
            service
                .set("main", "prefix", &[], &segs(&["[MMO]"]))
                .unwrap();
        }
        let reopened = service(&dir);
        assert_eq!(
            reopened.get("main", "prefix", &[]).unwrap(),
            &Value::String("[MMO]".into())
        );
    }

    #[test]
    fn unknown_addresses_are_rejected() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        assert_eq!(
            service.get("bogus", "prefix", &[]).unwrap_err(),
            ConfigError::UnknownCategory { name: "bogus".into() }
        );
        assert_eq!(
            service.get("main", "bogus", &[]).unwrap_err(),
            ConfigError::UnknownProperty {
                category: "main".into(),
                name: "bogus".into(),
            }
        );
    }

    #[test]
    fn get_without_sanitize_reports_missing_value() {
        let dir = TempDir::new().unwrap();
        let service = service(&dir);
        assert_eq!(
            service.get("main", "prefix", &[]).unwrap_err(),
            ConfigError::MissingValue { name: "prefix".into() }
        );
    }

    #[test]
    fn set_through_unknown_schema_path_fails() {
        let dir = TempDir::new().unwrap();
        let mut service = service(&dir);
        service.sanitize().unwrap();

        let err = service
            .set("main", "config2", &segs(&["bogus-field"]), &segs(&["x"]))
            .unwrap_err();
        assert!(err.to_string().contains("bogus-field"));
    }
}
