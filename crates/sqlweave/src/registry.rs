//! Explicit name → dialect registry.
//!
//! The `sqlite` and `mysql` built-ins are always resolvable. User registrations
//! shadow them, and removing a registration exposes the built-in again.

use crate::dialect::{Dialect, MysqlDialect, SqliteDialect};
use crate::error::{SqlError, SqlResult};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Name of the dialect a fresh registry defaults to.
pub const DEFAULT_DIALECT: &str = "sqlite";

#[derive(Debug, Clone)]
pub struct DialectRegistry {
    builtins: BTreeMap<String, Arc<dyn Dialect>>,
    registered: BTreeMap<String, Arc<dyn Dialect>>,
    default_name: String,
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl DialectRegistry {
    /// Create a registry holding only the built-ins, defaulting to [`DEFAULT_DIALECT`].
    pub fn new() -> Self {
        let mut builtins: BTreeMap<String, Arc<dyn Dialect>> = BTreeMap::new();
        builtins.insert("sqlite".to_string(), Arc::new(SqliteDialect));
        builtins.insert("mysql".to_string(), Arc::new(MysqlDialect));
        Self {
            builtins,
            registered: BTreeMap::new(),
            default_name: DEFAULT_DIALECT.to_string(),
        }
    }

    /// Register (or override) a dialect under `name`.
    pub fn register(&mut self, name: impl Into<String>, dialect: Arc<dyn Dialect>) -> &mut Self {
        let name = name.into();
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlweave.registry",
            name = %name,
            dialect = dialect.name(),
            shadows_builtin = self.builtins.contains_key(&name),
            "registered dialect"
        );
        self.registered.insert(name, dialect);
        self
    }

    /// Remove a user registration. Built-ins cannot be removed.
    ///
    /// When the default no longer resolves afterwards it falls back to
    /// [`DEFAULT_DIALECT`].
    pub fn unregister(&mut self, name: &str) -> Option<Arc<dyn Dialect>> {
        let removed = self.registered.remove(name)?;
        if !self.contains(&self.default_name) {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: "sqlweave.registry",
                name = %name,
                fallback = DEFAULT_DIALECT,
                "default dialect unregistered"
            );
            self.default_name = DEFAULT_DIALECT.to_string();
        }
        Some(removed)
    }

    /// Resolve `name`, user registrations first.
    pub fn get(&self, name: &str) -> Option<Arc<dyn Dialect>> {
        self.registered
            .get(name)
            .or_else(|| self.builtins.get(name))
            .cloned()
    }

    /// Resolve `name` or fail with [`SqlError::UnknownDialect`].
    pub fn resolve(&self, name: &str) -> SqlResult<Arc<dyn Dialect>> {
        self.get(name).ok_or_else(|| SqlError::unknown_dialect(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registered.contains_key(name) || self.builtins.contains_key(name)
    }

    /// All resolvable names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .builtins
            .keys()
            .chain(self.registered.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Change the default dialect. The name must already resolve.
    pub fn set_default(&mut self, name: impl Into<String>) -> SqlResult<&mut Self> {
        let name = name.into();
        if !self.contains(&name) {
            return Err(SqlError::unknown_dialect(name));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "sqlweave.registry", name = %name, "default dialect changed");
        self.default_name = name;
        Ok(self)
    }

    /// The current default dialect.
    pub fn default_dialect(&self) -> SqlResult<Arc<dyn Dialect>> {
        self.resolve(&self.default_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::QuoteKind;

    #[derive(Debug)]
    struct BracketDialect;

    impl Dialect for BracketDialect {
        fn name(&self) -> &str {
            "bracket"
        }

        fn quote(&self, value: &str, kind: QuoteKind) -> String {
            match kind {
                QuoteKind::Name => format!("[{value}]"),
                QuoteKind::String => format!("'{value}'"),
            }
        }
    }

    #[test]
    fn builtins_are_always_available() {
        let registry = DialectRegistry::new();
        assert_eq!(registry.resolve("sqlite").unwrap().name(), "sqlite");
        assert_eq!(registry.resolve("mysql").unwrap().name(), "mysql");
        assert_eq!(registry.default_dialect().unwrap().name(), "sqlite");
    }

    #[test]
    fn registration_shadows_builtin_until_removed() {
        let mut registry = DialectRegistry::new();
        registry.register("mysql", Arc::new(BracketDialect));
        assert_eq!(registry.resolve("mysql").unwrap().name(), "bracket");

        assert!(registry.unregister("mysql").is_some());
        assert_eq!(registry.resolve("mysql").unwrap().name(), "mysql");
        assert!(registry.unregister("mysql").is_none());
    }

    #[test]
    fn unknown_names_are_rejected() {
        let mut registry = DialectRegistry::new();
        assert!(registry.resolve("oracle").unwrap_err().is_unknown_dialect());
        assert!(registry.set_default("oracle").is_err());
        assert_eq!(registry.default_name(), "sqlite");

        registry.register("mssql", Arc::new(BracketDialect));
        registry.set_default("mssql").unwrap();
        assert_eq!(registry.default_dialect().unwrap().name(), "bracket");
        assert_eq!(registry.names(), vec!["mssql", "mysql", "sqlite"]);
    }

    #[test]
    fn unregistering_the_default_falls_back() {
        let mut registry = DialectRegistry::new();
        registry.register("mssql", Arc::new(BracketDialect));
        registry.set_default("mssql").unwrap();

        assert!(registry.unregister("mssql").is_some());
        assert_eq!(registry.default_name(), DEFAULT_DIALECT);
        assert_eq!(registry.default_dialect().unwrap().name(), "sqlite");
    }

    #[test]
    fn unregistering_a_shadowed_default_keeps_it() {
        let mut registry = DialectRegistry::new();
        registry.register("mysql", Arc::new(BracketDialect));
        registry.set_default("mysql").unwrap();

        registry.unregister("mysql");
        assert_eq!(registry.default_name(), "mysql");
        assert_eq!(registry.default_dialect().unwrap().name(), "mysql");
    }
}
