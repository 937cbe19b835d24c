//! Façade configuration, loadable from TOML.
//!
//! ```toml
//! default_dialect = "mysql"
//! debug_quote_char = "'"
//!
//! [aliases]
//! mariadb = "mysql"
//! ```

use crate::error::{SqlError, SqlResult};
use crate::registry::DEFAULT_DIALECT;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SqlConfig {
    #[serde(default = "default_dialect")]
    pub default_dialect: String,

    /// Quote character used by the debug renderer for string values.
    #[serde(default = "default_quote_char")]
    pub debug_quote_char: char,

    /// Extra names resolving to already registered dialects.
    #[serde(default)]
    pub aliases: BTreeMap<String, String>,
}

fn default_dialect() -> String {
    DEFAULT_DIALECT.to_string()
}

fn default_quote_char() -> char {
    '\''
}

impl Default for SqlConfig {
    fn default() -> Self {
        Self {
            default_dialect: default_dialect(),
            debug_quote_char: default_quote_char(),
            aliases: BTreeMap::new(),
        }
    }
}

impl SqlConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(raw: &str) -> SqlResult<Self> {
        let config: SqlConfig = toml::from_str(raw)
            .map_err(|e| SqlError::config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> SqlResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            SqlError::config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        let config = Self::from_toml_str(&raw)?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlweave.config",
            path = %path.display(),
            default_dialect = %config.default_dialect,
            "loaded config"
        );
        Ok(config)
    }

    pub fn validate(&self) -> SqlResult<()> {
        if self.default_dialect.trim().is_empty() {
            return Err(SqlError::config("default_dialect cannot be empty"));
        }
        for (alias, target) in &self.aliases {
            if alias.trim().is_empty() || target.trim().is_empty() {
                return Err(SqlError::config(format!(
                    "invalid alias '{alias}' -> '{target}'"
                )));
            }
            if alias == target {
                return Err(SqlError::config(format!("alias '{alias}' points at itself")));
            }
        }
        Ok(())
    }
}
