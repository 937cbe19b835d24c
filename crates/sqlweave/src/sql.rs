//! The `Sql` façade: dialect resolution, debug interpolation and LIKE helpers.

use crate::config::SqlConfig;
use crate::dialect::DEFAULT_TIMESTAMP_FORMAT;
use crate::error::SqlResult;
use crate::expression::SqlExpression;
use crate::query::Query;
use crate::registry::DialectRegistry;
use crate::render::QueryRenderer;
use crate::value::Value;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::sync::OnceLock;

/// Wildcard character understood by [`wildcard_to_like`] callers by convention.
pub const DEFAULT_WILDCARD: char = '*';

/// Entry point tying a [`DialectRegistry`] to the renderer.
#[derive(Debug, Clone)]
pub struct Sql {
    registry: DialectRegistry,
    debug_quote_char: char,
}

impl Default for Sql {
    fn default() -> Self {
        Self::new()
    }
}

impl Sql {
    /// Façade over the built-in dialects, defaulting to `sqlite`.
    pub fn new() -> Self {
        Self::with_registry(DialectRegistry::new())
    }

    pub fn with_registry(registry: DialectRegistry) -> Self {
        Self {
            registry,
            debug_quote_char: '\'',
        }
    }

    /// Build a façade from configuration.
    ///
    /// Aliases are registered against the dialect their target resolves to,
    /// then the default is applied. Either step fails with
    /// [`SqlError::UnknownDialect`](crate::SqlError::UnknownDialect) when a name does not resolve.
    pub fn from_config(config: &SqlConfig) -> SqlResult<Self> {
        config.validate()?;
        let mut registry = DialectRegistry::new();
        for (alias, target) in &config.aliases {
            let dialect = registry.resolve(target)?;
            registry.register(alias.clone(), dialect);
        }
        registry.set_default(config.default_dialect.clone())?;
        Ok(Self {
            registry,
            debug_quote_char: config.debug_quote_char,
        })
    }

    pub fn registry(&self) -> &DialectRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut DialectRegistry {
        &mut self.registry
    }

    pub fn debug_quote_char(&self) -> char {
        self.debug_quote_char
    }

    pub fn set_debug_quote_char(&mut self, quote_char: char) -> &mut Self {
        self.debug_quote_char = quote_char;
        self
    }

    /// Renderer for `dialect`, or for the registry default when `None`.
    pub fn renderer(&self, dialect: Option<&str>) -> SqlResult<QueryRenderer> {
        let dialect = match dialect {
            Some(name) => self.registry.resolve(name)?,
            None => self.registry.default_dialect()?,
        };
        Ok(QueryRenderer::new(dialect))
    }

    /// Render `query` for execution.
    ///
    /// The dialect is `dialect` when given, else the one named on the query,
    /// else the registry default.
    pub fn render_query(&self, query: &Query, dialect: Option<&str>) -> SqlResult<SqlExpression> {
        self.renderer(dialect.or_else(|| query.dialect_name()))?.render(query)
    }

    /// Render `query` and interpolate its bindings for display, quoting text
    /// with the configured [`debug_quote_char`](Self::debug_quote_char).
    ///
    /// The result is for logs only. Never execute it.
    pub fn render_debug_query(&self, query: &Query) -> SqlResult<String> {
        let (sql, bindings) = self.render_query(query, None)?.into_parts();
        Ok(render_debug(
            &sql,
            &DebugBindings::Positional(bindings),
            self.debug_quote_char,
        ))
    }
}

/// Bindings for [`render_debug`].
#[derive(Debug, Clone, PartialEq)]
pub enum DebugBindings {
    /// Consumed left to right by `?` placeholders.
    Positional(Vec<Value>),
    /// Looked up by `:name` placeholders.
    Named(BTreeMap<String, Value>),
}

impl From<Vec<Value>> for DebugBindings {
    fn from(values: Vec<Value>) -> Self {
        Self::Positional(values)
    }
}

impl From<&[Value]> for DebugBindings {
    fn from(values: &[Value]) -> Self {
        Self::Positional(values.to_vec())
    }
}

impl From<BTreeMap<String, Value>> for DebugBindings {
    fn from(values: BTreeMap<String, Value>) -> Self {
        Self::Named(values)
    }
}

fn placeholder_re() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"\?|:([A-Za-z_][A-Za-z0-9_]*)").expect("invalid built-in placeholder regex")
    })
}

/// Naively interpolate `bindings` into `text` for human-readable output.
///
/// `?` takes the next positional binding and `:name` the named one.
/// Placeholders without a matching binding are left as written. Text values
/// are wrapped in `quote_char` with embedded occurrences doubled; nothing else
/// is escaped, so the result must never be executed.
pub fn render_debug(text: &str, bindings: &DebugBindings, quote_char: char) -> String {
    let mut position = 0usize;
    placeholder_re()
        .replace_all(text, |caps: &Captures<'_>| {
            let value = match (bindings, caps.get(1)) {
                (DebugBindings::Positional(values), None) => {
                    let value = values.get(position);
                    position += 1;
                    value
                }
                (DebugBindings::Named(values), Some(name)) => values.get(name.as_str()),
                _ => None,
            };
            match value {
                Some(value) => debug_literal(value, quote_char),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

fn debug_literal(value: &Value, quote_char: char) -> String {
    let quoted = |text: &str| {
        let doubled: String = [quote_char, quote_char].iter().collect();
        format!(
            "{quote_char}{}{quote_char}",
            text.replace(quote_char, &doubled)
        )
    };
    match value {
        Value::Null => "NULL".to_string(),
        Value::Bool(true) => "TRUE".to_string(),
        Value::Bool(false) => "FALSE".to_string(),
        Value::Int(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::Text(v) => quoted(v),
        Value::Bytes(bytes) => {
            let mut hex = String::with_capacity(bytes.len() * 2 + 3);
            hex.push_str("X'");
            for byte in bytes {
                let _ = write!(hex, "{byte:02X}");
            }
            hex.push('\'');
            hex
        }
        Value::Timestamp(ts) => quoted(&ts.format(DEFAULT_TIMESTAMP_FORMAT).to_string()),
        Value::Uuid(id) => quoted(&id.to_string()),
        Value::Json(doc) => quoted(&doc.to_string()),
    }
}

/// Translate a glob-style pattern into LIKE syntax.
///
/// Every `wildcard` becomes `%`. Literal `%`, `_` and `\` are escaped with a
/// backslash. SQLite needs an explicit `ESCAPE '\'` clause to honor them.
pub fn wildcard_to_like(pattern: &str, wildcard: char) -> String {
    let mut out = String::with_capacity(pattern.len() + 4);
    for c in pattern.chars() {
        if c == wildcard {
            out.push('%');
        } else if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
            out.push(c);
        } else {
            out.push(c);
        }
    }
    out
}
