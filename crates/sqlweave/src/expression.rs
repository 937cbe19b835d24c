//! SQL text paired with its ordered bindings.
//!
//! [`SqlExpression`] is both the renderer's output and an escape hatch for
//! callers that want to inject a pre-rendered fragment (with its own bindings)
//! anywhere a column, value or condition is expected.
//!
//! # Example
//!
//! ```ignore
//! use sqlweave::SqlExpression;
//!
//! let expr = SqlExpression::with_bindings("COALESCE(nickname, ?)", ["anonymous"]);
//! query.select_expr(expr);
//! ```

use crate::value::Value;
use serde::Serialize;

/// Raw SQL text plus the values for its `?` placeholders, in left-to-right order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SqlExpression {
    sql: String,
    bindings: Vec<Value>,
}

impl SqlExpression {
    /// Create a pure-text expression without bindings.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            bindings: Vec::new(),
        }
    }

    /// Alias for [`SqlExpression::new`], reads better at call sites injecting raw SQL.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::new(sql)
    }

    /// Create an expression whose `?` placeholders are bound to `bindings`.
    pub fn with_bindings<I, V>(sql: impl Into<String>, bindings: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            sql: sql.into(),
            bindings: bindings.into_iter().map(Into::into).collect(),
        }
    }

    /// The SQL text.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The ordered bindings.
    pub fn bindings(&self) -> &[Value] {
        &self.bindings
    }

    /// Split into text and bindings.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.bindings)
    }

    /// Whether this expression carries bindings (i.e. has execution semantics beyond its text).
    pub fn has_bindings(&self) -> bool {
        !self.bindings.is_empty()
    }

    /// Whether the SQL text is empty.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Append raw SQL (no bindings).
    pub fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    /// Append a `?` placeholder and bind its value.
    pub fn push_bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.sql.push('?');
        self.bindings.push(value.into());
        self
    }

    /// Append another expression, text and bindings.
    pub fn append(&mut self, other: SqlExpression) -> &mut Self {
        self.sql.push_str(&other.sql);
        self.bindings.extend(other.bindings);
        self
    }

    /// Join expressions with a separator, concatenating their bindings in order.
    pub fn join(parts: impl IntoIterator<Item = SqlExpression>, separator: &str) -> Self {
        let mut out = SqlExpression::default();
        for (i, part) in parts.into_iter().enumerate() {
            if i > 0 {
                out.push(separator);
            }
            out.append(part);
        }
        out
    }

    pub(crate) fn map_bindings(self, f: impl FnMut(Value) -> Value) -> Self {
        Self {
            sql: self.sql,
            bindings: self.bindings.into_iter().map(f).collect(),
        }
    }
}

impl From<&str> for SqlExpression {
    fn from(sql: &str) -> Self {
        SqlExpression::new(sql)
    }
}

impl From<String> for SqlExpression {
    fn from(sql: String) -> Self {
        SqlExpression::new(sql)
    }
}
