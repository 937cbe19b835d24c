//! Database-engine quoting and formatting policy.
//!
//! The renderer never hard-codes quoting rules; it asks a [`Dialect`]. Two
//! built-in dialects are provided ([`SqliteDialect`], [`MysqlDialect`]) and
//! callers can implement the trait for other engines.

use crate::expression::SqlExpression;
use std::fmt::Debug;

/// Default timestamp format (chrono strftime syntax) used by the built-in dialects
/// and by the renderer when no dialect is set.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What is being quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    /// An identifier (table, column, alias). Dotted names are quoted per segment.
    Name,
    /// A string literal.
    String,
}

/// Quoting and date-format policy for one database engine.
pub trait Dialect: Debug + Send + Sync {
    /// Registry name of this dialect (e.g. `"sqlite"`).
    fn name(&self) -> &str;

    /// Quote an identifier or a string literal.
    fn quote(&self, value: &str, kind: QuoteKind) -> String;

    /// Hook for rewriting raw expressions before they are embedded. Identity by default.
    fn expression(&self, expr: &SqlExpression) -> SqlExpression {
        expr.clone()
    }

    /// Canonical timestamp format (chrono strftime syntax) for bound timestamps.
    fn timestamp_format(&self) -> &str {
        DEFAULT_TIMESTAMP_FORMAT
    }
}

/// Quote a possibly dotted identifier segment by segment with `quote` as the
/// delimiter, doubling embedded delimiters. A `*` segment stays bare.
pub fn quote_identifier(name: &str, quote: char) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for (i, part) in name.split('.').enumerate() {
        if i > 0 {
            out.push('.');
        }
        if part == "*" {
            out.push('*');
            continue;
        }
        out.push(quote);
        for ch in part.chars() {
            if ch == quote {
                out.push(quote);
            }
            out.push(ch);
        }
        out.push(quote);
    }
    out
}

/// Wrap a string literal in single quotes, doubling embedded single quotes.
pub fn quote_string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push('\'');
        }
        out.push(ch);
    }
    out.push('\'');
    out
}

/// SQLite: `"identifiers"`, `'strings'`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqliteDialect;

impl Dialect for SqliteDialect {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn quote(&self, value: &str, kind: QuoteKind) -> String {
        match kind {
            QuoteKind::Name => quote_identifier(value, '"'),
            QuoteKind::String => quote_string_literal(value),
        }
    }
}

/// MySQL: `` `identifiers` ``, `'strings'` with backslash escapes.
#[derive(Debug, Clone, Copy, Default)]
pub struct MysqlDialect;

impl Dialect for MysqlDialect {
    fn name(&self) -> &str {
        "mysql"
    }

    fn quote(&self, value: &str, kind: QuoteKind) -> String {
        match kind {
            QuoteKind::Name => quote_identifier(value, '`'),
            QuoteKind::String => {
                let mut out = String::with_capacity(value.len() + 2);
                out.push('\'');
                for ch in value.chars() {
                    match ch {
                        '\\' => out.push_str("\\\\"),
                        '\'' => out.push_str("\\'"),
                        '\0' => out.push_str("\\0"),
                        '\n' => out.push_str("\\n"),
                        '\r' => out.push_str("\\r"),
                        c => out.push(c),
                    }
                }
                out.push('\'');
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sqlite_quotes_dotted_names_per_segment() {
        let d = SqliteDialect;
        assert_eq!(d.quote("posts.user_id", QuoteKind::Name), r#""posts"."user_id""#);
        assert_eq!(d.quote("users.*", QuoteKind::Name), r#""users".*"#);
        assert_eq!(d.quote(r#"we"ird"#, QuoteKind::Name), r#""we""ird""#);
    }

    #[test]
    fn sqlite_doubles_single_quotes() {
        assert_eq!(SqliteDialect.quote("O'Brien", QuoteKind::String), "'O''Brien'");
    }

    #[test]
    fn mysql_uses_backticks_and_backslashes() {
        let d = MysqlDialect;
        assert_eq!(d.quote("users.id", QuoteKind::Name), "`users`.`id`");
        assert_eq!(d.quote("a`b", QuoteKind::Name), "`a``b`");
        assert_eq!(d.quote(r"it's \ ok", QuoteKind::String), r"'it\'s \\ ok'");
    }

    #[test]
    fn default_expression_hook_is_identity() {
        let expr = SqlExpression::with_bindings("LOWER(?)", ["X"]);
        assert_eq!(SqliteDialect.expression(&expr), expr);
        assert_eq!(MysqlDialect.timestamp_format(), DEFAULT_TIMESTAMP_FORMAT);
    }
}
