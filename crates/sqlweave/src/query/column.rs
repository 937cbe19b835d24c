//! Column references, operands and the small enums shared by the builders.

use crate::error::SqlError;
use crate::expression::SqlExpression;
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// A column reference or a raw expression.
///
/// Used for predicate left sides, GROUP BY and ORDER BY items.
#[derive(Debug, Clone, PartialEq)]
pub enum Key {
    Name(String),
    Expression(SqlExpression),
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl From<SqlExpression> for Key {
    fn from(expr: SqlExpression) -> Self {
        Key::Expression(expr)
    }
}

/// One item of a SELECT column list.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Quoted as an identifier (`*` stays bare).
    Name(String),
    /// `name AS alias`
    Aliased { name: String, alias: String },
    /// Embedded through the dialect's expression hook.
    Expression(SqlExpression),
}

impl Column {
    /// Create an aliased column.
    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        Column::Aliased {
            name: name.into(),
            alias: alias.into(),
        }
    }

    pub(crate) fn is_star(&self) -> bool {
        matches!(self, Column::Name(n) if n == "*")
    }
}

impl From<&str> for Column {
    fn from(name: &str) -> Self {
        Column::Name(name.to_string())
    }
}

impl From<String> for Column {
    fn from(name: String) -> Self {
        Column::Name(name)
    }
}

impl From<SqlExpression> for Column {
    fn from(expr: SqlExpression) -> Self {
        Column::Expression(expr)
    }
}

/// Right side of a predicate, or a value of an INSERT/UPDATE payload.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Value(Value),
    /// Element list for IN / NOT IN.
    List(Vec<Value>),
    Expression(SqlExpression),
}

impl Operand {
    /// Check if this operand is a NULL value.
    pub fn is_null(&self) -> bool {
        matches!(self, Operand::Value(Value::Null))
    }
}

macro_rules! impl_operand_from_value {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Operand {
                fn from(v: $ty) -> Self {
                    Operand::Value(Value::from(v))
                }
            }
        )*
    };
}

impl_operand_from_value!(
    i8, i16, i32, i64, u8, u16, u32, bool, f32, f64, &str, String, &String,
    chrono::NaiveDateTime, chrono::NaiveDate, chrono::DateTime<chrono::Utc>,
    uuid::Uuid, serde_json::Value
);

impl From<Value> for Operand {
    fn from(v: Value) -> Self {
        Operand::Value(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Operand {
    fn from(v: Option<T>) -> Self {
        Operand::Value(v.into())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Operand {
    fn from(values: Vec<T>) -> Self {
        Operand::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Operand {
    fn from(values: [T; N]) -> Self {
        Operand::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<SqlExpression> for Operand {
    fn from(expr: SqlExpression) -> Self {
        Operand::Expression(expr)
    }
}

/// ORDER BY direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// Statement kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
    Replace,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Select => "SELECT",
            Operation::Insert => "INSERT",
            Operation::Update => "UPDATE",
            Operation::Delete => "DELETE",
            Operation::Replace => "REPLACE",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = SqlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "SELECT" => Ok(Operation::Select),
            "INSERT" => Ok(Operation::Insert),
            "UPDATE" => Ok(Operation::Update),
            "DELETE" => Ok(Operation::Delete),
            "REPLACE" => Ok(Operation::Replace),
            other => Err(SqlError::invalid(format!("unsupported operation '{other}'"))),
        }
    }
}

/// A LIMIT/OFFSET bound: a count or raw SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Limit {
    Count(i64),
    Raw(String),
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Limit::Count(n) => write!(f, "{n}"),
            Limit::Raw(s) => f.write_str(s),
        }
    }
}

macro_rules! impl_limit_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Limit {
                fn from(n: $ty) -> Self {
                    Limit::Count(i64::from(n))
                }
            }
        )*
    };
}

impl_limit_from_int!(i32, i64, u8, u16, u32);

impl From<usize> for Limit {
    fn from(n: usize) -> Self {
        Limit::Count(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<&str> for Limit {
    fn from(raw: &str) -> Self {
        Limit::Raw(raw.to_string())
    }
}

impl From<String> for Limit {
    fn from(raw: String) -> Self {
        Limit::Raw(raw)
    }
}
