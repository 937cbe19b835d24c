//! # sqlweave
//!
//! A dialect-aware SQL statement model and renderer.
//!
//! ## Features
//!
//! - **Structured queries**: `SELECT`, `INSERT`, `REPLACE`, `UPDATE` and `DELETE` built from a [`Query`] value
//! - **Positional bindings only**: every rendered value is a `?` placeholder with a matching [`Value`]
//! - **Nested conditions**: `AND`/`OR` groups via [`Parentheses`], shared by WHERE, HAVING and JOIN ON
//! - **Pluggable dialects**: quoting and timestamp formatting behind the [`Dialect`] trait
//! - **Explicit registry**: no global state, the [`Sql`] façade owns its [`DialectRegistry`]
//!
//! ## Example
//!
//! ```ignore
//! use sqlweave::{Query, Sql};
//!
//! let mut query = Query::from_table("users");
//! query
//!     .select(["users.id", "users.name"])
//!     .join("profiles")
//!     .left()
//!     .on("profiles.user_id", "users.id")
//!     .done()
//!     .where_eq("users.status", "active")
//!     .where_op("users.age", ">", 18)
//!     .order_by_desc("users.created_at")
//!     .limit(10);
//!
//! let rendered = Sql::new().render_query(&query, Some("mysql"))?;
//! // SELECT `users`.`id`, `users`.`name`
//! // FROM `users`
//! // LEFT JOIN `profiles`
//! // ON `profiles`.`user_id` = `users`.`id`
//! // WHERE `users`.`status` = ?
//! // AND `users`.`age` > ?
//! // ORDER BY `users`.`created_at` DESC
//! // LIMIT 10
//! assert_eq!(rendered.bindings().len(), 2);
//! ```
//!
//! [`sql::render_debug`] interpolates bindings for log output. Its result is
//! never safe to execute.

pub mod config;
pub mod dialect;
pub mod error;
pub mod expression;
pub mod query;
pub mod registry;
pub mod render;
pub mod sql;
pub mod value;

pub use config::SqlConfig;
pub use dialect::{Dialect, MysqlDialect, QuoteKind, SqliteDialect};
pub use error::{SqlError, SqlResult};
pub use expression::SqlExpression;
pub use query::{
    Boolean, Column, Direction, JoinClause, JoinDirection, JoinRef, Key, Limit, Member, Operand,
    Operation, OrderItem, Parentheses, Predicate, Query, Unification,
};
pub use registry::{DEFAULT_DIALECT, DialectRegistry};
pub use render::QueryRenderer;
pub use sql::{DebugBindings, Sql, render_debug, wildcard_to_like};
pub use value::Value;
