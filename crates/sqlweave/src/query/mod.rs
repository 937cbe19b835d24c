//! Dialect-agnostic statement model.
//!
//! [`Query`] is built incrementally through chained `&mut self` calls and read
//! (never mutated) by the [`QueryRenderer`](crate::QueryRenderer).
//!
//! # Usage
//!
//! ```ignore
//! use sqlweave::{Boolean, Query};
//!
//! // SELECT
//! let mut q = Query::from_table("users");
//! q.select(["id", "name"])
//!     .where_op("age", ">", 18)
//!     .where_group_with(Boolean::Or, |g| {
//!         g.where_eq("role", "admin").where_eq("role", "owner");
//!     });
//! q.order_by("name").limit(10);
//!
//! // INSERT (inferred: values, no conditions)
//! let mut q = Query::from_table("users");
//! q.values("name", "alice").values("age", 31);
//!
//! // UPDATE (inferred: values and conditions)
//! let mut q = Query::from_table("users");
//! q.values("status", "inactive").where_eq("id", 7);
//!
//! // DELETE (never inferred)
//! let mut q = Query::from_table("users");
//! q.delete().where_eq("id", 7);
//! ```

mod column;
mod join;
mod parentheses;
mod predicate;

pub use column::{Column, Direction, Key, Limit, Operand, Operation};
pub use join::{JoinClause, JoinDirection, JoinRef, Unification};
pub use parentheses::{Boolean, Member, Parentheses};
pub use predicate::Predicate;

use crate::expression::SqlExpression;
use std::collections::BTreeMap;

/// Attachment purpose used by [`Query::paginate`] for the count query.
pub const COUNT_ATTACHMENT: &str = "count";

/// Derived-table alias used by [`Query::count_query`] when it has to wrap the query.
pub const COUNT_SUBQUERY_ALIAS: &str = "t";

/// One ORDER BY item. Expressions carry no direction.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub key: Key,
    pub direction: Option<Direction>,
}

/// A SQL statement under construction.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub(crate) table: String,
    pub(crate) columns: Vec<Column>,
    pub(crate) operation: Option<Operation>,
    pub(crate) conditions: Parentheses,
    pub(crate) havings: Parentheses,
    pub(crate) joins: Vec<JoinClause>,
    pub(crate) group_bys: Vec<Key>,
    pub(crate) order_bys: Vec<OrderItem>,
    pub(crate) limit: Option<Limit>,
    pub(crate) offset: Option<Limit>,
    pub(crate) distinct: bool,
    pub(crate) values: Vec<(String, Operand)>,
    pub(crate) attachments: BTreeMap<String, Query>,
    pub(crate) dialect: Option<String>,
    /// Derived table selected from; `table` is then its alias.
    pub(crate) subquery: Option<Box<Query>>,
}

impl Query {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a query on `table`.
    pub fn from_table(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    /// Create a query selecting from `inner` as a derived table named `alias`.
    pub fn from_subquery(inner: Query, alias: impl Into<String>) -> Self {
        Self {
            table: alias.into(),
            subquery: Some(Box::new(inner)),
            ..Self::default()
        }
    }

    // ==================== Accessors ====================

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn subquery(&self) -> Option<&Query> {
        self.subquery.as_deref()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn conditions(&self) -> &Parentheses {
        &self.conditions
    }

    pub fn conditions_mut(&mut self) -> &mut Parentheses {
        &mut self.conditions
    }

    pub fn havings(&self) -> &Parentheses {
        &self.havings
    }

    pub fn havings_mut(&mut self) -> &mut Parentheses {
        &mut self.havings
    }

    pub fn joins(&self) -> &[JoinClause] {
        &self.joins
    }

    /// Find a join by its identity (alias if present, else table).
    pub fn find_join(&self, identity: &str) -> Option<&JoinClause> {
        self.joins.iter().find(|j| j.identity() == identity)
    }

    pub fn group_bys(&self) -> &[Key] {
        &self.group_bys
    }

    pub fn order_bys(&self) -> &[OrderItem] {
        &self.order_bys
    }

    pub fn limit_value(&self) -> Option<&Limit> {
        self.limit.as_ref()
    }

    pub fn offset_value(&self) -> Option<&Limit> {
        self.offset.as_ref()
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    pub fn payload(&self) -> &[(String, Operand)] {
        &self.values
    }

    /// Dialect name the façade should use when none is given explicitly.
    pub fn dialect_name(&self) -> Option<&str> {
        self.dialect.as_deref()
    }

    /// The statement kind: the explicit operation if set, otherwise inferred.
    ///
    /// No values ⇒ SELECT; values and conditions ⇒ UPDATE; values only ⇒ INSERT.
    /// Conditions made only of empty groups count as none. DELETE is never inferred.
    pub fn operation(&self) -> Operation {
        if let Some(op) = self.operation {
            return op;
        }
        match (self.values.is_empty(), self.conditions.has_renderable_members()) {
            (true, _) => Operation::Select,
            (false, true) => Operation::Update,
            (false, false) => Operation::Insert,
        }
    }

    // ==================== Operation ====================

    pub fn set_operation(&mut self, operation: Operation) -> &mut Self {
        self.operation = Some(operation);
        self
    }

    /// Make this a DELETE statement.
    pub fn delete(&mut self) -> &mut Self {
        self.set_operation(Operation::Delete)
    }

    /// Make this a REPLACE statement.
    pub fn replace(&mut self) -> &mut Self {
        self.set_operation(Operation::Replace)
    }

    /// Name the dialect the façade should render this query with.
    pub fn dialect(&mut self, name: impl Into<String>) -> &mut Self {
        self.dialect = Some(name.into());
        self
    }

    // ==================== SELECT columns / FROM ====================

    /// Append columns. An empty iterator resets the list to `*`.
    pub fn select<I, C>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        let before = self.columns.len();
        self.columns.extend(columns.into_iter().map(Into::into));
        if self.columns.len() == before {
            self.columns.clear();
        }
        self
    }

    /// Reset the column list to `*`.
    pub fn select_all(&mut self) -> &mut Self {
        self.columns.clear();
        self
    }

    /// Append `name AS alias`.
    pub fn select_as(&mut self, name: impl Into<String>, alias: impl Into<String>) -> &mut Self {
        self.columns.push(Column::aliased(name, alias));
        self
    }

    /// Append a raw column expression.
    pub fn select_expr(&mut self, expr: SqlExpression) -> &mut Self {
        self.columns.push(Column::Expression(expr));
        self
    }

    pub fn from(&mut self, table: impl Into<String>) -> &mut Self {
        self.table = table.into();
        self.subquery = None;
        self
    }

    pub fn distinct(&mut self, distinct: bool) -> &mut Self {
        self.distinct = distinct;
        self
    }

    // ==================== JOIN ====================

    /// Append a new join on `table` and return a handle to it.
    pub fn join(&mut self, table: impl Into<String>) -> JoinRef<'_> {
        self.join_clause(JoinClause::new(table))
    }

    /// Append an already-built join as-is and return a handle to it.
    pub fn join_clause(&mut self, clause: JoinClause) -> JoinRef<'_> {
        self.joins.push(clause);
        let index = self.joins.len() - 1;
        JoinRef::new(self, index)
    }

    // ==================== WHERE ====================

    pub fn where_expr(&mut self, member: impl Into<Member>) -> &mut Self {
        self.conditions.where_expr(member);
        self
    }

    pub fn where_fn(&mut self, f: impl FnOnce(&mut Parentheses)) -> &mut Self {
        self.conditions.where_fn(f);
        self
    }

    pub fn where_eq(&mut self, left: impl Into<Key>, value: impl Into<Operand>) -> &mut Self {
        self.conditions.where_eq(left, value);
        self
    }

    pub fn where_op(
        &mut self,
        left: impl Into<Key>,
        operator: impl Into<String>,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.conditions.where_op(left, operator, value);
        self
    }

    pub fn where_column(
        &mut self,
        left: impl Into<Key>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> &mut Self {
        self.conditions.where_column(left, operator, right);
        self
    }

    pub fn where_group(&mut self, boolean: Boolean) -> &mut Parentheses {
        self.conditions.group(boolean)
    }

    pub fn where_group_with(
        &mut self,
        boolean: Boolean,
        f: impl FnOnce(&mut Parentheses),
    ) -> &mut Parentheses {
        self.conditions.group_with(boolean, f)
    }

    // ==================== HAVING ====================

    pub fn having_expr(&mut self, member: impl Into<Member>) -> &mut Self {
        self.havings.where_expr(member);
        self
    }

    pub fn having_fn(&mut self, f: impl FnOnce(&mut Parentheses)) -> &mut Self {
        self.havings.where_fn(f);
        self
    }

    pub fn having_eq(&mut self, left: impl Into<Key>, value: impl Into<Operand>) -> &mut Self {
        self.havings.where_eq(left, value);
        self
    }

    pub fn having_op(
        &mut self,
        left: impl Into<Key>,
        operator: impl Into<String>,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.havings.where_op(left, operator, value);
        self
    }

    pub fn having_group(&mut self, boolean: Boolean) -> &mut Parentheses {
        self.havings.group(boolean)
    }

    pub fn having_group_with(
        &mut self,
        boolean: Boolean,
        f: impl FnOnce(&mut Parentheses),
    ) -> &mut Parentheses {
        self.havings.group_with(boolean, f)
    }

    // ==================== GROUP BY / ORDER BY ====================

    pub fn group_by<I, K>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.group_bys.extend(keys.into_iter().map(Into::into));
        self
    }

    /// `ORDER BY key ASC`
    pub fn order_by(&mut self, key: impl Into<Key>) -> &mut Self {
        self.order_by_dir(key, Direction::Asc)
    }

    /// `ORDER BY key DESC`
    pub fn order_by_desc(&mut self, key: impl Into<Key>) -> &mut Self {
        self.order_by_dir(key, Direction::Desc)
    }

    /// Order by `key` in `direction`. Ordering by a column already present
    /// replaces its direction in place.
    pub fn order_by_dir(&mut self, key: impl Into<Key>, direction: Direction) -> &mut Self {
        let key = key.into();
        if let Key::Name(name) = &key {
            let existing = self
                .order_bys
                .iter_mut()
                .find(|item| matches!(&item.key, Key::Name(n) if n == name));
            if let Some(item) = existing {
                item.direction = Some(direction);
                return self;
            }
        }
        self.order_bys.push(OrderItem {
            key,
            direction: Some(direction),
        });
        self
    }

    /// Order by a raw expression, emitted verbatim.
    pub fn order_by_expr(&mut self, expr: SqlExpression) -> &mut Self {
        self.order_bys.push(OrderItem {
            key: Key::Expression(expr),
            direction: None,
        });
        self
    }

    /// Order by several `(column, direction)` pairs.
    pub fn order_by_many<I, K>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, Direction)>,
        K: Into<Key>,
    {
        for (key, direction) in items {
            self.order_by_dir(key, direction);
        }
        self
    }

    // ==================== LIMIT / OFFSET ====================

    pub fn limit(&mut self, limit: impl Into<Limit>) -> &mut Self {
        self.limit = Some(limit.into());
        self
    }

    pub fn limit_offset(&mut self, limit: impl Into<Limit>, offset: impl Into<Limit>) -> &mut Self {
        self.offset = Some(offset.into());
        self.limit(limit)
    }

    pub fn offset(&mut self, offset: impl Into<Limit>) -> &mut Self {
        self.offset = Some(offset.into());
        self
    }

    pub fn offset_limit(&mut self, offset: impl Into<Limit>, limit: impl Into<Limit>) -> &mut Self {
        self.limit = Some(limit.into());
        self.offset(offset)
    }

    pub fn clear_limit(&mut self) -> &mut Self {
        self.limit = None;
        self
    }

    pub fn clear_offset(&mut self) -> &mut Self {
        self.offset = None;
        self
    }

    // ==================== Values ====================

    /// Merge one `column = value` into the INSERT/UPDATE payload.
    pub fn values(&mut self, key: impl Into<String>, value: impl Into<Operand>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.values.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.values.push((key, value)),
        }
        self
    }

    /// Replace the whole payload.
    pub fn set_values<I, K, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Operand>,
    {
        self.values.clear();
        for (key, value) in values {
            self.values(key, value);
        }
        self
    }

    // ==================== Attachments ====================

    /// Store an auxiliary query under `purpose`. The renderer never reads attachments.
    pub fn attach(&mut self, purpose: impl Into<String>, query: Query) -> &mut Self {
        self.attachments.insert(purpose.into(), query);
        self
    }

    pub fn detach(&mut self, purpose: &str) -> Option<Query> {
        self.attachments.remove(purpose)
    }

    pub fn attached(&self, purpose: &str) -> Option<&Query> {
        self.attachments.get(purpose)
    }

    // ==================== Pagination ====================

    /// A `SELECT COUNT(*)` query counting the rows this query returns, without
    /// ordering, limits or attachments.
    ///
    /// DISTINCT and grouped queries are wrapped as a derived table
    /// (`SELECT COUNT(*) FROM (<query>) AS t`) so the count is of result rows.
    pub fn count_query(&self) -> Query {
        let mut inner = self.clone();
        inner.operation = Some(Operation::Select);
        inner.order_bys.clear();
        inner.limit = None;
        inner.offset = None;
        inner.values.clear();
        inner.attachments.clear();

        let count_column = Column::Expression(SqlExpression::raw("COUNT(*)"));
        if inner.distinct || !inner.group_bys.is_empty() {
            let dialect = inner.dialect.clone();
            let mut count = Query::from_subquery(inner, COUNT_SUBQUERY_ALIAS);
            count.columns = vec![count_column];
            count.operation = Some(Operation::Select);
            count.dialect = dialect;
            return count;
        }
        inner.columns = vec![count_column];
        inner
    }

    /// Limit to the 1-based `page` of `per_page` rows and attach the matching
    /// count query under [`COUNT_ATTACHMENT`].
    pub fn paginate(&mut self, page: u32, per_page: u32) -> &mut Self {
        let page = page.max(1);
        let offset = i64::from(page - 1) * i64::from(per_page);
        let count = self.count_query();
        self.attach(COUNT_ATTACHMENT, count);
        self.limit_offset(per_page, offset)
    }
}

#[cfg(test)]
mod tests;
