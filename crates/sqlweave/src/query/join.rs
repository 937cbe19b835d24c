//! JOIN clauses and the handle used to build them in place on a [`Query`].

use crate::query::Query;
use crate::query::column::{Column, Key, Limit, Operand};
use crate::query::parentheses::{Boolean, Member, Parentheses};
use crate::query::predicate::Predicate;

/// LEFT / RIGHT / FULL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JoinDirection {
    #[default]
    None,
    Left,
    Right,
    Full,
}

impl JoinDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            JoinDirection::None => "",
            JoinDirection::Left => "LEFT",
            JoinDirection::Right => "RIGHT",
            JoinDirection::Full => "FULL",
        }
    }
}

/// INNER / OUTER / CROSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unification {
    #[default]
    None,
    Inner,
    Outer,
    Cross,
}

impl Unification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Unification::None => "",
            Unification::Inner => "INNER",
            Unification::Outer => "OUTER",
            Unification::Cross => "CROSS",
        }
    }
}

/// One JOIN specification with its own ON conditions.
///
/// ON conditions compare columns by default: every `on*` form except
/// [`JoinClause::on_value`] and [`JoinClause::on_predicate`] marks the right side
/// as a column reference.
///
/// # Example
/// ```ignore
/// let mut join = JoinClause::new("posts");
/// join.left().on("posts.user_id", "users.id");
/// // LEFT JOIN "posts"
/// // ON "posts"."user_id" = "users"."id"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    table: String,
    alias: Option<String>,
    direction: JoinDirection,
    unification: Unification,
    conditions: Parentheses,
}

impl JoinClause {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            alias: None,
            direction: JoinDirection::None,
            unification: Unification::None,
            conditions: Parentheses::new(Boolean::And),
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn alias_name(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// The name other clauses use to refer to this join: alias if present, else table.
    pub fn identity(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.table)
    }

    pub fn direction(&self) -> JoinDirection {
        self.direction
    }

    pub fn unification(&self) -> Unification {
        self.unification
    }

    pub fn conditions(&self) -> &Parentheses {
        &self.conditions
    }

    // ==================== ON conditions ====================

    /// `ON left = right`, both columns.
    pub fn on(&mut self, left: impl Into<Key>, right: impl Into<String>) -> &mut Self {
        self.on_op(left, "=", right)
    }

    /// `ON left operator right`, both columns.
    pub fn on_op(
        &mut self,
        left: impl Into<Key>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> &mut Self {
        self.conditions.where_expr(Predicate::columns(left, operator, right));
        self
    }

    /// `ON left operator ?` with the right side bound as a value.
    pub fn on_value(
        &mut self,
        left: impl Into<Key>,
        operator: impl Into<String>,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.conditions.where_expr(Predicate::new(left, operator, value));
        self
    }

    /// Append a prebuilt predicate unchanged.
    pub fn on_predicate(&mut self, predicate: Predicate) -> &mut Self {
        self.conditions.where_expr(predicate);
        self
    }

    /// Append a raw fragment or literal to the ON conditions.
    pub fn on_expr(&mut self, member: impl Into<Member>) -> &mut Self {
        self.conditions.where_expr(member);
        self
    }

    /// Append a nested ON group and return it.
    pub fn group(&mut self, boolean: Boolean) -> &mut Parentheses {
        self.conditions.group(boolean)
    }

    /// Append a nested ON group, let `f` populate it, and return it.
    pub fn group_with(
        &mut self,
        boolean: Boolean,
        f: impl FnOnce(&mut Parentheses),
    ) -> &mut Parentheses {
        self.conditions.group_with(boolean, f)
    }

    // ==================== Direction / unification ====================

    pub fn left(&mut self) -> &mut Self {
        self.direction = JoinDirection::Left;
        self
    }

    pub fn right(&mut self) -> &mut Self {
        self.direction = JoinDirection::Right;
        self
    }

    pub fn full(&mut self) -> &mut Self {
        self.direction = JoinDirection::Full;
        self
    }

    pub fn inner(&mut self) -> &mut Self {
        self.unification = Unification::Inner;
        self
    }

    pub fn outer(&mut self) -> &mut Self {
        self.unification = Unification::Outer;
        self
    }

    pub fn cross(&mut self) -> &mut Self {
        self.unification = Unification::Cross;
        self
    }

    /// `JOIN table AS alias`
    pub fn alias(&mut self, alias: impl Into<String>) -> &mut Self {
        self.alias = Some(alias.into());
        self
    }
}

/// A handle to one join of a [`Query`], returned by [`Query::join`].
///
/// It borrows the query and addresses the join by index, so builder chains can
/// configure the join and then continue on the query via the pass-through
/// methods (`select`, `where_eq`, `limit`, ...) or [`JoinRef::done`].
///
/// # Example
/// ```ignore
/// let mut q = Query::from_table("users");
/// q.join("posts")
///     .left()
///     .on("posts.user_id", "users.id")
///     .select(["users.*"])
///     .where_eq("posts.published", true);
/// ```
#[derive(Debug)]
pub struct JoinRef<'q> {
    query: &'q mut Query,
    index: usize,
}

impl<'q> JoinRef<'q> {
    pub(crate) fn new(query: &'q mut Query, index: usize) -> Self {
        Self { query, index }
    }

    /// Mutable access to the underlying join clause.
    pub fn clause(&mut self) -> &mut JoinClause {
        &mut self.query.joins[self.index]
    }

    pub fn on(mut self, left: impl Into<Key>, right: impl Into<String>) -> Self {
        self.clause().on(left, right);
        self
    }

    pub fn on_op(
        mut self,
        left: impl Into<Key>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        self.clause().on_op(left, operator, right);
        self
    }

    pub fn on_value(
        mut self,
        left: impl Into<Key>,
        operator: impl Into<String>,
        value: impl Into<Operand>,
    ) -> Self {
        self.clause().on_value(left, operator, value);
        self
    }

    pub fn on_predicate(mut self, predicate: Predicate) -> Self {
        self.clause().on_predicate(predicate);
        self
    }

    pub fn on_expr(mut self, member: impl Into<Member>) -> Self {
        self.clause().on_expr(member);
        self
    }

    /// Append a nested ON group populated by `f`.
    pub fn on_group(mut self, boolean: Boolean, f: impl FnOnce(&mut Parentheses)) -> Self {
        self.clause().group_with(boolean, f);
        self
    }

    pub fn left(mut self) -> Self {
        self.clause().left();
        self
    }

    pub fn right(mut self) -> Self {
        self.clause().right();
        self
    }

    pub fn full(mut self) -> Self {
        self.clause().full();
        self
    }

    pub fn inner(mut self) -> Self {
        self.clause().inner();
        self
    }

    pub fn outer(mut self) -> Self {
        self.clause().outer();
        self
    }

    pub fn cross(mut self) -> Self {
        self.clause().cross();
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.clause().alias(alias);
        self
    }

    // ==================== Pass-through to the owning query ====================

    /// Return control to the owning query.
    pub fn done(self) -> &'q mut Query {
        self.query
    }

    pub fn select<I, C>(self, columns: I) -> &'q mut Query
    where
        I: IntoIterator<Item = C>,
        C: Into<Column>,
    {
        self.done().select(columns)
    }

    pub fn from(self, table: impl Into<String>) -> &'q mut Query {
        self.done().from(table)
    }

    pub fn join(self, table: impl Into<String>) -> JoinRef<'q> {
        self.done().join(table)
    }

    pub fn where_eq(self, left: impl Into<Key>, value: impl Into<Operand>) -> &'q mut Query {
        self.done().where_eq(left, value)
    }

    pub fn where_op(
        self,
        left: impl Into<Key>,
        operator: impl Into<String>,
        value: impl Into<Operand>,
    ) -> &'q mut Query {
        self.done().where_op(left, operator, value)
    }

    pub fn where_expr(self, member: impl Into<Member>) -> &'q mut Query {
        self.done().where_expr(member)
    }

    pub fn group_by<I, K>(self, keys: I) -> &'q mut Query
    where
        I: IntoIterator<Item = K>,
        K: Into<Key>,
    {
        self.done().group_by(keys)
    }

    pub fn order_by(self, key: impl Into<Key>) -> &'q mut Query {
        self.done().order_by(key)
    }

    pub fn having_eq(self, left: impl Into<Key>, value: impl Into<Operand>) -> &'q mut Query {
        self.done().having_eq(left, value)
    }

    pub fn having_op(
        self,
        left: impl Into<Key>,
        operator: impl Into<String>,
        value: impl Into<Operand>,
    ) -> &'q mut Query {
        self.done().having_op(left, operator, value)
    }

    pub fn offset(self, offset: impl Into<Limit>) -> &'q mut Query {
        self.done().offset(offset)
    }

    pub fn limit(self, limit: impl Into<Limit>) -> &'q mut Query {
        self.done().limit(limit)
    }

    pub fn values(self, key: impl Into<String>, value: impl Into<Operand>) -> &'q mut Query {
        self.done().values(key, value)
    }
}
