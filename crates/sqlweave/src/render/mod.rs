//! Statement code generation.
//!
//! [`QueryRenderer`] walks a [`Query`] and produces one [`SqlExpression`] whose
//! text contains only positional `?` placeholders and whose bindings match them
//! left to right. Rendering never mutates the query and performs no I/O.

mod conditions;

use crate::dialect::{DEFAULT_TIMESTAMP_FORMAT, Dialect, QuoteKind, quote_string_literal};
use crate::error::{SqlError, SqlResult};
use crate::expression::SqlExpression;
use crate::query::{
    Column, JoinClause, Key, Limit, Operand, Operation, OrderItem, Parentheses, Predicate, Query,
};
use std::sync::Arc;

/// Compiles [`Query`] values into SQL text plus bindings.
///
/// Without a dialect, identifiers are emitted unquoted and string literals are
/// naively single-quoted. That mode is meant for debug output only.
#[derive(Debug, Clone, Default)]
pub struct QueryRenderer {
    dialect: Option<Arc<dyn Dialect>>,
}

impl QueryRenderer {
    /// Create a renderer quoting through `dialect`.
    pub fn new(dialect: Arc<dyn Dialect>) -> Self {
        Self {
            dialect: Some(dialect),
        }
    }

    /// Create a renderer with the unquoted debug fallback.
    pub fn without_dialect() -> Self {
        Self::default()
    }

    pub fn dialect(&self) -> Option<&dyn Dialect> {
        self.dialect.as_deref()
    }

    /// Render `query` according to its (explicit or inferred) operation.
    pub fn render(&self, query: &Query) -> SqlResult<SqlExpression> {
        let operation = query.operation();
        let out = match operation {
            Operation::Select => self.render_select(query)?,
            Operation::Insert => self.render_insert(query, false)?,
            Operation::Replace => self.render_insert(query, true)?,
            Operation::Update => self.render_update(query)?,
            Operation::Delete => self.render_delete(query)?,
        };
        let out = self.cast_bindings(out);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "sqlweave.render",
            operation = %operation,
            dialect = self.dialect.as_ref().map_or("-", |d| d.name()),
            bindings = out.bindings().len(),
            sql = %out.sql(),
            "rendered statement"
        );

        Ok(out)
    }

    /// Render a single JOIN clause (`[LEFT ]JOIN t[ AS a]` + `ON ...`).
    pub fn render_join(&self, join: &JoinClause) -> SqlResult<SqlExpression> {
        self.join_clause(join).map(|out| self.cast_bindings(out))
    }

    /// Render a condition group as it would appear after WHERE/HAVING/ON.
    pub fn render_conditions(&self, group: &Parentheses) -> SqlResult<SqlExpression> {
        self.condition_string(group).map(|out| self.cast_bindings(out))
    }

    /// Render a single predicate.
    pub fn render_predicate(&self, predicate: &Predicate) -> SqlResult<SqlExpression> {
        self.predicate(predicate).map(|out| self.cast_bindings(out))
    }

    /// Quote through the dialect, or with the debug fallback when none is set.
    pub fn quote(&self, value: &str, kind: QuoteKind) -> String {
        match (&self.dialect, kind) {
            (Some(dialect), kind) => dialect.quote(value, kind),
            (None, QuoteKind::Name) => value.to_string(),
            (None, QuoteKind::String) => quote_string_literal(value),
        }
    }

    /// Timestamp format applied to bound timestamps.
    pub fn timestamp_format(&self) -> &str {
        self.dialect
            .as_ref()
            .map_or(DEFAULT_TIMESTAMP_FORMAT, |d| d.timestamp_format())
    }

    // ==================== Statements ====================

    fn render_select(&self, query: &Query) -> SqlResult<SqlExpression> {
        let mut lines = Vec::new();

        let mut head = SqlExpression::new(if query.distinct {
            "SELECT DISTINCT "
        } else {
            "SELECT "
        });
        head.append(self.columns(&query.columns));
        lines.push(head);

        let mut from = SqlExpression::new("FROM ");
        if let Some(inner) = query.subquery() {
            from.push("(").append(self.render_select(inner)?).push(") AS ");
        }
        from.push(&self.table_name(query, Operation::Select)?);
        lines.push(from);

        for join in &query.joins {
            lines.push(self.join_clause(join)?);
        }

        if let Some(clause) = self.where_clause(&query.conditions)? {
            lines.push(clause);
        }

        if !query.group_bys.is_empty() {
            let mut line = SqlExpression::new("GROUP BY ");
            line.append(SqlExpression::join(
                query.group_bys.iter().map(|key| self.key(key)),
                ", ",
            ));
            lines.push(line);
        }

        if query.havings.has_renderable_members() {
            let mut line = SqlExpression::new("HAVING ");
            line.append(self.condition_string(&query.havings)?);
            lines.push(line);
        }

        if !query.order_bys.is_empty() {
            let mut line = SqlExpression::new("ORDER BY ");
            line.append(SqlExpression::join(
                query.order_bys.iter().map(|item| self.order_item(item)),
                ", ",
            ));
            lines.push(line);
        }

        if let Some(limit) = self.limit_clause(query.limit.as_ref(), query.offset.as_ref()) {
            lines.push(SqlExpression::new(limit));
        }

        Ok(SqlExpression::join(lines, "\n"))
    }

    fn render_insert(&self, query: &Query, replace: bool) -> SqlResult<SqlExpression> {
        let operation = if replace {
            Operation::Replace
        } else {
            Operation::Insert
        };
        let table = self.table_name(query, operation)?;
        if query.values.is_empty() {
            return Err(SqlError::invalid(format!(
                "{operation} on '{}' requires at least one value",
                query.table
            )));
        }

        let columns: Vec<String> = query
            .values
            .iter()
            .map(|(column, _)| self.quote(column, QuoteKind::Name))
            .collect();
        let values = query
            .values
            .iter()
            .map(|(column, value)| self.payload_value(column, value))
            .collect::<SqlResult<Vec<_>>>()?;

        let mut out = SqlExpression::new(format!(
            "{} INTO {} ({}) VALUES (",
            operation.as_str(),
            table,
            columns.join(", ")
        ));
        out.append(SqlExpression::join(values, ", "));
        out.push(")");
        Ok(out)
    }

    fn render_update(&self, query: &Query) -> SqlResult<SqlExpression> {
        let table = self.table_name(query, Operation::Update)?;
        if query.values.is_empty() {
            return Err(SqlError::invalid(format!(
                "UPDATE on '{}' requires at least one value",
                query.table
            )));
        }

        let assignments = query
            .values
            .iter()
            .map(|(column, value)| {
                let mut assignment =
                    SqlExpression::new(format!("{} = ", self.quote(column, QuoteKind::Name)));
                assignment.append(self.payload_value(column, value)?);
                Ok(assignment)
            })
            .collect::<SqlResult<Vec<_>>>()?;

        let mut out = SqlExpression::new(format!("UPDATE {table} SET "));
        out.append(SqlExpression::join(assignments, ", "));
        if let Some(clause) = self.where_clause(&query.conditions)? {
            out.push("\n").append(clause);
        }
        Ok(out)
    }

    fn render_delete(&self, query: &Query) -> SqlResult<SqlExpression> {
        let table = self.table_name(query, Operation::Delete)?;
        let mut out = SqlExpression::new(format!("DELETE FROM {table}"));
        if let Some(clause) = self.where_clause(&query.conditions)? {
            out.push("\n").append(clause);
        }
        Ok(out)
    }

    // ==================== Clauses ====================

    fn table_name(&self, query: &Query, operation: Operation) -> SqlResult<String> {
        if query.table.is_empty() {
            return Err(SqlError::invalid(format!("{operation} requires a table")));
        }
        Ok(self.quote(&query.table, QuoteKind::Name))
    }

    fn where_clause(&self, conditions: &Parentheses) -> SqlResult<Option<SqlExpression>> {
        if !conditions.has_renderable_members() {
            return Ok(None);
        }
        let mut line = SqlExpression::new("WHERE ");
        line.append(self.condition_string(conditions)?);
        Ok(Some(line))
    }

    fn columns(&self, columns: &[Column]) -> SqlExpression {
        if columns.is_empty() || (columns.len() == 1 && columns[0].is_star()) {
            return SqlExpression::new("*");
        }
        SqlExpression::join(
            columns.iter().map(|column| match column {
                Column::Name(name) => SqlExpression::new(self.quote(name, QuoteKind::Name)),
                Column::Aliased { name, alias } => SqlExpression::new(format!(
                    "{} AS {}",
                    self.quote(name, QuoteKind::Name),
                    self.quote(alias, QuoteKind::Name)
                )),
                Column::Expression(expr) => self.expression(expr),
            }),
            ", ",
        )
    }

    fn join_clause(&self, join: &JoinClause) -> SqlResult<SqlExpression> {
        let mut head = String::new();
        for keyword in [join.direction().as_str(), join.unification().as_str()] {
            if !keyword.is_empty() {
                head.push_str(keyword);
                head.push(' ');
            }
        }
        head.push_str("JOIN ");
        head.push_str(&self.quote(join.table(), QuoteKind::Name));
        if let Some(alias) = join.alias_name() {
            head.push_str(" AS ");
            head.push_str(&self.quote(alias, QuoteKind::Name));
        }

        let mut out = SqlExpression::new(head);
        if join.conditions().has_renderable_members() {
            out.push("\nON ");
            out.append(self.condition_string(join.conditions())?);
        }
        Ok(out)
    }

    fn order_item(&self, item: &OrderItem) -> SqlExpression {
        let mut out = self.key(&item.key);
        if let Some(direction) = item.direction {
            out.push(" ").push(direction.as_str());
        }
        out
    }

    fn limit_clause(&self, limit: Option<&Limit>, offset: Option<&Limit>) -> Option<String> {
        match (limit, offset) {
            (Some(limit), Some(offset)) => Some(format!("LIMIT {offset}, {limit}")),
            (Some(limit), None) => Some(format!("LIMIT {limit}")),
            (None, Some(_offset)) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    target: "sqlweave.render",
                    offset = %_offset,
                    "offset without limit is not rendered"
                );
                None
            }
            (None, None) => None,
        }
    }

    /// One INSERT/UPDATE payload value: expressions embed their own text and
    /// bindings, plain values become a bound `?`.
    fn payload_value(&self, column: &str, value: &Operand) -> SqlResult<SqlExpression> {
        match value {
            Operand::Value(value) => {
                let mut out = SqlExpression::default();
                out.push_bind(value.clone());
                Ok(out)
            }
            Operand::Expression(expr) => Ok(self.expression(expr)),
            Operand::List(_) => Err(SqlError::invalid(format!(
                "value list is not a valid payload for column '{column}'"
            ))),
        }
    }

    // ==================== Shared primitives ====================

    pub(crate) fn key(&self, key: &Key) -> SqlExpression {
        match key {
            Key::Name(name) => SqlExpression::new(self.quote(name, QuoteKind::Name)),
            Key::Expression(expr) => self.expression(expr),
        }
    }

    pub(crate) fn expression(&self, expr: &SqlExpression) -> SqlExpression {
        match &self.dialect {
            Some(dialect) => dialect.expression(expr),
            None => expr.clone(),
        }
    }

    fn cast_bindings(&self, out: SqlExpression) -> SqlExpression {
        let format = self.timestamp_format();
        out.map_bindings(|value| value.cast_for_binding(format))
    }
}
