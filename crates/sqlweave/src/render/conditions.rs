//! Condition-tree and predicate rendering shared by WHERE, HAVING and JOIN ON.

use super::QueryRenderer;
use crate::dialect::QuoteKind;
use crate::error::{SqlError, SqlResult};
use crate::expression::SqlExpression;
use crate::query::{Boolean, Member, Operand, Parentheses, Predicate};
use crate::value::Value;

/// Separator between sibling lines of a group.
fn glue_for(boolean: Boolean) -> String {
    match boolean {
        Boolean::None => "\n".to_string(),
        other => format!("\n{} ", other.as_str()),
    }
}

impl QueryRenderer {
    /// Render the members of `group`, one line each, joined by its connective.
    pub(crate) fn condition_string(&self, group: &Parentheses) -> SqlResult<SqlExpression> {
        let glue = glue_for(group.boolean());
        let mut lines: Vec<SqlExpression> = Vec::with_capacity(group.count());

        for member in group.members() {
            let line = match member {
                Member::Predicate(predicate) => self.predicate(predicate)?,
                Member::Group(child) => {
                    if !child.has_renderable_members() {
                        continue;
                    }
                    // A bare-newline glue carries no connective of its own.
                    let open = if glue == "\n" && !lines.is_empty() {
                        "AND ("
                    } else {
                        "("
                    };
                    let mut line = SqlExpression::new(open);
                    line.append(self.condition_string(child)?);
                    line.push(")");
                    line
                }
                Member::Expression(expr) => self.expression(expr),
                Member::Literal(text) => SqlExpression::new(text.clone()),
            };
            lines.push(line);
        }

        Ok(SqlExpression::join(lines, &glue))
    }

    pub(crate) fn predicate(&self, predicate: &Predicate) -> SqlResult<SqlExpression> {
        let mut out = self.key(predicate.left());
        let operator = predicate.operator().trim();
        if operator.is_empty() {
            return Ok(out);
        }
        let upper = operator.to_ascii_uppercase();

        if predicate.is_right_key() {
            match predicate.right() {
                Operand::Value(Value::Text(column)) => {
                    out.push(" ")
                        .push(operator)
                        .push(" ")
                        .push(&self.quote(column, QuoteKind::Name));
                }
                Operand::Expression(expr) => {
                    out.push(" ").push(operator).push(" ");
                    out.append(self.expression(expr));
                }
                other => {
                    return Err(SqlError::invalid(format!(
                        "predicate on {:?} expects a column reference on the right, got {other:?}",
                        predicate.left()
                    )));
                }
            }
            return Ok(out);
        }

        let is_in = upper == "IN" || upper == "NOT IN";
        match predicate.right() {
            Operand::Value(Value::Null) => match upper.as_str() {
                "=" | "IN" => {
                    out.push(" IS NULL");
                }
                "!=" | "<>" | "NOT IN" => {
                    out.push(" IS NOT NULL");
                }
                _ => {
                    out.push(" ").push(operator).push(" NULL");
                }
            },
            Operand::List(values) if values.is_empty() && is_in => {
                return Ok(SqlExpression::new(if upper == "IN" { "1=0" } else { "1=1" }));
            }
            Operand::List(values) if upper == "BETWEEN" || upper == "NOT BETWEEN" => {
                let [from, to] = values.as_slice() else {
                    return Err(SqlError::invalid(format!(
                        "{operator} expects exactly two values, got {}",
                        values.len()
                    )));
                };
                out.push(" ").push(operator).push(" ");
                out.push_bind(from.clone()).push(" AND ").push_bind(to.clone());
            }
            Operand::List(values) => {
                out.push(" ").push(operator).push(" (");
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        out.push(", ");
                    }
                    out.push_bind(value.clone());
                }
                out.push(")");
            }
            Operand::Value(value) if is_in => {
                out.push(" ").push(operator).push(" (");
                out.push_bind(value.clone()).push(")");
            }
            Operand::Value(value) => {
                out.push(" ").push(operator).push(" ");
                out.push_bind(value.clone());
            }
            Operand::Expression(expr) if is_in => {
                out.push(" ").push(operator).push(" (");
                out.append(self.expression(expr)).push(")");
            }
            Operand::Expression(expr) => {
                out.push(" ").push(operator).push(" ");
                out.append(self.expression(expr));
            }
        }
        Ok(out)
    }
}
