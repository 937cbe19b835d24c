//! Boolean-connected condition groups for WHERE, HAVING and JOIN ON.

use crate::expression::SqlExpression;
use crate::query::column::{Key, Operand};
use crate::query::predicate::Predicate;

/// Connective joining the members of a [`Parentheses`] group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Boolean {
    #[default]
    And,
    Or,
    /// No connective: members are separated by a bare newline.
    None,
}

impl Boolean {
    pub fn as_str(&self) -> &'static str {
        match self {
            Boolean::And => "AND",
            Boolean::Or => "OR",
            Boolean::None => "",
        }
    }
}

/// One member of a condition tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    Predicate(Predicate),
    Group(Parentheses),
    /// Raw fragment embedded with its own bindings.
    Expression(SqlExpression),
    /// Bare SQL text.
    Literal(String),
}

impl From<Predicate> for Member {
    fn from(p: Predicate) -> Self {
        Member::Predicate(p)
    }
}

impl From<Parentheses> for Member {
    fn from(g: Parentheses) -> Self {
        Member::Group(g)
    }
}

impl From<SqlExpression> for Member {
    fn from(e: SqlExpression) -> Self {
        Member::Expression(e)
    }
}

impl From<&str> for Member {
    fn from(s: &str) -> Self {
        Member::Literal(s.to_string())
    }
}

impl From<String> for Member {
    fn from(s: String) -> Self {
        Member::Literal(s)
    }
}

/// An ordered group of condition members under one boolean connective.
///
/// # Example
/// ```ignore
/// let mut cond = Parentheses::default();
/// cond.where_eq("a", 1);
/// cond.group_with(Boolean::Or, |g| {
///     g.where_eq("b", 2).where_eq("c", 3);
/// });
/// // a = ?
/// // AND (b = ?
/// // OR c = ?)
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parentheses {
    boolean: Boolean,
    members: Vec<Member>,
}

impl Parentheses {
    /// Create an empty group with the given connective.
    pub fn new(boolean: Boolean) -> Self {
        Self {
            boolean,
            members: Vec::new(),
        }
    }

    pub fn boolean(&self) -> Boolean {
        self.boolean
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// Push one member as a leaf (predicate, raw expression, literal or prebuilt group).
    pub fn where_expr(&mut self, member: impl Into<Member>) -> &mut Self {
        self.members.push(member.into());
        self
    }

    /// Invoke `f` with this group, letting it add members in place (no nesting).
    pub fn where_fn(&mut self, f: impl FnOnce(&mut Parentheses)) -> &mut Self {
        f(&mut *self);
        self
    }

    /// Add `left = value`.
    pub fn where_eq(&mut self, left: impl Into<Key>, value: impl Into<Operand>) -> &mut Self {
        self.where_expr(Predicate::eq(left, value))
    }

    /// Add `left operator value`.
    pub fn where_op(
        &mut self,
        left: impl Into<Key>,
        operator: impl Into<String>,
        value: impl Into<Operand>,
    ) -> &mut Self {
        self.where_expr(Predicate::new(left, operator, value))
    }

    /// Add `left operator right` comparing two columns.
    pub fn where_column(
        &mut self,
        left: impl Into<Key>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> &mut Self {
        self.where_expr(Predicate::columns(left, operator, right))
    }

    /// Append a new child group and return it.
    pub fn group(&mut self, boolean: Boolean) -> &mut Parentheses {
        self.members.push(Member::Group(Parentheses::new(boolean)));
        match self.members.last_mut() {
            Some(Member::Group(child)) => child,
            _ => unreachable!("a group member was just pushed"),
        }
    }

    /// Append a new child group, let `f` populate it, and return it.
    pub fn group_with(
        &mut self,
        boolean: Boolean,
        f: impl FnOnce(&mut Parentheses),
    ) -> &mut Parentheses {
        let child = self.group(boolean);
        f(&mut *child);
        child
    }

    pub fn first(&self) -> Option<&Member> {
        self.members.first()
    }

    pub fn count(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether anything would render: a leaf anywhere in the tree. Groups that
    /// contain only (nested) empty groups do not count.
    pub fn has_renderable_members(&self) -> bool {
        self.members.iter().any(|member| match member {
            Member::Group(child) => child.has_renderable_members(),
            _ => true,
        })
    }

    pub fn clear(&mut self) -> &mut Self {
        self.members.clear();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn where_forms_push_leaves() {
        let mut p = Parentheses::default();
        p.where_eq("a", 1)
            .where_op("b", ">", 2)
            .where_expr("c IS TRUE")
            .where_expr(SqlExpression::with_bindings("d = ?", [4]));
        assert_eq!(p.count(), 4);
        assert!(matches!(p.first(), Some(Member::Predicate(_))));
        assert!(matches!(p.members()[2], Member::Literal(_)));
        assert!(matches!(p.members()[3], Member::Expression(_)));
    }

    #[test]
    fn where_fn_mutates_current_group() {
        let mut p = Parentheses::new(Boolean::Or);
        p.where_fn(|g| {
            g.where_eq("a", 1).where_eq("b", 2);
        });
        assert_eq!(p.count(), 2);
        assert!(p.members().iter().all(|m| matches!(m, Member::Predicate(_))));
    }

    #[test]
    fn group_appends_child_and_returns_it() {
        let mut p = Parentheses::default();
        p.where_eq("a", 1);
        let child = p.group_with(Boolean::Or, |g| {
            g.where_eq("b", 2);
        });
        child.where_eq("c", 3);

        assert_eq!(p.count(), 2);
        match &p.members()[1] {
            Member::Group(g) => {
                assert_eq!(g.boolean(), Boolean::Or);
                assert_eq!(g.count(), 2);
            }
            other => panic!("expected group, got {other:?}"),
        }
    }

    #[test]
    fn clear_empties_group() {
        let mut p = Parentheses::default();
        p.where_eq("a", 1);
        p.clear();
        assert!(p.is_empty());
        assert!(p.first().is_none());
    }

    #[test]
    fn nested_empty_groups_are_not_renderable() {
        let mut p = Parentheses::default();
        assert!(!p.has_renderable_members());

        p.group(Boolean::Or).group(Boolean::And);
        assert!(!p.is_empty());
        assert!(!p.has_renderable_members());

        p.group(Boolean::And).group(Boolean::Or).where_eq("a", 1);
        assert!(p.has_renderable_members());
    }
}
