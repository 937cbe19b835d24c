//! A single `left operator right` comparison.

use crate::query::column::{Key, Operand};
use crate::value::Value;

/// A comparison leaf of a condition tree.
///
/// `right_is_key` marks the right side as a column reference instead of a bound
/// value. It is `false` for WHERE/HAVING predicates and forced to `true` for
/// JOIN ON conditions.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    left: Key,
    operator: String,
    right: Operand,
    right_is_key: bool,
}

impl Predicate {
    /// `left operator right`, right bound as a value.
    pub fn new(
        left: impl Into<Key>,
        operator: impl Into<String>,
        right: impl Into<Operand>,
    ) -> Self {
        Self {
            left: left.into(),
            operator: operator.into(),
            right: right.into(),
            right_is_key: false,
        }
    }

    /// `left = right`, right bound as a value.
    pub fn eq(left: impl Into<Key>, right: impl Into<Operand>) -> Self {
        Self::new(left, "=", right)
    }

    /// `left operator right` where both sides are column references.
    pub fn columns(
        left: impl Into<Key>,
        operator: impl Into<String>,
        right: impl Into<String>,
    ) -> Self {
        Self {
            left: left.into(),
            operator: operator.into(),
            right: Operand::Value(Value::Text(right.into())),
            right_is_key: true,
        }
    }

    /// A bare truthy check of `left` (empty operator), e.g. a boolean flag column.
    pub fn truthy(left: impl Into<Key>) -> Self {
        Self::new(left, "", Value::Null)
    }

    /// Toggle whether the right side is a column reference.
    pub fn set_right_is_key(&mut self, right_is_key: bool) -> &mut Self {
        self.right_is_key = right_is_key;
        self
    }

    /// Consuming counterpart of [`Predicate::set_right_is_key`].
    pub fn right_is_key(mut self, right_is_key: bool) -> Self {
        self.right_is_key = right_is_key;
        self
    }

    pub fn left(&self) -> &Key {
        &self.left
    }

    pub fn operator(&self) -> &str {
        &self.operator
    }

    pub fn right(&self) -> &Operand {
        &self.right
    }

    pub fn is_right_key(&self) -> bool {
        self.right_is_key
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_predicates_bind_by_default() {
        let p = Predicate::eq("age", 18);
        assert_eq!(p.operator(), "=");
        assert!(!p.is_right_key());
        assert_eq!(p.right(), &Operand::Value(Value::Int(18)));
    }

    #[test]
    fn column_predicates_mark_right_as_key() {
        let p = Predicate::columns("posts.user_id", "=", "users.id");
        assert!(p.is_right_key());
        assert_eq!(p.right(), &Operand::Value(Value::Text("users.id".into())));
    }

    #[test]
    fn right_is_key_can_be_toggled() {
        let mut p = Predicate::eq("a", "b");
        p.set_right_is_key(true);
        assert!(p.is_right_key());
        assert!(!p.right_is_key(false).is_right_key());
    }
}
