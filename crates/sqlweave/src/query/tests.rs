//! Builder tests for the query module.

use super::*;
use crate::value::Value;

#[test]
fn test_operation_inference() {
    let mut q = Query::from_table("users");
    assert_eq!(q.operation(), Operation::Select);

    q.values("name", "alice");
    assert_eq!(q.operation(), Operation::Insert);

    q.where_eq("id", 1);
    assert_eq!(q.operation(), Operation::Update);
}

#[test]
fn test_delete_is_never_inferred() {
    let mut q = Query::from_table("users");
    q.where_eq("id", 1);
    assert_eq!(q.operation(), Operation::Select);

    q.delete();
    assert_eq!(q.operation(), Operation::Delete);
}

#[test]
fn test_explicit_operation_wins() {
    let mut q = Query::from_table("users");
    q.values("name", "alice").replace();
    assert_eq!(q.operation(), Operation::Replace);
}

#[test]
fn test_select_appends_and_empty_resets() {
    let mut q = Query::new();
    q.select(["id", "name"]).select_as("email", "mail");
    assert_eq!(q.columns().len(), 3);
    assert_eq!(q.columns()[2], Column::aliased("email", "mail"));

    q.select(Vec::<&str>::new());
    assert!(q.columns().is_empty());
}

#[test]
fn test_values_merge_and_replace() {
    let mut q = Query::from_table("users");
    q.values("name", "alice").values("age", 30).values("name", "bob");
    assert_eq!(
        q.payload(),
        &[
            ("name".to_string(), Operand::Value(Value::Text("bob".into()))),
            ("age".to_string(), Operand::Value(Value::Int(30))),
        ]
    );

    q.set_values([("status", "active")]);
    assert_eq!(q.payload().len(), 1);
    assert_eq!(q.payload()[0].0, "status");
}

#[test]
fn test_order_by_replaces_direction_for_same_column() {
    let mut q = Query::from_table("users");
    q.order_by("name")
        .order_by_desc("created_at")
        .order_by_desc("name")
        .order_by_expr(SqlExpression::raw("RANDOM()"));

    let items = q.order_bys();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0].key, Key::from("name"));
    assert_eq!(items[0].direction, Some(Direction::Desc));
    assert_eq!(items[2].direction, None);
}

#[test]
fn test_limit_and_offset_set_each_other() {
    let mut q = Query::new();
    q.limit_offset(10, 20);
    assert_eq!(q.limit_value(), Some(&Limit::Count(10)));
    assert_eq!(q.offset_value(), Some(&Limit::Count(20)));

    q.clear_offset();
    assert_eq!(q.offset_value(), None);

    q.offset_limit(5, "ALL");
    assert_eq!(q.limit_value(), Some(&Limit::Raw("ALL".into())));
    assert_eq!(q.offset_value(), Some(&Limit::Count(5)));

    q.clear_limit();
    assert_eq!(q.limit_value(), None);
}

#[test]
fn test_join_handle_passes_through_to_query() {
    let mut q = Query::from_table("users");
    q.join("posts")
        .alias("p")
        .left()
        .on("p.user_id", "users.id")
        .select(["users.id"])
        .where_eq("p.published", true);

    assert_eq!(q.joins().len(), 1);
    let join = q.find_join("p").expect("join by alias");
    assert_eq!(join.table(), "posts");
    assert_eq!(join.direction(), JoinDirection::Left);
    assert_eq!(join.conditions().count(), 1);
    assert_eq!(q.columns().len(), 1);
    assert_eq!(q.conditions().count(), 1);
}

#[test]
fn test_join_on_forces_column_comparison() {
    let mut join = JoinClause::new("posts");
    join.on("posts.user_id", "users.id")
        .on_value("posts.kind", "=", "article");

    let members = join.conditions().members();
    match (&members[0], &members[1]) {
        (Member::Predicate(on), Member::Predicate(value)) => {
            assert!(on.is_right_key());
            assert!(!value.is_right_key());
        }
        other => panic!("unexpected members: {other:?}"),
    }
}

#[test]
fn test_prebuilt_join_clause_used_as_is() {
    let mut clause = JoinClause::new("roles");
    clause.inner().on("roles.id", "users.role_id");
    let expected = clause.clone();

    let mut q = Query::from_table("users");
    q.join_clause(clause).done().limit(1);
    assert_eq!(q.joins()[0], expected);
}

#[test]
fn test_attachments_side_channel() {
    let mut q = Query::from_table("users");
    q.attach("audit", Query::from_table("audit_log"));
    assert_eq!(q.attached("audit").map(Query::table), Some("audit_log"));

    let detached = q.detach("audit").expect("attached query");
    assert_eq!(detached.table(), "audit_log");
    assert!(q.attached("audit").is_none());
}

#[test]
fn test_paginate_attaches_count_query() {
    let mut q = Query::from_table("users");
    q.where_eq("active", true).order_by("name").paginate(3, 20);

    assert_eq!(q.limit_value(), Some(&Limit::Count(20)));
    assert_eq!(q.offset_value(), Some(&Limit::Count(40)));

    let count = q.attached(COUNT_ATTACHMENT).expect("count query");
    assert!(count.order_bys().is_empty());
    assert!(count.limit_value().is_none());
    assert_eq!(count.conditions().count(), 1);
    assert_eq!(
        count.columns(),
        &[Column::Expression(SqlExpression::raw("COUNT(*)"))]
    );
}

#[test]
fn test_where_group_returns_child() {
    let mut q = Query::from_table("users");
    q.where_eq("a", 1);
    q.where_group(Boolean::Or).where_eq("b", 2).where_eq("c", 3);

    assert_eq!(q.conditions().count(), 2);
    match &q.conditions().members()[1] {
        Member::Group(g) => assert_eq!(g.count(), 2),
        other => panic!("expected group, got {other:?}"),
    }
}

#[test]
fn test_empty_groups_do_not_infer_update() {
    let mut q = Query::from_table("t");
    q.values("a", 1);
    q.where_group(Boolean::Or).group(Boolean::And);
    assert_eq!(q.operation(), Operation::Insert);

    q.where_group(Boolean::And).where_eq("id", 1);
    assert_eq!(q.operation(), Operation::Update);
}

#[test]
fn test_count_query_wraps_distinct_and_grouped_queries() {
    let mut q = Query::from_table("orders");
    q.select(["customer_id"]).distinct(true).order_by("customer_id");

    let count = q.count_query();
    assert!(!count.is_distinct());
    assert_eq!(count.table(), COUNT_SUBQUERY_ALIAS);
    let inner = count.subquery().expect("derived table");
    assert!(inner.is_distinct());
    assert!(inner.order_bys().is_empty());

    let mut q = Query::from_table("orders");
    q.group_by(["customer_id"]).dialect("mysql");
    let count = q.count_query();
    assert!(count.group_bys().is_empty());
    assert_eq!(count.dialect_name(), Some("mysql"));
    assert_eq!(count.subquery().map(|s| s.group_bys().len()), Some(1));
}

#[test]
fn test_plain_count_query_selects_from_table() {
    let q = Query::from_table("orders");
    let count = q.count_query();
    assert!(count.subquery().is_none());
    assert_eq!(count.table(), "orders");
}
