use sqlweave::{
    Boolean, DebugBindings, Dialect, DialectRegistry, Query, QuoteKind, Sql, SqlConfig,
    SqlExpression, Value, render_debug, wildcard_to_like,
};
use std::sync::Arc;

#[derive(Debug)]
struct BracketDialect;

impl Dialect for BracketDialect {
    fn name(&self) -> &str {
        "mssql"
    }

    fn quote(&self, value: &str, kind: QuoteKind) -> String {
        match kind {
            QuoteKind::Name => format!("[{value}]"),
            QuoteKind::String => format!("'{}'", value.replace('\'', "''")),
        }
    }

    fn timestamp_format(&self) -> &str {
        "%Y%m%d"
    }
}

fn user_search() -> Query {
    let mut query = Query::from_table("users");
    query
        .select(["users.id", "users.name"])
        .join("profiles")
        .left()
        .on("profiles.user_id", "users.id")
        .done()
        .where_eq("users.status", "active")
        .where_group_with(Boolean::Or, |g| {
            g.where_op("users.age", ">", 18).where_eq("users.verified", true);
        });
    query.order_by_desc("users.created_at").limit(10);
    query
}

#[test]
fn renders_select_for_each_builtin_dialect() {
    let sql = Sql::new();
    let query = user_search();

    let sqlite = sql.render_query(&query, None).unwrap();
    assert_eq!(
        sqlite.sql(),
        "SELECT \"users\".\"id\", \"users\".\"name\"\n\
         FROM \"users\"\n\
         LEFT JOIN \"profiles\"\n\
         ON \"profiles\".\"user_id\" = \"users\".\"id\"\n\
         WHERE \"users\".\"status\" = ?\n\
         AND (\"users\".\"age\" > ?\n\
         OR \"users\".\"verified\" = ?)\n\
         ORDER BY \"users\".\"created_at\" DESC\n\
         LIMIT 10"
    );

    let mysql = sql.render_query(&query, Some("mysql")).unwrap();
    assert!(mysql.sql().starts_with("SELECT `users`.`id`, `users`.`name`\nFROM `users`"));
    assert_eq!(mysql.bindings(), sqlite.bindings());
    assert_eq!(
        sqlite.bindings(),
        &[Value::from("active"), Value::from(18), Value::from(true)]
    );
}

#[test]
fn placeholder_count_matches_bindings() {
    let sql = Sql::new();
    let mut query = Query::from_table("orders");
    query
        .select_expr(SqlExpression::with_bindings("COALESCE(total, ?) AS total", [0]))
        .where_op("status", "IN", vec!["paid", "shipped"])
        .where_op("created_at", "BETWEEN", ["2024-01-01", "2024-12-31"])
        .group_by(["customer_id"])
        .having_op(SqlExpression::raw("COUNT(*)"), ">", 3);

    let out = sql.render_query(&query, None).unwrap();
    assert_eq!(out.sql().matches('?').count(), out.bindings().len());
    assert_eq!(out.bindings().len(), 6);
    assert_eq!(out.bindings()[0], Value::Int(0));
    assert_eq!(out.bindings()[5], Value::Int(3));
}

#[test]
fn rendering_is_repeatable() {
    let sql = Sql::new();
    let query = user_search();
    let first = sql.render_query(&query, None).unwrap();
    let second = sql.render_query(&query, None).unwrap();
    assert_eq!(first, second);
}

#[test]
fn writes_through_the_facade() {
    let sql = Sql::new();

    let mut insert = Query::from_table("users");
    insert.values("name", "alice").values("age", 31);
    let out = sql.render_query(&insert, None).unwrap();
    assert_eq!(out.sql(), "INSERT INTO \"users\" (\"name\", \"age\") VALUES (?, ?)");

    let mut update = Query::from_table("users");
    update.values("status", "inactive").where_eq("id", 7);
    let out = sql.render_query(&update, Some("mysql")).unwrap();
    assert_eq!(out.sql(), "UPDATE `users` SET `status` = ?\nWHERE `id` = ?");
    assert_eq!(out.bindings(), &[Value::from("inactive"), Value::from(7)]);

    let mut delete = Query::from_table("users");
    delete.delete().where_eq("id", 7);
    let out = sql.render_query(&delete, None).unwrap();
    assert_eq!(out.sql(), "DELETE FROM \"users\"\nWHERE \"id\" = ?");
}

#[test]
fn custom_dialect_shadows_and_formats_timestamps() {
    let mut registry = DialectRegistry::new();
    registry.register("mssql", Arc::new(BracketDialect));
    registry.set_default("mssql").unwrap();
    let sql = Sql::with_registry(registry);

    let ts = chrono::NaiveDate::from_ymd_opt(2024, 5, 17)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let mut query = Query::from_table("events");
    query.where_op("at", ">=", ts);

    let out = sql.render_query(&query, None).unwrap();
    assert_eq!(out.sql(), "SELECT *\nFROM [events]\nWHERE [at] >= ?");
    assert_eq!(out.bindings(), &[Value::Text("20240517".into())]);
}

#[test]
fn config_drives_default_dialect() {
    let config = SqlConfig::from_toml_str(
        r#"
default_dialect = "mariadb"

[aliases]
mariadb = "mysql"
"#,
    )
    .unwrap();
    let sql = Sql::from_config(&config).unwrap();
    let out = sql.render_query(&Query::from_table("t"), None).unwrap();
    assert_eq!(out.sql(), "SELECT *\nFROM `t`");
}

#[test]
fn paginate_attaches_count_query() {
    let sql = Sql::new();
    let mut query = Query::from_table("posts");
    query.where_eq("published", true).order_by("id").paginate(3, 20);

    let page = sql.render_query(&query, None).unwrap();
    assert!(page.sql().ends_with("LIMIT 40, 20"));

    let count = query.attached(sqlweave::query::COUNT_ATTACHMENT).unwrap();
    let out = sql.render_query(count, None).unwrap();
    assert_eq!(
        out.sql(),
        "SELECT COUNT(*)\nFROM \"posts\"\nWHERE \"published\" = ?"
    );
}

#[test]
fn debug_helpers() {
    let out = render_debug(
        "SELECT * FROM t WHERE a = ? AND b = ?",
        &DebugBindings::from(vec![Value::from("it's"), Value::from(2.5)]),
        '\'',
    );
    assert_eq!(out, "SELECT * FROM t WHERE a = 'it''s' AND b = 2.5");
    assert_eq!(wildcard_to_like("*.rs", '*'), "%.rs");
}

#[test]
fn unknown_dialect_is_reported() {
    let err = Sql::new()
        .render_query(&Query::from_table("t"), Some("oracle"))
        .unwrap_err();
    assert!(err.is_unknown_dialect());
    assert_eq!(err.to_string(), "Unknown dialect: oracle");
}
