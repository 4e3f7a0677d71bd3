use super::*;
use crate::statement::Statement;

// ==================== SELECT ====================

#[test]
fn test_simple_select() {
    let sql = select("*").from("users").render().unwrap();
    assert_eq!(sql, "SELECT * FROM users;");
}

#[test]
fn test_select_default_projection_is_star() {
    let sql = select_from("users").render().unwrap();
    assert_eq!(sql, "SELECT * FROM users;");
}

#[test]
fn test_select_cols() {
    let sql = SelectStmt::new()
        .select_cols(["id", "username", "email"])
        .from("users")
        .render()
        .unwrap();
    assert_eq!(sql, "SELECT id, username, email FROM users;");
}

#[test]
fn test_add_select_replaces_star() {
    let sql = select("*")
        .add_select("id")
        .add_select("COUNT(*) AS total")
        .from("users")
        .render()
        .unwrap();
    assert_eq!(sql, "SELECT id, COUNT(*) AS total FROM users;");
}

#[test]
fn test_select_full_clause_order() {
    let sql = select("u.id, COUNT(p.id) AS posts")
        .from("users u")
        .left_join("posts p", "p.user_id = u.id")
        .and_where("u.active = TRUE")
        .and_where("u.deleted_at IS NULL")
        .group_by("u.id")
        .sort_by("posts", SortOrder::Desc)
        .sort_by("u.id", SortOrder::Asc)
        .page(20, 10)
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT u.id, COUNT(p.id) AS posts FROM users u \
         LEFT JOIN posts p ON p.user_id = u.id \
         WHERE u.active = TRUE AND u.deleted_at IS NULL \
         GROUP BY u.id ORDER BY posts DESC, u.id ASC LIMIT 10 OFFSET 20;"
    );
}

#[test]
fn test_select_has_no_double_spaces() {
    let sql = select("id")
        .from("users")
        .sort_by("id", SortOrder::default())
        .render()
        .unwrap();
    assert_eq!(sql, "SELECT id FROM users ORDER BY id ASC;");
    assert!(!sql.contains("  "));
}

#[test]
fn test_select_joins_keep_order() {
    let sql = select("*")
        .from("a")
        .inner_join("b", "b.a_id = a.id")
        .right_join("c", "c.b_id = b.id")
        .outer_join("d", "d.c_id = c.id")
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM a INNER JOIN b ON b.a_id = a.id RIGHT JOIN c ON c.b_id = b.id \
         FULL OUTER JOIN d ON d.c_id = c.id;"
    );
}

#[test]
fn test_select_join_using_quotes_columns() {
    let stmt = select("*")
        .from("orders")
        .join_using(JoinKind::Inner, "customers", ["customer_id", "region"]);
    assert_eq!(stmt.joins().len(), 1);
    assert_eq!(
        stmt.render().unwrap(),
        r#"SELECT * FROM orders INNER JOIN customers USING ("customer_id", "region");"#
    );
}

#[test]
fn test_select_length_without_offset_has_no_pagination() {
    let sql = select("*").from("users").length(10).render().unwrap();
    assert_eq!(sql, "SELECT * FROM users;");
}

#[test]
fn test_select_offset_without_length() {
    let sql = select("*").from("users").offset(5).render().unwrap();
    assert_eq!(sql, "SELECT * FROM users LIMIT ALL OFFSET 5;");
}

#[test]
fn test_select_offset_then_length() {
    let sql = select("*").from("users").length(10).offset(0).render().unwrap();
    assert_eq!(sql, "SELECT * FROM users LIMIT 10 OFFSET 0;");
}

#[test]
fn test_select_without_from_is_invalid() {
    let err = select("1").render().unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: SELECT requires a FROM source");
}

#[test]
fn test_select_empty_predicate_is_invalid() {
    let stmt = select("*").from("users").and_where("  ");
    assert!(stmt.validate().unwrap_err().is_invalid_argument());
}

#[test]
fn test_select_empty_fragments_are_invalid() {
    let err = select("").from("t").render().unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: SELECT list cannot be empty");

    let err = select("id").from("t").group_by("").render().unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: GROUP BY expression cannot be empty");

    let err = select("id")
        .from("t")
        .sort_by(" ", SortOrder::Asc)
        .render()
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: ORDER BY expression cannot be empty");

    assert!(select_from("t").select_cols(["id", ""]).render().is_err());
    assert!(select_from("t").add_select("").render().is_err());
}

#[test]
fn test_select_empty_using_is_invalid() {
    let stmt = select("*")
        .from("a")
        .join_using(JoinKind::Left, "b", Vec::<String>::new());
    assert!(stmt.render().is_err());
}

#[test]
fn test_select_render_is_idempotent() {
    let stmt = select("*").from("users").and_where("id > 1").page(0, 5);
    assert_eq!(stmt.render().unwrap(), stmt.render().unwrap());
}

// ==================== INSERT ====================

#[test]
fn test_insert_single_row() {
    let sql = insert_into("users")
        .set("email", "a@example.com")
        .set("age", 30)
        .render()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "users" ("email", "age") VALUES ('a@example.com', 30);"#
    );
}

#[test]
fn test_insert_null_and_bool() {
    let sql = insert_into("flags")
        .set("note", None::<String>)
        .set("enabled", true)
        .set("hidden", false)
        .set("score", SqlValue::Null)
        .render()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "flags" ("note", "enabled", "hidden", "score") VALUES (NULL, TRUE, FALSE, NULL);"#
    );
}

#[test]
fn test_insert_raw_value_is_not_quoted() {
    let sql = insert_into("events")
        .set("created_at", SqlValue::raw("now()"))
        .set("name", "it's")
        .render()
        .unwrap();
    assert_eq!(
        sql,
        r#"INSERT INTO "events" ("created_at", "name") VALUES (now(), 'it''s');"#
    );
}

#[test]
fn test_insert_multi_row() {
    let stmt = insert_into("users")
        .set_row(0, "name", "alice")
        .set_row(0, "age", 30)
        .set_row(1, "name", "bob")
        .set_row(1, "age", 25)
        .set_row(2, "name", "carol")
        .set_row(2, "age", 41);
    assert_eq!(stmt.column_count(), 2);
    assert_eq!(stmt.row_count(), 3);
    assert_eq!(
        stmt.render().unwrap(),
        "INSERT INTO \"users\" (\"name\", \"age\") VALUES ('alice', 30), \n('bob', 25), \n('carol', 41);"
    );
}

#[test]
fn test_insert_rows_keep_first_use_order() {
    let sql = insert_into("t")
        .set_row(5, "v", 1)
        .set_row(2, "v", 2)
        .set_row(5, "w", 3)
        .set_row(2, "w", 4)
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO \"t\" (\"v\", \"w\") VALUES (1, 3), \n(2, 4);"
    );
}

#[test]
fn test_insert_columns_deduplicated_across_rows() {
    let stmt = insert_into("t")
        .set("a", 1)
        .set("b", 2)
        .set_row(1, "b", 3)
        .set_row(1, "a", 4)
        .set_row(1, "c", 5);
    assert_eq!(stmt.column_count(), 3);
    assert_eq!(
        stmt.render().unwrap(),
        "INSERT INTO \"t\" (\"a\", \"b\", \"c\") VALUES (1, 2, DEFAULT), \n(4, 3, 5);"
    );
}

#[test]
fn test_insert_values_follow_column_order() {
    let sql = insert_into("t")
        .set_row(0, "a", 1)
        .set_row(0, "b", 2)
        .set_row(1, "b", 3)
        .set_row(1, "a", 4)
        .render()
        .unwrap();
    assert_eq!(sql, "INSERT INTO \"t\" (\"a\", \"b\") VALUES (1, 2), \n(4, 3);");
}

#[test]
fn test_insert_missing_cell_is_default() {
    let sql = insert_into("t")
        .set_row(0, "a", 1)
        .set_row(1, "b", 2)
        .render()
        .unwrap();
    assert_eq!(
        sql,
        "INSERT INTO \"t\" (\"a\", \"b\") VALUES (1, DEFAULT), \n(DEFAULT, 2);"
    );
}

#[test]
fn test_insert_same_column_last_write_wins() {
    let stmt = insert_into("t").set("a", 1).set("a", 2);
    assert_eq!(stmt.row_count(), 1);
    assert_eq!(stmt.render().unwrap(), "INSERT INTO \"t\" (\"a\") VALUES (2);");
}

#[test]
fn test_insert_without_columns_is_invalid() {
    let err = insert_into("t").render().unwrap_err();
    assert!(err.is_invalid_argument());
}

#[test]
fn test_insert_empty_key_is_invalid() {
    let err = insert_into("t").set("", 1).render().unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: column name cannot be empty");
}

// ==================== UPDATE ====================

#[test]
fn test_update() {
    let sql = update("users")
        .set("status", "inactive")
        .set("login_count", 0)
        .and_where("id = 7")
        .render()
        .unwrap();
    assert_eq!(
        sql,
        r#"UPDATE "users" SET "status" = 'inactive', "login_count" = 0 WHERE id = 7;"#
    );
}

#[test]
fn test_update_same_column_last_write_wins() {
    let sql = update("users")
        .set("status", "a")
        .set("status", "b")
        .and_where("id = 1")
        .render()
        .unwrap();
    assert_eq!(sql, r#"UPDATE "users" SET "status" = 'b' WHERE id = 1;"#);
}

#[test]
fn test_update_without_where_is_noop() {
    let sql = update("users").set("active", false).render().unwrap();
    assert_eq!(sql, r#"UPDATE "users" SET "active" = FALSE WHERE 1=0;"#);
}

#[test]
fn test_update_allow_all() {
    let sql = update("users")
        .set("active", false)
        .allow_update_all(true)
        .render()
        .unwrap();
    assert_eq!(sql, r#"UPDATE "users" SET "active" = FALSE;"#);
}

#[test]
fn test_update_without_set_is_invalid() {
    assert!(update("users").and_where("id = 1").render().is_err());
}

// ==================== DELETE ====================

#[test]
fn test_delete() {
    let sql = delete_from("users").and_where("id = 5").render().unwrap();
    assert_eq!(sql, r#"DELETE FROM "users" WHERE id = 5;"#);
}

#[test]
fn test_delete_and_combined() {
    let sql = delete_from("sessions")
        .and_where("user_id = 5")
        .and_where("expires_at < now()")
        .render()
        .unwrap();
    assert_eq!(
        sql,
        r#"DELETE FROM "sessions" WHERE user_id = 5 AND expires_at < now();"#
    );
}

#[test]
fn test_delete_without_where_is_noop() {
    let sql = delete_from("users").render().unwrap();
    assert_eq!(sql, r#"DELETE FROM "users" WHERE 1=0;"#);
    assert!(!sql.contains("WHERE ;"));
}

#[test]
fn test_delete_allow_all() {
    let sql = delete_from("users").allow_delete_all(true).render().unwrap();
    assert_eq!(sql, r#"DELETE FROM "users";"#);
}

#[test]
fn test_delete_set_table() {
    let sql = DeleteStmt::default()
        .set_table("logs")
        .and_where("level = 'debug'")
        .render()
        .unwrap();
    assert_eq!(sql, r#"DELETE FROM "logs" WHERE level = 'debug';"#);
}

#[test]
fn test_delete_default_without_table_is_invalid() {
    let err = DeleteStmt::default().and_where("id = 1").render().unwrap_err();
    assert_eq!(err.to_string(), "Invalid argument: table name is not set");
}
