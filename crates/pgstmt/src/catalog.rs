//! Catalog introspection: columns, indexes and primary key of an existing table.
//!
//! The query builders are pure and return [`SelectStmt`]s; [`Catalog`] runs
//! them through a [`GenericClient`] and decodes the rows.

use crate::client::GenericClient;
use crate::dml::SelectStmt;
use crate::error::StmtResult;
use crate::quote::{quote_literal, validate_name};
use crate::row::{FromRow, RowExt};
use crate::statement::Statement;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

const COLUMN_LIST: [&str; 9] = [
    "columns.table_schema::text AS table_schema",
    "columns.column_name::text AS column_name",
    "columns.ordinal_position::int4 AS ordinal_position",
    "columns.column_default::text AS column_default",
    "columns.is_nullable::text AS is_nullable",
    "columns.data_type::text AS data_type",
    "columns.character_maximum_length::int4 AS character_maximum_length",
    "columns.character_octet_length::int4 AS character_octet_length",
    "pg_class2.relname::text AS index_type",
];

/// Key classification derived from the name of a column's backing index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum KeyKind {
    Primary,
    Unique,
}

impl KeyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Primary => "PRIMARY",
            Self::Unique => "UNIQUE",
        }
    }
}

impl std::fmt::Display for KeyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify an index by its name: `*_pkey` is primary, `*_key` is unique.
///
/// This mirrors PostgreSQL's default constraint index naming and nothing
/// more; an index named by hand may be misclassified.
pub fn classify_index(index_name: &str) -> Option<KeyKind> {
    if index_name.ends_with("_pkey") {
        Some(KeyKind::Primary)
    } else if index_name.ends_with("_key") {
        Some(KeyKind::Unique)
    } else {
        None
    }
}

/// One row of [`Catalog::list_columns`].
///
/// A column covered by several indexes appears once per index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    pub table_schema: String,
    pub column_name: String,
    pub ordinal_position: i32,
    pub column_default: Option<String>,
    pub is_nullable: String,
    pub data_type: String,
    pub character_maximum_length: Option<i32>,
    pub character_octet_length: Option<i32>,
    pub index_type: Option<String>,
    pub key: Option<KeyKind>,
}

impl ColumnInfo {
    pub fn nullable(&self) -> bool {
        self.is_nullable.eq_ignore_ascii_case("YES")
    }
}

impl FromRow for ColumnInfo {
    fn from_row(row: &Row) -> StmtResult<Self> {
        let index_type: Option<String> = row.try_get_column("index_type")?;
        let key = index_type.as_deref().and_then(classify_index);
        Ok(Self {
            table_schema: row.try_get_column("table_schema")?,
            column_name: row.try_get_column("column_name")?,
            ordinal_position: row.try_get_column("ordinal_position")?,
            column_default: row.try_get_column("column_default")?,
            is_nullable: row.try_get_column("is_nullable")?,
            data_type: row.try_get_column("data_type")?,
            character_maximum_length: row.try_get_column("character_maximum_length")?,
            character_octet_length: row.try_get_column("character_octet_length")?,
            index_type,
            key,
        })
    }
}

/// One row of [`Catalog::list_indexes`]: a column and the index covering it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexInfo {
    pub column_name: String,
    pub index_type: String,
}

impl FromRow for IndexInfo {
    fn from_row(row: &Row) -> StmtResult<Self> {
        Ok(Self {
            column_name: row.try_get_column("column_name")?,
            index_type: row.try_get_column("index_type")?,
        })
    }
}

fn base_query(table: &str, schema: Option<&str>, index_joins_required: bool) -> SelectStmt {
    let mut columns_on = String::from(
        "columns.column_name = pg_attribute.attname AND columns.table_name = pg_class1.relname",
    );
    if let Some(schema) = schema {
        columns_on.push_str(" AND columns.table_schema = ");
        columns_on.push_str(&quote_literal(schema));
    }

    let index_on =
        "pg_class1.oid = pg_index.indrelid AND pg_attribute.attnum = ANY(pg_index.indkey)";
    let index_class_on = "pg_class2.oid = pg_index.indexrelid";

    let stmt = SelectStmt::new()
        .from("pg_attribute")
        .inner_join(
            "pg_class AS pg_class1",
            format!(
                "pg_attribute.attrelid = pg_class1.oid AND pg_class1.relname = {}",
                quote_literal(table)
            ),
        )
        .inner_join("information_schema.columns AS columns", columns_on);

    if index_joins_required {
        stmt.inner_join("pg_index", index_on)
            .inner_join("pg_class AS pg_class2", index_class_on)
    } else {
        stmt.left_join("pg_index", index_on)
            .left_join("pg_class AS pg_class2", index_class_on)
    }
}

fn check_target(table: &str, schema: Option<&str>) -> StmtResult<()> {
    validate_name("table", table)?;
    if let Some(schema) = schema {
        validate_name("schema", schema)?;
    }
    Ok(())
}

/// Every column of `table`, with the index (if any) backing each one.
pub fn columns_query(table: &str, schema: Option<&str>) -> StmtResult<SelectStmt> {
    check_target(table, schema)?;
    Ok(base_query(table, schema, false).select_cols(COLUMN_LIST))
}

/// Column/index pairs for every indexed column of `table`.
pub fn indexes_query(table: &str, schema: Option<&str>) -> StmtResult<SelectStmt> {
    check_target(table, schema)?;
    Ok(base_query(table, schema, true).select_cols([
        "columns.column_name::text AS column_name",
        "pg_class2.relname::text AS index_type",
    ]))
}

/// Columns of `table` covered by its primary key index.
pub fn primary_key_query(table: &str, schema: Option<&str>) -> StmtResult<SelectStmt> {
    check_target(table, schema)?;
    Ok(base_query(table, schema, true)
        .select("columns.column_name::text AS column_name")
        .and_where("pg_class2.relname LIKE '%_pkey'"))
}

/// User tables, skipping the `pg_` and `sql_` system prefixes.
pub fn tables_query() -> SelectStmt {
    SelectStmt::new()
        .select("tablename::text AS tablename")
        .from("pg_tables")
        .and_where(r"tablename NOT LIKE 'pg\_%'")
        .and_where(r"tablename NOT LIKE 'sql\_%'")
}

/// Runs the introspection queries against a live connection.
///
/// # Example
/// ```ignore
/// let catalog = Catalog::new(&client);
/// for column in catalog.list_columns("users", Some("public")).await? {
///     println!("{} {} {:?}", column.column_name, column.data_type, column.key);
/// }
/// ```
pub struct Catalog<'a, C> {
    client: &'a C,
}

impl<'a, C: GenericClient> Catalog<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    pub async fn list_columns(
        &self,
        table: &str,
        schema: Option<&str>,
    ) -> StmtResult<Vec<ColumnInfo>> {
        columns_query(table, schema)?.fetch_all(self.client).await
    }

    pub async fn list_indexes(
        &self,
        table: &str,
        schema: Option<&str>,
    ) -> StmtResult<Vec<IndexInfo>> {
        indexes_query(table, schema)?.fetch_all(self.client).await
    }

    /// Names of the primary key columns, in catalog order.
    pub async fn list_primary_key(
        &self,
        table: &str,
        schema: Option<&str>,
    ) -> StmtResult<Vec<String>> {
        let rows = primary_key_query(table, schema)?.query(self.client).await?;
        rows.iter()
            .map(|row| row.try_get_column("column_name"))
            .collect()
    }

    pub async fn list_tables(&self) -> StmtResult<Vec<String>> {
        let rows = tables_query().query(self.client).await?;
        rows.iter()
            .map(|row| row.try_get_column("tablename"))
            .collect()
    }
}
