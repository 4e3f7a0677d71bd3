//! # pgstmt
//!
//! Programmatic builders for PostgreSQL statements.
//!
//! ## Features
//!
//! - **DDL**: `CREATE TABLE` / `ALTER TABLE` from typed [`ColumnSpec`]s
//! - **DML**: `SELECT`, `INSERT` (multi-row), `UPDATE`, `DELETE`
//! - **Utility**: `DROP`, `TRUNCATE`, `RENAME`, `SET search_path`
//! - **Catalog introspection**: columns, indexes and primary key of a live table
//! - **Safe defaults**: DELETE and UPDATE without predicates match no rows
//! - **Logging**: wrap any client in [`InstrumentedClient`] to trace executed SQL
//!
//! Every builder renders one semicolon-terminated statement and can run it
//! through a [`GenericClient`] (a `tokio_postgres::Client`, a transaction, or
//! an [`InstrumentedClient`]).
//!
//! ```ignore
//! use pgstmt::{ColumnSpec, Statement, create_table, insert_into, select};
//!
//! create_table("users")
//!     .add_field("id", ColumnSpec::new("bigserial"))
//!     .add_field("email", ColumnSpec::new("varchar").length(255).not_null())
//!     .add_primary_key("id")
//!     .execute(&client)
//!     .await?;
//!
//! insert_into("users").set("email", "a@example.com").execute(&client).await?;
//!
//! let rows = select("id, email").from("users").query(&client).await?;
//! ```

pub mod catalog;
pub mod client;
pub mod column;
pub mod config;
pub mod ddl;
pub mod dml;
pub mod error;
pub mod monitor;
pub mod quote;
pub mod row;
pub mod statement;
pub mod utility;

pub use catalog::{Catalog, ColumnInfo, IndexInfo, KeyKind, classify_index};
pub use client::GenericClient;
pub use column::{ColumnSpec, DefaultValue};
pub use config::ConnectConfig;
pub use ddl::{AlterTable, ColumnDef, CreateTable, TableSpec};
pub use dml::{
    DeleteStmt, InsertStmt, Join, JoinConstraint, JoinKind, SelectStmt, SortOrder, SqlValue,
    UpdateStmt, delete_from, insert_into, select, select_from, update,
};
pub use error::{StmtError, StmtResult};
pub use monitor::{InstrumentedClient, MonitorConfig, StatementKind};
pub use row::{FromRow, RowExt};
pub use statement::Statement;
pub use utility::Utility;

/// Create a CREATE TABLE builder.
pub fn create_table(name: impl Into<String>) -> CreateTable {
    CreateTable::new(name)
}

/// Create an ALTER TABLE builder.
pub fn alter_table(name: impl Into<String>) -> AlterTable {
    AlterTable::new(name)
}

/// Create an empty utility builder.
pub fn utility() -> Utility {
    Utility::new()
}
