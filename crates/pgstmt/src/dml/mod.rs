//! Data-manipulation builders: `SELECT`, `INSERT`, `UPDATE` and `DELETE`.
//!
//! Values written by INSERT and UPDATE are rendered inline through
//! [`SqlValue`]; predicates, projections and join conditions are raw SQL
//! fragments supplied by the caller.
//!
//! ```
//! use pgstmt::{Statement, dml};
//!
//! let sql = dml::delete_from("users").and_where("id = 5").render()?;
//! assert_eq!(sql, r#"DELETE FROM "users" WHERE id = 5;"#);
//! # Ok::<(), pgstmt::StmtError>(())
//! ```

mod delete;
mod insert;
mod select;
mod update;
mod value;

pub use delete::DeleteStmt;
pub use insert::InsertStmt;
pub use select::{Join, JoinConstraint, JoinKind, SelectStmt, SortOrder};
pub use update::UpdateStmt;
pub use value::SqlValue;

/// Create a SELECT builder with the given projection.
pub fn select(cols: impl Into<String>) -> SelectStmt {
    SelectStmt::new().select(cols)
}

/// Create a `SELECT *` builder reading from `table`.
pub fn select_from(table: impl Into<String>) -> SelectStmt {
    SelectStmt::new().from(table)
}

/// Create an INSERT builder.
pub fn insert_into(table: impl Into<String>) -> InsertStmt {
    InsertStmt::new(table)
}

/// Create an UPDATE builder.
pub fn update(table: impl Into<String>) -> UpdateStmt {
    UpdateStmt::new(table)
}

/// Create a DELETE builder.
pub fn delete_from(table: impl Into<String>) -> DeleteStmt {
    DeleteStmt::new(table)
}

#[cfg(test)]
mod tests;
