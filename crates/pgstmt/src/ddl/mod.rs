//! Data-definition builders: `CREATE TABLE` and `ALTER TABLE`.
//!
//! Both builders share the column rendering rule of [`ColumnSpec`], so a column
//! renders the same way whether it is created or added later.
//!
//! ```
//! use pgstmt::{AlterTable, ColumnSpec, Statement};
//!
//! let sql = AlterTable::new("users")
//!     .remove_field("nickname")
//!     .add_field("age", ColumnSpec::new("int").not_null().default_value(0))
//!     .render()?;
//! assert_eq!(
//!     sql,
//!     "ALTER TABLE \"users\" DROP COLUMN \"nickname\", \n\
//!      ADD \"age\" int NOT NULL DEFAULT 0;"
//! );
//! # Ok::<(), pgstmt::StmtError>(())
//! ```

mod alter;
mod create;

pub use alter::AlterTable;
pub use create::CreateTable;

use crate::column::ColumnSpec;
use serde::{Deserialize, Serialize};

/// Insert or replace `name` keeping the position of its first insertion.
fn upsert_field(fields: &mut Vec<(String, ColumnSpec)>, name: String, spec: ColumnSpec) {
    match fields.iter_mut().find(|(existing, _)| *existing == name) {
        Some((_, slot)) => *slot = spec,
        None => fields.push((name, spec)),
    }
}

/// A named column inside a [`TableSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(flatten)]
    pub spec: ColumnSpec,
}

/// Serializable description of a table, e.g. loaded from TOML.
///
/// ```toml
/// name = "users"
/// primary_keys = ["id"]
///
/// [[columns]]
/// name = "id"
/// type = "bigserial"
///
/// [[columns]]
/// name = "email"
/// type = "varchar"
/// length = 255
/// null = false
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    pub name: String,
    #[serde(default)]
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub primary_keys: Vec<String>,
    #[serde(default)]
    pub with_oids: bool,
}

impl TableSpec {
    /// Turn the description into a `CREATE TABLE` builder.
    pub fn to_create(&self) -> CreateTable {
        CreateTable::new(self.name.as_str())
            .set_fields(
                self.columns
                    .iter()
                    .map(|c| (c.name.as_str(), c.spec.clone())),
            )
            .set_primary_keys(self.primary_keys.iter().map(String::as_str))
            .with_oids(self.with_oids)
    }
}
