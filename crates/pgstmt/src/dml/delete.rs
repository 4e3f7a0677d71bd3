use crate::error::{StmtError, StmtResult};
use crate::quote::{quote_ident, validate_name};
use crate::statement::{ConfigError, Statement};

/// `DELETE` builder.
///
/// Predicates are AND-combined. A DELETE without predicates renders a no-op
/// (`WHERE 1=0`) unless [`DeleteStmt::allow_delete_all`] is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeleteStmt {
    table: String,
    predicates: Vec<String>,
    allow_delete_all: bool,
    error: ConfigError,
}

impl DeleteStmt {
    /// Create a builder for the given table.
    pub fn new(table: impl Into<String>) -> Self {
        Self::default().set_table(table)
    }

    pub fn set_table(mut self, table: impl Into<String>) -> Self {
        let table = table.into();
        self.error.record(validate_name("table", &table));
        self.table = table;
        self
    }

    /// Add an AND-combined WHERE predicate.
    pub fn and_where(mut self, predicate: impl Into<String>) -> Self {
        let predicate = predicate.into();
        if predicate.trim().is_empty() {
            self.error.record(Err(StmtError::invalid("WHERE predicate cannot be empty")));
        }
        self.predicates.push(predicate);
        self
    }

    /// Allow DELETE without predicates to remove every row.
    pub fn allow_delete_all(mut self, allow: bool) -> Self {
        self.allow_delete_all = allow;
        self
    }

    /// Report the first configuration error, if any.
    pub fn validate(&self) -> StmtResult<()> {
        self.error.check()?;
        if self.table.is_empty() {
            return Err(StmtError::invalid("table name is not set"));
        }
        Ok(())
    }
}

impl Statement for DeleteStmt {
    fn render(&self) -> StmtResult<String> {
        self.validate()?;

        let table = quote_ident(&self.table);
        if self.predicates.is_empty() {
            if self.allow_delete_all {
                return Ok(format!("DELETE FROM {table};"));
            }
            return Ok(format!("DELETE FROM {table} WHERE 1=0;"));
        }

        Ok(format!(
            "DELETE FROM {} WHERE {};",
            table,
            self.predicates.join(" AND ")
        ))
    }
}
