use super::value::SqlValue;
use crate::error::{StmtError, StmtResult};
use crate::quote::{quote_ident, validate_name};
use crate::statement::{ConfigError, Statement};

/// `UPDATE` builder.
///
/// Values render like [`InsertStmt`](super::InsertStmt) values. Without
/// predicates the statement is a no-op (`WHERE 1=0`) unless
/// [`UpdateStmt::allow_update_all`] is set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateStmt {
    table: String,
    sets: Vec<(String, SqlValue)>,
    predicates: Vec<String>,
    allow_update_all: bool,
    error: ConfigError,
}

impl UpdateStmt {
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

    /// Assign a column. Setting the same column twice keeps the last value.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        let key = key.into();
        self.error.record(validate_name("column", &key));
        let value = value.into();
        match self.sets.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = value,
            None => self.sets.push((key, value)),
        }
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

    /// Allow UPDATE without predicates to touch every row.
    pub fn allow_update_all(mut self, allow: bool) -> Self {
        self.allow_update_all = allow;
        self
    }

    /// Report the first configuration error, if any.
    pub fn validate(&self) -> StmtResult<()> {
        self.error.check()?;
        if self.table.is_empty() {
            return Err(StmtError::invalid("table name is not set"));
        }
        if self.sets.is_empty() {
            return Err(StmtError::invalid("UPDATE requires at least one SET column"));
        }
        Ok(())
    }
}

impl Statement for UpdateStmt {
    fn render(&self) -> StmtResult<String> {
        self.validate()?;

        let sets = self
            .sets
            .iter()
            .map(|(key, value)| format!("{} = {}", quote_ident(key), value.to_sql()))
            .collect::<Vec<_>>()
            .join(", ");

        let mut sql = format!("UPDATE {} SET {}", quote_ident(&self.table), sets);

        if !self.predicates.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.predicates.join(" AND "));
        } else if !self.allow_update_all {
            sql.push_str(" WHERE 1=0");
        }

        sql.push(';');
        Ok(sql)
    }
}
