use super::value::SqlValue;
use crate::error::{StmtError, StmtResult};
use crate::quote::{quote_ident, quote_ident_list, validate_name};
use crate::statement::{ConfigError, Statement};

/// `INSERT` builder supporting multi-row VALUES lists.
///
/// The column list is collected from every `set` call in order of first
/// appearance, whatever row the value belongs to. Rows are emitted in the
/// order their index was first used, each with its values laid out in column
/// order. A cell a row never set renders as `DEFAULT`; setting the same
/// column twice on one row keeps the last value.
///
/// # Example
/// ```
/// use pgstmt::{InsertStmt, Statement};
///
/// let sql = InsertStmt::new("users")
///     .set("email", "a@example.com")
///     .set("age", 30)
///     .render()?;
/// assert_eq!(sql, r#"INSERT INTO "users" ("email", "age") VALUES ('a@example.com', 30);"#);
/// # Ok::<(), pgstmt::StmtError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
struct InsertRow {
    index: usize,
    cells: Vec<(String, SqlValue)>,
}

impl InsertRow {
    fn set(&mut self, key: String, value: SqlValue) {
        match self.cells.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.cells.push((key, value)),
        }
    }

    fn value_of(&self, column: &str) -> Option<&SqlValue> {
        self.cells.iter().find(|(k, _)| k == column).map(|(_, v)| v)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertStmt {
    table: String,
    columns: Vec<String>,
    rows: Vec<InsertRow>,
    error: ConfigError,
}

impl InsertStmt {
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

    /// Set a column value on the first row.
    pub fn set(self, key: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.set_row(0, key, value)
    }

    /// Set a column value on the row with index `row`.
    pub fn set_row(
        mut self,
        row: usize,
        key: impl Into<String>,
        value: impl Into<SqlValue>,
    ) -> Self {
        let key = key.into();
        self.error.record(validate_name("column", &key));

        if !self.columns.contains(&key) {
            self.columns.push(key.clone());
        }

        let value = value.into();
        match self.rows.iter_mut().find(|r| r.index == row) {
            Some(existing) => existing.set(key, value),
            None => self.rows.push(InsertRow {
                index: row,
                cells: vec![(key, value)],
            }),
        }
        self
    }

    /// Number of distinct columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Number of VALUES rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Report the first configuration error, if any.
    pub fn validate(&self) -> StmtResult<()> {
        self.error.check()?;
        if self.table.is_empty() {
            return Err(StmtError::invalid("table name is not set"));
        }
        if self.columns.is_empty() {
            return Err(StmtError::invalid("INSERT requires at least one column"));
        }
        Ok(())
    }
}

impl Statement for InsertStmt {
    fn render(&self) -> StmtResult<String> {
        self.validate()?;

        let rows = self
            .rows
            .iter()
            .map(|row| {
                let values = self
                    .columns
                    .iter()
                    .map(|column| {
                        row.value_of(column)
                            .map_or_else(|| "DEFAULT".to_string(), SqlValue::to_sql)
                    })
                    .collect::<Vec<_>>();
                format!("({})", values.join(", "))
            })
            .collect::<Vec<_>>();

        Ok(format!(
            "INSERT INTO {} ({}) VALUES {};",
            quote_ident(&self.table),
            quote_ident_list(&self.columns),
            rows.join(", \n")
        ))
    }
}
