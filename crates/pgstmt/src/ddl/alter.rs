use super::upsert_field;
use crate::column::ColumnSpec;
use crate::error::{StmtError, StmtResult};
use crate::quote::{quote_ident, quote_ident_list, validate_name};
use crate::statement::{ConfigError, Statement};

/// `ALTER TABLE` builder.
///
/// Clauses are emitted in a fixed order, joined with `", \n"`:
/// dropped columns, added columns, changed columns, dropped primary keys,
/// then a single `ADD PRIMARY KEY (...)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlterTable {
    name: String,
    add_fields: Vec<(String, ColumnSpec)>,
    change_fields: Vec<(String, ColumnSpec)>,
    remove_fields: Vec<String>,
    add_primary_keys: Vec<String>,
    remove_primary_keys: Vec<String>,
    error: ConfigError,
}

impl AlterTable {
    /// Create a builder for the given table.
    pub fn new(name: impl Into<String>) -> Self {
        Self::default().set_name(name)
    }

    /// Set the table name.
    pub fn set_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.error.record(validate_name("table", &name));
        self.name = name;
        self
    }

    /// `ADD "<name>" <attrs>`
    pub fn add_field(mut self, name: impl Into<String>, spec: ColumnSpec) -> Self {
        let name = name.into();
        self.error.record(validate_name("column", &name));
        self.error.record(spec.validate());
        upsert_field(&mut self.add_fields, name, spec);
        self
    }

    /// `ALTER COLUMN "<name>" <attrs>`, or `CHANGE "<name>" "<new>" <attrs>`
    /// when the spec carries a rename.
    pub fn change_field(mut self, name: impl Into<String>, spec: ColumnSpec) -> Self {
        let name = name.into();
        self.error.record(validate_name("column", &name));
        self.error.record(spec.validate());
        upsert_field(&mut self.change_fields, name, spec);
        self
    }

    /// `DROP COLUMN "<name>"`
    pub fn remove_field(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.error.record(validate_name("column", &name));
        self.remove_fields.push(name);
        self
    }

    pub fn add_primary_key(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.error.record(validate_name("primary key", &name));
        self.add_primary_keys.push(name);
        self
    }

    /// `DROP PRIMARY KEY "<name>"`
    pub fn remove_primary_key(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.error.record(validate_name("primary key", &name));
        self.remove_primary_keys.push(name);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether no clause has been configured.
    pub fn is_empty(&self) -> bool {
        self.add_fields.is_empty()
            && self.change_fields.is_empty()
            && self.remove_fields.is_empty()
            && self.add_primary_keys.is_empty()
            && self.remove_primary_keys.is_empty()
    }

    /// Report the first configuration error, if any.
    pub fn validate(&self) -> StmtResult<()> {
        self.error.check()?;
        if self.name.is_empty() {
            return Err(StmtError::invalid("table name is not set"));
        }
        Ok(())
    }
}

impl Statement for AlterTable {
    fn render(&self) -> StmtResult<String> {
        self.validate()?;

        let mut clauses = Vec::new();

        for name in &self.remove_fields {
            clauses.push(format!("DROP COLUMN {}", quote_ident(name)));
        }

        for (name, spec) in &self.add_fields {
            clauses.push(spec.render_with(format!("ADD {}", quote_ident(name))));
        }

        for (name, spec) in &self.change_fields {
            let head = match &spec.rename {
                Some(new_name) => {
                    format!("CHANGE {} {}", quote_ident(name), quote_ident(new_name))
                }
                None => format!("ALTER COLUMN {}", quote_ident(name)),
            };
            clauses.push(spec.render_with(head));
        }

        for key in &self.remove_primary_keys {
            clauses.push(format!("DROP PRIMARY KEY {}", quote_ident(key)));
        }

        if !self.add_primary_keys.is_empty() {
            clauses.push(format!(
                "ADD PRIMARY KEY ({})",
                quote_ident_list(&self.add_primary_keys)
            ));
        }

        Ok(format!(
            "ALTER TABLE {} {};",
            quote_ident(&self.name),
            clauses.join(", \n")
        ))
    }
}
