use super::upsert_field;
use crate::column::ColumnSpec;
use crate::error::{StmtError, StmtResult};
use crate::quote::{quote_ident, quote_ident_list, validate_name};
use crate::statement::{ConfigError, Statement};

/// `CREATE TABLE` builder.
///
/// # Example
/// ```
/// use pgstmt::{ColumnSpec, CreateTable, Statement};
///
/// let sql = CreateTable::new("users")
///     .add_field("id", ColumnSpec::new("bigserial"))
///     .add_primary_key("id")
///     .render()?;
/// assert_eq!(sql, r#"CREATE TABLE "users" ("id" bigserial, PRIMARY KEY ("id")) ;"#);
/// # Ok::<(), pgstmt::StmtError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateTable {
    name: String,
    fields: Vec<(String, ColumnSpec)>,
    primary_keys: Vec<String>,
    oids: bool,
    error: ConfigError,
}

impl CreateTable {
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

    /// Add a column. Re-adding a name replaces its spec in place.
    pub fn add_field(mut self, name: impl Into<String>, spec: ColumnSpec) -> Self {
        let name = name.into();
        self.error.record(validate_name("column", &name));
        self.error.record(spec.validate());
        upsert_field(&mut self.fields, name, spec);
        self
    }

    /// Replace the whole column list.
    pub fn set_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (S, ColumnSpec)>,
        S: Into<String>,
    {
        self.fields.clear();
        for (name, spec) in fields {
            self = self.add_field(name, spec);
        }
        self
    }

    /// Append a primary key column. Duplicates are kept.
    pub fn add_primary_key(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.error.record(validate_name("primary key", &name));
        self.primary_keys.push(name);
        self
    }

    /// Replace the primary key list.
    pub fn set_primary_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.primary_keys.clear();
        for key in keys {
            self = self.add_primary_key(key);
        }
        self
    }

    /// Emit `WITH OIDS` after the column list.
    pub fn with_oids(mut self, oids: bool) -> Self {
        self.oids = oids;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[(String, ColumnSpec)] {
        &self.fields
    }

    pub fn primary_keys(&self) -> &[String] {
        &self.primary_keys
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

impl Statement for CreateTable {
    fn render(&self) -> StmtResult<String> {
        self.validate()?;

        let mut definitions: Vec<String> = self
            .fields
            .iter()
            .map(|(name, spec)| spec.render_with(quote_ident(name)))
            .collect();

        if !self.primary_keys.is_empty() {
            definitions.push(format!(
                "PRIMARY KEY ({})",
                quote_ident_list(&self.primary_keys)
            ));
        }

        let oids = if self.oids { "WITH OIDS" } else { "" };

        Ok(format!(
            "CREATE TABLE {} ({}) {};",
            quote_ident(&self.name),
            definitions.join(", "),
            oids
        ))
    }
}
