//! Single-statement maintenance commands.
//!
//! A [`Utility`] holds at most one statement. Every configuring call replaces
//! whatever was set before, so `render()` reports the last one.
//!
//! ```
//! use pgstmt::{Statement, Utility};
//!
//! let sql = Utility::new().truncate("sessions").drop_table("users").render()?;
//! assert_eq!(sql, r#"DROP TABLE "users";"#);
//! # Ok::<(), pgstmt::StmtError>(())
//! ```

use crate::error::{StmtError, StmtResult};
use crate::quote::{quote_ident, validate_name};
use crate::statement::{ConfigError, Statement};

#[derive(Debug, Clone, PartialEq, Eq)]
enum UtilityCommand {
    DropTable(String),
    Truncate(String),
    RenameTable { from: String, to: String },
    SetSearchPath(String),
}

impl UtilityCommand {
    fn to_sql(&self) -> String {
        match self {
            Self::DropTable(table) => format!("DROP TABLE {};", quote_ident(table)),
            Self::Truncate(table) => format!("TRUNCATE {};", quote_ident(table)),
            Self::RenameTable { from, to } => {
                format!("RENAME TABLE {} TO {};", quote_ident(from), quote_ident(to))
            }
            Self::SetSearchPath(path) => format!("SET search_path TO {path};"),
        }
    }
}

/// Builder for DROP / TRUNCATE / RENAME / `SET search_path`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Utility {
    command: Option<UtilityCommand>,
    error: ConfigError,
}

impl Utility {
    pub fn new() -> Self {
        Self::default()
    }

    // Replacing the command also forgets errors from the replaced call.
    fn replace(mut self, command: UtilityCommand, check: StmtResult<()>) -> Self {
        self.error = ConfigError::default();
        self.error.record(check);
        self.command = Some(command);
        self
    }

    /// `DROP TABLE "<name>";`
    pub fn drop_table(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let check = validate_name("table", &name);
        self.replace(UtilityCommand::DropTable(name), check)
    }

    /// `TRUNCATE "<name>";`
    pub fn truncate(self, name: impl Into<String>) -> Self {
        let name = name.into();
        let check = validate_name("table", &name);
        self.replace(UtilityCommand::Truncate(name), check)
    }

    /// `RENAME TABLE "<old>" TO "<new>";`
    pub fn rename_table(self, from: impl Into<String>, to: impl Into<String>) -> Self {
        let from = from.into();
        let to = to.into();
        let check = validate_name("table", &from).and_then(|_| validate_name("table", &to));
        self.replace(UtilityCommand::RenameTable { from, to }, check)
    }

    /// `SET search_path TO <schemas>;` with the list emitted verbatim.
    pub fn set_schema(self, schemas: impl Into<String>) -> Self {
        let schemas = schemas.into();
        let check = if schemas.trim().is_empty() {
            Err(StmtError::invalid("search path cannot be empty"))
        } else {
            Ok(())
        };
        self.replace(UtilityCommand::SetSearchPath(schemas), check)
    }

    /// `SET search_path TO "<a>","<b>";` from individual schema names.
    pub fn set_schemas<I, S>(self, schemas: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut check = Ok(());
        let mut quoted = Vec::new();
        for schema in schemas {
            let schema = schema.as_ref();
            if check.is_ok() {
                check = validate_name("schema", schema);
            }
            quoted.push(quote_ident(schema));
        }
        if quoted.is_empty() {
            check = Err(StmtError::invalid("search path cannot be empty"));
        }
        self.replace(UtilityCommand::SetSearchPath(quoted.join(",")), check)
    }

    pub fn is_empty(&self) -> bool {
        self.command.is_none()
    }

    /// Report the configuration error of the current command, if any.
    pub fn validate(&self) -> StmtResult<()> {
        self.error.check()?;
        if self.command.is_none() {
            return Err(StmtError::invalid("utility statement is not set"));
        }
        Ok(())
    }
}

impl Statement for Utility {
    fn render(&self) -> StmtResult<String> {
        self.validate()?;
        match &self.command {
            Some(command) => Ok(command.to_sql()),
            None => Err(StmtError::invalid("utility statement is not set")),
        }
    }
}
