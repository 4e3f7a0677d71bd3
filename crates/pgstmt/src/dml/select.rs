use crate::error::{StmtError, StmtResult};
use crate::quote::{quote_ident_list, validate_name};
use crate::statement::{ConfigError, Statement};

/// Kind of JOIN clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Outer,
}

impl JoinKind {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Inner => "INNER JOIN",
            Self::Left => "LEFT JOIN",
            Self::Right => "RIGHT JOIN",
            Self::Outer => "FULL OUTER JOIN",
        }
    }
}

/// How a joined relation is matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinConstraint {
    /// Raw predicate, emitted as-is after `ON`.
    On(String),
    /// Column names, quoted inside `USING (...)`.
    Using(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Join {
    pub kind: JoinKind,
    pub target: String,
    pub constraint: JoinConstraint,
}

impl Join {
    fn to_sql(&self) -> String {
        match &self.constraint {
            JoinConstraint::On(predicate) => {
                format!("{} {} ON {}", self.kind.as_sql(), self.target, predicate)
            }
            JoinConstraint::Using(columns) => format!(
                "{} {} USING ({})",
                self.kind.as_sql(),
                self.target,
                quote_ident_list(columns)
            ),
        }
    }
}

/// Sort direction for `ORDER BY`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// `SELECT` builder.
///
/// Projection, source and predicates are raw SQL fragments. Clauses with
/// nothing configured are left out entirely.
///
/// # Example
/// ```
/// use pgstmt::{SortOrder, Statement, select};
///
/// let sql = select("id, email")
///     .from("users")
///     .and_where("active = TRUE")
///     .sort_by("created_at", SortOrder::Desc)
///     .page(40, 20)
///     .render()?;
/// assert_eq!(
///     sql,
///     "SELECT id, email FROM users WHERE active = TRUE ORDER BY created_at DESC LIMIT 20 OFFSET 40;"
/// );
/// # Ok::<(), pgstmt::StmtError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectStmt {
    columns: Vec<String>,
    from: Option<String>,
    joins: Vec<Join>,
    predicates: Vec<String>,
    group_by: Vec<String>,
    sort_by: Vec<String>,
    offset: Option<u64>,
    length: Option<u64>,
    error: ConfigError,
}

impl SelectStmt {
    /// Create a builder selecting `*`.
    pub fn new() -> Self {
        Self::default()
    }

    fn record_fragment(&mut self, what: &str, fragment: &str) {
        if fragment.trim().is_empty() {
            self.error.record(Err(StmtError::invalid(format!("{what} cannot be empty"))));
        }
    }

    /// Set the projection (string form, supports complex expressions).
    pub fn select(mut self, cols: impl Into<String>) -> Self {
        let cols = cols.into();
        self.record_fragment("SELECT list", &cols);
        self.columns = vec![cols];
        self
    }

    /// Set the projection (list form).
    pub fn select_cols<I, S>(mut self, cols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cols: Vec<String> = cols.into_iter().map(Into::into).collect();
        for col in &cols {
            self.record_fragment("SELECT column", col);
        }
        self.columns = cols;
        self
    }

    /// Append one projected column or expression.
    pub fn add_select(mut self, col: impl Into<String>) -> Self {
        if self.columns.len() == 1 && self.columns[0] == "*" {
            self.columns.clear();
        }
        let col = col.into();
        self.record_fragment("SELECT column", &col);
        self.columns.push(col);
        self
    }

    /// Set the source table or expression.
    pub fn from(mut self, table: impl Into<String>) -> Self {
        let table = table.into();
        self.error.record(validate_name("FROM source", &table));
        self.from = Some(table);
        self
    }

    fn join(mut self, kind: JoinKind, target: String, constraint: JoinConstraint) -> Self {
        self.error.record(validate_name("JOIN target", &target));
        match &constraint {
            JoinConstraint::On(predicate) if predicate.trim().is_empty() => {
                self.error.record(Err(StmtError::invalid("JOIN predicate cannot be empty")));
            }
            JoinConstraint::Using(columns) => {
                if columns.is_empty() {
                    self.error
                        .record(Err(StmtError::invalid("JOIN USING needs at least one column")));
                }
                for column in columns {
                    self.error.record(validate_name("JOIN USING column", column));
                }
            }
            JoinConstraint::On(_) => {}
        }
        self.joins.push(Join {
            kind,
            target,
            constraint,
        });
        self
    }

    /// Add `INNER JOIN <target> ON <predicate>`.
    pub fn inner_join(self, target: impl Into<String>, on: impl Into<String>) -> Self {
        self.join(JoinKind::Inner, target.into(), JoinConstraint::On(on.into()))
    }

    /// Add `LEFT JOIN <target> ON <predicate>`.
    pub fn left_join(self, target: impl Into<String>, on: impl Into<String>) -> Self {
        self.join(JoinKind::Left, target.into(), JoinConstraint::On(on.into()))
    }

    /// Add `RIGHT JOIN <target> ON <predicate>`.
    pub fn right_join(self, target: impl Into<String>, on: impl Into<String>) -> Self {
        self.join(JoinKind::Right, target.into(), JoinConstraint::On(on.into()))
    }

    /// Add `FULL OUTER JOIN <target> ON <predicate>`.
    pub fn outer_join(self, target: impl Into<String>, on: impl Into<String>) -> Self {
        self.join(JoinKind::Outer, target.into(), JoinConstraint::On(on.into()))
    }

    /// Add `<kind> JOIN <target> USING ("<col>", ...)`.
    pub fn join_using<I, S>(self, kind: JoinKind, target: impl Into<String>, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let columns = columns.into_iter().map(Into::into).collect();
        self.join(kind, target.into(), JoinConstraint::Using(columns))
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

    pub fn group_by(mut self, expr: impl Into<String>) -> Self {
        let expr = expr.into();
        self.record_fragment("GROUP BY expression", &expr);
        self.group_by.push(expr);
        self
    }

    pub fn sort_by(mut self, expr: impl Into<String>, order: SortOrder) -> Self {
        let expr = expr.into();
        self.record_fragment("ORDER BY expression", &expr);
        self.sort_by.push(format!("{expr} {}", order.as_sql()));
        self
    }

    /// Set both OFFSET and LIMIT.
    pub fn page(mut self, offset: u64, length: u64) -> Self {
        self.offset = Some(offset);
        self.length = Some(length);
        self
    }

    /// Set OFFSET. Pagination is only rendered once an offset is set.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Set LIMIT. Has no effect until an offset is set.
    pub fn length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }

    pub fn joins(&self) -> &[Join] {
        &self.joins
    }

    pub fn predicates(&self) -> &[String] {
        &self.predicates
    }

    /// Report the first configuration error, if any.
    pub fn validate(&self) -> StmtResult<()> {
        self.error.check()?;
        if self.from.is_none() {
            return Err(StmtError::invalid("SELECT requires a FROM source"));
        }
        Ok(())
    }
}

impl Statement for SelectStmt {
    fn render(&self) -> StmtResult<String> {
        self.validate()?;

        let columns = if self.columns.is_empty() {
            "*".to_string()
        } else {
            self.columns.join(", ")
        };

        let mut clauses = vec![
            format!("SELECT {columns}"),
            format!("FROM {}", self.from.as_deref().unwrap_or_default()),
        ];

        clauses.extend(self.joins.iter().map(Join::to_sql));

        if !self.predicates.is_empty() {
            clauses.push(format!("WHERE {}", self.predicates.join(" AND ")));
        }

        if !self.group_by.is_empty() {
            clauses.push(format!("GROUP BY {}", self.group_by.join(", ")));
        }

        if !self.sort_by.is_empty() {
            clauses.push(format!("ORDER BY {}", self.sort_by.join(", ")));
        }

        if let Some(offset) = self.offset {
            match self.length {
                Some(length) => clauses.push(format!("LIMIT {length} OFFSET {offset}")),
                None => clauses.push(format!("LIMIT ALL OFFSET {offset}")),
            }
        }

        Ok(format!("{};", clauses.join(" ")))
    }
}
