//! Column attribute model shared by CREATE TABLE and ALTER TABLE.

use crate::error::{StmtError, StmtResult};
use crate::quote::{quote_literal, validate_name};
use serde::{Deserialize, Serialize};

/// Default value of a column.
///
/// Text renders as a quoted literal and numbers render bare. Booleans are
/// accepted for convenience but never rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl DefaultValue {
    /// Render as the `DEFAULT ...` fragment, or `None` when the value is dropped.
    fn to_sql(&self) -> Option<String> {
        match self {
            Self::Bool(_) => None,
            Self::Int(v) => Some(format!("DEFAULT {v}")),
            Self::Float(v) => Some(format!("DEFAULT {v}")),
            Self::Text(v) => Some(format!("DEFAULT {}", quote_literal(v))),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<i64> for DefaultValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for DefaultValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for DefaultValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for DefaultValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Attributes of one column.
///
/// Rendering order is fixed: type (with length and `[]`), free-text attribute,
/// `UNIQUE`, nullability, default.
///
/// # Example
/// ```
/// use pgstmt::ColumnSpec;
///
/// let email = ColumnSpec::new("varchar").length(255).not_null();
/// assert_eq!(email.to_sql(), "varchar(255) NOT NULL");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSpec {
    /// SQL type keyword.
    #[serde(rename = "type")]
    pub sql_type: Option<String>,
    /// Parenthesized after the type. Ignored without a type.
    pub length: Option<u32>,
    /// Array column (`type[]`).
    pub list: bool,
    /// Free-text SQL fragment emitted after the type.
    pub attribute: Option<String>,
    pub unique: bool,
    /// `None` says nothing, `Some(true)` is `DEFAULT NULL`, `Some(false)` is `NOT NULL`.
    #[serde(rename = "null")]
    pub nullable: Option<bool>,
    /// Dropped when `nullable` is `Some(true)`.
    pub default: Option<DefaultValue>,
    /// New column name, only used by ALTER TABLE changes.
    pub rename: Option<String>,
}

impl ColumnSpec {
    /// Column of the given SQL type.
    pub fn new(sql_type: impl Into<String>) -> Self {
        Self {
            sql_type: Some(sql_type.into()),
            ..Self::default()
        }
    }

    /// Column without a type, for ALTER changes that only touch constraints.
    pub fn untyped() -> Self {
        Self::default()
    }

    pub fn length(mut self, length: u32) -> Self {
        self.length = Some(length);
        self
    }

    /// Make this an array column.
    pub fn list(mut self) -> Self {
        self.list = true;
        self
    }

    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attribute = Some(attribute.into());
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Emit `DEFAULT NULL`. Any default value is dropped.
    pub fn nullable(mut self) -> Self {
        self.nullable = Some(true);
        self
    }

    /// Emit `NOT NULL`.
    pub fn not_null(mut self) -> Self {
        self.nullable = Some(false);
        self
    }

    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Rename the column (ALTER TABLE `CHANGE`).
    pub fn rename(mut self, new_name: impl Into<String>) -> Self {
        self.rename = Some(new_name.into());
        self
    }

    /// Check the attribute shapes. Called by builders when the spec is registered.
    pub fn validate(&self) -> StmtResult<()> {
        if let Some(ty) = &self.sql_type
            && ty.trim().is_empty()
        {
            return Err(StmtError::invalid("column type cannot be empty"));
        }
        if self.length == Some(0) {
            return Err(StmtError::invalid("column length must be positive"));
        }
        if let Some(DefaultValue::Float(v)) = &self.default
            && !v.is_finite()
        {
            return Err(StmtError::invalid(format!(
                "column default must be a finite number, got {v}"
            )));
        }
        if let Some(new_name) = &self.rename {
            validate_name("column", new_name)?;
        }
        Ok(())
    }

    /// Append the rendered attribute fragments to `parts`.
    pub(crate) fn push_sql_parts(&self, parts: &mut Vec<String>) {
        if let Some(ty) = &self.sql_type {
            let mut rendered = match self.length {
                Some(len) => format!("{ty}({len})"),
                None => ty.clone(),
            };
            if self.list {
                rendered.push_str("[]");
            }
            parts.push(rendered);
        }

        if let Some(attribute) = &self.attribute {
            parts.push(attribute.clone());
        }

        if self.unique {
            parts.push("UNIQUE".to_string());
        }

        match self.nullable {
            Some(false) => parts.push("NOT NULL".to_string()),
            Some(true) => parts.push("DEFAULT NULL".to_string()),
            None => {}
        }

        if self.nullable != Some(true)
            && let Some(default) = self.default.as_ref().and_then(DefaultValue::to_sql)
        {
            parts.push(default);
        }
    }

    /// Render the attribute fragments without a column name.
    pub fn to_sql(&self) -> String {
        let mut parts = Vec::new();
        self.push_sql_parts(&mut parts);
        parts.join(" ")
    }

    /// Render `head` followed by the attribute fragments.
    pub(crate) fn render_with(&self, head: String) -> String {
        let mut parts = vec![head];
        self.push_sql_parts(&mut parts);
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_only() {
        assert_eq!(ColumnSpec::new("text").to_sql(), "text");
    }

    #[test]
    fn type_length_list() {
        let spec = ColumnSpec::new("varchar").length(32).list();
        assert_eq!(spec.to_sql(), "varchar(32)[]");
    }

    #[test]
    fn length_without_type_is_ignored() {
        let spec = ColumnSpec::untyped().length(10).not_null();
        assert_eq!(spec.to_sql(), "NOT NULL");
    }

    #[test]
    fn full_order() {
        let spec = ColumnSpec::new("int")
            .attribute("CHECK (post_flag >= 0)")
            .unique()
            .not_null()
            .default_value(0);
        assert_eq!(
            spec.to_sql(),
            "int CHECK (post_flag >= 0) UNIQUE NOT NULL DEFAULT 0"
        );
    }

    #[test]
    fn text_default_is_quoted() {
        let spec = ColumnSpec::new("text").default_value("post");
        assert_eq!(spec.to_sql(), "text DEFAULT 'post'");
    }

    #[test]
    fn text_default_escapes_quote() {
        let spec = ColumnSpec::new("text").default_value("it's");
        assert_eq!(spec.to_sql(), "text DEFAULT 'it''s'");
    }

    #[test]
    fn numeric_text_default_stays_text() {
        let spec = ColumnSpec::new("text").default_value("1");
        assert_eq!(spec.to_sql(), "text DEFAULT '1'");
    }

    #[test]
    fn float_default() {
        let spec = ColumnSpec::new("real").default_value(1.5);
        assert_eq!(spec.to_sql(), "real DEFAULT 1.5");
    }

    #[test]
    fn nullable_drops_default() {
        let spec = ColumnSpec::new("text").nullable().default_value("x");
        assert_eq!(spec.to_sql(), "text DEFAULT NULL");
    }

    #[test]
    fn not_null_keeps_default() {
        let spec = ColumnSpec::new("int").not_null().default_value(1);
        assert_eq!(spec.to_sql(), "int NOT NULL DEFAULT 1");
    }

    #[test]
    fn bool_default_is_dropped() {
        let spec = ColumnSpec::new("boolean").default_value(true);
        assert_eq!(spec.to_sql(), "boolean");
    }

    #[test]
    fn rendering_is_deterministic() {
        let spec = ColumnSpec::new("varchar")
            .length(255)
            .unique()
            .not_null()
            .default_value("a");
        assert_eq!(spec.to_sql(), spec.clone().to_sql());
    }

    #[test]
    fn validate_rejects_zero_length() {
        let err = ColumnSpec::new("varchar").length(0).validate().unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn validate_rejects_blank_type() {
        assert!(ColumnSpec::new("  ").validate().is_err());
    }

    #[test]
    fn validate_rejects_nan_default() {
        assert!(ColumnSpec::new("real").default_value(f64::NAN).validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_rename() {
        assert!(ColumnSpec::new("text").rename("").validate().is_err());
    }

    #[test]
    fn deserialize_from_toml() {
        let spec: ColumnSpec = toml::from_str(
            r#"
type = "varchar"
length = 255
null = false
default = "guest"
"#,
        )
        .unwrap();
        assert_eq!(spec.to_sql(), "varchar(255) NOT NULL DEFAULT 'guest'");
    }
}
