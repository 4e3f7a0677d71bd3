use crate::quote::quote_literal;

/// A value written by INSERT or UPDATE.
///
/// Values are rendered inline: `NULL`, `TRUE`/`FALSE`, bare numbers and quoted
/// text. [`SqlValue::Raw`] is copied verbatim, so the caller owns the safety of
/// whatever it contains.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Raw(String),
}

impl SqlValue {
    /// An unquoted SQL fragment, e.g. `now()` or `DEFAULT`.
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }

    pub fn to_sql(&self) -> String {
        match self {
            Self::Null => "NULL".to_string(),
            Self::Bool(true) => "TRUE".to_string(),
            Self::Bool(false) => "FALSE".to_string(),
            Self::Int(v) => v.to_string(),
            Self::Float(v) if v.is_nan() => "'NaN'".to_string(),
            Self::Float(v) if v.is_infinite() => {
                if v.is_sign_positive() {
                    "'Infinity'".to_string()
                } else {
                    "'-Infinity'".to_string()
                }
            }
            Self::Float(v) => v.to_string(),
            Self::Text(v) => quote_literal(v),
            Self::Raw(v) => v.clone(),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&String> for SqlValue {
    fn from(v: &String) -> Self {
        Self::Text(v.clone())
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for SqlValue {
                fn from(v: $t) -> Self {
                    Self::Int(i64::from(v))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for SqlValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalars() {
        assert_eq!(SqlValue::Null.to_sql(), "NULL");
        assert_eq!(SqlValue::from(true).to_sql(), "TRUE");
        assert_eq!(SqlValue::from(false).to_sql(), "FALSE");
        assert_eq!(SqlValue::from(30).to_sql(), "30");
        assert_eq!(SqlValue::from(-7_i64).to_sql(), "-7");
        assert_eq!(SqlValue::from(2.5).to_sql(), "2.5");
    }

    #[test]
    fn text_is_quoted_and_escaped() {
        assert_eq!(SqlValue::from("a@example.com").to_sql(), "'a@example.com'");
        assert_eq!(SqlValue::from("O'Reilly").to_sql(), "'O''Reilly'");
    }

    #[test]
    fn raw_passes_through() {
        assert_eq!(SqlValue::raw("now()").to_sql(), "now()");
        assert_eq!(SqlValue::raw("'already quoted'").to_sql(), "'already quoted'");
    }

    #[test]
    fn option_maps_none_to_null() {
        assert_eq!(SqlValue::from(None::<i32>).to_sql(), "NULL");
        assert_eq!(SqlValue::from(Some("x")).to_sql(), "'x'");
    }

    #[test]
    fn non_finite_floats_are_literals() {
        assert_eq!(SqlValue::from(f64::NAN).to_sql(), "'NaN'");
        assert_eq!(SqlValue::from(f64::INFINITY).to_sql(), "'Infinity'");
        assert_eq!(SqlValue::from(f64::NEG_INFINITY).to_sql(), "'-Infinity'");
    }
}
