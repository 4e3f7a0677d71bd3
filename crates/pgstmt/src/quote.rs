//! Identifier and literal quoting.
//!
//! Every builder goes through these helpers, so quoting rules live in one place:
//!
//! - Identifiers are wrapped in `"` and embedded `"` are escaped as `""`
//! - String literals are wrapped in `'` and embedded `'` are escaped as `''`
//! - Names handed to builders must be non-empty and free of NUL characters
//!
//! # Example
//! ```
//! use pgstmt::quote::{quote_ident, quote_literal};
//!
//! assert_eq!(quote_ident("users"), r#""users""#);
//! assert_eq!(quote_literal("O'Reilly"), "'O''Reilly'");
//! ```

use crate::error::{StmtError, StmtResult};

/// Quote an identifier (table, column, key name).
pub fn quote_ident(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    write_ident(&mut out, name);
    out
}

pub(crate) fn write_ident(out: &mut String, name: &str) {
    out.push('"');
    for ch in name.chars() {
        if ch == '"' {
            out.push_str("\"\"");
        } else {
            out.push(ch);
        }
    }
    out.push('"');
}

/// Quote a string literal.
pub fn quote_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        if ch == '\'' {
            out.push_str("''");
        } else {
            out.push(ch);
        }
    }
    out.push('\'');
    out
}

/// Quote each identifier and join them with `", "`.
pub(crate) fn quote_ident_list<S: AsRef<str>>(names: &[S]) -> String {
    names
        .iter()
        .map(|n| quote_ident(n.as_ref()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Check that `name` can be used as an identifier.
///
/// `kind` names the thing being validated and only shows up in the error.
pub fn validate_name(kind: &str, name: &str) -> StmtResult<()> {
    if name.is_empty() {
        return Err(StmtError::invalid(format!("{kind} name cannot be empty")));
    }
    if name.contains('\0') {
        return Err(StmtError::invalid(format!(
            "{kind} name cannot contain NUL character"
        )));
    }
    Ok(())
}
