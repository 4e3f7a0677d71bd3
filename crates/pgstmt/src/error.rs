//! Error types for pgstmt

use thiserror::Error;

/// Result type alias for pgstmt operations
pub type StmtResult<T> = Result<T, StmtError>;

/// Errors produced while configuring, rendering or executing statements
#[derive(Debug, Error)]
pub enum StmtError {
    /// A builder was configured with a value of the wrong shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// The executor rejected a rendered statement
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },
}

impl StmtError {
    /// Create an invalid argument error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this is an invalid argument error
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// SQLSTATE code reported by the server, if any.
    pub fn sqlstate(&self) -> Option<&str> {
        match self {
            Self::Query(err) => err.as_db_error().map(|db| db.code().code()),
            _ => None,
        }
    }

    /// Map a tokio_postgres error, keeping transport failures apart from
    /// statements the server rejected.
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if err.as_db_error().is_none() && err.is_closed() {
            return Self::Connection(err.to_string());
        }
        Self::Query(err)
    }
}
