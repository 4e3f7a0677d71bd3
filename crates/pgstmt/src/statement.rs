//! The trait shared by every statement builder.

use crate::client::GenericClient;
use crate::error::{StmtError, StmtResult};
use crate::row::FromRow;
use tokio_postgres::Row;

/// A statement that can be rendered to SQL and run through a [`GenericClient`].
///
/// Rendering is pure: calling [`Statement::render`] twice yields the same string.
pub trait Statement: Sync {
    /// Render the statement as a single semicolon-terminated SQL string.
    fn render(&self) -> StmtResult<String>;

    /// Execute the statement and return the affected row count.
    fn execute(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = StmtResult<u64>> + Send {
        async move {
            let sql = self.render()?;
            conn.execute(&sql, &[]).await
        }
    }

    /// Execute the statement and return all rows.
    fn query(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = StmtResult<Vec<Row>>> + Send {
        async move {
            let sql = self.render()?;
            conn.query(&sql, &[]).await
        }
    }

    /// Execute the statement and map all rows to `T`.
    fn fetch_all<T: FromRow + Send>(
        &self,
        conn: &impl GenericClient,
    ) -> impl std::future::Future<Output = StmtResult<Vec<T>>> + Send {
        async move {
            let rows = self.query(conn).await?;
            rows.iter().map(T::from_row).collect()
        }
    }
}

/// First configuration error seen by a builder.
///
/// Builders keep their fluent `self -> Self` shape, so a bad argument is
/// recorded at the call that received it and reported by `render()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ConfigError(Option<String>);

impl ConfigError {
    pub(crate) fn record(&mut self, result: StmtResult<()>) {
        if self.0.is_some() {
            return;
        }
        if let Err(err) = result {
            self.0 = Some(match err {
                StmtError::InvalidArgument(message) => message,
                other => other.to_string(),
            });
        }
    }

    pub(crate) fn check(&self) -> StmtResult<()> {
        match &self.0 {
            Some(message) => Err(StmtError::InvalidArgument(message.clone())),
            None => Ok(()),
        }
    }

    #[cfg(test)]
    pub(crate) fn message(&self) -> Option<&str> {
        self.0.as_deref()
    }
}
