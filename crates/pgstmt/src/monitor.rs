//! Statement logging for any [`GenericClient`].
//!
//! [`InstrumentedClient`] emits one `tracing` event per statement under the
//! `pgstmt.sql` target, before the statement runs, and a WARN event when a
//! statement finishes slower than the configured threshold.
//!
//! ```rust,ignore
//! use pgstmt::monitor::{InstrumentedClient, MonitorConfig};
//! use std::time::Duration;
//!
//! let client = InstrumentedClient::new(client).with_config(
//!     MonitorConfig::new()
//!         .level(tracing::Level::INFO)
//!         .with_slow_query_threshold(Duration::from_millis(250)),
//! );
//! Catalog::new(&client).list_tables().await?;
//! ```

use crate::client::GenericClient;
use crate::error::StmtResult;
use std::time::{Duration, Instant};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;
use tracing::Level;

pub(crate) const SQL_TARGET: &str = "pgstmt.sql";

fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

/// Statement kind, detected from the leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
    /// CREATE / ALTER / DROP / TRUNCATE / RENAME
    Ddl,
    /// SET and anything else
    Other,
}

impl StatementKind {
    pub fn from_sql(sql: &str) -> Self {
        fn starts_with_keyword(s: &str, keyword: &str) -> bool {
            match s.get(0..keyword.len()) {
                Some(prefix) => prefix.eq_ignore_ascii_case(keyword),
                None => false,
            }
        }

        let trimmed = sql.trim_start_matches(|c: char| c.is_whitespace() || c == '(');
        if starts_with_keyword(trimmed, "SELECT") || starts_with_keyword(trimmed, "WITH") {
            Self::Select
        } else if starts_with_keyword(trimmed, "INSERT") {
            Self::Insert
        } else if starts_with_keyword(trimmed, "UPDATE") {
            Self::Update
        } else if starts_with_keyword(trimmed, "DELETE") {
            Self::Delete
        } else if ["CREATE", "ALTER", "DROP", "TRUNCATE", "RENAME"]
            .iter()
            .any(|keyword| starts_with_keyword(trimmed, keyword))
        {
            Self::Ddl
        } else {
            Self::Other
        }
    }
}

/// Logging settings for [`InstrumentedClient`].
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Level of the per-statement event.
    pub level: Level,
    /// Truncate logged SQL to this many bytes. `None` logs it whole.
    pub max_sql_length: Option<usize>,
    /// Statements slower than this are reported at WARN.
    pub slow_query_threshold: Option<Duration>,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            level: Level::DEBUG,
            max_sql_length: Some(200),
            slow_query_threshold: None,
        }
    }
}

impl MonitorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    pub fn with_slow_query_threshold(mut self, threshold: Duration) -> Self {
        self.slow_query_threshold = Some(threshold);
        self
    }

    fn display_sql(&self, sql: &str) -> String {
        match self.max_sql_length {
            Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
            _ => sql.to_string(),
        }
    }

    fn is_slow(&self, elapsed: Duration) -> bool {
        self.slow_query_threshold
            .is_some_and(|threshold| elapsed > threshold)
    }
}

/// A [`GenericClient`] wrapper that logs each statement it forwards.
pub struct InstrumentedClient<C> {
    client: C,
    config: MonitorConfig,
}

impl<C: GenericClient> InstrumentedClient<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            config: MonitorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MonitorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    pub fn inner(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }

    fn before(&self, sql: &str, param_count: usize) -> Instant {
        macro_rules! emit_at_level {
            ($level:expr, $($field:tt)*) => {
                match $level {
                    Level::ERROR => tracing::error!($($field)*),
                    Level::WARN  => tracing::warn!($($field)*),
                    Level::INFO  => tracing::info!($($field)*),
                    Level::DEBUG => tracing::debug!($($field)*),
                    Level::TRACE => tracing::trace!($($field)*),
                }
            };
        }

        let shown = self.config.display_sql(sql);
        emit_at_level!(
            self.config.level,
            target: SQL_TARGET,
            kind = ?StatementKind::from_sql(sql),
            param_count,
            sql = %shown,
        );
        Instant::now()
    }

    fn after<T>(&self, sql: &str, started: Instant, result: &StmtResult<T>) {
        let elapsed = started.elapsed();
        if let Err(err) = result {
            tracing::debug!(target: SQL_TARGET, error = %err, ?elapsed, "statement failed");
        }
        if self.config.is_slow(elapsed) {
            tracing::warn!(
                target: SQL_TARGET,
                kind = ?StatementKind::from_sql(sql),
                ?elapsed,
                sql = %self.config.display_sql(sql),
                "slow statement",
            );
        }
    }
}

impl<C: GenericClient> GenericClient for InstrumentedClient<C> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StmtResult<Vec<Row>> {
        let started = self.before(sql, params.len());
        let result = self.client.query(sql, params).await;
        self.after(sql, started, &result);
        result
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> StmtResult<Option<Row>> {
        let started = self.before(sql, params.len());
        let result = self.client.query_opt(sql, params).await;
        self.after(sql, started, &result);
        result
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> StmtResult<u64> {
        let started = self.before(sql, params.len());
        let result = self.client.execute(sql, params).await;
        self.after(sql, started, &result);
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StmtError;
    use crate::statement::Statement;
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeClient {
        seen: Mutex<Vec<String>>,
        fail: bool,
    }

    impl GenericClient for FakeClient {
        async fn query(&self, sql: &str, _params: &[&(dyn ToSql + Sync)]) -> StmtResult<Vec<Row>> {
            self.seen.lock().unwrap().push(sql.to_string());
            Ok(Vec::new())
        }

        async fn execute(&self, sql: &str, _params: &[&(dyn ToSql + Sync)]) -> StmtResult<u64> {
            self.seen.lock().unwrap().push(sql.to_string());
            if self.fail {
                return Err(StmtError::Connection("closed".into()));
            }
            Ok(3)
        }
    }

    #[test]
    fn test_statement_kind() {
        assert_eq!(StatementKind::from_sql("SELECT 1"), StatementKind::Select);
        assert_eq!(StatementKind::from_sql("  (select 1)"), StatementKind::Select);
        assert_eq!(
            StatementKind::from_sql("WITH x AS (SELECT 1) SELECT * FROM x"),
            StatementKind::Select
        );
        assert_eq!(StatementKind::from_sql("insert into t"), StatementKind::Insert);
        assert_eq!(StatementKind::from_sql("UPDATE t SET"), StatementKind::Update);
        assert_eq!(StatementKind::from_sql("DELETE FROM t"), StatementKind::Delete);
        assert_eq!(StatementKind::from_sql("CREATE TABLE t ()"), StatementKind::Ddl);
        assert_eq!(StatementKind::from_sql("TRUNCATE \"t\";"), StatementKind::Ddl);
        assert_eq!(StatementKind::from_sql("SET search_path TO a;"), StatementKind::Other);
        assert_eq!(StatementKind::from_sql(""), StatementKind::Other);
    }

    #[test]
    fn test_truncate_respects_char_boundary() {
        assert_eq!(truncate_sql_bytes("abc", 10), "abc");
        assert_eq!(truncate_sql_bytes("abcdef", 3), "abc");
        // 'é' is two bytes; cutting inside it backs off.
        assert_eq!(truncate_sql_bytes("aé", 2), "a");
    }

    #[test]
    fn test_display_sql() {
        let config = MonitorConfig::new().max_sql_length(6);
        assert_eq!(config.display_sql("SELECT 1"), "SELECT...");
        assert_eq!(config.display_sql("SELECT"), "SELECT");
        assert_eq!(config.no_truncate().display_sql("SELECT 1"), "SELECT 1");
    }

    #[test]
    fn test_config_defaults() {
        let config = MonitorConfig::default();
        assert_eq!(config.level, Level::DEBUG);
        assert_eq!(config.max_sql_length, Some(200));
        assert!(!config.is_slow(Duration::from_secs(3600)));

        let config = config.with_slow_query_threshold(Duration::from_millis(10));
        assert!(config.is_slow(Duration::from_millis(11)));
        assert!(!config.is_slow(Duration::from_millis(10)));
    }

    #[tokio::test]
    async fn test_instrumented_client_forwards() {
        let client = InstrumentedClient::new(FakeClient::default())
            .with_config(MonitorConfig::new().level(Level::INFO));

        let affected = crate::dml::delete_from("users")
            .and_where("id = 5")
            .execute(&client)
            .await
            .unwrap();
        assert_eq!(affected, 3);

        let row = client.query_opt("SELECT 1", &[]).await.unwrap();
        assert!(row.is_none());

        let seen = client.inner().seen.lock().unwrap().clone();
        assert_eq!(seen, vec![r#"DELETE FROM "users" WHERE id = 5;"#, "SELECT 1"]);
    }

    #[tokio::test]
    async fn test_instrumented_client_passes_errors_through() {
        let client = InstrumentedClient::new(FakeClient {
            fail: true,
            ..Default::default()
        });
        let err = client.execute("TRUNCATE \"t\";", &[]).await.unwrap_err();
        assert!(matches!(err, StmtError::Connection(_)));
        assert_eq!(client.into_inner().seen.into_inner().unwrap().len(), 1);
    }
}
