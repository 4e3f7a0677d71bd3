use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Default filter when `RUST_LOG` is unset. Targets match by prefix, so
/// `pgstmt` also covers `pgstmt_cli` and `pgstmt.sql`.
///
/// `-v` wins over the configured SQL level.
pub fn default_filter(verbose: u8, sql_level: Option<Level>) -> String {
    match (verbose, sql_level) {
        (0, None) => "warn".to_string(),
        (0, Some(level)) => format!("warn,pgstmt={}", level.as_str().to_ascii_lowercase()),
        (1, _) => "warn,pgstmt=debug".to_string(),
        _ => "warn,pgstmt=trace".to_string(),
    }
}

/// Install the global subscriber. Logs go to stderr so stdout stays parseable.
pub fn init(verbose: u8, sql_level: Option<Level>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose, sql_level)));

    // A second install keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init();
}
