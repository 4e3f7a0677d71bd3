mod cli;
mod config;
mod inspect;
mod logging;
mod render;

pub use cli::{Cli, Command, TableArgs};

use config::{ConfigFile, ProjectConfig, resolve_database_url};
use inspect::Output;
use pgstmt::{ConnectConfig, InstrumentedClient, MonitorConfig};
use std::time::Duration;
use tracing::Level;

async fn connect(
    cli: &Cli,
    file: Option<&ConfigFile>,
    sql_level: Option<Level>,
) -> anyhow::Result<InstrumentedClient<tokio_postgres::Client>> {
    let url = resolve_database_url(
        cli.database.as_deref(),
        file,
        std::env::var("DATABASE_URL").ok(),
    )?;

    let mut monitor = MonitorConfig::new();
    if let Some(level) = sql_level {
        monitor = monitor.level(level);
    }
    if let Some(ms) = file.and_then(|f| f.log.slow_query_ms) {
        monitor = monitor.with_slow_query_threshold(Duration::from_millis(ms));
    }

    let client = ConnectConfig::from_url(&url)?.connect().await?;
    Ok(InstrumentedClient::new(client).with_config(monitor))
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let project = ProjectConfig::load_optional(&cli.config)?;
    let file = project.as_ref().map(|p| &p.file);
    let sql_level = file
        .and_then(|f| f.log.level.as_deref())
        .map(config::parse_level)
        .transpose()?;

    logging::init(cli.verbose, sql_level);
    if let Some(project) = &project {
        tracing::debug!(path = %project.config_path.display(), "loaded config");
    }

    let output = if cli.json { Output::Json } else { Output::Table };
    let default_schema = file.and_then(|f| f.database.schema.as_deref());

    let printed = match &cli.command {
        Command::Render { file: path } => render::run(path)?,
        Command::Columns(args) => {
            let client = connect(&cli, file, sql_level).await?;
            let schema = args.schema.as_deref().or(default_schema);
            inspect::columns(&client, &args.table, schema, output).await?
        }
        Command::Indexes(args) => {
            let client = connect(&cli, file, sql_level).await?;
            let schema = args.schema.as_deref().or(default_schema);
            inspect::indexes(&client, &args.table, schema, output).await?
        }
        Command::PrimaryKey(args) => {
            let client = connect(&cli, file, sql_level).await?;
            let schema = args.schema.as_deref().or(default_schema);
            inspect::primary_key(&client, &args.table, schema, output).await?
        }
        Command::Tables => {
            let client = connect(&cli, file, sql_level).await?;
            inspect::tables(&client, output).await?
        }
    };

    println!("{printed}");
    Ok(())
}
