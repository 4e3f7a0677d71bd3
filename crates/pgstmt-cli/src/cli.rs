use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect PostgreSQL tables and render table descriptions to SQL.
#[derive(Debug, Parser)]
#[command(name = "pgstmt")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Project config file.
    #[arg(short, long, default_value = "pgstmt.toml")]
    pub config: PathBuf,

    /// Database URL; overrides the config file and `DATABASE_URL`.
    #[arg(short, long)]
    pub database: Option<String>,

    /// Print JSON instead of a table.
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the columns of a table with their key classification.
    Columns(TableArgs),

    /// List column/index pairs of a table.
    Indexes(TableArgs),

    /// List the primary key columns of a table.
    PrimaryKey(TableArgs),

    /// List user tables.
    Tables,

    /// Print the CREATE TABLE statement for a TOML table description.
    Render {
        /// TOML file with `name`, `primary_keys` and `[[columns]]`.
        file: PathBuf,
    },
}

#[derive(Debug, Clone, clap::Args)]
pub struct TableArgs {
    /// Table name.
    pub table: String,

    /// Restrict to one schema; falls back to `database.schema` in the config.
    #[arg(short, long)]
    pub schema: Option<String>,
}
