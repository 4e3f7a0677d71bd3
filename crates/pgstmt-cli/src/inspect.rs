use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table, presets::UTF8_FULL};
use pgstmt::{Catalog, ColumnInfo, GenericClient, IndexInfo};

/// What a table command prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    Table,
    Json,
}

fn header(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|t| Cell::new(t).add_attribute(Attribute::Bold).fg(Color::Cyan))
        .collect()
}

fn new_table(titles: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header(titles));
    table
}

fn or_dash(value: Option<impl ToString>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

pub fn columns_table(columns: &[ColumnInfo]) -> Table {
    let mut table = new_table(&["#", "Column", "Type", "Length", "Null", "Default", "Key"]);
    for c in columns {
        table.add_row(vec![
            Cell::new(c.ordinal_position),
            Cell::new(&c.column_name).fg(Color::Yellow),
            Cell::new(&c.data_type),
            Cell::new(or_dash(c.character_maximum_length)),
            Cell::new(&c.is_nullable),
            Cell::new(or_dash(c.column_default.as_deref())),
            Cell::new(or_dash(c.key)).fg(Color::Magenta),
        ]);
    }
    table
}

pub fn indexes_table(indexes: &[IndexInfo]) -> Table {
    let mut table = new_table(&["Column", "Index"]);
    for i in indexes {
        table.add_row(vec![
            Cell::new(&i.column_name).fg(Color::Yellow),
            Cell::new(&i.index_type),
        ]);
    }
    table
}

pub fn names_table(title: &str, names: &[String]) -> Table {
    let mut table = new_table(&[title]);
    for name in names {
        table.add_row(vec![Cell::new(name)]);
    }
    table
}

fn emit<T: serde::Serialize>(
    output: Output,
    rows: &T,
    table: impl FnOnce() -> Table,
) -> anyhow::Result<String> {
    match output {
        Output::Json => Ok(serde_json::to_string_pretty(rows)?),
        Output::Table => Ok(table().to_string()),
    }
}

pub async fn columns(
    client: &impl GenericClient,
    table: &str,
    schema: Option<&str>,
    output: Output,
) -> anyhow::Result<String> {
    let columns = Catalog::new(client).list_columns(table, schema).await?;
    if columns.is_empty() {
        anyhow::bail!("table not found or has no columns: {table}");
    }
    emit(output, &columns, || columns_table(&columns))
}

pub async fn indexes(
    client: &impl GenericClient,
    table: &str,
    schema: Option<&str>,
    output: Output,
) -> anyhow::Result<String> {
    let indexes = Catalog::new(client).list_indexes(table, schema).await?;
    emit(output, &indexes, || indexes_table(&indexes))
}

pub async fn primary_key(
    client: &impl GenericClient,
    table: &str,
    schema: Option<&str>,
    output: Output,
) -> anyhow::Result<String> {
    let keys = Catalog::new(client).list_primary_key(table, schema).await?;
    emit(output, &keys, || names_table("Primary key", &keys))
}

pub async fn tables(client: &impl GenericClient, output: Output) -> anyhow::Result<String> {
    let tables = Catalog::new(client).list_tables().await?;
    emit(output, &tables, || names_table("Table", &tables))
}
