use pgstmt::{Statement, TableSpec};
use std::path::Path;

/// Render the CREATE TABLE statement described by a TOML file.
pub fn run(path: &Path) -> anyhow::Result<String> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read table file {}: {e}", path.display()))?;
    render_str(&raw).map_err(|e| anyhow::anyhow!("{}: {e:#}", path.display()))
}

pub fn render_str(raw: &str) -> anyhow::Result<String> {
    let spec: TableSpec = toml::from_str(raw)?;
    tracing::debug!(table = %spec.name, columns = spec.columns.len(), "rendering table");
    Ok(spec.to_create().render()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_table_file_contents() {
        let sql = render_str(
            r#"
name = "tags"
primary_keys = ["id"]

[[columns]]
name = "id"
type = "serial"

[[columns]]
name = "label"
type = "text"
unique = true
null = false
"#,
        )
        .unwrap();
        assert_eq!(
            sql,
            r#"CREATE TABLE "tags" ("id" serial, "label" text UNIQUE NOT NULL, PRIMARY KEY ("id")) ;"#
        );
    }

    #[test]
    fn invalid_column_is_reported() {
        let err = render_str(
            r#"
name = "tags"

[[columns]]
name = "label"
type = "varchar"
length = 0
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("length"));
    }

    #[test]
    fn missing_name_is_a_parse_error() {
        assert!(render_str("[[columns]]\nname = \"x\"\n").is_err());
    }

    #[test]
    fn missing_file() {
        assert!(run(Path::new("/nonexistent/table.toml")).is_err());
    }
}
