use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ProjectConfig {
    pub config_path: PathBuf,
    pub file: ConfigFile,
}

impl ProjectConfig {
    pub fn load(config_path: PathBuf) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(&config_path).map_err(|e| {
            anyhow::anyhow!(
                "failed to read config file {}: {e}",
                config_path.display()
            )
        })?;

        let file = ConfigFile::parse(&raw).map_err(|e| {
            anyhow::anyhow!(
                "failed to load config file {}: {e:#}",
                config_path.display()
            )
        })?;

        Ok(Self { config_path, file })
    }

    /// Load `path` if it exists; a missing default file is not an error.
    pub fn load_optional(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::load(path.to_path_buf()).map(Some)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    /// Default schema for table commands.
    pub schema: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// `tracing` level for executed SQL (`trace`..`error`).
    pub level: Option<String>,
    /// Statements slower than this are logged at WARN.
    pub slow_query_ms: Option<u64>,
}

impl ConfigFile {
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let mut file: ConfigFile = toml::from_str(raw)?;
        file.expand_env()?;
        file.validate()?;
        Ok(file)
    }

    fn expand_env(&mut self) -> anyhow::Result<()> {
        if let Some(url) = self.database.url.as_mut() {
            *url = expand_env_vars(url)?;
        }
        if let Some(schema) = self.database.schema.as_mut() {
            *schema = expand_env_vars(schema)?;
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if let Some(url) = &self.database.url
            && url.trim().is_empty()
        {
            anyhow::bail!("database.url must not be empty");
        }
        if let Some(schema) = &self.database.schema
            && schema.trim().is_empty()
        {
            anyhow::bail!("database.schema must not be empty");
        }
        if let Some(level) = &self.log.level {
            parse_level(level)?;
        }
        Ok(())
    }
}

pub fn parse_level(level: &str) -> anyhow::Result<tracing::Level> {
    level
        .parse::<tracing::Level>()
        .map_err(|_| anyhow::anyhow!("unsupported log level: {level}"))
}

/// Pick the database URL: CLI flag, then config file, then `DATABASE_URL`.
pub fn resolve_database_url(
    flag: Option<&str>,
    file: Option<&ConfigFile>,
    env: Option<String>,
) -> anyhow::Result<String> {
    if let Some(url) = flag {
        return Ok(url.to_string());
    }
    if let Some(url) = file.and_then(|f| f.database.url.as_deref()) {
        return Ok(url.to_string());
    }
    env.filter(|url| !url.trim().is_empty()).ok_or_else(|| {
        anyhow::anyhow!("no database configured: pass --database, set database.url, or DATABASE_URL")
    })
}

/// Replace `${NAME}` references with values from the process environment.
fn expand_env_vars(input: &str) -> anyhow::Result<String> {
    expand_vars_with(input, |name| std::env::var(name).ok())
}

fn expand_vars_with(
    input: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<String> {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(open) = rest.find("${") {
        out.push_str(&rest[..open]);
        let reference = &rest[open + 2..];
        let Some(close) = reference.find('}') else {
            anyhow::bail!("unterminated `${{` reference in config value");
        };
        let name = &reference[..close];
        if name.is_empty() {
            anyhow::bail!("empty `${{}}` reference in config value");
        }
        let value = lookup(name)
            .ok_or_else(|| anyhow::anyhow!("config references unset variable {name}"))?;
        out.push_str(&value);
        rest = &reference[close + 1..];
    }

    out.push_str(rest);
    Ok(out)
}
