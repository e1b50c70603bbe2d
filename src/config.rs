use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `TELEQUOTE__SERVER__PORT=9000`
pub const ENV_PREFIX: &str = "TELEQUOTE";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    /// `text` or `json`
    pub log_format: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite file; parent directories are created on startup
    pub path: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "./data/telequote.db".to_string(),
            max_connections: 5,
        }
    }
}

/// Load configuration from an optional TOML file overlaid with environment variables.
///
/// A missing file is not an error; every field falls back to its default.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        anyhow::bail!("server.port must be between 1 and 65535");
    }

    match cfg.server.log_format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!(
            "Invalid server.log_format '{}': expected 'text' or 'json'",
            other
        ),
    }

    if cfg.database.path.trim().is_empty() {
        anyhow::bail!("database.path cannot be empty");
    }

    if cfg.database.max_connections == 0 {
        anyhow::bail!("database.max_connections must be at least 1");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_are_valid() {
        let cfg = Config::default();
        assert!(validate_config(&cfg).is_ok());
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.database.max_connections, 5);
    }

    #[test]
    fn test_validate_config_rejects_port_zero() {
        let mut cfg = Config::default();
        cfg.server.port = 0;

        let result = validate_config(&cfg);
        assert!(result.unwrap_err().to_string().contains("server.port"));
    }

    #[test]
    fn test_validate_config_rejects_unknown_log_format() {
        let mut cfg = Config::default();
        cfg.server.log_format = "xml".to_string();

        let result = validate_config(&cfg);
        assert!(result.unwrap_err().to_string().contains("log_format"));
    }

    #[test]
    fn test_validate_config_rejects_empty_database_path() {
        let mut cfg = Config::default();
        cfg.database.path = "  ".to_string();

        assert!(validate_config(&cfg).is_err());
    }

    #[test]
    fn test_validate_config_rejects_zero_connections() {
        let mut cfg = Config::default();
        cfg.database.max_connections = 0;

        let result = validate_config(&cfg);
        assert!(result.unwrap_err().to_string().contains("max_connections"));
    }

    #[test]
    fn test_load_config_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.database.path, "./data/telequote.db");
    }

    #[test]
    fn test_load_config_partial_file() {
        let file = write_config(
            r#"
[server]
port = 8088
log_format = "json"

[database]
path = "/tmp/quotes.db"
"#,
        );

        let cfg = load_config(file.path()).unwrap();
        assert_eq!(cfg.server.port, 8088);
        assert_eq!(cfg.server.log_format, "json");
        assert_eq!(cfg.server.log_level, "info");
        assert_eq!(cfg.database.path, "/tmp/quotes.db");
        assert_eq!(cfg.database.max_connections, 5);
    }

    #[test]
    fn test_load_config_rejects_invalid_file() {
        let file = write_config(
            r#"
[database]
max_connections = 0
"#,
        );

        assert!(load_config(file.path()).is_err());
    }
}
