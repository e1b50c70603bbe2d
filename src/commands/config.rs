use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use telequote::config::{self, Config};

/// Execute the config show command
///
/// Prints the effective configuration (file, environment and defaults merged)
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());

    let cfg = config::load_config(config_path)?;

    println!("{}", "Current Configuration:".green().bold());
    println!();
    println!("{}", render(&cfg)?);

    Ok(())
}

fn render(cfg: &Config) -> Result<String> {
    Ok(toml::to_string_pretty(cfg)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_lists_both_sections() {
        let rendered = render(&Config::default()).unwrap();

        assert!(rendered.contains("[server]"));
        assert!(rendered.contains("[database]"));
        assert!(rendered.contains("port = 3000"));
        assert!(rendered.contains("max_connections = 5"));
    }

    #[test]
    fn test_render_parses_back() {
        let mut cfg = Config::default();
        cfg.server.port = 9090;
        cfg.database.path = "/var/lib/telequote/quotes.db".to_string();

        let parsed: Config = toml::from_str(&render(&cfg).unwrap()).unwrap();
        assert_eq!(parsed.server.port, 9090);
        assert_eq!(parsed.database.path, "/var/lib/telequote/quotes.db");
    }
}
