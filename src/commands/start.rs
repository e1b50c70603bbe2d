use anyhow::Result;
use colored::Colorize;
use std::path::Path;
use telequote::{config, init_tracing, server};
use tracing::info;

/// Execute the start command
///
/// Loads configuration, initializes logging and blocks on the server until
/// shutdown.
pub async fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Starting telequote...".green());

    let cfg = config::load_config(config_path)?;
    init_tracing(&cfg.server);

    info!(
        config = %config_path.display(),
        log_level = %cfg.server.log_level,
        "Configuration loaded"
    );

    server::start_server(cfg).await?;

    Ok(())
}
