use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    match args.get_command() {
        cli::Commands::Start => {
            commands::start::execute(&args.config).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(&args.config)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
        },
        cli::Commands::Seed { force } => {
            commands::seed::execute(&args.config, force).await?;
        }
        cli::Commands::Version => {
            println!("telequote v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
