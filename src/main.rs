//! NibNab - clipboard highlighter
//!
//! This is the main entry point for the `nibnab` command.

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nibnab::cli::{Cli, CliHandler};
use nibnab::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_config(cli.config.clone())?;

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("nibnab={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("NibNab v{}", nibnab::VERSION);

    let mut handler = CliHandler::from_config(config, cli.config);
    handler.handle_command(cli.command).await?;

    Ok(())
}
