//! RiskDesk console binary
//!
//! Manage fraud rules, upload transactions, trigger evaluations and browse
//! results from the terminal.

use anyhow::Result;
use clap::Parser;
use riskdesk_console::commands::Context;
use riskdesk_console::{cli, output, Cli, ConsoleConfig};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration, then apply command-line overrides
    let config = match ConsoleConfig::load_from(&cli.config) {
        Ok(config) => cli.apply(config),
        Err(e) => {
            output::error(format!("{:#}", e));
            std::process::exit(2);
        }
    };

    init_tracing(&config)?;
    debug!(base_url = %config.base_url, output = ?config.output, "Loaded configuration");

    if let Err(e) = config.validate() {
        output::error(e);
        std::process::exit(2);
    }

    let ctx = Context::new(config)?;

    if let Err(e) = cli::dispatch(cli.command, &ctx).await {
        output::error(format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

/// Initialize tracing subscriber; logs go to stderr so JSON output stays clean
fn init_tracing(config: &ConsoleConfig) -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))?;

    Ok(())
}
