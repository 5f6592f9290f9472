//! Command-line interface

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{self, Context};
use crate::config::{ConsoleConfig, OutputFormat, DEFAULT_CONFIG_FILE};

/// RiskDesk fraud rule console
#[derive(Parser, Debug)]
#[command(name = "riskdesk")]
#[command(author, version, about = "RiskDesk fraud rule console", long_about = None)]
#[command(propagate_version = true)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Backend base URL (overrides RISKDESK_BASE_URL)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// API key sent as x-api-key (overrides RISKDESK_API_KEY)
    #[arg(long, global = true)]
    pub api_key: Option<String>,

    /// Output format
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Config file, extension optional
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rule administration (list, show, toggle, create)
    Rules(commands::rules::RulesArgs),

    /// Transaction browser (list)
    Transactions(commands::transactions::TransactionsArgs),

    /// Upload a transaction batch and run the rules
    Evaluate(commands::evaluate::EvaluateArgs),

    /// Evaluation results (list, user)
    Results(commands::results::ResultsArgs),

    /// Condition builder (preview, fields)
    Condition(commands::condition::ConditionArgs),

    /// Open a console route such as /rules or /results/42
    Open(commands::open::OpenArgs),
}

impl Cli {
    /// Apply command-line overrides on top of file and environment settings
    pub fn apply(&self, mut config: ConsoleConfig) -> ConsoleConfig {
        if let Some(url) = &self.base_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(key) = &self.api_key {
            config = config.with_api_key(key.clone());
        }
        if let Some(format) = self.format {
            config = config.with_output(format);
        }
        if self.verbose {
            config.log_level = "debug".to_string();
        }
        config
    }
}

/// Run one command
pub async fn dispatch(command: Commands, ctx: &Context) -> Result<()> {
    match command {
        Commands::Rules(args) => commands::rules::execute(args, ctx).await,
        Commands::Transactions(args) => commands::transactions::execute(args, ctx).await,
        Commands::Evaluate(args) => commands::evaluate::execute(args, ctx).await,
        Commands::Results(args) => commands::results::execute(args, ctx).await,
        Commands::Condition(args) => commands::condition::execute(args, ctx).await,
        Commands::Open(args) => commands::open::execute(args, ctx).await,
    }
}
