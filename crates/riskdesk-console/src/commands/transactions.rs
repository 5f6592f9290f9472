//! Transactions command - browse stored transactions, newest first

use anyhow::Result;
use clap::{Args, Subcommand};
use riskdesk_core::Transaction;
use serde::Serialize;
use tabled::Tabled;

use super::{view_failure, Context};
use crate::config::OutputFormat;
use crate::output;
use crate::views::TransactionsBoard;

#[derive(Args, Debug)]
pub struct TransactionsArgs {
    #[command(subcommand)]
    command: TransactionsCommand,
}

#[derive(Subcommand, Debug)]
enum TransactionsCommand {
    /// List transactions, newest first
    List {
        /// Maximum number of rows to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
}

#[derive(Debug, Tabled, Serialize)]
pub struct TransactionListItem {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Time")]
    pub trans_time: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Origination")]
    pub origination: String,
    #[tabled(rename = "Nationality")]
    pub nationality: String,
    #[tabled(rename = "Occupation")]
    pub occupation: String,
}

impl From<&Transaction> for TransactionListItem {
    fn from(t: &Transaction) -> Self {
        Self {
            id: t.id.to_string(),
            trans_time: output::trans_time(t),
            amount: output::amount(t.trans_amt),
            origination: t.origination.clone().unwrap_or_default(),
            nationality: t.nationality.clone().unwrap_or_default(),
            occupation: t.occupation.clone().unwrap_or_default(),
        }
    }
}

pub async fn execute(args: TransactionsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        TransactionsCommand::List { limit } => list(ctx, limit).await,
    }
}

pub async fn list(ctx: &Context, limit: Option<usize>) -> Result<()> {
    let mut board = TransactionsBoard::new();
    board
        .load(ctx.api())
        .await
        .map_err(|e| view_failure(board.error(), e))?;

    let shown = &board.transactions()[..limit
        .unwrap_or(usize::MAX)
        .min(board.transactions().len())];

    match ctx.format() {
        OutputFormat::Json => output::print_json(shown),
        OutputFormat::Table => {
            let rows: Vec<TransactionListItem> =
                shown.iter().map(TransactionListItem::from).collect();
            output::print_table(&rows);
            if shown.len() < board.transactions().len() {
                output::info(format!(
                    "Showing {} of {} transactions",
                    shown.len(),
                    board.transactions().len()
                ));
            }
        }
    }
    Ok(())
}
