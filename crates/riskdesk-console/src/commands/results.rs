//! Results command - flagged users and per-user drill-down
//!
//! Subcommands: list, user

use anyhow::Result;
use clap::{Args, Subcommand};
use riskdesk_core::{FlaggedTransaction, ResultRow, ResultSortKey, SortDirection};
use serde::Serialize;
use tabled::Tabled;

use super::{view_failure, Context};
use crate::config::OutputFormat;
use crate::output;
use crate::views::{ResultsBoard, UserFlaggedView};

#[derive(Args, Debug)]
pub struct ResultsArgs {
    #[command(subcommand)]
    command: ResultsCommand,
}

#[derive(Subcommand, Debug)]
enum ResultsCommand {
    /// List flagged users
    List {
        /// Case-insensitive username filter
        #[arg(short, long)]
        search: Option<String>,

        /// Sort by username, flag or count
        #[arg(long)]
        sort: Option<ResultSortKey>,

        /// Descending order
        #[arg(short = 'd', long)]
        desc: bool,

        /// Page number, starting at 1
        #[arg(short, long, default_value = "1")]
        page: usize,
    },

    /// Show the transactions flagged for one user
    User {
        /// User ID
        user_id: String,

        /// Also fetch the rule behind each flag
        #[arg(long)]
        with_rules: bool,
    },
}

#[derive(Debug, Tabled, Serialize)]
pub struct ResultListItem {
    #[tabled(rename = "User ID")]
    pub user_id: String,
    #[tabled(rename = "Username")]
    pub username: String,
    #[tabled(rename = "Flag")]
    pub flag: String,
    #[tabled(rename = "Transactions")]
    pub transaction_count: u64,
}

impl From<&ResultRow> for ResultListItem {
    fn from(row: &ResultRow) -> Self {
        Self {
            user_id: row.drill_down_id(),
            username: row.username.clone(),
            flag: output::flag(row.flag).to_string(),
            transaction_count: row.transaction_count,
        }
    }
}

#[derive(Debug, Tabled, Serialize)]
pub struct FlaggedListItem {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Time")]
    pub trans_time: String,
    #[tabled(rename = "Amount")]
    pub amount: String,
    #[tabled(rename = "Flag")]
    pub flag: String,
    #[tabled(rename = "Rule")]
    pub rule: String,
}

impl FlaggedListItem {
    fn new(t: &FlaggedTransaction, rule_name: Option<&str>) -> Self {
        let rule = match (rule_name, t.rule_name.as_deref(), &t.rule_id) {
            (Some(name), _, _) | (None, Some(name), _) => name.to_string(),
            (None, None, Some(id)) => id.to_string(),
            (None, None, None) => String::new(),
        };
        Self {
            id: t.transaction.id.to_string(),
            trans_time: output::trans_time(&t.transaction),
            amount: output::amount(t.transaction.trans_amt),
            flag: t.flag.map(|f| output::flag(f).to_string()).unwrap_or_default(),
            rule,
        }
    }
}

pub async fn execute(args: ResultsArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ResultsCommand::List {
            search,
            sort,
            desc,
            page,
        } => {
            let direction = if desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            list(ctx, search, sort.map(|key| (key, direction)), page).await
        }
        ResultsCommand::User {
            user_id,
            with_rules,
        } => user(ctx, &user_id, with_rules).await,
    }
}

pub async fn list(
    ctx: &Context,
    search: Option<String>,
    sort: Option<(ResultSortKey, SortDirection)>,
    page: usize,
) -> Result<()> {
    let mut board = ResultsBoard::with_page_size(ctx.config.page_size);
    board
        .load(ctx.api())
        .await
        .map_err(|e| view_failure(board.error(), e))?;

    if let Some(text) = search {
        board.set_search(text);
    }
    if let Some((key, direction)) = sort {
        board.sort_by(key, direction);
    }
    board.set_page(page);

    let page = board.page();
    match ctx.format() {
        OutputFormat::Json => output::print_json(&page),
        OutputFormat::Table => {
            let rows: Vec<ResultListItem> =
                page.items.iter().map(|r| ResultListItem::from(*r)).collect();
            output::print_table(&rows);
            if page.total_pages > 1 {
                output::info(format!(
                    "Page {} of {} ({} users)",
                    page.page, page.total_pages, page.total_items
                ));
            }
        }
    }
    Ok(())
}

pub async fn user(ctx: &Context, user_id: &str, with_rules: bool) -> Result<()> {
    let mut view = UserFlaggedView::new(user_id);
    view.load(ctx.api())
        .await
        .map_err(|e| view_failure(view.error(), e))?;

    if with_rules {
        for rule_id in view.referenced_rules() {
            if let Err(e) = view.rule_for(ctx.api(), &rule_id).await {
                output::warning(format!("Could not fetch rule {}: {}", rule_id, e));
            }
        }
    }

    let rows: Vec<FlaggedListItem> = view
        .transactions()
        .iter()
        .map(|t| {
            let rule_name = t
                .rule_id
                .as_ref()
                .and_then(|id| view.cached_rule(id))
                .map(|r| r.name.as_str());
            FlaggedListItem::new(t, rule_name)
        })
        .collect();

    match ctx.format() {
        OutputFormat::Json => output::print_json(view.transactions()),
        OutputFormat::Table => {
            output::section(format!("Flagged transactions for {}", view.user_id()));
            output::print_table(&rows);
        }
    }
    Ok(())
}
