//! Rules command - list, inspect, toggle and create rules
//!
//! Subcommands: list, show, toggle, create

use anyhow::{Context as _, Result};
use clap::{Args, Subcommand};
use riskdesk_core::condition::parse_clause;
use riskdesk_core::{ConditionBuilder, RecordId, Rule};
use serde::Serialize;
use std::sync::Arc;
use tabled::Tabled;

use super::{view_failure, Context};
use crate::config::OutputFormat;
use crate::output;
use crate::views::{RuleForm, RulesBoard};

/// Rules command arguments
#[derive(Args, Debug)]
pub struct RulesArgs {
    #[command(subcommand)]
    command: RulesCommand,
}

/// Rules subcommands
#[derive(Subcommand, Debug)]
enum RulesCommand {
    /// List all rules
    List,

    /// Show one rule in full
    Show {
        /// Rule ID
        id: RecordId,
    },

    /// Flip a rule between active and inactive
    Toggle {
        /// Rule ID
        id: RecordId,
    },

    /// Create a rule
    Create(CreateArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Rule name
    #[arg(long)]
    pub name: String,

    /// Condition typed by hand
    #[arg(long, conflicts_with = "clause", required_unless_present = "clause")]
    pub condition: Option<String>,

    /// Builder clause "<namespace>:<field> <op> <value>", repeatable; joined with AND
    #[arg(long = "clause", value_name = "CLAUSE")]
    pub clause: Vec<String>,

    /// Flag level (Low, Medium, High)
    #[arg(long, default_value = "Low")]
    pub flag_level: String,

    /// Risk score added when the rule fires
    #[arg(long)]
    pub risk_increment: String,

    /// Free-text description
    #[arg(long, default_value = "")]
    pub description: String,
}

/// Rule row for list display
#[derive(Debug, Tabled, Serialize)]
pub struct RuleListItem {
    #[tabled(rename = "ID")]
    pub id: String,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Condition")]
    pub condition: String,
    #[tabled(rename = "Flag")]
    pub flag_level: String,
    #[tabled(rename = "Risk +")]
    pub risk_increment: f64,
    #[tabled(rename = "Status")]
    pub status: String,
}

impl From<&Rule> for RuleListItem {
    fn from(rule: &Rule) -> Self {
        Self {
            id: rule.id.to_string(),
            name: rule.name.clone(),
            condition: output::truncate(&rule.condition, 60),
            flag_level: output::flag(rule.flag_level).to_string(),
            risk_increment: rule.risk_increment,
            status: output::active(rule.is_active).to_string(),
        }
    }
}

/// Execute rules command
pub async fn execute(args: RulesArgs, ctx: &Context) -> Result<()> {
    match args.command {
        RulesCommand::List => list(ctx).await,
        RulesCommand::Show { id } => show(ctx, &id).await,
        RulesCommand::Toggle { id } => toggle(ctx, &id).await,
        RulesCommand::Create(create_args) => create(ctx, create_args).await,
    }
}

/// Print the rules board
pub async fn list(ctx: &Context) -> Result<()> {
    let mut board = RulesBoard::new();
    board
        .load(ctx.api())
        .await
        .map_err(|e| view_failure(board.error(), e))?;

    match ctx.format() {
        OutputFormat::Json => output::print_json(board.rules()),
        OutputFormat::Table => {
            let rows: Vec<RuleListItem> = board.rules().iter().map(RuleListItem::from).collect();
            output::print_table(&rows);
        }
    }
    Ok(())
}

async fn show(ctx: &Context, id: &RecordId) -> Result<()> {
    let board = RulesBoard::new();
    let rule = board
        .detail(ctx.api(), id)
        .await
        .with_context(|| format!("Failed to fetch rule {}", id))?;
    print_rule(&rule, ctx.format());
    Ok(())
}

async fn toggle(ctx: &Context, id: &RecordId) -> Result<()> {
    let mut board = RulesBoard::new();
    board
        .load(ctx.api())
        .await
        .map_err(|e| view_failure(board.error(), e))?;

    board
        .toggle(ctx.api(), id)
        .await
        .map_err(|e| view_failure(board.error(), e))?;

    if let Some(rule) = board.rule(id) {
        match ctx.format() {
            OutputFormat::Json => output::print_json(rule),
            OutputFormat::Table => output::success(format!(
                "Rule {} ({}) is now {}",
                rule.id,
                rule.name,
                output::active(rule.is_active)
            )),
        }
    }
    Ok(())
}

async fn create(ctx: &Context, args: CreateArgs) -> Result<()> {
    let mut form = RuleForm::new();

    if args.clause.is_empty() {
        form.set_condition(args.condition.unwrap_or_default());
    } else {
        let clauses = args
            .clause
            .iter()
            .map(|c| parse_clause(c))
            .collect::<Result<Vec<_>, _>>()?;
        let builder = ConditionBuilder::from_clauses(Arc::clone(&ctx.catalogs), clauses)?;
        form.use_builder(builder);
    }

    form.set_name(args.name);
    form.set_flag_level(args.flag_level);
    form.set_risk_increment(args.risk_increment);
    form.set_description(args.description);

    let created = form
        .submit(ctx.api())
        .await
        .map_err(|e| view_failure(form.error(), e))?;

    if let Some(message) = form.success() {
        output::success(message);
    }
    print_rule(&created, ctx.format());
    Ok(())
}

fn print_rule(rule: &Rule, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(rule),
        OutputFormat::Table => {
            output::section(&rule.name);
            output::kv("ID", &rule.id);
            output::kv("Condition", &rule.condition);
            output::kv("Flag level", output::flag(rule.flag_level));
            output::kv("Risk increment", rule.risk_increment);
            output::kv("Status", output::active(rule.is_active));
            if let Some(description) = rule.description.as_deref().filter(|d| !d.is_empty()) {
                output::kv("Description", description);
            }
            if let Some(created) = &rule.created_at {
                output::kv("Created", created);
            }
            if let Some(updated) = &rule.updated_at {
                output::kv("Updated", updated);
            }
        }
    }
}
