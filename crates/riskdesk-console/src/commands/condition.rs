//! Condition command - compose predicates without submitting a rule
//!
//! Subcommands: preview, fields

use anyhow::Result;
use clap::{Args, Subcommand};
use riskdesk_core::condition::parse_clause;
use riskdesk_core::{Catalogs, ConditionBuilder, FieldSpec, Namespace};
use serde::Serialize;
use std::sync::Arc;
use tabled::Tabled;

use super::Context;
use crate::config::OutputFormat;
use crate::output;

#[derive(Args, Debug)]
pub struct ConditionArgs {
    #[command(subcommand)]
    command: ConditionCommand,
}

#[derive(Subcommand, Debug)]
enum ConditionCommand {
    /// Render clauses into a predicate
    Preview {
        /// Clause "<namespace>:<field> <op> <value>", repeatable
        #[arg(long = "clause", value_name = "CLAUSE", required = true)]
        clauses: Vec<String>,
    },

    /// List the fields clauses may use
    Fields {
        /// Only this namespace (t, uts)
        #[arg(short, long)]
        namespace: Option<Namespace>,
    },
}

#[derive(Debug, Serialize)]
struct Preview {
    condition: String,
    issues: Vec<String>,
}

#[derive(Debug, Tabled, Serialize)]
pub struct FieldListItem {
    #[tabled(rename = "Namespace")]
    pub namespace: String,
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Label")]
    pub label: String,
    #[tabled(rename = "Type")]
    pub field_type: String,
}

impl FieldListItem {
    fn new(namespace: Namespace, spec: &FieldSpec) -> Self {
        Self {
            namespace: format!("{} ({})", namespace, namespace.prefix()),
            field: spec.key.clone(),
            label: spec.label.clone(),
            field_type: format!("{:?}", spec.field_type).to_lowercase(),
        }
    }
}

pub async fn execute(args: ConditionArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConditionCommand::Preview { clauses } => preview(ctx, &clauses),
        ConditionCommand::Fields { namespace } => {
            fields(&ctx.catalogs, namespace, ctx.format());
            Ok(())
        }
    }
}

fn preview(ctx: &Context, clauses: &[String]) -> Result<()> {
    let parsed = clauses
        .iter()
        .map(|c| parse_clause(c))
        .collect::<Result<Vec<_>, _>>()?;
    let builder = ConditionBuilder::from_clauses(Arc::clone(&ctx.catalogs), parsed)?;

    let preview = Preview {
        condition: builder.render(),
        issues: builder.issues().iter().map(|i| i.to_string()).collect(),
    };

    match ctx.format() {
        OutputFormat::Json => output::print_json(&preview),
        OutputFormat::Table => {
            println!("{}", preview.condition);
            for issue in &preview.issues {
                output::warning(issue);
            }
        }
    }
    Ok(())
}

pub fn fields(catalogs: &Catalogs, namespace: Option<Namespace>, format: OutputFormat) {
    let namespaces: Vec<Namespace> = match namespace {
        Some(ns) => vec![ns],
        None => Namespace::ALL.to_vec(),
    };
    let rows: Vec<FieldListItem> = namespaces
        .into_iter()
        .flat_map(|ns| {
            catalogs
                .for_namespace(ns)
                .fields()
                .iter()
                .map(move |spec| FieldListItem::new(ns, spec))
        })
        .collect();
    output::print_data(&rows, format);
}
