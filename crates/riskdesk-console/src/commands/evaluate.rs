//! Evaluate command - upload a batch and run the rules

use anyhow::Result;
use clap::Args;
use riskdesk_core::{EvaluationRequest, RecordId};
use std::path::PathBuf;

use super::Context;
use crate::output;
use crate::views::{EvaluationPanel, Status};

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// CSV file of transactions to upload before evaluating
    #[arg(long, value_name = "FILE")]
    pub upload: Option<PathBuf>,

    /// Only evaluate these rules (repeatable)
    #[arg(long = "rule", value_name = "ID")]
    pub rules: Vec<RecordId>,

    /// Only evaluate these transactions (repeatable)
    #[arg(long = "transaction", value_name = "ID")]
    pub transactions: Vec<RecordId>,
}

impl EvaluateArgs {
    pub fn request(&self) -> EvaluationRequest {
        EvaluationRequest::all()
            .with_rules(self.rules.iter().cloned())
            .with_transactions(self.transactions.iter().cloned())
    }
}

pub async fn execute(args: EvaluateArgs, ctx: &Context) -> Result<()> {
    let mut panel = EvaluationPanel::with_request(args.request());

    let result = match &args.upload {
        Some(path) => panel.upload_and_run(ctx.api(), path).await,
        None => panel.run(ctx.api()).await,
    };

    match panel.status() {
        Some(Status::Success(message)) => output::success(message),
        Some(Status::Failure(message)) => output::error(message),
        None => {}
    }

    result.map_err(|e| match panel.status() {
        Some(status) if status.is_failure() => anyhow::anyhow!("{} ({})", status.message(), e),
        _ => e.into(),
    })
}
