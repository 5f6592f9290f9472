//! Open command - dispatch a route path to its view

use anyhow::Result;
use clap::Args;
use riskdesk_core::EvaluationRequest;

use super::{condition, results, rules, transactions, Context};
use crate::output;
use crate::routes::Route;

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Route path, e.g. /rules or /results/42
    pub route: Route,
}

pub async fn execute(args: OpenArgs, ctx: &Context) -> Result<()> {
    tracing::debug!(route = %args.route, "Opening view");
    match args.route {
        Route::Rules => rules::list(ctx).await,
        Route::NewRule => {
            output::info("Create a rule with `riskdesk rules create`; available fields:");
            condition::fields(&ctx.catalogs, None, ctx.format());
            Ok(())
        }
        Route::Transactions => transactions::list(ctx, None).await,
        Route::Evaluate => {
            let request = EvaluationRequest::all();
            output::info("Run `riskdesk evaluate` to trigger an evaluation with this payload:");
            output::print_json(&request);
            Ok(())
        }
        Route::Results => results::list(ctx, None, None, 1).await,
        Route::UserResults(user_id) => results::user(ctx, &user_id, false).await,
    }
}
