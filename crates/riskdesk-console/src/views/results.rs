//! Evaluation results and the per-user drill-down

use riskdesk_client::{AdminApi, ClientError, ClientResult, ViewScope};
use riskdesk_core::{
    FlaggedTransaction, Page, RecordId, ResultQuery, ResultRow, ResultSortKey, Rule,
    SortDirection, Transaction,
};
use std::collections::HashMap;
use tracing::{debug, warn};

pub const RESULTS_FAILED: &str = "Failed to fetch results";
pub const USER_FAILED: &str = "Failed to fetch user transactions.";

/// Flagged users with search, sort and paging
#[derive(Debug, Default)]
pub struct ResultsBoard {
    rows: Vec<ResultRow>,
    query: ResultQuery,
    error: Option<String>,
    scope: ViewScope,
}

impl ResultsBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            query: ResultQuery::new().page_size(page_size),
            ..Self::default()
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn query(&self) -> &ResultQuery {
        &self.query
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn close(&self) {
        self.scope.close();
    }

    pub async fn load(&mut self, api: &dyn AdminApi) -> ClientResult<()> {
        self.error = None;
        match self.scope.run(api.list_results()).await {
            Ok(rows) => {
                debug!(count = rows.len(), "Results loaded");
                self.rows = rows;
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                warn!(error = %e, "Failed to fetch results");
                self.error = Some(RESULTS_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Filter by username; goes back to the first page
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query = std::mem::take(&mut self.query).search(text).page(1);
    }

    pub fn sort_by(&mut self, key: ResultSortKey, direction: SortDirection) {
        self.query = std::mem::take(&mut self.query).sort_by(key, direction);
    }

    pub fn set_page(&mut self, page: usize) {
        self.query.page = page.max(1);
    }

    /// Rows visible under the current query
    pub fn page(&self) -> Page<&ResultRow> {
        self.query.apply(&self.rows)
    }
}

/// Transactions flagged for one user
#[derive(Debug)]
pub struct UserFlaggedView {
    user_id: String,
    transactions: Vec<FlaggedTransaction>,
    /// Rule records fetched so far, kept for the life of the view
    rules: HashMap<RecordId, Rule>,
    error: Option<String>,
    scope: ViewScope,
}

impl UserFlaggedView {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            transactions: Vec::new(),
            rules: HashMap::new(),
            error: None,
            scope: ViewScope::new(),
        }
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn transactions(&self) -> &[FlaggedTransaction] {
        &self.transactions
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn close(&self) {
        self.scope.close();
    }

    pub async fn load(&mut self, api: &dyn AdminApi) -> ClientResult<()> {
        self.error = None;
        match self.scope.run(api.list_flagged_for_user(&self.user_id)).await {
            Ok(mut transactions) => {
                transactions.sort_by(|a, b| {
                    Transaction::cmp_newest_first(&a.transaction, &b.transaction)
                });
                debug!(user_id = %self.user_id, count = transactions.len(), "User transactions loaded");
                self.transactions = transactions;
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                warn!(user_id = %self.user_id, error = %e, "Failed to fetch user transactions");
                self.error = Some(USER_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Rule behind a flag; fetched on first request only
    pub async fn rule_for(&mut self, api: &dyn AdminApi, rule_id: &RecordId) -> ClientResult<&Rule> {
        if !self.rules.contains_key(rule_id) {
            let rule = self.scope.run(api.get_rule(rule_id)).await?;
            debug!(rule_id = %rule_id, "Rule detail cached");
            self.rules.insert(rule_id.clone(), rule);
        }
        self.rules
            .get(rule_id)
            .ok_or_else(|| ClientError::Decode(format!("rule {} missing from cache", rule_id)))
    }

    /// Distinct rule ids referenced by the loaded transactions
    pub fn referenced_rules(&self) -> Vec<RecordId> {
        let mut ids: Vec<RecordId> = Vec::new();
        for id in self.transactions.iter().filter_map(|t| t.rule_id.as_ref()) {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
        ids
    }

    /// A rule fetched earlier through [`rule_for`](Self::rule_for)
    pub fn cached_rule(&self, rule_id: &RecordId) -> Option<&Rule> {
        self.rules.get(rule_id)
    }
}
