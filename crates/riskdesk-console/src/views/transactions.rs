//! Transactions browser

use riskdesk_client::{AdminApi, ClientError, ClientResult, ViewScope};
use riskdesk_core::Transaction;
use tracing::{debug, warn};

pub const FETCH_FAILED: &str = "Failed to fetch transactions";

/// Transactions, newest first
#[derive(Debug, Default)]
pub struct TransactionsBoard {
    transactions: Vec<Transaction>,
    error: Option<String>,
    scope: ViewScope,
}

impl TransactionsBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transactions(&self) -> &[Transaction] {
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
        match self.scope.run(api.list_transactions()).await {
            Ok(mut transactions) => {
                transactions.sort_by(Transaction::cmp_newest_first);
                debug!(count = transactions.len(), "Transactions loaded");
                self.transactions = transactions;
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                warn!(error = %e, "Failed to fetch transactions");
                self.error = Some(FETCH_FAILED.to_string());
                Err(e)
            }
        }
    }
}
