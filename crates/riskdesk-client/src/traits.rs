//! The backend surface the console talks to
//!
//! Views take `&dyn AdminApi` so tests can substitute the HTTP client.

use async_trait::async_trait;
use riskdesk_core::{
    EvaluationRequest, FlaggedTransaction, NewRule, RecordId, ResultRow, Rule, Transaction,
};
use std::path::Path;

use crate::error::ClientResult;

/// Operations exposed by the rules backend
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `GET /rules`
    async fn list_rules(&self) -> ClientResult<Vec<Rule>>;

    /// `GET /rules/{id}`
    async fn get_rule(&self, id: &RecordId) -> ClientResult<Rule>;

    /// `POST /rules`
    async fn create_rule(&self, rule: &NewRule) -> ClientResult<Rule>;

    /// `PATCH /rules/{id}/toggle-active`
    ///
    /// Returns the updated rule when the backend sends one back.
    async fn toggle_rule_active(&self, id: &RecordId) -> ClientResult<Option<Rule>>;

    /// `GET /transactions`
    async fn list_transactions(&self) -> ClientResult<Vec<Transaction>>;

    /// `POST /upload/transaction` with the file as multipart field `csvFile`
    async fn upload_transactions(&self, path: &Path) -> ClientResult<()>;

    /// `POST /evaluateRule/2.2`
    async fn trigger_evaluation(&self, request: &EvaluationRequest) -> ClientResult<()>;

    /// `GET /evaluateRule/result`
    async fn list_results(&self) -> ClientResult<Vec<ResultRow>>;

    /// `GET /users/flagged/{userId}`
    async fn list_flagged_for_user(&self, user_id: &str) -> ClientResult<Vec<FlaggedTransaction>>;
}
