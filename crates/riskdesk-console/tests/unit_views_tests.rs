//! Unit tests for the console views
//!
//! HTTP traffic is mocked with mockito; cancellation is exercised with a
//! stub backend that can stall or close the view mid-call.

use async_trait::async_trait;
use mockito::{Matcher, Server};
use riskdesk_client::{AdminApi, ApiClient, ClientConfig, ClientError, ClientResult, ViewScope};
use riskdesk_console::views::{
    rule_form, rules, transactions, EvaluationPanel, ResultsBoard, RuleForm, RulesBoard, Status,
    TransactionsBoard, UserFlaggedView,
};
use riskdesk_core::{
    Catalogs, ClauseEdit, ComparisonOp, EvaluationRequest, FlaggedTransaction, NewRule, RecordId,
    ResultRow, ResultSortKey, Rule, SortDirection, Transaction,
};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

fn api(server: &Server) -> ApiClient {
    ApiClient::new(ClientConfig::new(server.url()).with_api_key("test-key")).unwrap()
}

const TWO_RULES: &str = r#"{"data": [
    {"id": 1, "name": "Large transfer", "condition": "t.trans_amt > 100000",
     "flag_level": "High", "risk_increment": 0.3, "is_active": true},
    {"id": 2, "name": "Night burst", "condition": "uts.burst_trans_count_24h > 10",
     "flag_level": "Medium", "risk_increment": 5, "is_active": false}
]}"#;

// =============================================================================
// Rules board
// =============================================================================

#[tokio::test]
async fn test_rules_load_failure_sets_message() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/rules")
        .with_status(500)
        .create_async()
        .await;

    let mut board = RulesBoard::new();
    assert!(board.load(&api(&server)).await.is_err());
    assert_eq!(board.error(), Some(rules::FETCH_FAILED));
    assert!(board.rules().is_empty());
}

#[tokio::test]
async fn test_failed_toggle_restores_active_flag() {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", "/rules")
        .with_status(200)
        .with_body(TWO_RULES)
        .create_async()
        .await;
    let toggle = server
        .mock("PATCH", "/rules/1/toggle-active")
        .match_header("x-api-key", "test-key")
        .with_status(503)
        .create_async()
        .await;

    let api = api(&server);
    let mut board = RulesBoard::new();
    board.load(&api).await.unwrap();
    let before: Vec<bool> = board.rules().iter().map(|r| r.is_active).collect();

    let err = board.toggle(&api, &RecordId::Int(1)).await.unwrap_err();

    toggle.assert_async().await;
    assert!(matches!(err, ClientError::Status { status: 503, .. }));
    let after: Vec<bool> = board.rules().iter().map(|r| r.is_active).collect();
    assert_eq!(before, after);
    assert_eq!(board.error(), Some(rules::TOGGLE_FAILED));
}

#[tokio::test]
async fn test_successful_toggle_adopts_server_record() {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", "/rules")
        .with_status(200)
        .with_body(TWO_RULES)
        .create_async()
        .await;
    let _toggle = server
        .mock("PATCH", "/rules/2/toggle-active")
        .with_status(200)
        .with_body(
            r#"{"data": {"id": 2, "name": "Night burst", "condition": "uts.burst_trans_count_24h > 10",
                "flag_level": "Medium", "risk_increment": 5, "is_active": true,
                "updated_at": "2024-06-01T08:00:00Z"}}"#,
        )
        .create_async()
        .await;

    let api = api(&server);
    let mut board = RulesBoard::new();
    board.load(&api).await.unwrap();
    board.toggle(&api, &RecordId::Int(2)).await.unwrap();

    let rule = board.rule(&RecordId::Int(2)).unwrap();
    assert!(rule.is_active);
    assert_eq!(rule.updated_at.as_deref(), Some("2024-06-01T08:00:00Z"));
    assert!(board.error().is_none());
}

#[tokio::test]
async fn test_toggle_string_id_rule_by_typed_id() {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", "/rules")
        .with_status(200)
        .with_body(
            r#"{"data": [{"id": "42", "name": "Dormant reactivation",
                "condition": "uts.days_since_last_txn > 180", "flag_level": "Medium",
                "risk_increment": 2, "is_active": true}]}"#,
        )
        .create_async()
        .await;
    let toggle = server
        .mock("PATCH", "/rules/42/toggle-active")
        .with_status(200)
        .with_body("")
        .expect(1)
        .create_async()
        .await;

    let api = api(&server);
    let mut board = RulesBoard::new();
    board.load(&api).await.unwrap();

    let typed: RecordId = "42".parse().unwrap();
    board.toggle(&api, &typed).await.unwrap();

    toggle.assert_async().await;
    assert!(!board.rule(&typed).unwrap().is_active);
    assert!(board.error().is_none());
}

// =============================================================================
// Rule form
// =============================================================================

#[tokio::test]
async fn test_zero_risk_increment_never_reaches_backend() {
    let mut server = Server::new_async().await;
    let post = server
        .mock("POST", "/rules")
        .expect(0)
        .create_async()
        .await;

    let mut form = RuleForm::new();
    form.set_name("Zero risk");
    form.set_condition("t.age > 30");
    form.set_risk_increment("0");

    let err = form.submit(&api(&server)).await.unwrap_err();

    post.assert_async().await;
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(form.error(), Some("Risk increment must be a positive number"));
}

#[tokio::test]
async fn test_builder_form_submits_rendered_condition_and_resets() {
    let mut server = Server::new_async().await;
    let post = server
        .mock("POST", "/rules")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "name": "Senior frequent",
            "condition": "t.age > 30 AND uts.trans_count_30d >= 5",
            "flag_level": "Medium",
            "risk_increment": "2.5"
        })))
        .with_status(201)
        .with_body(
            r#"{"id": 11, "name": "Senior frequent",
                "condition": "t.age > 30 AND uts.trans_count_30d >= 5",
                "flag_level": "Medium", "risk_increment": 2.5, "is_active": true}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let mut form = RuleForm::with_builder(Arc::new(Catalogs::standard()));
    {
        let b = form.builder_mut().unwrap();
        b.update_clause(0, ClauseEdit::Operator(ComparisonOp::Gt)).unwrap();
        b.update_clause(0, ClauseEdit::Literal("30".into())).unwrap();
        b.add_clause();
        b.update_clause(1, ClauseEdit::Namespace(riskdesk_core::Namespace::UserSummary))
            .unwrap();
        b.update_clause(1, ClauseEdit::Field("trans_count_30d".into()))
            .unwrap();
        b.update_clause(1, ClauseEdit::Operator(ComparisonOp::Ge)).unwrap();
        b.update_clause(1, ClauseEdit::Literal("5".into())).unwrap();
    }
    form.set_name(" Senior frequent ");
    form.set_flag_level("Medium");
    form.set_risk_increment("2.5");

    let created = form.submit(&api(&server)).await.unwrap();

    post.assert_async().await;
    assert_eq!(created.id, RecordId::Int(11));
    assert_eq!(form.success(), Some(rule_form::CREATED));
    let draft = form.draft().clone();
    assert_eq!(draft.name, "");
    assert_eq!(draft.flag_level, "Low");
    assert_eq!(form.builder().unwrap().len(), 1);
}

#[tokio::test]
async fn test_form_surfaces_server_message_or_fallback() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/rules")
        .match_body(Matcher::PartialJson(serde_json::json!({"name": "dup"})))
        .with_status(409)
        .with_body(r#"{"message": "Rule name already exists"}"#)
        .create_async()
        .await;
    let _n = server
        .mock("POST", "/rules")
        .match_body(Matcher::PartialJson(serde_json::json!({"name": "boom"})))
        .with_status(500)
        .with_body("")
        .create_async()
        .await;

    let api = api(&server);
    for (name, expected) in [
        ("dup", "Rule name already exists"),
        ("boom", rule_form::CREATE_FAILED),
    ] {
        let mut form = RuleForm::new();
        form.set_name(name);
        form.set_condition("t.age > 30");
        form.set_risk_increment("1");
        assert!(form.submit(&api).await.is_err());
        assert_eq!(form.error(), Some(expected));
        // Draft is kept for correction
        assert_eq!(form.draft().name, name);
    }
}

// =============================================================================
// Transactions
// =============================================================================

#[tokio::test]
async fn test_transactions_sorted_newest_first() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/transactions")
        .with_status(200)
        .with_body(
            r#"{"data": [
                {"id": 1, "trans_time": "2024-01-05T10:00:00Z", "trans_amt": 100},
                {"id": 2, "trans_time": "not a time", "trans_amt": 200},
                {"id": 3, "trans_time": "2024-03-01 09:30:00", "trans_amt": 300},
                {"id": 4, "trans_time": "2024-02-10T00:00:00+05:30", "trans_amt": 400}
            ]}"#,
        )
        .create_async()
        .await;

    let mut board = TransactionsBoard::new();
    board.load(&api(&server)).await.unwrap();

    let ids: Vec<String> = board
        .transactions()
        .iter()
        .map(|t| t.id.to_string())
        .collect();
    assert_eq!(ids, vec!["3", "4", "1", "2"]);
}

#[tokio::test]
async fn test_transactions_failure_message() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/transactions")
        .with_status(502)
        .create_async()
        .await;

    let mut board = TransactionsBoard::new();
    assert!(board.load(&api(&server)).await.is_err());
    assert_eq!(board.error(), Some(transactions::FETCH_FAILED));
}

// =============================================================================
// Evaluation
// =============================================================================

fn csv_file(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("batch.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "id,trans_time,trans_amt").unwrap();
    writeln!(file, "1,2024-03-09 14:05:00,2500").unwrap();
    path
}

#[tokio::test]
async fn test_upload_and_run() {
    let mut server = Server::new_async().await;
    let upload = server
        .mock("POST", "/upload/transaction")
        .with_status(200)
        .create_async()
        .await;
    let evaluate = server
        .mock("POST", "/evaluateRule/2.2")
        .match_body(Matcher::Json(serde_json::json!({
            "ruleIds": [],
            "transactionIds": []
        })))
        .with_status(200)
        .create_async()
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let path = csv_file(dir.path());

    let mut panel = EvaluationPanel::new();
    panel.upload_and_run(&api(&server), &path).await.unwrap();

    upload.assert_async().await;
    evaluate.assert_async().await;
    assert_eq!(
        panel.status(),
        Some(&Status::Success(
            riskdesk_console::views::evaluation::EVALUATION_OK.to_string()
        ))
    );
}

#[tokio::test]
async fn test_failed_upload_skips_evaluation() {
    let mut server = Server::new_async().await;
    let _upload = server
        .mock("POST", "/upload/transaction")
        .with_status(400)
        .with_body(r#"{"message": "bad header row"}"#)
        .create_async()
        .await;
    let evaluate = server
        .mock("POST", "/evaluateRule/2.2")
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let path = csv_file(dir.path());

    let mut panel = EvaluationPanel::new();
    assert!(panel.upload_and_run(&api(&server), &path).await.is_err());

    evaluate.assert_async().await;
    assert!(panel.status().unwrap().is_failure());
}

#[tokio::test]
async fn test_non_csv_rejected_locally() {
    let mut server = Server::new_async().await;
    let upload = server
        .mock("POST", "/upload/transaction")
        .expect(0)
        .create_async()
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("batch.json");
    std::fs::write(&path, "[]").unwrap();

    let mut panel = EvaluationPanel::new();
    let err = panel.upload(&api(&server), &path).await.unwrap_err();

    upload.assert_async().await;
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(panel.status().unwrap().is_failure());
}

#[tokio::test]
async fn test_evaluation_failure_message() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", "/evaluateRule/2.2")
        .match_body(Matcher::PartialJson(serde_json::json!({"ruleIds": [4]})))
        .with_status(500)
        .create_async()
        .await;

    let mut panel = EvaluationPanel::with_request(
        EvaluationRequest::all().with_rules([RecordId::Int(4)]),
    );
    assert!(panel.run(&api(&server)).await.is_err());
    assert_eq!(
        panel.status().map(|s| s.message()),
        Some(riskdesk_console::views::evaluation::EVALUATION_FAILED)
    );
}

// =============================================================================
// Results and drill-down
// =============================================================================

#[tokio::test]
async fn test_results_query_over_loaded_rows() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/evaluateRule/result")
        .with_status(200)
        .with_body(
            r#"{"data": [
                {"username": "meera", "flag": "Low", "transaction_count": 4},
                {"username": "Arjun", "flag": "High", "transaction_count": 12, "user_id": 7},
                {"username": "kabir", "flag": "Medium", "transaction_count": 7}
            ]}"#,
        )
        .create_async()
        .await;

    let mut board = ResultsBoard::with_page_size(2);
    board.load(&api(&server)).await.unwrap();
    board.sort_by(ResultSortKey::TransactionCount, SortDirection::Descending);

    let first = board.page();
    assert_eq!(first.total_pages, 2);
    assert_eq!(first.items[0].username, "Arjun");
    assert_eq!(first.items[0].drill_down_id(), "7");

    board.set_page(2);
    assert_eq!(board.page().items[0].username, "meera");

    board.set_page(5);
    assert!(board.page().is_empty());
}

#[tokio::test]
async fn test_user_view_failure_message() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/users/flagged/99")
        .with_status(404)
        .create_async()
        .await;

    let mut view = UserFlaggedView::new("99");
    assert!(view.load(&api(&server)).await.is_err());
    assert_eq!(view.error(), Some("Failed to fetch user transactions."));
}

#[tokio::test]
async fn test_rule_detail_fetched_once() {
    let mut server = Server::new_async().await;
    let _flagged = server
        .mock("GET", "/users/flagged/7")
        .with_status(200)
        .with_body(
            r#"{"data": [
                {"id": 1, "trans_time": "2024-03-01T00:00:00Z", "trans_amt": 90000, "flag": "High", "rule_id": 3},
                {"id": 2, "trans_time": "2024-03-02T00:00:00Z", "trans_amt": 95000, "flag": "High", "rule_id": 3}
            ]}"#,
        )
        .create_async()
        .await;
    let detail = server
        .mock("GET", "/rules/3")
        .with_status(200)
        .with_body(r#"{"data": {"id": 3, "name": "Large transfer", "condition": "t.trans_amt > 50000"}}"#)
        .expect(1)
        .create_async()
        .await;

    let api = api(&server);
    let mut view = UserFlaggedView::new("7");
    view.load(&api).await.unwrap();
    assert_eq!(view.transactions()[0].transaction.id, RecordId::Int(2));
    assert_eq!(view.referenced_rules(), vec![RecordId::Int(3)]);

    for _ in 0..3 {
        let rule = view.rule_for(&api, &RecordId::Int(3)).await.unwrap();
        assert_eq!(rule.name, "Large transfer");
    }
    detail.assert_async().await;
}

// =============================================================================
// Cancellation
// =============================================================================

/// Backend stub whose rule listing stalls until released
#[derive(Default)]
struct StalledApi {
    release: Notify,
    calls: AtomicUsize,
    /// When set, the stub closes this scope just before answering
    close_on_answer: Option<ViewScope>,
}

fn unused<T>() -> ClientResult<T> {
    Err(ClientError::Transport("not used in this test".to_string()))
}

#[async_trait]
impl AdminApi for StalledApi {
    async fn list_rules(&self) -> ClientResult<Vec<Rule>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(scope) = &self.close_on_answer {
            scope.close();
        } else {
            self.release.notified().await;
        }
        Ok(serde_json::from_str::<serde_json::Value>(TWO_RULES)
            .ok()
            .and_then(|v| serde_json::from_value(v["data"].clone()).ok())
            .unwrap_or_default())
    }

    async fn get_rule(&self, _id: &RecordId) -> ClientResult<Rule> {
        unused()
    }

    async fn create_rule(&self, _rule: &NewRule) -> ClientResult<Rule> {
        unused()
    }

    async fn toggle_rule_active(&self, _id: &RecordId) -> ClientResult<Option<Rule>> {
        unused()
    }

    async fn list_transactions(&self) -> ClientResult<Vec<Transaction>> {
        unused()
    }

    async fn upload_transactions(&self, _path: &Path) -> ClientResult<()> {
        unused()
    }

    async fn trigger_evaluation(&self, _request: &EvaluationRequest) -> ClientResult<()> {
        unused()
    }

    async fn list_results(&self) -> ClientResult<Vec<ResultRow>> {
        unused()
    }

    async fn list_flagged_for_user(&self, _user_id: &str) -> ClientResult<Vec<FlaggedTransaction>> {
        unused()
    }
}

#[tokio::test(start_paused = true)]
async fn test_closing_view_discards_in_flight_load() {
    let api = Arc::new(StalledApi::default());
    let mut board = RulesBoard::new();

    let scope = board.scope().clone();
    let releaser = Arc::clone(&api);
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        scope.close();
        releaser.release.notify_one();
    });

    let err = board.load(api.as_ref()).await.unwrap_err();

    assert!(err.is_cancelled());
    assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    assert!(board.rules().is_empty());
    assert!(board.error().is_none());
}

#[tokio::test]
async fn test_response_after_close_is_not_applied() {
    let mut board = RulesBoard::new();
    let api = StalledApi {
        close_on_answer: Some(board.scope().clone()),
        ..StalledApi::default()
    };

    let err = board.load(&api).await.unwrap_err();

    assert!(err.is_cancelled());
    assert!(board.rules().is_empty());
}

#[tokio::test]
async fn test_closed_view_issues_no_request() {
    let mut server = Server::new_async().await;
    let list = server
        .mock("GET", "/rules")
        .expect(0)
        .create_async()
        .await;

    let mut board = RulesBoard::new();
    board.close();
    assert!(board.load(&api(&server)).await.unwrap_err().is_cancelled());
    list.assert_async().await;
}
