//! HTTP implementation of [`AdminApi`]
//!
//! Talks JSON to the rules backend over `reqwest`.
//!
//! # Authentication
//!
//! When an API key is configured it is sent on every request:
//!
//! ```text
//! x-api-key: {api_key}
//! ```
//!
//! # Response shapes
//!
//! List endpoints answer `{"data": [...]}`. Single-record endpoints may wrap
//! the record in `{"data": ...}` or return it bare. Error responses may carry
//! a JSON `message`, which is surfaced in [`ClientError::Status`].
//!
//! # Usage
//!
//! ```no_run
//! use riskdesk_client::{AdminApi, ApiClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let api = ApiClient::new(
//!         ClientConfig::new("https://risk.example.com/api").with_api_key("secret"),
//!     )?;
//!
//!     for rule in api.list_rules().await? {
//!         println!("{} {}", rule.id, rule.name);
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use riskdesk_core::{
    EvaluationRequest, FlaggedTransaction, NewRule, RecordId, ResultRow, Rule, Transaction,
};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::traits::AdminApi;
use crate::upload::{check_csv_file, UPLOAD_FIELD};
use crate::wire::{error_message, ListEnvelope, MaybeEnveloped};

/// Header carrying the static API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the rules backend
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// HTTP client for making requests
    client: Client,

    /// Base URL without trailing slash
    base_url: String,

    /// Optional API key
    api_key: Option<String>,
}

impl ApiClient {
    /// Create a client from a validated configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// cannot be built.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
            api_key: config.api_key.filter(|k| !k.is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let mut request = self.client.request(method, self.url(path));
        if let Some(ref key) = self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }
        request
    }

    /// Send a request and turn non-success statuses into errors
    async fn send(&self, request: RequestBuilder, what: &str) -> ClientResult<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(endpoint = what, error = %e, "Request failed");
            ClientError::Transport(format!("Failed to reach {}: {}", what, e))
        })?;

        let status = response.status();
        if status.is_success() {
            debug!(endpoint = what, status = status.as_u16(), "Request succeeded");
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        warn!(
            endpoint = what,
            status = status.as_u16(),
            message = %message,
            "Backend returned error status"
        );
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }

    async fn read_text(response: Response) -> ClientResult<String> {
        response
            .text()
            .await
            .map_err(|e| ClientError::Transport(format!("Failed to read response body: {}", e)))
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
        let body = Self::read_text(response).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> ClientResult<Vec<T>> {
        let response = self.send(self.request(Method::GET, path), path).await?;
        let envelope: ListEnvelope<T> = Self::read_json(response).await?;
        debug!(endpoint = path, count = envelope.data.len(), "Fetched list");
        Ok(envelope.data)
    }
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[async_trait]
impl AdminApi for ApiClient {
    async fn list_rules(&self) -> ClientResult<Vec<Rule>> {
        self.get_list("/rules").await
    }

    async fn get_rule(&self, id: &RecordId) -> ClientResult<Rule> {
        let path = format!("/rules/{}", segment(&id.to_string()));
        let response = self.send(self.request(Method::GET, &path), &path).await?;
        let rule: MaybeEnveloped<Rule> = Self::read_json(response).await?;
        Ok(rule.into_inner())
    }

    async fn create_rule(&self, rule: &NewRule) -> ClientResult<Rule> {
        let response = self
            .send(self.request(Method::POST, "/rules").json(rule), "/rules")
            .await?;
        let created: MaybeEnveloped<Rule> = Self::read_json(response).await?;
        let created = created.into_inner();
        info!(rule_id = %created.id, name = %created.name, "Rule created");
        Ok(created)
    }

    async fn toggle_rule_active(&self, id: &RecordId) -> ClientResult<Option<Rule>> {
        let path = format!("/rules/{}/toggle-active", segment(&id.to_string()));
        let response = self.send(self.request(Method::PATCH, &path), &path).await?;
        let body = Self::read_text(response).await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        // An acknowledgement without a rule record still means success
        match serde_json::from_str::<MaybeEnveloped<Rule>>(&body) {
            Ok(rule) => Ok(Some(rule.into_inner())),
            Err(e) => {
                debug!(rule_id = %id, error = %e, "Toggle response carried no rule");
                Ok(None)
            }
        }
    }

    async fn list_transactions(&self) -> ClientResult<Vec<Transaction>> {
        self.get_list("/transactions").await
    }

    async fn upload_transactions(&self, path: &Path) -> ClientResult<()> {
        let size = check_csv_file(path).await?;
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("transactions.csv")
            .to_string();

        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str("text/csv")?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        self.send(
            self.request(Method::POST, "/upload/transaction").multipart(form),
            "/upload/transaction",
        )
        .await?;
        info!(file = %file_name, bytes = size, "Transactions uploaded");
        Ok(())
    }

    async fn trigger_evaluation(&self, request: &EvaluationRequest) -> ClientResult<()> {
        self.send(
            self.request(Method::POST, "/evaluateRule/2.2").json(request),
            "/evaluateRule/2.2",
        )
        .await?;
        info!(
            rules = request.rule_ids.len(),
            transactions = request.transaction_ids.len(),
            "Evaluation triggered"
        );
        Ok(())
    }

    async fn list_results(&self) -> ClientResult<Vec<ResultRow>> {
        self.get_list("/evaluateRule/result").await
    }

    async fn list_flagged_for_user(&self, user_id: &str) -> ClientResult<Vec<FlaggedTransaction>> {
        let path = format!("/users/flagged/{}", segment(user_id));
        self.get_list(&path).await
    }
}
