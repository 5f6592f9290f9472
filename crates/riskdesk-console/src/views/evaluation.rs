//! Evaluation trigger: upload a transaction batch and run the rules

use riskdesk_client::{check_csv_file, AdminApi, ClientError, ClientResult, ViewScope};
use riskdesk_core::EvaluationRequest;
use std::path::Path;
use tracing::{info, warn};

pub const EVALUATION_OK: &str = "Evaluation completed successfully.";
pub const EVALUATION_FAILED: &str = "Error running evaluation.";
pub const UPLOAD_OK: &str = "Transactions uploaded successfully.";
pub const UPLOAD_FAILED: &str = "Error uploading transactions.";

/// Outcome shown after the last action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Success(String),
    Failure(String),
}

impl Status {
    pub fn message(&self) -> &str {
        match self {
            Status::Success(m) | Status::Failure(m) => m,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Status::Failure(_))
    }
}

#[derive(Debug, Default)]
pub struct EvaluationPanel {
    request: EvaluationRequest,
    status: Option<Status>,
    scope: ViewScope,
}

impl EvaluationPanel {
    /// A panel that evaluates every rule against every transaction
    pub fn new() -> Self {
        Self::default()
    }

    /// Narrow the run to specific rules and transactions
    pub fn with_request(request: EvaluationRequest) -> Self {
        Self {
            request,
            ..Self::default()
        }
    }

    pub fn request(&self) -> &EvaluationRequest {
        &self.request
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn close(&self) {
        self.scope.close();
    }

    /// Check the file locally, then upload it
    pub async fn upload(&mut self, api: &dyn AdminApi, path: &Path) -> ClientResult<()> {
        self.status = None;

        if let Err(e) = check_csv_file(path).await {
            self.status = Some(Status::Failure(e.to_string()));
            return Err(e);
        }

        match self.scope.run(api.upload_transactions(path)).await {
            Ok(()) => {
                info!(file = %path.display(), "Upload finished");
                self.status = Some(Status::Success(UPLOAD_OK.to_string()));
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                warn!(error = %e, "Upload failed");
                self.status = Some(Status::Failure(UPLOAD_FAILED.to_string()));
                Err(e)
            }
        }
    }

    /// Trigger a batch evaluation
    pub async fn run(&mut self, api: &dyn AdminApi) -> ClientResult<()> {
        self.status = None;
        match self.scope.run(api.trigger_evaluation(&self.request)).await {
            Ok(()) => {
                self.status = Some(Status::Success(EVALUATION_OK.to_string()));
                Ok(())
            }
            Err(ClientError::Cancelled) => Err(ClientError::Cancelled),
            Err(e) => {
                warn!(error = %e, "Evaluation failed");
                self.status = Some(Status::Failure(EVALUATION_FAILED.to_string()));
                Err(e)
            }
        }
    }

    /// Upload, then evaluate only if the upload went through
    pub async fn upload_and_run(&mut self, api: &dyn AdminApi, path: &Path) -> ClientResult<()> {
        self.upload(api, path).await?;
        self.run(api).await
    }
}
